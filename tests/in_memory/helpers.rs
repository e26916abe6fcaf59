//! Shared test helpers for in-memory integration tests.

use cadence::planning::{
    adapters::InMemoryPlanningRepository,
    domain::{Project, Sprint, WorkItem, WorkItemType},
    services::{AuthoringService, CreateWorkItemRequest, RemovalService, SprintLifecycleService},
};
use cadence::staffing::{
    adapters::InMemoryStaffingRepository,
    services::{AssignmentService, RosterService},
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// The in-memory repositories with every service wired to them.
///
/// Services are cheap handles over the shared repositories, so tests can
/// mix authoring, lifecycle, and staffing operations against one store.
pub struct Stack {
    pub planning: Arc<InMemoryPlanningRepository>,
    pub staffing: Arc<InMemoryStaffingRepository>,
}

impl Stack {
    pub fn authoring(&self) -> AuthoringService<InMemoryPlanningRepository> {
        AuthoringService::new(Arc::clone(&self.planning))
    }

    pub fn lifecycle(&self) -> SprintLifecycleService<InMemoryPlanningRepository> {
        SprintLifecycleService::new(Arc::clone(&self.planning))
    }

    pub fn removal(&self) -> RemovalService<InMemoryPlanningRepository, InMemoryStaffingRepository> {
        RemovalService::new(Arc::clone(&self.planning), Arc::clone(&self.staffing))
    }

    pub fn roster(
        &self,
    ) -> RosterService<InMemoryStaffingRepository, InMemoryPlanningRepository, DefaultClock> {
        RosterService::new(Arc::clone(&self.staffing), Arc::clone(&self.planning), DefaultClock)
    }

    pub fn assignment(
        &self,
    ) -> AssignmentService<InMemoryStaffingRepository, InMemoryPlanningRepository> {
        AssignmentService::new(Arc::clone(&self.staffing), Arc::clone(&self.planning))
    }
}

/// Provides a fresh repository stack for each test.
#[fixture]
pub fn stack() -> Stack {
    Stack {
        planning: Arc::new(InMemoryPlanningRepository::new()),
        staffing: Arc::new(InMemoryStaffingRepository::new()),
    }
}

/// Creates a project with one started sprint.
///
/// # Errors
///
/// Returns an error when project or sprint creation fails.
pub async fn seed_project_with_active_sprint(
    stack: &Stack,
) -> Result<(Project, Sprint), Box<dyn std::error::Error + Send + Sync>> {
    let authoring = stack.authoring();
    let project = authoring.create_project("Seeded project", None).await?;
    let sprint = authoring
        .create_sprint(project.id(), "Iteration 1", None)
        .await?;
    let started = stack.lifecycle().start_sprint(sprint.id()).await?;
    Ok((project, started))
}

/// Creates a backlog work item in the given project.
///
/// # Errors
///
/// Returns an error when creation fails.
pub async fn seed_work_item(
    stack: &Stack,
    project: &Project,
    title: &str,
) -> Result<WorkItem, Box<dyn std::error::Error + Send + Sync>> {
    let request = CreateWorkItemRequest::new(project.id(), title, WorkItemType::Task);
    Ok(stack.authoring().create_work_item(request).await?)
}
