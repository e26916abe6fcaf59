//! Repository port for planning entity persistence and querying.

use crate::planning::domain::{
    Epic, EpicId, Project, ProjectId, Sprint, SprintId, WorkItem, WorkItemId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for planning repository operations.
pub type PlanningRepositoryResult<T> = Result<T, PlanningRepositoryError>;

/// Child ids removed by a project deletion cascade.
///
/// Returned so callers can clean up references held outside the planning
/// store (cost and person assignments, resource allocations).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectCascade {
    /// Sprints that were deleted with the project.
    pub sprints: Vec<SprintId>,
    /// Epics that were deleted with the project.
    pub epics: Vec<EpicId>,
    /// Work items that were deleted with the project.
    pub work_items: Vec<WorkItemId>,
}

/// Planning persistence contract.
///
/// Single-entity updates are individually atomic. The batch methods
/// ([`PlanningRepository::update_work_items`],
/// [`PlanningRepository::update_sprints_and_items`], and
/// [`PlanningRepository::store_work_item_in_sprint`]) must apply all of
/// their entities as one unit: either every change becomes visible together
/// or none does. Sprint lifecycle operations rely on this to keep the state
/// transition and the relocated work items consistent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanningRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningRepositoryError::DuplicateProject`] when the id
    /// already exists or
    /// [`PlanningRepositoryError::DuplicateProjectTitle`] when another
    /// project already carries the title.
    async fn store_project(&self, project: &Project) -> PlanningRepositoryResult<()>;

    /// Persists changes to an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningRepositoryError::ProjectNotFound`] when the project
    /// does not exist, or
    /// [`PlanningRepositoryError::DuplicateProjectTitle`] when a rename
    /// collides with another project.
    async fn update_project(&self, project: &Project) -> PlanningRepositoryResult<()>;

    /// Finds a project by id; `None` when absent.
    async fn find_project(&self, id: ProjectId) -> PlanningRepositoryResult<Option<Project>>;

    /// Deletes a project together with its owned sprints, epics, and work
    /// items, atomically, and returns the cascaded child ids.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningRepositoryError::ProjectNotFound`] when the project
    /// does not exist.
    async fn delete_project(&self, id: ProjectId) -> PlanningRepositoryResult<ProjectCascade>;

    /// Stores a new epic.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningRepositoryError::DuplicateEpic`] when the id
    /// already exists.
    async fn store_epic(&self, epic: &Epic) -> PlanningRepositoryResult<()>;

    /// Persists changes to an existing epic.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningRepositoryError::EpicNotFound`] when the epic does
    /// not exist.
    async fn update_epic(&self, epic: &Epic) -> PlanningRepositoryResult<()>;

    /// Finds an epic by id; `None` when absent.
    async fn find_epic(&self, id: EpicId) -> PlanningRepositoryResult<Option<Epic>>;

    /// Deletes an epic record.
    ///
    /// Referential cleanup (detaching work items, removing assignments) is
    /// orchestrated by the removal service, not here.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningRepositoryError::EpicNotFound`] when the epic does
    /// not exist.
    async fn delete_epic(&self, id: EpicId) -> PlanningRepositoryResult<()>;

    /// Stores a new sprint.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningRepositoryError::DuplicateSprint`] when the id
    /// already exists.
    async fn store_sprint(&self, sprint: &Sprint) -> PlanningRepositoryResult<()>;

    /// Persists changes to an existing sprint.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningRepositoryError::SprintNotFound`] when the sprint
    /// does not exist.
    async fn update_sprint(&self, sprint: &Sprint) -> PlanningRepositoryResult<()>;

    /// Finds a sprint by id; `None` when absent.
    async fn find_sprint(&self, id: SprintId) -> PlanningRepositoryResult<Option<Sprint>>;

    /// Deletes a sprint record.
    ///
    /// The not-started guard and referential cleanup (returning contained
    /// work items to the backlog, removing resource allocations) are
    /// orchestrated by the removal service, not here.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningRepositoryError::SprintNotFound`] when the sprint
    /// does not exist.
    async fn delete_sprint(&self, id: SprintId) -> PlanningRepositoryResult<()>;

    /// Stores a new work item.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningRepositoryError::DuplicateWorkItem`] when the id
    /// already exists.
    async fn store_work_item(&self, item: &WorkItem) -> PlanningRepositoryResult<()>;

    /// Persists changes to an existing work item.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningRepositoryError::WorkItemNotFound`] when the item
    /// does not exist.
    async fn update_work_item(&self, item: &WorkItem) -> PlanningRepositoryResult<()>;

    /// Finds a work item by id; `None` when absent.
    async fn find_work_item(&self, id: WorkItemId) -> PlanningRepositoryResult<Option<WorkItem>>;

    /// Stores a new work item and persists its sprint as one atomic unit.
    ///
    /// Used when an item is created straight into a sprint, so the item and
    /// the sprint's collection stay mutual inverses even across a failed
    /// write.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningRepositoryError::DuplicateWorkItem`] when the item
    /// id already exists or [`PlanningRepositoryError::SprintNotFound`]
    /// when the sprint does not; nothing is persisted in either case.
    async fn store_work_item_in_sprint(
        &self,
        item: &WorkItem,
        sprint: &Sprint,
    ) -> PlanningRepositoryResult<()>;

    /// Persists a batch of work items atomically.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningRepositoryError::WorkItemNotFound`] when any item
    /// does not exist; no item is persisted in that case.
    async fn update_work_items(&self, items: &[WorkItem]) -> PlanningRepositoryResult<()>;

    /// Persists sprints and work items as one atomic unit.
    ///
    /// Used by sprint lifecycle operations so the sprint state change and
    /// every relocated work item become visible together.
    ///
    /// # Errors
    ///
    /// Returns the matching not-found error when any entity does not exist;
    /// nothing is persisted in that case.
    async fn update_sprints_and_items(
        &self,
        sprints: &[Sprint],
        items: &[WorkItem],
    ) -> PlanningRepositoryResult<()>;

    /// Returns the sprints belonging to a project.
    async fn sprints_of_project(&self, id: ProjectId) -> PlanningRepositoryResult<Vec<Sprint>>;

    /// Returns the epics belonging to a project.
    async fn epics_of_project(&self, id: ProjectId) -> PlanningRepositoryResult<Vec<Epic>>;

    /// Returns the work items belonging to a project.
    async fn work_items_of_project(
        &self,
        id: ProjectId,
    ) -> PlanningRepositoryResult<Vec<WorkItem>>;

    /// Returns the work items currently located in a sprint.
    async fn work_items_in_sprint(&self, id: SprintId) -> PlanningRepositoryResult<Vec<WorkItem>>;

    /// Returns the work items attached to an epic.
    async fn work_items_in_epic(&self, id: EpicId) -> PlanningRepositoryResult<Vec<WorkItem>>;
}

/// Errors returned by planning repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PlanningRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// Another project already carries the title.
    #[error("duplicate project title: {0}")]
    DuplicateProjectTitle(String),

    /// An epic with the same identifier already exists.
    #[error("duplicate epic identifier: {0}")]
    DuplicateEpic(EpicId),

    /// A sprint with the same identifier already exists.
    #[error("duplicate sprint identifier: {0}")]
    DuplicateSprint(SprintId),

    /// A work item with the same identifier already exists.
    #[error("duplicate work item identifier: {0}")]
    DuplicateWorkItem(WorkItemId),

    /// The project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The epic was not found.
    #[error("epic not found: {0}")]
    EpicNotFound(EpicId),

    /// The sprint was not found.
    #[error("sprint not found: {0}")]
    SprintNotFound(SprintId),

    /// The work item was not found.
    #[error("work item not found: {0}")]
    WorkItemNotFound(WorkItemId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PlanningRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
