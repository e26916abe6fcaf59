//! Service layer for sprint, epic, and project removal cascades.
//!
//! Removing an aggregate touches entities in both the planning and
//! staffing stores: work items lose their sprint or epic reference, and
//! the cost and person assignments that target removed entities are
//! deleted outright (an assignment without a target would violate target
//! exclusivity). Cleanup is ordered so no intermediate state can be
//! observed with a dangling assignment target.

use crate::planning::{
    domain::{EpicId, PlanningDomainError, ProjectId, SprintId, WorkItem, WorkItemId},
    ports::{PlanningRepository, PlanningRepositoryError, ProjectCascade},
};
use crate::staffing::ports::{StaffingRepository, StaffingRepositoryError};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for removal cascades.
#[derive(Debug, Error)]
pub enum RemovalError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] PlanningDomainError),
    /// Planning repository operation failed.
    #[error(transparent)]
    Planning(#[from] PlanningRepositoryError),
    /// Staffing repository operation failed.
    #[error(transparent)]
    Staffing(#[from] StaffingRepositoryError),
    /// The referenced epic does not exist.
    #[error("epic not found: {0}")]
    EpicNotFound(EpicId),
    /// The referenced sprint does not exist.
    #[error("sprint not found: {0}")]
    SprintNotFound(SprintId),
}

/// Result type for removal service operations.
pub type RemovalResult<T> = Result<T, RemovalError>;

/// Outcome of a sprint removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SprintRemoval {
    /// Work items the sprint still held, now back in the backlog.
    pub detached_items: Vec<WorkItemId>,
    /// Number of resource allocations deleted with the sprint.
    pub removed_allocations: usize,
}

/// Outcome of an epic removal cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpicRemoval {
    /// Work items that survived the epic, now unattached.
    pub detached_items: Vec<WorkItemId>,
    /// Number of cost and person assignments deleted with the epic.
    pub removed_assignments: usize,
    /// Number of resource allocations deleted with the epic.
    pub removed_allocations: usize,
}

/// Outcome of a project removal cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRemoval {
    /// Planning children deleted with the project.
    pub cascade: ProjectCascade,
    /// Number of cost and person assignments deleted transitively.
    pub removed_assignments: usize,
    /// Number of resource allocations deleted transitively.
    pub removed_allocations: usize,
    /// Number of teams deleted with the project.
    pub removed_teams: usize,
}

/// Sprint, epic, and project removal orchestration service.
#[derive(Clone)]
pub struct RemovalService<P, S>
where
    P: PlanningRepository,
    S: StaffingRepository,
{
    planning: Arc<P>,
    staffing: Arc<S>,
}

impl<P, S> RemovalService<P, S>
where
    P: PlanningRepository,
    S: StaffingRepository,
{
    /// Creates a new removal service.
    #[must_use]
    pub const fn new(planning: Arc<P>, staffing: Arc<S>) -> Self {
        Self { planning, staffing }
    }

    /// Deletes a sprint that has not started yet.
    ///
    /// Work items still scheduled into the sprint return to the backlog,
    /// and resource allocations referencing the sprint are removed.
    ///
    /// # Errors
    ///
    /// Returns [`RemovalError::SprintNotFound`] when the sprint does not
    /// exist, or [`PlanningDomainError::SprintAlreadyStarted`] once the
    /// sprint has left not-started status; repository failures are
    /// propagated.
    pub async fn delete_sprint(&self, sprint_id: SprintId) -> RemovalResult<SprintRemoval> {
        let Some(mut sprint) = self.planning.find_sprint(sprint_id).await? else {
            return Err(RemovalError::SprintNotFound(sprint_id));
        };
        sprint.check_deletable()?;

        let mut items = self.planning.work_items_in_sprint(sprint_id).await?;
        for item in &mut items {
            sprint.remove_work_item(item);
        }
        self.planning.update_work_items(&items).await?;

        let removed_allocations = self
            .staffing
            .remove_allocations_for_sprints(&[sprint_id])
            .await?;
        self.planning.delete_sprint(sprint_id).await?;

        Ok(SprintRemoval {
            detached_items: items.iter().map(WorkItem::id).collect(),
            removed_allocations,
        })
    }

    /// Deletes an epic, detaching its work items and removing every
    /// assignment and allocation that targets it.
    ///
    /// Work items survive unattached; assignments do not survive orphaned.
    ///
    /// # Errors
    ///
    /// Returns [`RemovalError::EpicNotFound`] when the epic does not exist;
    /// repository failures are propagated.
    pub async fn delete_epic(&self, epic_id: EpicId) -> RemovalResult<EpicRemoval> {
        if self.planning.find_epic(epic_id).await?.is_none() {
            return Err(RemovalError::EpicNotFound(epic_id));
        }

        let mut items = self.planning.work_items_in_epic(epic_id).await?;
        for item in &mut items {
            item.detach_epic();
        }
        self.planning.update_work_items(&items).await?;

        let epics = [epic_id];
        let removed_assignments = self.staffing.remove_assignments_for_epics(&epics).await?;
        let removed_allocations = self.staffing.remove_allocations_for_epics(&epics).await?;
        self.planning.delete_epic(epic_id).await?;

        Ok(EpicRemoval {
            detached_items: items.iter().map(WorkItem::id).collect(),
            removed_assignments,
            removed_allocations,
        })
    }

    /// Deletes a project and everything it owns: sprints, epics, work
    /// items, the assignments and allocations targeting them, and the
    /// project's teams.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningRepositoryError::ProjectNotFound`] when the
    /// project does not exist; repository failures are propagated.
    pub async fn delete_project(&self, project_id: ProjectId) -> RemovalResult<ProjectRemoval> {
        let cascade = self.planning.delete_project(project_id).await?;

        let mut removed_assignments = self
            .staffing
            .remove_assignments_for_epics(&cascade.epics)
            .await?;
        removed_assignments = removed_assignments.saturating_add(
            self.staffing
                .remove_assignments_for_work_items(&cascade.work_items)
                .await?,
        );
        let mut removed_allocations = self
            .staffing
            .remove_allocations_for_epics(&cascade.epics)
            .await?;
        removed_allocations = removed_allocations.saturating_add(
            self.staffing
                .remove_allocations_for_sprints(&cascade.sprints)
                .await?,
        );
        let removed_teams = self.staffing.remove_teams_of_project(project_id).await?;

        Ok(ProjectRemoval {
            cascade,
            removed_assignments,
            removed_allocations,
            removed_teams,
        })
    }
}
