//! Service layer for the sprint lifecycle state machine.
//!
//! Orchestrates the domain operations on [`Sprint`] against the planning
//! repository: every operation loads the affected aggregate, applies the
//! domain mutation (which performs all validation before touching any
//! state), and persists the outcome through a single atomic batch update.

use crate::planning::{
    domain::{PlanningDomainError, Sprint, SprintId, WorkItem, WorkItemId},
    ports::{PlanningRepository, PlanningRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for sprint lifecycle operations.
#[derive(Debug, Error)]
pub enum SprintLifecycleError {
    /// Domain validation or state-machine guard failed.
    #[error(transparent)]
    Domain(#[from] PlanningDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] PlanningRepositoryError),
    /// The referenced sprint does not exist.
    #[error("sprint not found: {0}")]
    SprintNotFound(SprintId),
    /// The referenced work item does not exist.
    #[error("work item not found: {0}")]
    WorkItemNotFound(WorkItemId),
}

/// Result type for sprint lifecycle service operations.
pub type SprintLifecycleResult<T> = Result<T, SprintLifecycleError>;

/// Request payload for completing a sprint.
///
/// With no target sprint, unfinished work returns to the backlog; with a
/// target, unfinished work moves into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteSprintRequest {
    sprint_id: SprintId,
    target_sprint_id: Option<SprintId>,
}

impl CompleteSprintRequest {
    /// Completes the sprint, returning unfinished work to the backlog.
    #[must_use]
    pub const fn to_backlog(sprint_id: SprintId) -> Self {
        Self {
            sprint_id,
            target_sprint_id: None,
        }
    }

    /// Completes the sprint, moving unfinished work into `target`.
    #[must_use]
    pub const fn into_sprint(sprint_id: SprintId, target: SprintId) -> Self {
        Self {
            sprint_id,
            target_sprint_id: Some(target),
        }
    }
}

/// Outcome of a sprint completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SprintCompletion {
    /// The completed sprint.
    pub sprint: Sprint,
    /// The target sprint that received unfinished work, if one was given.
    pub target: Option<Sprint>,
    /// Ids of the work items that were relocated.
    pub moved_items: Vec<WorkItemId>,
}

/// Sprint lifecycle orchestration service.
#[derive(Clone)]
pub struct SprintLifecycleService<R>
where
    R: PlanningRepository,
{
    repository: Arc<R>,
}

impl<R> SprintLifecycleService<R>
where
    R: PlanningRepository,
{
    /// Creates a new sprint lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Starts a sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintLifecycleError::SprintNotFound`] for an unknown id,
    /// or a domain error when the sprint is not in not-started status.
    pub async fn start_sprint(&self, sprint_id: SprintId) -> SprintLifecycleResult<Sprint> {
        let mut sprint = self.load_sprint(sprint_id).await?;
        sprint.start()?;
        self.repository.update_sprint(&sprint).await?;
        Ok(sprint)
    }

    /// Adds a work item to a sprint, keeping both sides of the relation in
    /// sync.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for unknown references,
    /// [`PlanningDomainError::SprintClosed`] when the sprint is completed,
    /// or a location validation error; nothing is persisted on failure.
    pub async fn add_work_item(
        &self,
        sprint_id: SprintId,
        work_item_id: WorkItemId,
    ) -> SprintLifecycleResult<(Sprint, WorkItem)> {
        let mut sprint = self.load_sprint(sprint_id).await?;
        let mut item = self.load_work_item(work_item_id).await?;
        sprint.add_work_item(&mut item)?;
        self.repository
            .update_sprints_and_items(std::slice::from_ref(&sprint), std::slice::from_ref(&item))
            .await?;
        Ok((sprint, item))
    }

    /// Removes a work item from a sprint, returning it to the backlog.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for unknown references or a repository
    /// error; the removal itself is unconditional.
    pub async fn remove_work_item(
        &self,
        sprint_id: SprintId,
        work_item_id: WorkItemId,
    ) -> SprintLifecycleResult<(Sprint, WorkItem)> {
        let mut sprint = self.load_sprint(sprint_id).await?;
        let mut item = self.load_work_item(work_item_id).await?;
        sprint.remove_work_item(&mut item);
        self.repository
            .update_sprints_and_items(std::slice::from_ref(&sprint), std::slice::from_ref(&item))
            .await?;
        Ok((sprint, item))
    }

    /// Completes a sprint, relocating its unfinished work items.
    ///
    /// Work items that are done stay attached to the completed sprint.
    /// Unfinished items either return to the backlog or, when the request
    /// names a target sprint, move into that sprint. A request whose target
    /// is the sprint itself closes the sprint with every item left in
    /// place. The sprint state change and every item relocation are
    /// persisted as one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`SprintLifecycleError::SprintNotFound`] for unknown sprint
    /// ids, or a domain error when the source is not active, the target is
    /// completed, or the target belongs to a different project. A failure
    /// leaves every entity unchanged.
    pub async fn complete_sprint(
        &self,
        request: CompleteSprintRequest,
    ) -> SprintLifecycleResult<SprintCompletion> {
        let mut sprint = self.load_sprint(request.sprint_id).await?;
        let mut items = self.repository.work_items_in_sprint(sprint.id()).await?;

        let Some(target_id) = request.target_sprint_id else {
            let moved_items = sprint.complete_to_backlog(&mut items)?;
            self.repository
                .update_sprints_and_items(std::slice::from_ref(&sprint), &items)
                .await?;
            return Ok(SprintCompletion {
                sprint,
                target: None,
                moved_items,
            });
        };

        if target_id == sprint.id() {
            sprint.complete_in_place()?;
            self.repository.update_sprint(&sprint).await?;
            let target = sprint.clone();
            return Ok(SprintCompletion {
                sprint,
                target: Some(target),
                moved_items: Vec::new(),
            });
        }

        let mut target = self.load_sprint(target_id).await?;
        let moved_items = sprint.complete_into(&mut target, &mut items)?;
        self.repository
            .update_sprints_and_items(&[sprint.clone(), target.clone()], &items)
            .await?;
        Ok(SprintCompletion {
            sprint,
            target: Some(target),
            moved_items,
        })
    }

    async fn load_sprint(&self, id: SprintId) -> SprintLifecycleResult<Sprint> {
        self.repository
            .find_sprint(id)
            .await?
            .ok_or(SprintLifecycleError::SprintNotFound(id))
    }

    async fn load_work_item(&self, id: WorkItemId) -> SprintLifecycleResult<WorkItem> {
        self.repository
            .find_work_item(id)
            .await?
            .ok_or(SprintLifecycleError::WorkItemNotFound(id))
    }
}
