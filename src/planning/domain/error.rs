//! Error types for planning domain validation.

use super::{ProjectId, SprintId, SprintStatus, WorkItemId, WorkItemStatus};
use thiserror::Error;

/// Errors returned while validating or mutating planning domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanningDomainError {
    /// A title or name was empty after trimming.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A work item claims the sprint location without a sprint reference.
    #[error("work item in sprint location must reference a sprint")]
    DanglingSprintLocation,

    /// A work item references a sprint while claiming the backlog location.
    #[error("work item referencing a sprint cannot be in the backlog")]
    InconsistentBacklogLocation,

    /// A work item claims the completed location without being done.
    #[error("completed work item must have done status, found {status}")]
    IncompleteCompletedItem {
        /// Status the work item actually carries.
        status: WorkItemStatus,
    },

    /// The requested sprint state change is not permitted.
    #[error("invalid sprint transition for {sprint_id}: {from} -> {to}")]
    InvalidSprintTransition {
        /// Sprint whose transition was rejected.
        sprint_id: SprintId,
        /// Current state.
        from: SprintStatus,
        /// Requested state.
        to: SprintStatus,
    },

    /// Only sprints that have not started may be deleted.
    #[error("sprint {sprint_id} cannot be deleted in {status} status")]
    SprintAlreadyStarted {
        /// Sprint whose deletion was rejected.
        sprint_id: SprintId,
        /// Status the sprint actually carries.
        status: SprintStatus,
    },

    /// Work items cannot be added to a completed sprint.
    #[error("sprint {0} is completed and no longer accepts work items")]
    SprintClosed(SprintId),

    /// Unfinished work cannot be moved into a completed sprint.
    #[error("target sprint {0} is completed and cannot receive work items")]
    TargetSprintClosed(SprintId),

    /// The target sprint belongs to a different project than the source.
    #[error("cannot move work items across projects: {source_project} -> {target_project}")]
    CrossProjectTransfer {
        /// Project owning the source sprint.
        source_project: ProjectId,
        /// Project owning the target sprint.
        target_project: ProjectId,
    },

    /// A work item not belonging to the sprint was offered for relocation.
    #[error("work item {work_item} is not part of sprint {sprint_id}")]
    ForeignWorkItem {
        /// Sprint performing the relocation.
        sprint_id: SprintId,
        /// Work item that does not belong to it.
        work_item: WorkItemId,
    },

    /// A dependency edge would point an entity at itself.
    #[error("entity cannot depend on itself")]
    SelfDependency,

    /// The dependency edge already exists.
    #[error("dependency edge already recorded")]
    DuplicateDependency,
}
