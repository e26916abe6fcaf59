//! Work item location tag and its consistency validator.

use super::{PlanningDomainError, SprintId, WorkItemStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Denormalized tag describing where a work item currently lives.
///
/// The tag must always agree with the presence of a sprint reference and
/// with the item's status; [`validate_location`] is the single place that
/// rule is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemLocation {
    /// The item sits in the project backlog, unattached to any sprint.
    Backlog,
    /// The item is scheduled into a sprint.
    Sprint,
    /// The item is done and archived out of the active board.
    Completed,
}

impl WorkItemLocation {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Sprint => "sprint",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for WorkItemLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks that a location tag is consistent with a sprint reference and a
/// work item status.
///
/// Invoked by every domain mutation that changes `location`, `sprint`, or
/// `status`, and by the sprint lifecycle for every work item it relocates.
/// An item referencing a sprint may be in the sprint or completed location,
/// never the backlog.
///
/// # Errors
///
/// Returns [`PlanningDomainError::DanglingSprintLocation`],
/// [`PlanningDomainError::InconsistentBacklogLocation`], or
/// [`PlanningDomainError::IncompleteCompletedItem`] when the combination is
/// inconsistent.
pub const fn validate_location(
    location: WorkItemLocation,
    sprint: Option<SprintId>,
    status: WorkItemStatus,
) -> Result<(), PlanningDomainError> {
    match location {
        WorkItemLocation::Sprint => {
            if sprint.is_none() {
                return Err(PlanningDomainError::DanglingSprintLocation);
            }
        }
        WorkItemLocation::Backlog => {
            if sprint.is_some() {
                return Err(PlanningDomainError::InconsistentBacklogLocation);
            }
        }
        WorkItemLocation::Completed => {
            if !matches!(status, WorkItemStatus::Done) {
                return Err(PlanningDomainError::IncompleteCompletedItem { status });
            }
        }
    }
    Ok(())
}
