//! Domain model for work-breakdown planning.
//!
//! The planning domain models projects, epics, sprints, and work items as an
//! arena of entities keyed by id, with bidirectional relations stored as
//! id-references on both sides. Every mutation that touches a work item's
//! sprint reference, location, or status flows through the location
//! validator, so the graph can never be observed in an inconsistent state.

mod epic;
mod error;
mod ids;
mod location;
mod project;
mod sprint;
mod work_item;

pub use epic::{Epic, EpicStatus, ParseEpicStatusError};
pub use error::PlanningDomainError;
pub use ids::{EpicId, ProjectId, SprintId, WorkItemId};
pub use location::{WorkItemLocation, validate_location};
pub use project::{Project, ProjectStatus};
pub use sprint::{Sprint, SprintStatus};
pub use work_item::{
    ParseWorkItemStatusError, WorkItem, WorkItemPriority, WorkItemStatus, WorkItemType,
};
