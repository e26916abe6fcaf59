//! Domain model for staffing and cost attribution.
//!
//! Assignment target exclusivity is modelled structurally: an
//! [`AssignmentTarget`] is an enum over epic or work item, so a persisted
//! assignment can never carry both references or neither. The validator
//! that turns a pair of optional references into a target lives on the enum
//! itself and is the single entry point for creating or retargeting an
//! assignment.

mod assignment;
mod cost;
mod error;
mod ids;
mod person;
mod resource_allocation;
mod team;

pub use assignment::{AllocatedHours, AssignmentTarget, CostAssignment, PersonAssignment};
pub use cost::{Cost, CostAmount};
pub use error::StaffingDomainError;
pub use ids::{
    CostAssignmentId, CostId, PersonAssignmentId, PersonId, ResourceAllocationId, TeamId,
};
pub use person::Person;
pub use resource_allocation::{FteFraction, ResourceAllocation};
pub use team::Team;
