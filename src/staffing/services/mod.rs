//! Orchestration services for the staffing context.

mod assignment;
mod roster;

pub use assignment::{
    AssignPersonRequest, AssignmentError, AssignmentResult, AssignmentService,
};
pub use roster::{RosterError, RosterResult, RosterService};
