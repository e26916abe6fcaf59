//! Port contracts for work-breakdown planning.
//!
//! Ports define infrastructure-agnostic interfaces used by planning
//! services.

pub mod repository;

pub use repository::{
    PlanningRepository, PlanningRepositoryError, PlanningRepositoryResult, ProjectCascade,
};
