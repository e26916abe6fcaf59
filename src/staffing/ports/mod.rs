//! Port contracts for staffing and cost attribution.
//!
//! Ports define infrastructure-agnostic interfaces used by staffing
//! services.

pub mod repository;

pub use repository::{StaffingRepository, StaffingRepositoryError, StaffingRepositoryResult};
