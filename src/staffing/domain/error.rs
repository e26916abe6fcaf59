//! Error types for staffing domain validation.

use thiserror::Error;

/// Errors returned while constructing or mutating staffing domain values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StaffingDomainError {
    /// An assignment must target exactly one epic or one work item.
    #[error("assignment must target exactly one of epic or work item")]
    TargetExclusivity,

    /// Allocated hours must be a finite non-negative number.
    #[error("allocated hours must be a finite non-negative number, got {0}")]
    InvalidHours(f64),

    /// A cost amount must be a finite non-negative number.
    #[error("cost amount must be a finite non-negative number, got {0}")]
    InvalidAmount(f64),

    /// A full-time-equivalent fraction must be a finite non-negative
    /// number.
    #[error("fte fraction must be a finite non-negative number, got {0}")]
    InvalidFte(f64),

    /// A name or title was empty after trimming.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The email address is not plausibly valid.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}
