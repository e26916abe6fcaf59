//! Per-sprint resource allocation entity.

use super::{PersonId, ResourceAllocationId, StaffingDomainError};
use crate::planning::domain::{EpicId, SprintId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-negative full-time-equivalent fraction.
///
/// Values above 1.0 are admitted; over-allocation is a reporting concern,
/// not a consistency rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FteFraction(f64);

impl FteFraction {
    /// Creates a validated fraction.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingDomainError::InvalidFte`] for negative or
    /// non-finite values.
    pub fn new(value: f64) -> Result<Self, StaffingDomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(StaffingDomainError::InvalidFte(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for FteFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resource allocation: a person working on an epic during a sprint at a
/// given fraction of full time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceAllocation {
    id: ResourceAllocationId,
    epic: EpicId,
    person: PersonId,
    sprint: SprintId,
    fte: FteFraction,
}

impl ResourceAllocation {
    /// Creates a new resource allocation.
    #[must_use]
    pub fn new(epic: EpicId, person: PersonId, sprint: SprintId, fte: FteFraction) -> Self {
        Self {
            id: ResourceAllocationId::new(),
            epic,
            person,
            sprint,
            fte,
        }
    }

    /// Returns the allocation identifier.
    #[must_use]
    pub const fn id(&self) -> ResourceAllocationId {
        self.id
    }

    /// Returns the epic being worked on.
    #[must_use]
    pub const fn epic(&self) -> EpicId {
        self.epic
    }

    /// Returns the allocated person.
    #[must_use]
    pub const fn person(&self) -> PersonId {
        self.person
    }

    /// Returns the sprint the allocation applies to.
    #[must_use]
    pub const fn sprint(&self) -> SprintId {
        self.sprint
    }

    /// Returns the full-time-equivalent fraction.
    #[must_use]
    pub const fn fte(&self) -> FteFraction {
        self.fte
    }
}
