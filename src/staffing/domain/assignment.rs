//! Cost and person assignments and their target-exclusivity validator.

use super::{CostAssignmentId, CostId, PersonAssignmentId, PersonId, StaffingDomainError};
use crate::planning::domain::{EpicId, WorkItemId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The single entity an assignment attributes cost or effort to.
///
/// Exactly one of epic or work item, structurally. The
/// [`AssignmentTarget::resolve`] constructor is the assignment validator:
/// it is the only way to turn a pair of optional references (as they arrive
/// from callers) into a target, and it rejects both-present and
/// both-absent. Retargeting replaces the whole value, so the old reference
/// is cleared in the same step that sets the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssignmentTarget {
    /// The assignment targets an epic.
    Epic {
        /// Referenced epic.
        epic: EpicId,
    },
    /// The assignment targets a work item.
    WorkItem {
        /// Referenced work item.
        work_item: WorkItemId,
    },
}

impl AssignmentTarget {
    /// Resolves a pair of optional references into a target.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingDomainError::TargetExclusivity`] when both
    /// references are present or both are absent.
    pub const fn resolve(
        epic: Option<EpicId>,
        work_item: Option<WorkItemId>,
    ) -> Result<Self, StaffingDomainError> {
        match (epic, work_item) {
            (Some(id), None) => Ok(Self::Epic { epic: id }),
            (None, Some(id)) => Ok(Self::WorkItem { work_item: id }),
            (Some(_), Some(_)) | (None, None) => Err(StaffingDomainError::TargetExclusivity),
        }
    }

    /// Returns the targeted epic, if the target is an epic.
    #[must_use]
    pub const fn epic(self) -> Option<EpicId> {
        match self {
            Self::Epic { epic } => Some(epic),
            Self::WorkItem { .. } => None,
        }
    }

    /// Returns the targeted work item, if the target is a work item.
    #[must_use]
    pub const fn work_item(self) -> Option<WorkItemId> {
        match self {
            Self::WorkItem { work_item } => Some(work_item),
            Self::Epic { .. } => None,
        }
    }
}

impl fmt::Display for AssignmentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Epic { epic } => write!(f, "epic {epic}"),
            Self::WorkItem { work_item } => write!(f, "work item {work_item}"),
        }
    }
}

/// Non-negative hours allocated to an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocatedHours(f64);

impl AllocatedHours {
    /// Creates a validated hours value.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingDomainError::InvalidHours`] for negative or
    /// non-finite values.
    pub fn new(value: f64) -> Result<Self, StaffingDomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(StaffingDomainError::InvalidHours(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for AllocatedHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Join entity attributing a cost record to an epic or a work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostAssignment {
    id: CostAssignmentId,
    cost: CostId,
    target: AssignmentTarget,
}

impl CostAssignment {
    /// Creates a new cost assignment.
    #[must_use]
    pub fn new(cost: CostId, target: AssignmentTarget) -> Self {
        Self {
            id: CostAssignmentId::new(),
            cost,
            target,
        }
    }

    /// Returns the assignment identifier.
    #[must_use]
    pub const fn id(&self) -> CostAssignmentId {
        self.id
    }

    /// Returns the attributed cost record.
    #[must_use]
    pub const fn cost(&self) -> CostId {
        self.cost
    }

    /// Returns the assignment target.
    #[must_use]
    pub const fn target(&self) -> AssignmentTarget {
        self.target
    }

    /// Moves the assignment to a new target, atomically replacing the old
    /// reference.
    pub const fn retarget(&mut self, target: AssignmentTarget) {
        self.target = target;
    }
}

/// Join entity attributing a person's effort to an epic or a work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonAssignment {
    id: PersonAssignmentId,
    person: PersonId,
    target: AssignmentTarget,
    hours: Option<AllocatedHours>,
    description: Option<String>,
}

impl PersonAssignment {
    /// Creates a new person assignment with unspecified hours.
    #[must_use]
    pub fn new(person: PersonId, target: AssignmentTarget) -> Self {
        Self {
            id: PersonAssignmentId::new(),
            person,
            target,
            hours: None,
            description: None,
        }
    }

    /// Sets the allocated hours.
    #[must_use]
    pub const fn with_hours(mut self, hours: AllocatedHours) -> Self {
        self.hours = Some(hours);
        self
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the assignment identifier.
    #[must_use]
    pub const fn id(&self) -> PersonAssignmentId {
        self.id
    }

    /// Returns the assigned person.
    #[must_use]
    pub const fn person(&self) -> PersonId {
        self.person
    }

    /// Returns the assignment target.
    #[must_use]
    pub const fn target(&self) -> AssignmentTarget {
        self.target
    }

    /// Returns the allocated hours; `None` means not yet specified.
    #[must_use]
    pub const fn hours(&self) -> Option<AllocatedHours> {
        self.hours
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Moves the assignment to a new target, atomically replacing the old
    /// reference.
    pub const fn retarget(&mut self, target: AssignmentTarget) {
        self.target = target;
    }

    /// Replaces the allocated hours.
    pub const fn set_hours(&mut self, hours: Option<AllocatedHours>) {
        self.hours = hours;
    }
}
