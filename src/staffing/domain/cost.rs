//! Cost record entity.

use super::{CostId, StaffingDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-negative monetary amount attached to a cost record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostAmount(f64);

impl CostAmount {
    /// Creates a validated amount.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingDomainError::InvalidAmount`] for negative or
    /// non-finite values.
    pub fn new(value: f64) -> Result<Self, StaffingDomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(StaffingDomainError::InvalidAmount(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for CostAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cost record.
///
/// A cost is attributed to an epic or a work item through a
/// [`super::CostAssignment`]; the record itself carries only descriptive
/// fields. An absent amount means "not yet specified" and is exempt from
/// the non-negativity rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    id: CostId,
    name: String,
    description: Option<String>,
    amount: Option<CostAmount>,
    category: Option<String>,
}

impl Cost {
    /// Creates a new cost record with unspecified amount.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingDomainError::EmptyField`] when the name is empty
    /// after trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, StaffingDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(StaffingDomainError::EmptyField { field: "name" });
        }
        Ok(Self {
            id: CostId::new(),
            name: trimmed.to_owned(),
            description: None,
            amount: None,
            category: None,
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the amount.
    #[must_use]
    pub const fn with_amount(mut self, amount: CostAmount) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Returns the cost identifier.
    #[must_use]
    pub const fn id(&self) -> CostId {
        self.id
    }

    /// Returns the cost name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the amount; `None` means not yet specified.
    #[must_use]
    pub const fn amount(&self) -> Option<CostAmount> {
        self.amount
    }

    /// Returns the category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Replaces the amount.
    pub const fn set_amount(&mut self, amount: Option<CostAmount>) {
        self.amount = amount;
    }
}
