//! Person entity.

use super::{PersonId, StaffingDomainError};
use serde::{Deserialize, Serialize};

/// Person entity.
///
/// Email uniqueness across persons is enforced by the repository on store;
/// the domain only checks structural plausibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    name: String,
    email: String,
    role: Option<String>,
}

impl Person {
    /// Creates a new person.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingDomainError::EmptyField`] when the name is empty
    /// after trimming, or [`StaffingDomainError::InvalidEmail`] when the
    /// email has no local part or domain.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, StaffingDomainError> {
        let raw_name = name.into();
        let trimmed_name = raw_name.trim();
        if trimmed_name.is_empty() {
            return Err(StaffingDomainError::EmptyField { field: "name" });
        }
        let validated_email = validated_email(email)?;
        Ok(Self {
            id: PersonId::new(),
            name: trimmed_name.to_owned(),
            email: validated_email,
            role: None,
        })
    }

    /// Sets the role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Returns the person identifier.
    #[must_use]
    pub const fn id(&self) -> PersonId {
        self.id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the role, if any.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Replaces the role.
    pub fn set_role(&mut self, role: Option<String>) {
        self.role = role;
    }

    /// Replaces the email address.
    ///
    /// Uniqueness against other persons is enforced by the repository on
    /// update.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingDomainError::InvalidEmail`] when the email has no
    /// local part or domain.
    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), StaffingDomainError> {
        self.email = validated_email(email)?;
        Ok(())
    }
}

fn validated_email(email: impl Into<String>) -> Result<String, StaffingDomainError> {
    let raw = email.into();
    let trimmed = raw.trim();
    let mut parts = trimmed.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    let has_more = parts.next().is_some();
    if local.is_empty() || domain.is_empty() || has_more {
        return Err(StaffingDomainError::InvalidEmail(raw));
    }
    Ok(trimmed.to_owned())
}
