//! Team entity.

use super::{PersonId, StaffingDomainError, TeamId};
use crate::planning::domain::ProjectId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Team entity.
///
/// A team belongs to one project and holds a set of member persons. Epics
/// reference teams by id; the team side stores no epic collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: String,
    description: Option<String>,
    project: ProjectId,
    members: BTreeSet<PersonId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Team {
    /// Creates a new empty team.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingDomainError::EmptyField`] when the name is empty
    /// after trimming.
    pub fn new(
        project: ProjectId,
        name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, StaffingDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(StaffingDomainError::EmptyField { field: "name" });
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TeamId::new(),
            name: trimmed.to_owned(),
            description: None,
            project,
            members: BTreeSet::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the team identifier.
    #[must_use]
    pub const fn id(&self) -> TeamId {
        self.id
    }

    /// Returns the team name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project(&self) -> ProjectId {
        self.project
    }

    /// Returns the member set.
    #[must_use]
    pub const fn members(&self) -> &BTreeSet<PersonId> {
        &self.members
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Adds a member; returns `true` when newly added.
    pub fn add_member(&mut self, person: PersonId, clock: &impl Clock) -> bool {
        let added = self.members.insert(person);
        if added {
            self.touch(clock);
        }
        added
    }

    /// Removes a member; returns `true` when previously present.
    pub fn remove_member(&mut self, person: PersonId, clock: &impl Clock) -> bool {
        let removed = self.members.remove(&person);
        if removed {
            self.touch(clock);
        }
        removed
    }

    /// Updates the modification timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
