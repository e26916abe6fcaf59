//! Project aggregate root.

use super::{PlanningDomainError, ProjectId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project lifecycle status.
///
/// Transitions between statuses are free-form; there is no guarded state
/// machine at the project level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// The project is being planned and has not started.
    Planning,
    /// The project is actively worked on.
    Active,
    /// The project is archived and read-only by convention.
    Archived,
}

impl ProjectStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project aggregate root.
///
/// A project owns its sprints, epics, and work items: removing a project
/// cascades to those children. Ownership is realised through id-references
/// held by the children, so the project itself only carries identity and
/// descriptive fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    title: String,
    description: Option<String>,
    status: ProjectStatus,
}

impl Project {
    /// Creates a new project in planning status.
    ///
    /// Title uniqueness across projects is enforced by the repository on
    /// store, not here.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::EmptyField`] when the title is empty
    /// after trimming.
    pub fn new(title: impl Into<String>) -> Result<Self, PlanningDomainError> {
        let validated = validated_title(title)?;
        Ok(Self {
            id: ProjectId::new(),
            title: validated,
            description: None,
            status: ProjectStatus::Planning,
        })
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the project description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the project status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Renames the project.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::EmptyField`] when the new title is
    /// empty after trimming.
    pub fn rename(&mut self, title: impl Into<String>) -> Result<(), PlanningDomainError> {
        self.title = validated_title(title)?;
        Ok(())
    }

    /// Replaces the project description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Moves the project to the given status, unconditionally.
    pub const fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
    }
}

fn validated_title(title: impl Into<String>) -> Result<String, PlanningDomainError> {
    let raw = title.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PlanningDomainError::EmptyField { field: "title" });
    }
    Ok(trimmed.to_owned())
}
