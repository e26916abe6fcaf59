//! Epic entity: a large body of work grouping work items.

use super::{EpicId, PlanningDomainError, ProjectId};
use crate::staffing::domain::{PersonId, TeamId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Epic delivery status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpicStatus {
    /// Not started.
    NotStarted,
    /// Being refined in the backlog.
    BacklogRefinement,
    /// Refined and ready to implement.
    ReadyForDev,
    /// Actively implemented.
    Implementing,
    /// In system integration testing.
    Sit,
    /// Final stretch before delivery.
    LastMile,
    /// Delivered.
    Done,
    /// Abandoned.
    Canceled,
}

impl EpicStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::BacklogRefinement => "backlog_refinement",
            Self::ReadyForDev => "ready_for_dev",
            Self::Implementing => "implementing",
            Self::Sit => "sit",
            Self::LastMile => "last_mile",
            Self::Done => "done",
            Self::Canceled => "canceled",
        }
    }
}

impl TryFrom<&str> for EpicStatus {
    type Error = ParseEpicStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "not_started" => Ok(Self::NotStarted),
            "backlog_refinement" => Ok(Self::BacklogRefinement),
            "ready_for_dev" => Ok(Self::ReadyForDev),
            "implementing" => Ok(Self::Implementing),
            "sit" => Ok(Self::Sit),
            "last_mile" => Ok(Self::LastMile),
            "done" => Ok(Self::Done),
            "canceled" => Ok(Self::Canceled),
            _ => Err(ParseEpicStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for EpicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing epic statuses from persistence.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("unknown epic status: {0}")]
pub struct ParseEpicStatusError(pub String);

/// Epic entity.
///
/// An epic belongs to exactly one project and optionally one team. It holds
/// directed dependency edges to other epics and a set of assignee persons;
/// the work items attached to an epic carry the back-reference, so the epic
/// itself stores no item collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epic {
    id: EpicId,
    title: String,
    description: Option<String>,
    status: EpicStatus,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    project: ProjectId,
    team: Option<TeamId>,
    dependencies: Vec<EpicId>,
    assignees: BTreeSet<PersonId>,
}

impl Epic {
    /// Creates a new epic in not-started status.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::EmptyField`] when the title is empty
    /// after trimming.
    pub fn new(project: ProjectId, title: impl Into<String>) -> Result<Self, PlanningDomainError> {
        let raw = title.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PlanningDomainError::EmptyField { field: "title" });
        }
        Ok(Self {
            id: EpicId::new(),
            title: trimmed.to_owned(),
            description: None,
            status: EpicStatus::NotStarted,
            start_date: None,
            end_date: None,
            project,
            team: None,
            dependencies: Vec::new(),
            assignees: BTreeSet::new(),
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the planned date range.
    ///
    /// `start <= end` is expected but not enforced, matching the upstream
    /// data this model was reconciled from.
    #[must_use]
    pub const fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Returns the epic identifier.
    #[must_use]
    pub const fn id(&self) -> EpicId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the delivery status.
    #[must_use]
    pub const fn status(&self) -> EpicStatus {
        self.status
    }

    /// Returns the planned start date, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the planned end date, if any.
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project(&self) -> ProjectId {
        self.project
    }

    /// Returns the assigned team, if any.
    #[must_use]
    pub const fn team(&self) -> Option<TeamId> {
        self.team
    }

    /// Returns the outgoing dependency edges.
    #[must_use]
    pub fn dependencies(&self) -> &[EpicId] {
        &self.dependencies
    }

    /// Returns the assignee set.
    #[must_use]
    pub const fn assignees(&self) -> &BTreeSet<PersonId> {
        &self.assignees
    }

    /// Moves the epic to the given status, unconditionally.
    pub const fn set_status(&mut self, status: EpicStatus) {
        self.status = status;
    }

    /// Cancels the epic.
    pub const fn cancel(&mut self) {
        self.status = EpicStatus::Canceled;
    }

    /// Assigns the epic to a team, replacing any previous assignment.
    pub const fn assign_team(&mut self, team: TeamId) {
        self.team = Some(team);
    }

    /// Clears the team assignment.
    pub const fn clear_team(&mut self) {
        self.team = None;
    }

    /// Adds an assignee; returns `true` when newly added.
    pub fn add_assignee(&mut self, person: PersonId) -> bool {
        self.assignees.insert(person)
    }

    /// Removes an assignee; returns `true` when previously present.
    pub fn remove_assignee(&mut self, person: PersonId) -> bool {
        self.assignees.remove(&person)
    }

    /// Records a dependency edge on another epic.
    ///
    /// Cycles are admitted as advisory metadata; only self-edges and
    /// duplicates are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::SelfDependency`] or
    /// [`PlanningDomainError::DuplicateDependency`].
    pub fn add_dependency(&mut self, other: EpicId) -> Result<(), PlanningDomainError> {
        if other == self.id {
            return Err(PlanningDomainError::SelfDependency);
        }
        if self.dependencies.contains(&other) {
            return Err(PlanningDomainError::DuplicateDependency);
        }
        self.dependencies.push(other);
        Ok(())
    }

    /// Removes a dependency edge if present.
    pub fn remove_dependency(&mut self, other: EpicId) {
        self.dependencies.retain(|dep| *dep != other);
    }
}
