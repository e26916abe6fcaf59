//! Work item entity and its location-preserving mutators.

use super::{
    EpicId, PlanningDomainError, ProjectId, SprintId, WorkItemId, WorkItemLocation,
    validate_location,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Work item completion status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemStatus {
    /// Not started.
    Todo,
    /// Actively worked on.
    InProgress,
    /// Finished.
    Done,
}

impl WorkItemStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Returns `true` when the status counts as unfinished for sprint
    /// completion purposes.
    #[must_use]
    pub const fn is_incomplete(self) -> bool {
        matches!(self, Self::Todo | Self::InProgress)
    }
}

impl TryFrom<&str> for WorkItemStatus {
    type Error = ParseWorkItemStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseWorkItemStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for WorkItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing work item statuses from persistence.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("unknown work item status: {0}")]
pub struct ParseWorkItemStatusError(pub String);

/// Work item scheduling priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemPriority {
    /// Can wait.
    Low,
    /// Default priority.
    Medium,
    /// Should be picked up soon.
    High,
    /// Blocks other work.
    Critical,
}

/// Work item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemType {
    /// Generic unit of work.
    Task,
    /// User-facing story.
    Story,
    /// Defect.
    Bug,
}

/// Work item entity.
///
/// A work item belongs to exactly one project, optionally one sprint, and
/// optionally one epic. Its `location` tag is derived state: the mutators on
/// this type are the only code that changes `location`, `sprint`, or
/// `status`, and each of them re-runs [`validate_location`] before applying
/// the change, so invariant violations are rejected without partial
/// mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    id: WorkItemId,
    title: String,
    description: Option<String>,
    status: WorkItemStatus,
    priority: WorkItemPriority,
    item_type: WorkItemType,
    story_points: Option<u32>,
    location: WorkItemLocation,
    project: ProjectId,
    sprint: Option<SprintId>,
    epic: Option<EpicId>,
    dependencies: Vec<WorkItemId>,
}

impl WorkItem {
    /// Creates a new backlog work item in todo status.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::EmptyField`] when the title is empty
    /// after trimming.
    pub fn new(
        project: ProjectId,
        title: impl Into<String>,
        item_type: WorkItemType,
    ) -> Result<Self, PlanningDomainError> {
        let raw = title.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PlanningDomainError::EmptyField { field: "title" });
        }
        Ok(Self {
            id: WorkItemId::new(),
            title: trimmed.to_owned(),
            description: None,
            status: WorkItemStatus::Todo,
            priority: WorkItemPriority::Medium,
            item_type,
            story_points: None,
            location: WorkItemLocation::Backlog,
            project,
            sprint: None,
            epic: None,
            dependencies: Vec::new(),
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: WorkItemPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the story point estimate.
    #[must_use]
    pub const fn with_story_points(mut self, points: u32) -> Self {
        self.story_points = Some(points);
        self
    }

    /// Returns the work item identifier.
    #[must_use]
    pub const fn id(&self) -> WorkItemId {
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

    /// Returns the completion status.
    #[must_use]
    pub const fn status(&self) -> WorkItemStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> WorkItemPriority {
        self.priority
    }

    /// Returns the work item kind.
    #[must_use]
    pub const fn item_type(&self) -> WorkItemType {
        self.item_type
    }

    /// Returns the story point estimate, if any.
    #[must_use]
    pub const fn story_points(&self) -> Option<u32> {
        self.story_points
    }

    /// Returns the current location tag.
    #[must_use]
    pub const fn location(&self) -> WorkItemLocation {
        self.location
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project(&self) -> ProjectId {
        self.project
    }

    /// Returns the sprint the item is scheduled into, if any.
    #[must_use]
    pub const fn sprint(&self) -> Option<SprintId> {
        self.sprint
    }

    /// Returns the epic the item is attached to, if any.
    #[must_use]
    pub const fn epic(&self) -> Option<EpicId> {
        self.epic
    }

    /// Returns the outgoing dependency edges.
    #[must_use]
    pub fn dependencies(&self) -> &[WorkItemId] {
        &self.dependencies
    }

    /// Changes the completion status.
    ///
    /// Demoting a done item that sits in the completed location moves it
    /// back to the location implied by its sprint reference, so the location
    /// invariant keeps holding.
    ///
    /// # Errors
    ///
    /// Returns a location validation error when the resulting combination
    /// would be inconsistent; the item is left unchanged in that case.
    pub fn set_status(&mut self, status: WorkItemStatus) -> Result<(), PlanningDomainError> {
        let location = if self.location == WorkItemLocation::Completed && status.is_incomplete() {
            self.implied_location()
        } else {
            self.location
        };
        validate_location(location, self.sprint, status)?;
        self.status = status;
        self.location = location;
        Ok(())
    }

    /// Marks the item done and archives it into the completed location.
    pub const fn complete(&mut self) {
        self.status = WorkItemStatus::Done;
        self.location = WorkItemLocation::Completed;
    }

    /// Schedules the item into the given sprint.
    ///
    /// Callers go through [`super::Sprint::add_work_item`] so both sides of
    /// the relation stay in sync; this method only maintains the item-side
    /// fields.
    ///
    /// # Errors
    ///
    /// Returns a location validation error when the resulting combination
    /// would be inconsistent; the item is left unchanged in that case.
    pub(crate) fn move_to_sprint(&mut self, sprint: SprintId) -> Result<(), PlanningDomainError> {
        validate_location(WorkItemLocation::Sprint, Some(sprint), self.status)?;
        self.sprint = Some(sprint);
        self.location = WorkItemLocation::Sprint;
        Ok(())
    }

    /// Returns the item to the backlog, clearing its sprint reference.
    ///
    /// The resulting combination always passes the location validator.
    pub(crate) fn move_to_backlog(&mut self) {
        self.sprint = None;
        self.location = WorkItemLocation::Backlog;
    }

    /// Attaches the item to an epic.
    pub const fn attach_epic(&mut self, epic: EpicId) {
        self.epic = Some(epic);
    }

    /// Detaches the item from its epic, if any.
    pub const fn detach_epic(&mut self) {
        self.epic = None;
    }

    /// Records a dependency edge on another work item.
    ///
    /// Cycles are admitted as advisory metadata; only self-edges and
    /// duplicates are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::SelfDependency`] or
    /// [`PlanningDomainError::DuplicateDependency`].
    pub fn add_dependency(&mut self, other: WorkItemId) -> Result<(), PlanningDomainError> {
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
    pub fn remove_dependency(&mut self, other: WorkItemId) {
        self.dependencies.retain(|dep| *dep != other);
    }

    /// Location implied by the sprint reference alone.
    const fn implied_location(&self) -> WorkItemLocation {
        if self.sprint.is_some() {
            WorkItemLocation::Sprint
        } else {
            WorkItemLocation::Backlog
        }
    }
}
