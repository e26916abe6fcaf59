//! Sprint entity and the sprint lifecycle state machine.

use super::{PlanningDomainError, ProjectId, SprintId, WorkItem, WorkItemId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sprint lifecycle state.
///
/// A sprint only ever moves forward: `NotStarted -> Active -> Completed`,
/// with `Completed` terminal. Completion is deliberately not idempotent, so
/// callers cannot blindly retry a close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprintStatus {
    /// The sprint has been planned but not started.
    NotStarted,
    /// The sprint is running.
    Active,
    /// The sprint has been closed.
    Completed,
}

impl SprintStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Returns whether the state machine permits moving to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::NotStarted, Self::Active) | (Self::Active, Self::Completed)
        )
    }

    /// Returns `true` for the terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sprint entity.
///
/// The sprint keeps the owning side of the sprint/work-item relation as a
/// list of work item ids; [`Sprint::add_work_item`] and
/// [`Sprint::remove_work_item`] update both sides together so neither
/// direction can dangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    id: SprintId,
    name: String,
    goal: Option<String>,
    status: SprintStatus,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    project: ProjectId,
    work_items: Vec<WorkItemId>,
}

impl Sprint {
    /// Creates a new sprint in not-started status.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::EmptyField`] when the name is empty
    /// after trimming.
    pub fn new(project: ProjectId, name: impl Into<String>) -> Result<Self, PlanningDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PlanningDomainError::EmptyField { field: "name" });
        }
        Ok(Self {
            id: SprintId::new(),
            name: trimmed.to_owned(),
            goal: None,
            status: SprintStatus::NotStarted,
            start_date: None,
            end_date: None,
            project,
            work_items: Vec::new(),
        })
    }

    /// Sets the sprint goal.
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    /// Sets the planned date range.
    #[must_use]
    pub const fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Returns the sprint identifier.
    #[must_use]
    pub const fn id(&self) -> SprintId {
        self.id
    }

    /// Returns the sprint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sprint goal, if any.
    #[must_use]
    pub fn goal(&self) -> Option<&str> {
        self.goal.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> SprintStatus {
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

    /// Returns the ids of work items currently located in the sprint.
    #[must_use]
    pub fn work_items(&self) -> &[WorkItemId] {
        &self.work_items
    }

    /// Returns `true` when the given work item is part of the sprint.
    #[must_use]
    pub fn contains(&self, work_item: WorkItemId) -> bool {
        self.work_items.contains(&work_item)
    }

    /// Starts the sprint.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::InvalidSprintTransition`] unless the
    /// sprint is in not-started status.
    pub const fn start(&mut self) -> Result<(), PlanningDomainError> {
        if !matches!(self.status, SprintStatus::NotStarted) {
            return Err(PlanningDomainError::InvalidSprintTransition {
                sprint_id: self.id,
                from: self.status,
                to: SprintStatus::Active,
            });
        }
        self.status = SprintStatus::Active;
        Ok(())
    }

    /// Checks whether the sprint may still be deleted.
    ///
    /// Only sprints that have not started can be deleted.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::SprintAlreadyStarted`] once the
    /// sprint has left not-started status.
    pub const fn check_deletable(&self) -> Result<(), PlanningDomainError> {
        if matches!(self.status, SprintStatus::NotStarted) {
            Ok(())
        } else {
            Err(PlanningDomainError::SprintAlreadyStarted {
                sprint_id: self.id,
                status: self.status,
            })
        }
    }

    /// Adds a work item to the sprint, updating both sides of the relation.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::SprintClosed`] when the sprint is
    /// completed, or a location validation error from the item side. Neither
    /// the sprint nor the item is mutated on failure.
    pub fn add_work_item(&mut self, item: &mut WorkItem) -> Result<(), PlanningDomainError> {
        if self.status == SprintStatus::Completed {
            return Err(PlanningDomainError::SprintClosed(self.id));
        }
        item.move_to_sprint(self.id)?;
        if !self.work_items.contains(&item.id()) {
            self.work_items.push(item.id());
        }
        Ok(())
    }

    /// Removes a work item from the sprint, returning it to the backlog.
    ///
    /// Unconditional: the resulting item state always passes the location
    /// validator.
    pub fn remove_work_item(&mut self, item: &mut WorkItem) {
        self.work_items.retain(|id| *id != item.id());
        item.move_to_backlog();
    }

    /// Completes the sprint, moving every unfinished work item back to the
    /// backlog.
    ///
    /// `items` must be the work items currently located in this sprint. Done
    /// items stay attached to the sprint and keep their sprint reference;
    /// items with todo or in-progress status are removed. An empty
    /// incomplete set is valid and still performs the state transition.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::InvalidSprintTransition`] unless the
    /// sprint is active, or [`PlanningDomainError::ForeignWorkItem`] when an
    /// item does not belong to the sprint. All checks run before any
    /// mutation, so a failure leaves every entity untouched.
    pub fn complete_to_backlog(
        &mut self,
        items: &mut [WorkItem],
    ) -> Result<Vec<WorkItemId>, PlanningDomainError> {
        self.check_completable(items)?;
        let moved = self.relocate_incomplete(items, None)?;
        self.status = SprintStatus::Completed;
        Ok(moved)
    }

    /// Completes the sprint, moving every unfinished work item into
    /// `target`.
    ///
    /// Each unfinished item is first removed from this sprint and then added
    /// to the target, so the net effect is a sprint location with the target
    /// sprint reference. Done items stay attached to this sprint.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::InvalidSprintTransition`] unless the
    /// sprint is active, [`PlanningDomainError::CrossProjectTransfer`] when
    /// the target belongs to another project,
    /// [`PlanningDomainError::TargetSprintClosed`] when the target is
    /// completed, or [`PlanningDomainError::ForeignWorkItem`] for items not
    /// in this sprint. All checks run before any mutation.
    pub fn complete_into(
        &mut self,
        target: &mut Self,
        items: &mut [WorkItem],
    ) -> Result<Vec<WorkItemId>, PlanningDomainError> {
        self.check_completable(items)?;
        if target.project != self.project {
            return Err(PlanningDomainError::CrossProjectTransfer {
                source_project: self.project,
                target_project: target.project,
            });
        }
        if target.status == SprintStatus::Completed {
            return Err(PlanningDomainError::TargetSprintClosed(target.id));
        }
        let moved = self.relocate_incomplete(items, Some(target))?;
        self.status = SprintStatus::Completed;
        Ok(moved)
    }

    /// Completes the sprint without relocating any of its work items.
    ///
    /// Used when a completion names the sprint itself as the target: every
    /// item keeps its sprint reference and its slot in the collection.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::InvalidSprintTransition`] unless the
    /// sprint is active.
    pub const fn complete_in_place(&mut self) -> Result<(), PlanningDomainError> {
        if !matches!(self.status, SprintStatus::Active) {
            return Err(PlanningDomainError::InvalidSprintTransition {
                sprint_id: self.id,
                from: self.status,
                to: SprintStatus::Completed,
            });
        }
        self.status = SprintStatus::Completed;
        Ok(())
    }

    /// Guards shared by both completion variants.
    fn check_completable(&self, items: &[WorkItem]) -> Result<(), PlanningDomainError> {
        if self.status != SprintStatus::Active {
            return Err(PlanningDomainError::InvalidSprintTransition {
                sprint_id: self.id,
                from: self.status,
                to: SprintStatus::Completed,
            });
        }
        items
            .iter()
            .find(|item| !self.contains(item.id()))
            .map_or(Ok(()), |foreign| {
                Err(PlanningDomainError::ForeignWorkItem {
                    sprint_id: self.id,
                    work_item: foreign.id(),
                })
            })
    }

    /// Moves every unfinished item out of this sprint, optionally into a
    /// target sprint, and returns the ids that were moved.
    ///
    /// Relocation into the target cannot fail once the completion guards
    /// have passed: removal leaves each item in the backlog, and adding a
    /// backlog item to a non-completed sprint always passes the location
    /// validator.
    fn relocate_incomplete(
        &mut self,
        items: &mut [WorkItem],
        mut target: Option<&mut Self>,
    ) -> Result<Vec<WorkItemId>, PlanningDomainError> {
        let mut moved = Vec::new();
        for item in items
            .iter_mut()
            .filter(|item| item.status().is_incomplete())
        {
            self.remove_work_item(item);
            if let Some(sprint) = target.as_deref_mut() {
                sprint.add_work_item(item)?;
            }
            moved.push(item.id());
        }
        Ok(moved)
    }
}
