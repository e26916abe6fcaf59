//! Service layer for cost attribution, person assignments, and per-sprint
//! resource allocation.
//!
//! Every operation that references a planning entity checks the reference
//! before writing, so a stored assignment always points at something that
//! existed when it was made. Target exclusivity is enforced by
//! [`AssignmentTarget::resolve`]; the service never builds a target any
//! other way.

use crate::planning::{
    domain::{EpicId, SprintId, WorkItemId},
    ports::{PlanningRepository, PlanningRepositoryError},
};
use crate::staffing::{
    domain::{
        AllocatedHours, AssignmentTarget, Cost, CostAmount, CostAssignment, CostAssignmentId,
        CostId, FteFraction, PersonAssignment, PersonAssignmentId, PersonId, ResourceAllocation,
        StaffingDomainError,
    },
    ports::{StaffingRepository, StaffingRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for assignment operations.
#[derive(Debug, Error)]
pub enum AssignmentError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] StaffingDomainError),
    /// Staffing repository operation failed.
    #[error(transparent)]
    Staffing(#[from] StaffingRepositoryError),
    /// Planning repository operation failed.
    #[error(transparent)]
    Planning(#[from] PlanningRepositoryError),
    /// The referenced epic does not exist.
    #[error("epic not found: {0}")]
    EpicNotFound(EpicId),
    /// The referenced work item does not exist.
    #[error("work item not found: {0}")]
    WorkItemNotFound(WorkItemId),
    /// The referenced sprint does not exist.
    #[error("sprint not found: {0}")]
    SprintNotFound(SprintId),
    /// The referenced person does not exist.
    #[error("person not found: {0}")]
    PersonNotFound(PersonId),
    /// The referenced cost record does not exist.
    #[error("cost not found: {0}")]
    CostNotFound(CostId),
    /// The referenced cost assignment does not exist.
    #[error("cost assignment not found: {0}")]
    CostAssignmentNotFound(CostAssignmentId),
    /// The referenced person assignment does not exist.
    #[error("person assignment not found: {0}")]
    PersonAssignmentNotFound(PersonAssignmentId),
}

/// Result type for assignment service operations.
pub type AssignmentResult<T> = Result<T, AssignmentError>;

/// Request payload for assigning a person to an epic or a work item.
///
/// Exactly one of [`Self::to_epic`] and [`Self::to_work_item`] must be
/// called; the target is resolved when the request is executed.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignPersonRequest {
    person: PersonId,
    epic: Option<EpicId>,
    work_item: Option<WorkItemId>,
    hours: Option<AllocatedHours>,
    description: Option<String>,
}

impl AssignPersonRequest {
    /// Creates a request with no target yet.
    #[must_use]
    pub const fn new(person: PersonId) -> Self {
        Self {
            person,
            epic: None,
            work_item: None,
            hours: None,
            description: None,
        }
    }

    /// Targets the assignment at an epic.
    #[must_use]
    pub const fn to_epic(mut self, epic: EpicId) -> Self {
        self.epic = Some(epic);
        self
    }

    /// Targets the assignment at a work item.
    #[must_use]
    pub const fn to_work_item(mut self, work_item: WorkItemId) -> Self {
        self.work_item = Some(work_item);
        self
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
}

/// Assignment orchestration service.
#[derive(Clone)]
pub struct AssignmentService<S, P>
where
    S: StaffingRepository,
    P: PlanningRepository,
{
    staffing: Arc<S>,
    planning: Arc<P>,
}

impl<S, P> AssignmentService<S, P>
where
    S: StaffingRepository,
    P: PlanningRepository,
{
    /// Creates a new assignment service.
    #[must_use]
    pub const fn new(staffing: Arc<S>, planning: Arc<P>) -> Self {
        Self { staffing, planning }
    }

    /// Creates a cost record. The amount may be supplied later.
    ///
    /// # Errors
    ///
    /// Returns a domain error for an empty name.
    pub async fn create_cost(
        &self,
        name: impl Into<String> + Send,
        description: Option<String>,
        amount: Option<CostAmount>,
    ) -> AssignmentResult<Cost> {
        let mut cost = Cost::new(name)?;
        if let Some(text) = description {
            cost = cost.with_description(text);
        }
        if let Some(value) = amount {
            cost = cost.with_amount(value);
        }
        self.staffing.store_cost(&cost).await?;
        Ok(cost)
    }

    /// Replaces the amount on a cost record. `None` marks the amount as
    /// not yet specified.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::CostNotFound`] when the cost is unknown.
    pub async fn update_cost_amount(
        &self,
        cost_id: CostId,
        amount: Option<CostAmount>,
    ) -> AssignmentResult<Cost> {
        let mut cost = self.load_cost(cost_id).await?;
        cost.set_amount(amount);
        self.staffing.update_cost(&cost).await?;
        Ok(cost)
    }

    /// Attributes a cost record to exactly one epic or work item.
    ///
    /// A cost record carries at most one assignment; reattributing an
    /// already-assigned cost goes through
    /// [`Self::retarget_cost_assignment`].
    ///
    /// # Errors
    ///
    /// Returns a domain error when both or neither target is given, the
    /// matching not-found error for unknown references, or
    /// [`StaffingRepositoryError::CostAlreadyAssigned`] when the cost
    /// already has an assignment.
    pub async fn assign_cost(
        &self,
        cost_id: CostId,
        epic: Option<EpicId>,
        work_item: Option<WorkItemId>,
    ) -> AssignmentResult<CostAssignment> {
        let target = AssignmentTarget::resolve(epic, work_item)?;
        self.require_cost(cost_id).await?;
        self.require_target(target).await?;
        let assignment = CostAssignment::new(cost_id, target);
        self.staffing.store_cost_assignment(&assignment).await?;
        Ok(assignment)
    }

    /// Moves a cost assignment to a new target. The old reference is
    /// replaced in the same write.
    ///
    /// # Errors
    ///
    /// Returns a domain error when both or neither target is given, or the
    /// matching not-found error for unknown references.
    pub async fn retarget_cost_assignment(
        &self,
        assignment_id: CostAssignmentId,
        epic: Option<EpicId>,
        work_item: Option<WorkItemId>,
    ) -> AssignmentResult<CostAssignment> {
        let target = AssignmentTarget::resolve(epic, work_item)?;
        let mut assignment = self.load_cost_assignment(assignment_id).await?;
        self.require_target(target).await?;
        assignment.retarget(target);
        self.staffing.update_cost_assignment(&assignment).await?;
        Ok(assignment)
    }

    /// Removes a cost assignment, leaving the cost record unattributed.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::CostAssignmentNotFound`] when the
    /// assignment is unknown.
    pub async fn remove_cost_assignment(
        &self,
        assignment_id: CostAssignmentId,
    ) -> AssignmentResult<()> {
        self.staffing
            .delete_cost_assignment(assignment_id)
            .await
            .map_err(|err| match err {
                StaffingRepositoryError::CostAssignmentNotFound(id) => {
                    AssignmentError::CostAssignmentNotFound(id)
                }
                other => AssignmentError::Staffing(other),
            })
    }

    /// Assigns a person to exactly one epic or work item.
    ///
    /// # Errors
    ///
    /// Returns a domain error when both or neither target is given, or the
    /// matching not-found error for unknown references.
    pub async fn assign_person(
        &self,
        request: AssignPersonRequest,
    ) -> AssignmentResult<PersonAssignment> {
        let target = AssignmentTarget::resolve(request.epic, request.work_item)?;
        self.require_person(request.person).await?;
        self.require_target(target).await?;
        let mut assignment = PersonAssignment::new(request.person, target);
        if let Some(hours) = request.hours {
            assignment = assignment.with_hours(hours);
        }
        if let Some(text) = request.description {
            assignment = assignment.with_description(text);
        }
        self.staffing.store_person_assignment(&assignment).await?;
        Ok(assignment)
    }

    /// Replaces the allocated hours on a person assignment.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::PersonAssignmentNotFound`] when the
    /// assignment is unknown.
    pub async fn update_person_assignment_hours(
        &self,
        assignment_id: PersonAssignmentId,
        hours: Option<AllocatedHours>,
    ) -> AssignmentResult<PersonAssignment> {
        let mut assignment = self.load_person_assignment(assignment_id).await?;
        assignment.set_hours(hours);
        self.staffing.update_person_assignment(&assignment).await?;
        Ok(assignment)
    }

    /// Moves a person assignment to a new target. The old reference is
    /// replaced in the same write.
    ///
    /// # Errors
    ///
    /// Returns a domain error when both or neither target is given, or the
    /// matching not-found error for unknown references.
    pub async fn retarget_person_assignment(
        &self,
        assignment_id: PersonAssignmentId,
        epic: Option<EpicId>,
        work_item: Option<WorkItemId>,
    ) -> AssignmentResult<PersonAssignment> {
        let target = AssignmentTarget::resolve(epic, work_item)?;
        let mut assignment = self.load_person_assignment(assignment_id).await?;
        self.require_target(target).await?;
        assignment.retarget(target);
        self.staffing.update_person_assignment(&assignment).await?;
        Ok(assignment)
    }

    /// Removes a person assignment.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::PersonAssignmentNotFound`] when the
    /// assignment is unknown.
    pub async fn remove_person_assignment(
        &self,
        assignment_id: PersonAssignmentId,
    ) -> AssignmentResult<()> {
        self.staffing
            .delete_person_assignment(assignment_id)
            .await
            .map_err(|err| match err {
                StaffingRepositoryError::PersonAssignmentNotFound(id) => {
                    AssignmentError::PersonAssignmentNotFound(id)
                }
                other => AssignmentError::Staffing(other),
            })
    }

    /// Records that a person works on an epic during a sprint at a given
    /// fraction of full time.
    ///
    /// # Errors
    ///
    /// Returns the matching not-found error for unknown references.
    pub async fn allocate_resource(
        &self,
        epic_id: EpicId,
        person_id: PersonId,
        sprint_id: SprintId,
        fte: FteFraction,
    ) -> AssignmentResult<ResourceAllocation> {
        self.require_epic(epic_id).await?;
        self.require_person(person_id).await?;
        self.require_sprint(sprint_id).await?;
        let allocation = ResourceAllocation::new(epic_id, person_id, sprint_id, fte);
        self.staffing.store_resource_allocation(&allocation).await?;
        Ok(allocation)
    }

    async fn require_target(&self, target: AssignmentTarget) -> AssignmentResult<()> {
        match target {
            AssignmentTarget::Epic { epic } => self.require_epic(epic).await,
            AssignmentTarget::WorkItem { work_item } => self.require_work_item(work_item).await,
        }
    }

    async fn require_epic(&self, id: EpicId) -> AssignmentResult<()> {
        self.planning
            .find_epic(id)
            .await?
            .map(|_| ())
            .ok_or(AssignmentError::EpicNotFound(id))
    }

    async fn require_work_item(&self, id: WorkItemId) -> AssignmentResult<()> {
        self.planning
            .find_work_item(id)
            .await?
            .map(|_| ())
            .ok_or(AssignmentError::WorkItemNotFound(id))
    }

    async fn require_sprint(&self, id: SprintId) -> AssignmentResult<()> {
        self.planning
            .find_sprint(id)
            .await?
            .map(|_| ())
            .ok_or(AssignmentError::SprintNotFound(id))
    }

    async fn require_person(&self, id: PersonId) -> AssignmentResult<()> {
        self.staffing
            .find_person(id)
            .await?
            .map(|_| ())
            .ok_or(AssignmentError::PersonNotFound(id))
    }

    async fn require_cost(&self, id: CostId) -> AssignmentResult<()> {
        self.load_cost(id).await.map(|_| ())
    }

    async fn load_cost(&self, id: CostId) -> AssignmentResult<Cost> {
        self.staffing
            .find_cost(id)
            .await?
            .ok_or(AssignmentError::CostNotFound(id))
    }

    async fn load_cost_assignment(
        &self,
        id: CostAssignmentId,
    ) -> AssignmentResult<CostAssignment> {
        self.staffing
            .find_cost_assignment(id)
            .await?
            .ok_or(AssignmentError::CostAssignmentNotFound(id))
    }

    async fn load_person_assignment(
        &self,
        id: PersonAssignmentId,
    ) -> AssignmentResult<PersonAssignment> {
        self.staffing
            .find_person_assignment(id)
            .await?
            .ok_or(AssignmentError::PersonAssignmentNotFound(id))
    }
}
