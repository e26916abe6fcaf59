//! Repository port for staffing entity persistence and querying.

use crate::planning::domain::{EpicId, ProjectId, SprintId, WorkItemId};
use crate::staffing::domain::{
    Cost, CostAssignment, CostAssignmentId, CostId, Person, PersonAssignment, PersonAssignmentId,
    PersonId, ResourceAllocation, ResourceAllocationId, Team, TeamId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for staffing repository operations.
pub type StaffingRepositoryResult<T> = Result<T, StaffingRepositoryError>;

/// Staffing persistence contract.
///
/// The `remove_*_for_*` cascade helpers exist for the removal service:
/// each must delete all matching records as one atomic unit and return the
/// number of records removed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StaffingRepository: Send + Sync {
    /// Stores a new person.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingRepositoryError::DuplicatePerson`] when the id
    /// already exists or [`StaffingRepositoryError::DuplicateEmail`] when
    /// another person already uses the email address.
    async fn store_person(&self, person: &Person) -> StaffingRepositoryResult<()>;

    /// Persists changes to an existing person.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingRepositoryError::PersonNotFound`] when the person
    /// does not exist.
    async fn update_person(&self, person: &Person) -> StaffingRepositoryResult<()>;

    /// Finds a person by id; `None` when absent.
    async fn find_person(&self, id: PersonId) -> StaffingRepositoryResult<Option<Person>>;

    /// Stores a new team.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingRepositoryError::DuplicateTeam`] when the id
    /// already exists.
    async fn store_team(&self, team: &Team) -> StaffingRepositoryResult<()>;

    /// Persists changes to an existing team.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingRepositoryError::TeamNotFound`] when the team does
    /// not exist.
    async fn update_team(&self, team: &Team) -> StaffingRepositoryResult<()>;

    /// Finds a team by id; `None` when absent.
    async fn find_team(&self, id: TeamId) -> StaffingRepositoryResult<Option<Team>>;

    /// Deletes every team belonging to a project, returning the count.
    async fn remove_teams_of_project(&self, id: ProjectId) -> StaffingRepositoryResult<usize>;

    /// Stores a new cost record.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingRepositoryError::DuplicateCost`] when the id
    /// already exists.
    async fn store_cost(&self, cost: &Cost) -> StaffingRepositoryResult<()>;

    /// Persists changes to an existing cost record.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingRepositoryError::CostNotFound`] when the cost does
    /// not exist.
    async fn update_cost(&self, cost: &Cost) -> StaffingRepositoryResult<()>;

    /// Finds a cost record by id; `None` when absent.
    async fn find_cost(&self, id: CostId) -> StaffingRepositoryResult<Option<Cost>>;

    /// Stores a new cost assignment.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingRepositoryError::DuplicateCostAssignment`] when
    /// the id already exists or
    /// [`StaffingRepositoryError::CostAlreadyAssigned`] when the cost
    /// record already has an assignment.
    async fn store_cost_assignment(
        &self,
        assignment: &CostAssignment,
    ) -> StaffingRepositoryResult<()>;

    /// Persists changes to an existing cost assignment.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingRepositoryError::CostAssignmentNotFound`] when the
    /// assignment does not exist.
    async fn update_cost_assignment(
        &self,
        assignment: &CostAssignment,
    ) -> StaffingRepositoryResult<()>;

    /// Finds a cost assignment by id; `None` when absent.
    async fn find_cost_assignment(
        &self,
        id: CostAssignmentId,
    ) -> StaffingRepositoryResult<Option<CostAssignment>>;

    /// Deletes a cost assignment, detaching the cost from its target.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingRepositoryError::CostAssignmentNotFound`] when the
    /// assignment does not exist.
    async fn delete_cost_assignment(&self, id: CostAssignmentId) -> StaffingRepositoryResult<()>;

    /// Returns the assignment attached to a cost record, if any.
    async fn cost_assignment_for_cost(
        &self,
        id: CostId,
    ) -> StaffingRepositoryResult<Option<CostAssignment>>;

    /// Stores a new person assignment.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingRepositoryError::DuplicatePersonAssignment`] when
    /// the id already exists.
    async fn store_person_assignment(
        &self,
        assignment: &PersonAssignment,
    ) -> StaffingRepositoryResult<()>;

    /// Persists changes to an existing person assignment.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingRepositoryError::PersonAssignmentNotFound`] when
    /// the assignment does not exist.
    async fn update_person_assignment(
        &self,
        assignment: &PersonAssignment,
    ) -> StaffingRepositoryResult<()>;

    /// Finds a person assignment by id; `None` when absent.
    async fn find_person_assignment(
        &self,
        id: PersonAssignmentId,
    ) -> StaffingRepositoryResult<Option<PersonAssignment>>;

    /// Deletes a person assignment.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingRepositoryError::PersonAssignmentNotFound`] when
    /// the assignment does not exist.
    async fn delete_person_assignment(
        &self,
        id: PersonAssignmentId,
    ) -> StaffingRepositoryResult<()>;

    /// Returns every person assignment for a person.
    async fn person_assignments_for_person(
        &self,
        id: PersonId,
    ) -> StaffingRepositoryResult<Vec<PersonAssignment>>;

    /// Returns every cost and person assignment targeting an epic, as
    /// `(cost assignment ids, person assignment ids)`.
    async fn assignments_for_epic(
        &self,
        id: EpicId,
    ) -> StaffingRepositoryResult<(Vec<CostAssignmentId>, Vec<PersonAssignmentId>)>;

    /// Returns every cost and person assignment targeting a work item, as
    /// `(cost assignment ids, person assignment ids)`.
    async fn assignments_for_work_item(
        &self,
        id: WorkItemId,
    ) -> StaffingRepositoryResult<(Vec<CostAssignmentId>, Vec<PersonAssignmentId>)>;

    /// Stores a new resource allocation.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingRepositoryError::DuplicateResourceAllocation`]
    /// when the id already exists.
    async fn store_resource_allocation(
        &self,
        allocation: &ResourceAllocation,
    ) -> StaffingRepositoryResult<()>;

    /// Finds a resource allocation by id; `None` when absent.
    async fn find_resource_allocation(
        &self,
        id: ResourceAllocationId,
    ) -> StaffingRepositoryResult<Option<ResourceAllocation>>;

    /// Returns every resource allocation for a sprint.
    async fn allocations_for_sprint(
        &self,
        id: SprintId,
    ) -> StaffingRepositoryResult<Vec<ResourceAllocation>>;

    /// Deletes every assignment targeting one of the given epics,
    /// atomically, returning the count.
    async fn remove_assignments_for_epics(
        &self,
        epics: &[EpicId],
    ) -> StaffingRepositoryResult<usize>;

    /// Deletes every assignment targeting one of the given work items,
    /// atomically, returning the count.
    async fn remove_assignments_for_work_items(
        &self,
        work_items: &[WorkItemId],
    ) -> StaffingRepositoryResult<usize>;

    /// Deletes every resource allocation referencing one of the given
    /// epics, atomically, returning the count.
    async fn remove_allocations_for_epics(
        &self,
        epics: &[EpicId],
    ) -> StaffingRepositoryResult<usize>;

    /// Deletes every resource allocation referencing one of the given
    /// sprints, atomically, returning the count.
    async fn remove_allocations_for_sprints(
        &self,
        sprints: &[SprintId],
    ) -> StaffingRepositoryResult<usize>;
}

/// Errors returned by staffing repository implementations.
#[derive(Debug, Clone, Error)]
pub enum StaffingRepositoryError {
    /// A person with the same identifier already exists.
    #[error("duplicate person identifier: {0}")]
    DuplicatePerson(PersonId),

    /// Another person already uses the email address.
    #[error("duplicate email address: {0}")]
    DuplicateEmail(String),

    /// A team with the same identifier already exists.
    #[error("duplicate team identifier: {0}")]
    DuplicateTeam(TeamId),

    /// A cost record with the same identifier already exists.
    #[error("duplicate cost identifier: {0}")]
    DuplicateCost(CostId),

    /// A cost assignment with the same identifier already exists.
    #[error("duplicate cost assignment identifier: {0}")]
    DuplicateCostAssignment(CostAssignmentId),

    /// The cost record already has an assignment.
    #[error("cost {0} is already assigned")]
    CostAlreadyAssigned(CostId),

    /// A person assignment with the same identifier already exists.
    #[error("duplicate person assignment identifier: {0}")]
    DuplicatePersonAssignment(PersonAssignmentId),

    /// A resource allocation with the same identifier already exists.
    #[error("duplicate resource allocation identifier: {0}")]
    DuplicateResourceAllocation(ResourceAllocationId),

    /// The person was not found.
    #[error("person not found: {0}")]
    PersonNotFound(PersonId),

    /// The team was not found.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    /// The cost record was not found.
    #[error("cost not found: {0}")]
    CostNotFound(CostId),

    /// The cost assignment was not found.
    #[error("cost assignment not found: {0}")]
    CostAssignmentNotFound(CostAssignmentId),

    /// The person assignment was not found.
    #[error("person assignment not found: {0}")]
    PersonAssignmentNotFound(PersonAssignmentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StaffingRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
