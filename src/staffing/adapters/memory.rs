//! In-memory repository for staffing services and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::planning::domain::{EpicId, ProjectId, SprintId, WorkItemId};
use crate::staffing::{
    domain::{
        AssignmentTarget, Cost, CostAssignment, CostAssignmentId, CostId, Person, PersonAssignment,
        PersonAssignmentId, PersonId, ResourceAllocation, ResourceAllocationId, Team, TeamId,
    },
    ports::{StaffingRepository, StaffingRepositoryError, StaffingRepositoryResult},
};

/// Thread-safe in-memory staffing repository.
///
/// Every operation takes the store lock once, so the cascade helpers remove
/// their whole batch atomically with respect to concurrent readers and
/// writers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStaffingRepository {
    state: Arc<RwLock<InMemoryStaffingState>>,
}

#[derive(Debug, Default)]
struct InMemoryStaffingState {
    persons: HashMap<PersonId, Person>,
    teams: HashMap<TeamId, Team>,
    costs: HashMap<CostId, Cost>,
    cost_assignments: HashMap<CostAssignmentId, CostAssignment>,
    person_assignments: HashMap<PersonAssignmentId, PersonAssignment>,
    allocations: HashMap<ResourceAllocationId, ResourceAllocation>,
}

impl InMemoryStaffingRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StaffingRepositoryResult<RwLockReadGuard<'_, InMemoryStaffingState>> {
        self.state.read().map_err(|err| {
            StaffingRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> StaffingRepositoryResult<RwLockWriteGuard<'_, InMemoryStaffingState>> {
        self.state.write().map_err(|err| {
            StaffingRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Returns an error when another person already carries `email`.
fn check_email_unique(
    state: &InMemoryStaffingState,
    id: PersonId,
    email: &str,
) -> StaffingRepositoryResult<()> {
    let taken = state
        .persons
        .values()
        .any(|existing| existing.id() != id && existing.email() == email);
    if taken {
        return Err(StaffingRepositoryError::DuplicateEmail(email.to_owned()));
    }
    Ok(())
}

fn targets_epic(target: AssignmentTarget, epics: &[EpicId]) -> bool {
    target.epic().is_some_and(|epic| epics.contains(&epic))
}

fn targets_work_item(target: AssignmentTarget, work_items: &[WorkItemId]) -> bool {
    target
        .work_item()
        .is_some_and(|item| work_items.contains(&item))
}

#[async_trait]
impl StaffingRepository for InMemoryStaffingRepository {
    async fn store_person(&self, person: &Person) -> StaffingRepositoryResult<()> {
        let mut state = self.write()?;
        if state.persons.contains_key(&person.id()) {
            return Err(StaffingRepositoryError::DuplicatePerson(person.id()));
        }
        check_email_unique(&state, person.id(), person.email())?;
        state.persons.insert(person.id(), person.clone());
        Ok(())
    }

    async fn update_person(&self, person: &Person) -> StaffingRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.persons.contains_key(&person.id()) {
            return Err(StaffingRepositoryError::PersonNotFound(person.id()));
        }
        check_email_unique(&state, person.id(), person.email())?;
        state.persons.insert(person.id(), person.clone());
        Ok(())
    }

    async fn find_person(&self, id: PersonId) -> StaffingRepositoryResult<Option<Person>> {
        Ok(self.read()?.persons.get(&id).cloned())
    }

    async fn store_team(&self, team: &Team) -> StaffingRepositoryResult<()> {
        let mut state = self.write()?;
        if state.teams.contains_key(&team.id()) {
            return Err(StaffingRepositoryError::DuplicateTeam(team.id()));
        }
        state.teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn update_team(&self, team: &Team) -> StaffingRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.teams.contains_key(&team.id()) {
            return Err(StaffingRepositoryError::TeamNotFound(team.id()));
        }
        state.teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn find_team(&self, id: TeamId) -> StaffingRepositoryResult<Option<Team>> {
        Ok(self.read()?.teams.get(&id).cloned())
    }

    async fn remove_teams_of_project(&self, id: ProjectId) -> StaffingRepositoryResult<usize> {
        let mut state = self.write()?;
        let before = state.teams.len();
        state.teams.retain(|_, team| team.project() != id);
        Ok(before.saturating_sub(state.teams.len()))
    }

    async fn store_cost(&self, cost: &Cost) -> StaffingRepositoryResult<()> {
        let mut state = self.write()?;
        if state.costs.contains_key(&cost.id()) {
            return Err(StaffingRepositoryError::DuplicateCost(cost.id()));
        }
        state.costs.insert(cost.id(), cost.clone());
        Ok(())
    }

    async fn update_cost(&self, cost: &Cost) -> StaffingRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.costs.contains_key(&cost.id()) {
            return Err(StaffingRepositoryError::CostNotFound(cost.id()));
        }
        state.costs.insert(cost.id(), cost.clone());
        Ok(())
    }

    async fn find_cost(&self, id: CostId) -> StaffingRepositoryResult<Option<Cost>> {
        Ok(self.read()?.costs.get(&id).cloned())
    }

    async fn store_cost_assignment(
        &self,
        assignment: &CostAssignment,
    ) -> StaffingRepositoryResult<()> {
        let mut state = self.write()?;
        if state.cost_assignments.contains_key(&assignment.id()) {
            return Err(StaffingRepositoryError::DuplicateCostAssignment(
                assignment.id(),
            ));
        }
        let assigned = state
            .cost_assignments
            .values()
            .any(|existing| existing.cost() == assignment.cost());
        if assigned {
            return Err(StaffingRepositoryError::CostAlreadyAssigned(
                assignment.cost(),
            ));
        }
        state
            .cost_assignments
            .insert(assignment.id(), assignment.clone());
        Ok(())
    }

    async fn update_cost_assignment(
        &self,
        assignment: &CostAssignment,
    ) -> StaffingRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.cost_assignments.contains_key(&assignment.id()) {
            return Err(StaffingRepositoryError::CostAssignmentNotFound(
                assignment.id(),
            ));
        }
        state
            .cost_assignments
            .insert(assignment.id(), assignment.clone());
        Ok(())
    }

    async fn find_cost_assignment(
        &self,
        id: CostAssignmentId,
    ) -> StaffingRepositoryResult<Option<CostAssignment>> {
        Ok(self.read()?.cost_assignments.get(&id).cloned())
    }

    async fn delete_cost_assignment(&self, id: CostAssignmentId) -> StaffingRepositoryResult<()> {
        let mut state = self.write()?;
        if state.cost_assignments.remove(&id).is_none() {
            return Err(StaffingRepositoryError::CostAssignmentNotFound(id));
        }
        Ok(())
    }

    async fn cost_assignment_for_cost(
        &self,
        id: CostId,
    ) -> StaffingRepositoryResult<Option<CostAssignment>> {
        let state = self.read()?;
        Ok(state
            .cost_assignments
            .values()
            .find(|assignment| assignment.cost() == id)
            .cloned())
    }

    async fn store_person_assignment(
        &self,
        assignment: &PersonAssignment,
    ) -> StaffingRepositoryResult<()> {
        let mut state = self.write()?;
        if state.person_assignments.contains_key(&assignment.id()) {
            return Err(StaffingRepositoryError::DuplicatePersonAssignment(
                assignment.id(),
            ));
        }
        state
            .person_assignments
            .insert(assignment.id(), assignment.clone());
        Ok(())
    }

    async fn update_person_assignment(
        &self,
        assignment: &PersonAssignment,
    ) -> StaffingRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.person_assignments.contains_key(&assignment.id()) {
            return Err(StaffingRepositoryError::PersonAssignmentNotFound(
                assignment.id(),
            ));
        }
        state
            .person_assignments
            .insert(assignment.id(), assignment.clone());
        Ok(())
    }

    async fn find_person_assignment(
        &self,
        id: PersonAssignmentId,
    ) -> StaffingRepositoryResult<Option<PersonAssignment>> {
        Ok(self.read()?.person_assignments.get(&id).cloned())
    }

    async fn delete_person_assignment(
        &self,
        id: PersonAssignmentId,
    ) -> StaffingRepositoryResult<()> {
        let mut state = self.write()?;
        if state.person_assignments.remove(&id).is_none() {
            return Err(StaffingRepositoryError::PersonAssignmentNotFound(id));
        }
        Ok(())
    }

    async fn person_assignments_for_person(
        &self,
        id: PersonId,
    ) -> StaffingRepositoryResult<Vec<PersonAssignment>> {
        let state = self.read()?;
        Ok(state
            .person_assignments
            .values()
            .filter(|assignment| assignment.person() == id)
            .cloned()
            .collect())
    }

    async fn assignments_for_epic(
        &self,
        id: EpicId,
    ) -> StaffingRepositoryResult<(Vec<CostAssignmentId>, Vec<PersonAssignmentId>)> {
        let state = self.read()?;
        let costs = state
            .cost_assignments
            .values()
            .filter(|assignment| assignment.target().epic() == Some(id))
            .map(CostAssignment::id)
            .collect();
        let persons = state
            .person_assignments
            .values()
            .filter(|assignment| assignment.target().epic() == Some(id))
            .map(PersonAssignment::id)
            .collect();
        Ok((costs, persons))
    }

    async fn assignments_for_work_item(
        &self,
        id: WorkItemId,
    ) -> StaffingRepositoryResult<(Vec<CostAssignmentId>, Vec<PersonAssignmentId>)> {
        let state = self.read()?;
        let costs = state
            .cost_assignments
            .values()
            .filter(|assignment| assignment.target().work_item() == Some(id))
            .map(CostAssignment::id)
            .collect();
        let persons = state
            .person_assignments
            .values()
            .filter(|assignment| assignment.target().work_item() == Some(id))
            .map(PersonAssignment::id)
            .collect();
        Ok((costs, persons))
    }

    async fn store_resource_allocation(
        &self,
        allocation: &ResourceAllocation,
    ) -> StaffingRepositoryResult<()> {
        let mut state = self.write()?;
        if state.allocations.contains_key(&allocation.id()) {
            return Err(StaffingRepositoryError::DuplicateResourceAllocation(
                allocation.id(),
            ));
        }
        state.allocations.insert(allocation.id(), allocation.clone());
        Ok(())
    }

    async fn find_resource_allocation(
        &self,
        id: ResourceAllocationId,
    ) -> StaffingRepositoryResult<Option<ResourceAllocation>> {
        Ok(self.read()?.allocations.get(&id).cloned())
    }

    async fn allocations_for_sprint(
        &self,
        id: SprintId,
    ) -> StaffingRepositoryResult<Vec<ResourceAllocation>> {
        let state = self.read()?;
        Ok(state
            .allocations
            .values()
            .filter(|allocation| allocation.sprint() == id)
            .cloned()
            .collect())
    }

    async fn remove_assignments_for_epics(
        &self,
        epics: &[EpicId],
    ) -> StaffingRepositoryResult<usize> {
        let mut state = self.write()?;
        let before = state
            .cost_assignments
            .len()
            .saturating_add(state.person_assignments.len());
        state
            .cost_assignments
            .retain(|_, assignment| !targets_epic(assignment.target(), epics));
        state
            .person_assignments
            .retain(|_, assignment| !targets_epic(assignment.target(), epics));
        let after = state
            .cost_assignments
            .len()
            .saturating_add(state.person_assignments.len());
        Ok(before.saturating_sub(after))
    }

    async fn remove_assignments_for_work_items(
        &self,
        work_items: &[WorkItemId],
    ) -> StaffingRepositoryResult<usize> {
        let mut state = self.write()?;
        let before = state
            .cost_assignments
            .len()
            .saturating_add(state.person_assignments.len());
        state
            .cost_assignments
            .retain(|_, assignment| !targets_work_item(assignment.target(), work_items));
        state
            .person_assignments
            .retain(|_, assignment| !targets_work_item(assignment.target(), work_items));
        let after = state
            .cost_assignments
            .len()
            .saturating_add(state.person_assignments.len());
        Ok(before.saturating_sub(after))
    }

    async fn remove_allocations_for_epics(
        &self,
        epics: &[EpicId],
    ) -> StaffingRepositoryResult<usize> {
        let mut state = self.write()?;
        let before = state.allocations.len();
        state
            .allocations
            .retain(|_, allocation| !epics.contains(&allocation.epic()));
        Ok(before.saturating_sub(state.allocations.len()))
    }

    async fn remove_allocations_for_sprints(
        &self,
        sprints: &[SprintId],
    ) -> StaffingRepositoryResult<usize> {
        let mut state = self.write()?;
        let before = state.allocations.len();
        state
            .allocations
            .retain(|_, allocation| !sprints.contains(&allocation.sprint()));
        Ok(before.saturating_sub(state.allocations.len()))
    }
}
