//! Service layer for persons and team membership.

use crate::planning::{
    domain::{Epic, EpicId, ProjectId},
    ports::{PlanningRepository, PlanningRepositoryError},
};
use crate::staffing::{
    domain::{Person, PersonId, StaffingDomainError, Team, TeamId},
    ports::{StaffingRepository, StaffingRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for roster operations.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] StaffingDomainError),
    /// Staffing repository operation failed.
    #[error(transparent)]
    Staffing(#[from] StaffingRepositoryError),
    /// Planning repository operation failed.
    #[error(transparent)]
    Planning(#[from] PlanningRepositoryError),
    /// The referenced project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The referenced epic does not exist.
    #[error("epic not found: {0}")]
    EpicNotFound(EpicId),
    /// The referenced person does not exist.
    #[error("person not found: {0}")]
    PersonNotFound(PersonId),
    /// The referenced team does not exist.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),
}

/// Result type for roster service operations.
pub type RosterResult<T> = Result<T, RosterError>;

/// Roster orchestration service.
///
/// Team creation crosses into the planning context to verify the owning
/// project before anything is stored.
#[derive(Clone)]
pub struct RosterService<S, P, C>
where
    S: StaffingRepository,
    P: PlanningRepository,
    C: Clock,
{
    staffing: Arc<S>,
    planning: Arc<P>,
    clock: C,
}

impl<S, P, C> RosterService<S, P, C>
where
    S: StaffingRepository,
    P: PlanningRepository,
    C: Clock,
{
    /// Creates a new roster service.
    #[must_use]
    pub const fn new(staffing: Arc<S>, planning: Arc<P>, clock: C) -> Self {
        Self {
            staffing,
            planning,
            clock,
        }
    }

    /// Registers a person.
    ///
    /// # Errors
    ///
    /// Returns a domain error for an empty name or malformed email, or
    /// [`StaffingRepositoryError::DuplicateEmail`] when the email is
    /// already registered.
    pub async fn register_person(
        &self,
        name: impl Into<String> + Send,
        email: impl Into<String> + Send,
        role: Option<String>,
    ) -> RosterResult<Person> {
        let mut person = Person::new(name, email)?;
        person.set_role(role);
        self.staffing.store_person(&person).await?;
        Ok(person)
    }

    /// Creates a team under an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::ProjectNotFound`] when the project is
    /// unknown, or a domain error for an empty name.
    pub async fn create_team(
        &self,
        project_id: ProjectId,
        name: impl Into<String> + Send,
        description: Option<String>,
    ) -> RosterResult<Team> {
        self.require_project(project_id).await?;
        let mut team = Team::new(project_id, name, &self.clock)?;
        if let Some(text) = description {
            team = team.with_description(text);
        }
        self.staffing.store_team(&team).await?;
        Ok(team)
    }

    /// Adds a person to a team. Adding an existing member is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the matching not-found error for unknown references.
    pub async fn add_team_member(
        &self,
        team_id: TeamId,
        person_id: PersonId,
    ) -> RosterResult<Team> {
        let mut team = self.load_team(team_id).await?;
        self.require_person(person_id).await?;
        if team.add_member(person_id, &self.clock) {
            self.staffing.update_team(&team).await?;
        }
        Ok(team)
    }

    /// Removes a person from a team. Removing a non-member is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::TeamNotFound`] when the team is unknown.
    pub async fn remove_team_member(
        &self,
        team_id: TeamId,
        person_id: PersonId,
    ) -> RosterResult<Team> {
        let mut team = self.load_team(team_id).await?;
        if team.remove_member(person_id, &self.clock) {
            self.staffing.update_team(&team).await?;
        }
        Ok(team)
    }

    /// Puts an epic in the hands of a team, replacing any previous
    /// assignment.
    ///
    /// # Errors
    ///
    /// Returns the matching not-found error for unknown references.
    pub async fn assign_epic_to_team(
        &self,
        epic_id: EpicId,
        team_id: TeamId,
    ) -> RosterResult<Epic> {
        let mut epic = self
            .planning
            .find_epic(epic_id)
            .await?
            .ok_or(RosterError::EpicNotFound(epic_id))?;
        self.load_team(team_id).await?;
        epic.assign_team(team_id);
        self.planning.update_epic(&epic).await?;
        Ok(epic)
    }

    async fn require_project(&self, id: ProjectId) -> RosterResult<()> {
        self.planning
            .find_project(id)
            .await?
            .map(|_| ())
            .ok_or(RosterError::ProjectNotFound(id))
    }

    async fn require_person(&self, id: PersonId) -> RosterResult<()> {
        self.staffing
            .find_person(id)
            .await?
            .map(|_| ())
            .ok_or(RosterError::PersonNotFound(id))
    }

    async fn load_team(&self, id: TeamId) -> RosterResult<Team> {
        self.staffing
            .find_team(id)
            .await?
            .ok_or(RosterError::TeamNotFound(id))
    }
}
