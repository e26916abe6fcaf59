//! Service layer for creating and updating planning entities.
//!
//! Thin orchestration over the domain constructors: resolve referenced
//! entities, build or mutate the aggregate, persist. All interesting
//! validation lives in the domain types.

use crate::planning::{
    domain::{
        Epic, EpicId, EpicStatus, PlanningDomainError, Project, ProjectId, ProjectStatus, Sprint,
        SprintId, WorkItem, WorkItemId, WorkItemPriority, WorkItemStatus, WorkItemType,
    },
    ports::{PlanningRepository, PlanningRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for authoring operations.
#[derive(Debug, Error)]
pub enum AuthoringError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] PlanningDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] PlanningRepositoryError),
    /// The referenced project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The referenced epic does not exist.
    #[error("epic not found: {0}")]
    EpicNotFound(EpicId),
    /// The referenced sprint does not exist.
    #[error("sprint not found: {0}")]
    SprintNotFound(SprintId),
    /// The referenced work item does not exist.
    #[error("work item not found: {0}")]
    WorkItemNotFound(WorkItemId),
}

/// Result type for authoring service operations.
pub type AuthoringResult<T> = Result<T, AuthoringError>;

/// Request payload for creating a work item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWorkItemRequest {
    project: ProjectId,
    title: String,
    item_type: WorkItemType,
    description: Option<String>,
    priority: Option<WorkItemPriority>,
    story_points: Option<u32>,
    epic: Option<EpicId>,
    sprint: Option<SprintId>,
}

impl CreateWorkItemRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(project: ProjectId, title: impl Into<String>, item_type: WorkItemType) -> Self {
        Self {
            project,
            title: title.into(),
            item_type,
            description: None,
            priority: None,
            story_points: None,
            epic: None,
            sprint: None,
        }
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
        self.priority = Some(priority);
        self
    }

    /// Sets the story point estimate.
    #[must_use]
    pub const fn with_story_points(mut self, points: u32) -> Self {
        self.story_points = Some(points);
        self
    }

    /// Attaches the new item to an epic.
    #[must_use]
    pub const fn with_epic(mut self, epic: EpicId) -> Self {
        self.epic = Some(epic);
        self
    }

    /// Schedules the new item straight into a sprint.
    #[must_use]
    pub const fn with_sprint(mut self, sprint: SprintId) -> Self {
        self.sprint = Some(sprint);
        self
    }
}

/// Authoring orchestration service.
#[derive(Clone)]
pub struct AuthoringService<R>
where
    R: PlanningRepository,
{
    repository: Arc<R>,
}

impl<R> AuthoringService<R>
where
    R: PlanningRepository,
{
    /// Creates a new authoring service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns a domain error for an empty title, or
    /// [`PlanningRepositoryError::DuplicateProjectTitle`] when the title is
    /// already taken.
    pub async fn create_project(
        &self,
        title: impl Into<String> + Send,
        description: Option<String>,
    ) -> AuthoringResult<Project> {
        let mut project = Project::new(title)?;
        project.set_description(description);
        self.repository.store_project(&project).await?;
        Ok(project)
    }

    /// Renames a project.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::ProjectNotFound`] when the project is
    /// unknown, a domain error for an empty title, or
    /// [`PlanningRepositoryError::DuplicateProjectTitle`] when the new
    /// title collides with another project.
    pub async fn rename_project(
        &self,
        project_id: ProjectId,
        title: impl Into<String> + Send,
    ) -> AuthoringResult<Project> {
        let mut project = self.load_project(project_id).await?;
        project.rename(title)?;
        self.repository.update_project(&project).await?;
        Ok(project)
    }

    /// Moves a project to the given lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::ProjectNotFound`] when the project is
    /// unknown.
    pub async fn set_project_status(
        &self,
        project_id: ProjectId,
        status: ProjectStatus,
    ) -> AuthoringResult<Project> {
        let mut project = self.load_project(project_id).await?;
        project.set_status(status);
        self.repository.update_project(&project).await?;
        Ok(project)
    }

    /// Creates an epic under an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::ProjectNotFound`] when the project is
    /// unknown, or a domain error for an empty title.
    pub async fn create_epic(
        &self,
        project_id: ProjectId,
        title: impl Into<String> + Send,
    ) -> AuthoringResult<Epic> {
        self.require_project(project_id).await?;
        let epic = Epic::new(project_id, title)?;
        self.repository.store_epic(&epic).await?;
        Ok(epic)
    }

    /// Moves an epic to the given delivery status.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::EpicNotFound`] when the epic is unknown.
    pub async fn set_epic_status(
        &self,
        epic_id: EpicId,
        status: EpicStatus,
    ) -> AuthoringResult<Epic> {
        let mut epic = self.load_epic(epic_id).await?;
        epic.set_status(status);
        self.repository.update_epic(&epic).await?;
        Ok(epic)
    }

    /// Cancels an epic.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::EpicNotFound`] when the epic is unknown.
    pub async fn cancel_epic(&self, epic_id: EpicId) -> AuthoringResult<Epic> {
        let mut epic = self.load_epic(epic_id).await?;
        epic.cancel();
        self.repository.update_epic(&epic).await?;
        Ok(epic)
    }

    /// Creates a sprint under an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::ProjectNotFound`] when the project is
    /// unknown, or a domain error for an empty name.
    pub async fn create_sprint(
        &self,
        project_id: ProjectId,
        name: impl Into<String> + Send,
        goal: Option<String>,
    ) -> AuthoringResult<Sprint> {
        self.require_project(project_id).await?;
        let mut sprint = Sprint::new(project_id, name)?;
        if let Some(text) = goal {
            sprint = sprint.with_goal(text);
        }
        self.repository.store_sprint(&sprint).await?;
        Ok(sprint)
    }

    /// Creates a work item, optionally attached to an epic and scheduled
    /// into a sprint.
    ///
    /// Initial sprint scheduling goes through the sprint aggregate so both
    /// sides of the relation stay in sync and a completed sprint is
    /// rejected; the item and the sprint are persisted as one atomic
    /// write.
    ///
    /// # Errors
    ///
    /// Returns the matching not-found error for unknown references, or a
    /// domain error (empty title, closed sprint).
    pub async fn create_work_item(
        &self,
        request: CreateWorkItemRequest,
    ) -> AuthoringResult<WorkItem> {
        self.require_project(request.project).await?;
        let mut item = WorkItem::new(request.project, request.title, request.item_type)?;
        if let Some(text) = request.description {
            item = item.with_description(text);
        }
        if let Some(priority) = request.priority {
            item = item.with_priority(priority);
        }
        if let Some(points) = request.story_points {
            item = item.with_story_points(points);
        }
        if let Some(epic_id) = request.epic {
            self.load_epic(epic_id).await?;
            item.attach_epic(epic_id);
        }

        let Some(sprint_id) = request.sprint else {
            self.repository.store_work_item(&item).await?;
            return Ok(item);
        };

        let mut sprint = self.load_sprint(sprint_id).await?;
        sprint.add_work_item(&mut item)?;
        self.repository
            .store_work_item_in_sprint(&item, &sprint)
            .await?;
        Ok(item)
    }

    /// Changes a work item's completion status.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::WorkItemNotFound`] when the item is
    /// unknown, or a location validation error.
    pub async fn update_work_item_status(
        &self,
        work_item_id: WorkItemId,
        status: WorkItemStatus,
    ) -> AuthoringResult<WorkItem> {
        let mut item = self.load_work_item(work_item_id).await?;
        item.set_status(status)?;
        self.repository.update_work_item(&item).await?;
        Ok(item)
    }

    /// Marks a work item done and archives it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::WorkItemNotFound`] when the item is
    /// unknown.
    pub async fn complete_work_item(&self, work_item_id: WorkItemId) -> AuthoringResult<WorkItem> {
        let mut item = self.load_work_item(work_item_id).await?;
        item.complete();
        self.repository.update_work_item(&item).await?;
        Ok(item)
    }

    /// Attaches a work item to an epic.
    ///
    /// # Errors
    ///
    /// Returns the matching not-found error for unknown references.
    pub async fn assign_work_item_to_epic(
        &self,
        work_item_id: WorkItemId,
        epic_id: EpicId,
    ) -> AuthoringResult<WorkItem> {
        let mut item = self.load_work_item(work_item_id).await?;
        self.load_epic(epic_id).await?;
        item.attach_epic(epic_id);
        self.repository.update_work_item(&item).await?;
        Ok(item)
    }

    /// Records a dependency edge between two epics.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::EpicNotFound`] for unknown ids, or a
    /// domain error for self or duplicate edges.
    pub async fn add_epic_dependency(
        &self,
        epic_id: EpicId,
        depends_on: EpicId,
    ) -> AuthoringResult<Epic> {
        let mut epic = self.load_epic(epic_id).await?;
        self.load_epic(depends_on).await?;
        epic.add_dependency(depends_on)?;
        self.repository.update_epic(&epic).await?;
        Ok(epic)
    }

    /// Records a dependency edge between two work items.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::WorkItemNotFound`] for unknown ids, or a
    /// domain error for self or duplicate edges.
    pub async fn add_work_item_dependency(
        &self,
        work_item_id: WorkItemId,
        depends_on: WorkItemId,
    ) -> AuthoringResult<WorkItem> {
        let mut item = self.load_work_item(work_item_id).await?;
        self.load_work_item(depends_on).await?;
        item.add_dependency(depends_on)?;
        self.repository.update_work_item(&item).await?;
        Ok(item)
    }

    async fn require_project(&self, id: ProjectId) -> AuthoringResult<()> {
        self.load_project(id).await.map(|_| ())
    }

    async fn load_project(&self, id: ProjectId) -> AuthoringResult<Project> {
        self.repository
            .find_project(id)
            .await?
            .ok_or(AuthoringError::ProjectNotFound(id))
    }

    async fn load_epic(&self, id: EpicId) -> AuthoringResult<Epic> {
        self.repository
            .find_epic(id)
            .await?
            .ok_or(AuthoringError::EpicNotFound(id))
    }

    async fn load_sprint(&self, id: SprintId) -> AuthoringResult<Sprint> {
        self.repository
            .find_sprint(id)
            .await?
            .ok_or(AuthoringError::SprintNotFound(id))
    }

    async fn load_work_item(&self, id: WorkItemId) -> AuthoringResult<WorkItem> {
        self.repository
            .find_work_item(id)
            .await?
            .ok_or(AuthoringError::WorkItemNotFound(id))
    }
}
