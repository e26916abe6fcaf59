//! In-memory repository for planning services and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::planning::{
    domain::{Epic, EpicId, Project, ProjectId, Sprint, SprintId, WorkItem, WorkItemId},
    ports::{PlanningRepository, PlanningRepositoryError, PlanningRepositoryResult, ProjectCascade},
};

/// Thread-safe in-memory planning repository.
///
/// Every operation takes the store lock once, so multi-entity batches are
/// atomic with respect to concurrent readers and writers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlanningRepository {
    state: Arc<RwLock<InMemoryPlanningState>>,
}

#[derive(Debug, Default)]
struct InMemoryPlanningState {
    projects: HashMap<ProjectId, Project>,
    epics: HashMap<EpicId, Epic>,
    sprints: HashMap<SprintId, Sprint>,
    work_items: HashMap<WorkItemId, WorkItem>,
}

impl InMemoryPlanningRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> PlanningRepositoryResult<RwLockReadGuard<'_, InMemoryPlanningState>> {
        self.state.read().map_err(|err| {
            PlanningRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> PlanningRepositoryResult<RwLockWriteGuard<'_, InMemoryPlanningState>> {
        self.state.write().map_err(|err| {
            PlanningRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Returns an error when another project already carries `title`.
fn check_title_unique(
    state: &InMemoryPlanningState,
    id: ProjectId,
    title: &str,
) -> PlanningRepositoryResult<()> {
    let taken = state
        .projects
        .values()
        .any(|existing| existing.id() != id && existing.title() == title);
    if taken {
        return Err(PlanningRepositoryError::DuplicateProjectTitle(
            title.to_owned(),
        ));
    }
    Ok(())
}

#[async_trait]
impl PlanningRepository for InMemoryPlanningRepository {
    async fn store_project(&self, project: &Project) -> PlanningRepositoryResult<()> {
        let mut state = self.write()?;
        if state.projects.contains_key(&project.id()) {
            return Err(PlanningRepositoryError::DuplicateProject(project.id()));
        }
        check_title_unique(&state, project.id(), project.title())?;
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> PlanningRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.projects.contains_key(&project.id()) {
            return Err(PlanningRepositoryError::ProjectNotFound(project.id()));
        }
        check_title_unique(&state, project.id(), project.title())?;
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_project(&self, id: ProjectId) -> PlanningRepositoryResult<Option<Project>> {
        Ok(self.read()?.projects.get(&id).cloned())
    }

    async fn delete_project(&self, id: ProjectId) -> PlanningRepositoryResult<ProjectCascade> {
        let mut state = self.write()?;
        if state.projects.remove(&id).is_none() {
            return Err(PlanningRepositoryError::ProjectNotFound(id));
        }

        let mut cascade = ProjectCascade::default();
        state.sprints.retain(|sprint_id, sprint| {
            let owned = sprint.project() == id;
            if owned {
                cascade.sprints.push(*sprint_id);
            }
            !owned
        });
        state.epics.retain(|epic_id, epic| {
            let owned = epic.project() == id;
            if owned {
                cascade.epics.push(*epic_id);
            }
            !owned
        });
        state.work_items.retain(|item_id, item| {
            let owned = item.project() == id;
            if owned {
                cascade.work_items.push(*item_id);
            }
            !owned
        });
        Ok(cascade)
    }

    async fn store_epic(&self, epic: &Epic) -> PlanningRepositoryResult<()> {
        let mut state = self.write()?;
        if state.epics.contains_key(&epic.id()) {
            return Err(PlanningRepositoryError::DuplicateEpic(epic.id()));
        }
        state.epics.insert(epic.id(), epic.clone());
        Ok(())
    }

    async fn update_epic(&self, epic: &Epic) -> PlanningRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.epics.contains_key(&epic.id()) {
            return Err(PlanningRepositoryError::EpicNotFound(epic.id()));
        }
        state.epics.insert(epic.id(), epic.clone());
        Ok(())
    }

    async fn find_epic(&self, id: EpicId) -> PlanningRepositoryResult<Option<Epic>> {
        Ok(self.read()?.epics.get(&id).cloned())
    }

    async fn delete_epic(&self, id: EpicId) -> PlanningRepositoryResult<()> {
        let mut state = self.write()?;
        if state.epics.remove(&id).is_none() {
            return Err(PlanningRepositoryError::EpicNotFound(id));
        }
        Ok(())
    }

    async fn store_sprint(&self, sprint: &Sprint) -> PlanningRepositoryResult<()> {
        let mut state = self.write()?;
        if state.sprints.contains_key(&sprint.id()) {
            return Err(PlanningRepositoryError::DuplicateSprint(sprint.id()));
        }
        state.sprints.insert(sprint.id(), sprint.clone());
        Ok(())
    }

    async fn update_sprint(&self, sprint: &Sprint) -> PlanningRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.sprints.contains_key(&sprint.id()) {
            return Err(PlanningRepositoryError::SprintNotFound(sprint.id()));
        }
        state.sprints.insert(sprint.id(), sprint.clone());
        Ok(())
    }

    async fn find_sprint(&self, id: SprintId) -> PlanningRepositoryResult<Option<Sprint>> {
        Ok(self.read()?.sprints.get(&id).cloned())
    }

    async fn delete_sprint(&self, id: SprintId) -> PlanningRepositoryResult<()> {
        let mut state = self.write()?;
        if state.sprints.remove(&id).is_none() {
            return Err(PlanningRepositoryError::SprintNotFound(id));
        }
        Ok(())
    }

    async fn store_work_item(&self, item: &WorkItem) -> PlanningRepositoryResult<()> {
        let mut state = self.write()?;
        if state.work_items.contains_key(&item.id()) {
            return Err(PlanningRepositoryError::DuplicateWorkItem(item.id()));
        }
        state.work_items.insert(item.id(), item.clone());
        Ok(())
    }

    async fn update_work_item(&self, item: &WorkItem) -> PlanningRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.work_items.contains_key(&item.id()) {
            return Err(PlanningRepositoryError::WorkItemNotFound(item.id()));
        }
        state.work_items.insert(item.id(), item.clone());
        Ok(())
    }

    async fn find_work_item(&self, id: WorkItemId) -> PlanningRepositoryResult<Option<WorkItem>> {
        Ok(self.read()?.work_items.get(&id).cloned())
    }

    async fn store_work_item_in_sprint(
        &self,
        item: &WorkItem,
        sprint: &Sprint,
    ) -> PlanningRepositoryResult<()> {
        let mut state = self.write()?;
        if state.work_items.contains_key(&item.id()) {
            return Err(PlanningRepositoryError::DuplicateWorkItem(item.id()));
        }
        if !state.sprints.contains_key(&sprint.id()) {
            return Err(PlanningRepositoryError::SprintNotFound(sprint.id()));
        }
        state.work_items.insert(item.id(), item.clone());
        state.sprints.insert(sprint.id(), sprint.clone());
        Ok(())
    }

    async fn update_work_items(&self, items: &[WorkItem]) -> PlanningRepositoryResult<()> {
        let mut state = self.write()?;
        for item in items {
            if !state.work_items.contains_key(&item.id()) {
                return Err(PlanningRepositoryError::WorkItemNotFound(item.id()));
            }
        }
        for item in items {
            state.work_items.insert(item.id(), item.clone());
        }
        Ok(())
    }

    async fn update_sprints_and_items(
        &self,
        sprints: &[Sprint],
        items: &[WorkItem],
    ) -> PlanningRepositoryResult<()> {
        let mut state = self.write()?;
        for sprint in sprints {
            if !state.sprints.contains_key(&sprint.id()) {
                return Err(PlanningRepositoryError::SprintNotFound(sprint.id()));
            }
        }
        for item in items {
            if !state.work_items.contains_key(&item.id()) {
                return Err(PlanningRepositoryError::WorkItemNotFound(item.id()));
            }
        }
        for sprint in sprints {
            state.sprints.insert(sprint.id(), sprint.clone());
        }
        for item in items {
            state.work_items.insert(item.id(), item.clone());
        }
        Ok(())
    }

    async fn sprints_of_project(&self, id: ProjectId) -> PlanningRepositoryResult<Vec<Sprint>> {
        let state = self.read()?;
        Ok(state
            .sprints
            .values()
            .filter(|sprint| sprint.project() == id)
            .cloned()
            .collect())
    }

    async fn epics_of_project(&self, id: ProjectId) -> PlanningRepositoryResult<Vec<Epic>> {
        let state = self.read()?;
        Ok(state
            .epics
            .values()
            .filter(|epic| epic.project() == id)
            .cloned()
            .collect())
    }

    async fn work_items_of_project(
        &self,
        id: ProjectId,
    ) -> PlanningRepositoryResult<Vec<WorkItem>> {
        let state = self.read()?;
        Ok(state
            .work_items
            .values()
            .filter(|item| item.project() == id)
            .cloned()
            .collect())
    }

    async fn work_items_in_sprint(&self, id: SprintId) -> PlanningRepositoryResult<Vec<WorkItem>> {
        let state = self.read()?;
        Ok(state
            .work_items
            .values()
            .filter(|item| item.sprint() == Some(id))
            .cloned()
            .collect())
    }

    async fn work_items_in_epic(&self, id: EpicId) -> PlanningRepositoryResult<Vec<WorkItem>> {
        let state = self.read()?;
        Ok(state
            .work_items
            .values()
            .filter(|item| item.epic() == Some(id))
            .cloned()
            .collect())
    }
}
