//! In-memory integration tests for authoring operations.

use crate::in_memory::helpers::{Stack, seed_work_item, stack};
use cadence::planning::{
    domain::{
        EpicStatus, ProjectId, ProjectStatus, SprintId, WorkItemLocation, WorkItemPriority,
        WorkItemStatus, WorkItemType,
    },
    ports::{PlanningRepository, PlanningRepositoryError},
    services::{AuthoringError, CreateWorkItemRequest},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_project_is_retrievable(stack: Stack) {
    let project = stack
        .authoring()
        .create_project("Apollo", Some("Lunar landing".to_owned()))
        .await
        .expect("project creation should succeed");

    let found = stack
        .planning
        .find_project(project.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(found, Some(project));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_project_title_is_rejected(stack: Stack) {
    let authoring = stack.authoring();
    authoring
        .create_project("Apollo", None)
        .await
        .expect("first project creation should succeed");

    let result = authoring.create_project("Apollo", None).await;

    assert!(matches!(
        result,
        Err(AuthoringError::Repository(
            PlanningRepositoryError::DuplicateProjectTitle(title)
        )) if title == "Apollo"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_rename_and_status_changes_are_persisted(stack: Stack) {
    let authoring = stack.authoring();
    let project = authoring
        .create_project("Apollo", None)
        .await
        .expect("project creation should succeed");

    let renamed = authoring
        .rename_project(project.id(), "Artemis")
        .await
        .expect("rename should succeed");
    assert_eq!(renamed.title(), "Artemis");

    let activated = authoring
        .set_project_status(project.id(), ProjectStatus::Active)
        .await
        .expect("status change should succeed");
    assert_eq!(activated.status(), ProjectStatus::Active);

    let stored = stack
        .planning
        .find_project(project.id())
        .await
        .expect("lookup should succeed")
        .expect("project should exist");
    assert_eq!(stored.title(), "Artemis");
    assert_eq!(stored.status(), ProjectStatus::Active);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn epic_creation_requires_an_existing_project(stack: Stack) {
    let missing = ProjectId::new();
    let result = stack.authoring().create_epic(missing, "Checkout flow").await;

    assert!(matches!(
        result,
        Err(AuthoringError::ProjectNotFound(id)) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn work_item_can_be_created_straight_into_a_sprint(stack: Stack) {
    let authoring = stack.authoring();
    let project = authoring
        .create_project("Apollo", None)
        .await
        .expect("project creation should succeed");
    let sprint = authoring
        .create_sprint(project.id(), "Iteration 1", Some("Ship login".to_owned()))
        .await
        .expect("sprint creation should succeed");

    let request = CreateWorkItemRequest::new(project.id(), "Wire up login", WorkItemType::Story)
        .with_priority(WorkItemPriority::High)
        .with_story_points(5)
        .with_sprint(sprint.id());
    let item = authoring
        .create_work_item(request)
        .await
        .expect("work item creation should succeed");

    assert_eq!(item.location(), WorkItemLocation::Sprint);
    assert_eq!(item.sprint(), Some(sprint.id()));

    let stored_sprint = stack
        .planning
        .find_sprint(sprint.id())
        .await
        .expect("lookup should succeed")
        .expect("sprint should exist");
    assert!(stored_sprint.contains(item.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn work_item_creation_rejects_an_unknown_sprint(stack: Stack) {
    let project = stack
        .authoring()
        .create_project("Apollo", None)
        .await
        .expect("project creation should succeed");
    let missing = SprintId::new();

    let request = CreateWorkItemRequest::new(project.id(), "Wire up login", WorkItemType::Task)
        .with_sprint(missing);
    let result = stack.authoring().create_work_item(request).await;

    assert!(matches!(
        result,
        Err(AuthoringError::SprintNotFound(id)) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_updates_are_persisted(stack: Stack) {
    let project = stack
        .authoring()
        .create_project("Apollo", None)
        .await
        .expect("project creation should succeed");
    let item = seed_work_item(&stack, &project, "Wire up login")
        .await
        .expect("work item creation should succeed");

    let updated = stack
        .authoring()
        .update_work_item_status(item.id(), WorkItemStatus::InProgress)
        .await
        .expect("status update should succeed");
    assert_eq!(updated.status(), WorkItemStatus::InProgress);

    let completed = stack
        .authoring()
        .complete_work_item(item.id())
        .await
        .expect("completion should succeed");
    assert_eq!(completed.status(), WorkItemStatus::Done);
    assert_eq!(completed.location(), WorkItemLocation::Completed);

    let stored = stack
        .planning
        .find_work_item(item.id())
        .await
        .expect("lookup should succeed")
        .expect("item should exist");
    assert_eq!(stored, completed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelling_an_epic_is_persisted(stack: Stack) {
    let authoring = stack.authoring();
    let project = authoring
        .create_project("Apollo", None)
        .await
        .expect("project creation should succeed");
    let epic = authoring
        .create_epic(project.id(), "Checkout flow")
        .await
        .expect("epic creation should succeed");

    let implementing = authoring
        .set_epic_status(epic.id(), EpicStatus::Implementing)
        .await
        .expect("status change should succeed");
    assert_eq!(implementing.status(), EpicStatus::Implementing);

    let canceled = authoring
        .cancel_epic(epic.id())
        .await
        .expect("cancellation should succeed");

    assert_eq!(canceled.status(), EpicStatus::Canceled);
    let stored = stack
        .planning
        .find_epic(epic.id())
        .await
        .expect("lookup should succeed")
        .expect("epic should exist");
    assert_eq!(stored.status(), EpicStatus::Canceled);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dependency_edges_are_recorded_across_entities(stack: Stack) {
    let authoring = stack.authoring();
    let project = authoring
        .create_project("Apollo", None)
        .await
        .expect("project creation should succeed");
    let first = authoring
        .create_epic(project.id(), "Checkout flow")
        .await
        .expect("epic creation should succeed");
    let second = authoring
        .create_epic(project.id(), "Payments")
        .await
        .expect("epic creation should succeed");

    let updated = authoring
        .add_epic_dependency(first.id(), second.id())
        .await
        .expect("dependency should be recorded");
    assert_eq!(updated.dependencies(), [second.id()]);

    let item_a = seed_work_item(&stack, &project, "First item")
        .await
        .expect("work item creation should succeed");
    let item_b = seed_work_item(&stack, &project, "Second item")
        .await
        .expect("work item creation should succeed");
    let updated_item = authoring
        .add_work_item_dependency(item_a.id(), item_b.id())
        .await
        .expect("dependency should be recorded");
    assert_eq!(updated_item.dependencies(), [item_b.id()]);
}
