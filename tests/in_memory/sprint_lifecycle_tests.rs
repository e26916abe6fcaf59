//! In-memory integration tests for the sprint lifecycle service.

use crate::in_memory::helpers::{
    Stack, seed_project_with_active_sprint, seed_work_item, stack,
};
use cadence::planning::{
    domain::{PlanningDomainError, SprintStatus, WorkItemLocation, WorkItemStatus},
    ports::PlanningRepository,
    services::{CompleteSprintRequest, SprintLifecycleError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_a_sprint_returns_unfinished_work_to_the_backlog(stack: Stack) {
    let (project, sprint) = seed_project_with_active_sprint(&stack)
        .await
        .expect("seeding should succeed");
    let lifecycle = stack.lifecycle();

    let unfinished = seed_work_item(&stack, &project, "Carry over")
        .await
        .expect("work item creation should succeed");
    let finished = seed_work_item(&stack, &project, "Shipped")
        .await
        .expect("work item creation should succeed");
    lifecycle
        .add_work_item(sprint.id(), unfinished.id())
        .await
        .expect("scheduling should succeed");
    lifecycle
        .add_work_item(sprint.id(), finished.id())
        .await
        .expect("scheduling should succeed");
    stack
        .authoring()
        .update_work_item_status(finished.id(), WorkItemStatus::Done)
        .await
        .expect("status update should succeed");

    let completion = lifecycle
        .complete_sprint(CompleteSprintRequest::to_backlog(sprint.id()))
        .await
        .expect("completion should succeed");

    assert_eq!(completion.sprint.status(), SprintStatus::Completed);
    assert_eq!(completion.moved_items, vec![unfinished.id()]);
    assert!(completion.target.is_none());

    let backlogged = stack
        .planning
        .find_work_item(unfinished.id())
        .await
        .expect("lookup should succeed")
        .expect("item should exist");
    assert_eq!(backlogged.location(), WorkItemLocation::Backlog);
    assert_eq!(backlogged.sprint(), None);

    let kept = stack
        .planning
        .find_work_item(finished.id())
        .await
        .expect("lookup should succeed")
        .expect("item should exist");
    assert_eq!(kept.sprint(), Some(sprint.id()));
    assert!(completion.sprint.contains(finished.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_a_sprint_can_move_unfinished_work_into_a_target(stack: Stack) {
    let (project, sprint) = seed_project_with_active_sprint(&stack)
        .await
        .expect("seeding should succeed");
    let next = stack
        .authoring()
        .create_sprint(project.id(), "Iteration 2", None)
        .await
        .expect("sprint creation should succeed");
    let item = seed_work_item(&stack, &project, "Carry over")
        .await
        .expect("work item creation should succeed");
    let lifecycle = stack.lifecycle();
    lifecycle
        .add_work_item(sprint.id(), item.id())
        .await
        .expect("scheduling should succeed");

    let completion = lifecycle
        .complete_sprint(CompleteSprintRequest::into_sprint(sprint.id(), next.id()))
        .await
        .expect("completion should succeed");

    assert_eq!(completion.moved_items, vec![item.id()]);
    let target = completion.target.expect("target sprint should be returned");
    assert!(target.contains(item.id()));

    let moved = stack
        .planning
        .find_work_item(item.id())
        .await
        .expect("lookup should succeed")
        .expect("item should exist");
    assert_eq!(moved.sprint(), Some(next.id()));
    assert_eq!(moved.location(), WorkItemLocation::Sprint);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_a_sprint_into_itself_closes_it_with_items_in_place(stack: Stack) {
    let (project, sprint) = seed_project_with_active_sprint(&stack)
        .await
        .expect("seeding should succeed");
    let item = seed_work_item(&stack, &project, "Still todo")
        .await
        .expect("work item creation should succeed");
    let lifecycle = stack.lifecycle();
    lifecycle
        .add_work_item(sprint.id(), item.id())
        .await
        .expect("scheduling should succeed");

    let completion = lifecycle
        .complete_sprint(CompleteSprintRequest::into_sprint(sprint.id(), sprint.id()))
        .await
        .expect("completion should succeed");

    assert_eq!(completion.sprint.status(), SprintStatus::Completed);
    assert!(completion.moved_items.is_empty());

    let stored = stack
        .planning
        .find_sprint(sprint.id())
        .await
        .expect("lookup should succeed")
        .expect("sprint should exist");
    assert_eq!(stored.status(), SprintStatus::Completed);
    assert!(stored.contains(item.id()));

    let kept = stack
        .planning
        .find_work_item(item.id())
        .await
        .expect("lookup should succeed")
        .expect("item should exist");
    assert_eq!(kept.sprint(), Some(sprint.id()));
    assert_eq!(kept.location(), WorkItemLocation::Sprint);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_into_a_completed_target_changes_nothing(stack: Stack) {
    let (project, sprint) = seed_project_with_active_sprint(&stack)
        .await
        .expect("seeding should succeed");
    let lifecycle = stack.lifecycle();
    let closed = stack
        .authoring()
        .create_sprint(project.id(), "Closed sprint", None)
        .await
        .expect("sprint creation should succeed");
    lifecycle
        .start_sprint(closed.id())
        .await
        .expect("start should succeed");
    lifecycle
        .complete_sprint(CompleteSprintRequest::to_backlog(closed.id()))
        .await
        .expect("completion should succeed");

    let item = seed_work_item(&stack, &project, "Carry over")
        .await
        .expect("work item creation should succeed");
    lifecycle
        .add_work_item(sprint.id(), item.id())
        .await
        .expect("scheduling should succeed");

    let result = lifecycle
        .complete_sprint(CompleteSprintRequest::into_sprint(sprint.id(), closed.id()))
        .await;

    assert!(matches!(
        result,
        Err(SprintLifecycleError::Domain(
            PlanningDomainError::TargetSprintClosed(id)
        )) if id == closed.id()
    ));

    let untouched_sprint = stack
        .planning
        .find_sprint(sprint.id())
        .await
        .expect("lookup should succeed")
        .expect("sprint should exist");
    assert_eq!(untouched_sprint.status(), SprintStatus::Active);
    let untouched_item = stack
        .planning
        .find_work_item(item.id())
        .await
        .expect("lookup should succeed")
        .expect("item should exist");
    assert_eq!(untouched_item.sprint(), Some(sprint.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_into_a_sprint_of_another_project_is_rejected(stack: Stack) {
    let (_, sprint) = seed_project_with_active_sprint(&stack)
        .await
        .expect("seeding should succeed");
    let other_project = stack
        .authoring()
        .create_project("Other project", None)
        .await
        .expect("project creation should succeed");
    let foreign = stack
        .authoring()
        .create_sprint(other_project.id(), "Foreign sprint", None)
        .await
        .expect("sprint creation should succeed");

    let result = stack
        .lifecycle()
        .complete_sprint(CompleteSprintRequest::into_sprint(sprint.id(), foreign.id()))
        .await;

    assert!(matches!(
        result,
        Err(SprintLifecycleError::Domain(
            PlanningDomainError::CrossProjectTransfer { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_a_sprint_twice_is_rejected(stack: Stack) {
    let (_, sprint) = seed_project_with_active_sprint(&stack)
        .await
        .expect("seeding should succeed");
    let lifecycle = stack.lifecycle();
    lifecycle
        .complete_sprint(CompleteSprintRequest::to_backlog(sprint.id()))
        .await
        .expect("first completion should succeed");

    let result = lifecycle
        .complete_sprint(CompleteSprintRequest::to_backlog(sprint.id()))
        .await;

    assert!(matches!(
        result,
        Err(SprintLifecycleError::Domain(
            PlanningDomainError::InvalidSprintTransition {
                from: SprintStatus::Completed,
                to: SprintStatus::Completed,
                ..
            }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn adding_work_to_a_completed_sprint_is_rejected(stack: Stack) {
    let (project, sprint) = seed_project_with_active_sprint(&stack)
        .await
        .expect("seeding should succeed");
    let lifecycle = stack.lifecycle();
    lifecycle
        .complete_sprint(CompleteSprintRequest::to_backlog(sprint.id()))
        .await
        .expect("completion should succeed");
    let item = seed_work_item(&stack, &project, "Latecomer")
        .await
        .expect("work item creation should succeed");

    let result = lifecycle.add_work_item(sprint.id(), item.id()).await;

    assert!(matches!(
        result,
        Err(SprintLifecycleError::Domain(
            PlanningDomainError::SprintClosed(id)
        )) if id == sprint.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_a_work_item_returns_it_to_the_backlog(stack: Stack) {
    let (project, sprint) = seed_project_with_active_sprint(&stack)
        .await
        .expect("seeding should succeed");
    let item = seed_work_item(&stack, &project, "Rescheduled")
        .await
        .expect("work item creation should succeed");
    let lifecycle = stack.lifecycle();
    lifecycle
        .add_work_item(sprint.id(), item.id())
        .await
        .expect("scheduling should succeed");

    let (updated_sprint, updated_item) = lifecycle
        .remove_work_item(sprint.id(), item.id())
        .await
        .expect("removal should succeed");

    assert!(!updated_sprint.contains(item.id()));
    assert_eq!(updated_item.location(), WorkItemLocation::Backlog);
    assert_eq!(updated_item.sprint(), None);
}
