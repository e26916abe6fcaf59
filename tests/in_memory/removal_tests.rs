//! In-memory integration tests for epic and project removal cascades.

use crate::in_memory::helpers::{
    Stack, seed_project_with_active_sprint, seed_work_item, stack,
};
use cadence::planning::{
    domain::{PlanningDomainError, WorkItemLocation, WorkItemType},
    ports::{PlanningRepository, PlanningRepositoryError},
    services::{CreateWorkItemRequest, RemovalError},
};
use cadence::staffing::{
    domain::FteFraction,
    ports::StaffingRepository,
    services::AssignPersonRequest,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_unstarted_sprint_returns_its_items_to_the_backlog(stack: Stack) {
    let (project, active) = seed_project_with_active_sprint(&stack)
        .await
        .expect("seeding should succeed");
    let authoring = stack.authoring();
    let planned = authoring
        .create_sprint(project.id(), "Iteration 2", None)
        .await
        .expect("sprint creation should succeed");
    let request = CreateWorkItemRequest::new(project.id(), "Scheduled early", WorkItemType::Task)
        .with_sprint(planned.id());
    let item = authoring
        .create_work_item(request)
        .await
        .expect("work item creation should succeed");

    let epic = authoring
        .create_epic(project.id(), "Checkout flow")
        .await
        .expect("epic creation should succeed");
    let person = stack
        .roster()
        .register_person("Ada Lovelace", "ada@example.org", None)
        .await
        .expect("registration should succeed");
    let assignment_service = stack.assignment();
    assignment_service
        .allocate_resource(
            epic.id(),
            person.id(),
            planned.id(),
            FteFraction::new(0.5).expect("valid fraction"),
        )
        .await
        .expect("allocation should succeed");
    let surviving = assignment_service
        .allocate_resource(
            epic.id(),
            person.id(),
            active.id(),
            FteFraction::new(0.5).expect("valid fraction"),
        )
        .await
        .expect("allocation should succeed");

    let removal = stack
        .removal()
        .delete_sprint(planned.id())
        .await
        .expect("removal should succeed");

    assert_eq!(removal.detached_items, vec![item.id()]);
    assert_eq!(removal.removed_allocations, 1);

    assert_eq!(
        stack
            .planning
            .find_sprint(planned.id())
            .await
            .expect("lookup should succeed"),
        None
    );
    let backlogged = stack
        .planning
        .find_work_item(item.id())
        .await
        .expect("lookup should succeed")
        .expect("item should survive");
    assert_eq!(backlogged.sprint(), None);
    assert_eq!(backlogged.location(), WorkItemLocation::Backlog);
    // The other sprint's allocations are untouched.
    assert_eq!(
        stack
            .staffing
            .allocations_for_sprint(active.id())
            .await
            .expect("query should succeed"),
        vec![surviving]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_started_sprint_is_rejected(stack: Stack) {
    let (_, sprint) = seed_project_with_active_sprint(&stack)
        .await
        .expect("seeding should succeed");

    let result = stack.removal().delete_sprint(sprint.id()).await;

    assert!(matches!(
        result,
        Err(RemovalError::Domain(
            PlanningDomainError::SprintAlreadyStarted { sprint_id, .. }
        )) if sprint_id == sprint.id()
    ));
    assert!(
        stack
            .planning
            .find_sprint(sprint.id())
            .await
            .expect("lookup should succeed")
            .is_some()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_missing_sprint_reports_not_found(stack: Stack) {
    let missing = cadence::planning::domain::SprintId::new();
    let result = stack.removal().delete_sprint(missing).await;
    assert!(matches!(
        result,
        Err(RemovalError::SprintNotFound(id)) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_epic_detaches_items_and_removes_assignments(stack: Stack) {
    let (project, sprint) = seed_project_with_active_sprint(&stack)
        .await
        .expect("seeding should succeed");
    let authoring = stack.authoring();
    let epic = authoring
        .create_epic(project.id(), "Checkout flow")
        .await
        .expect("epic creation should succeed");
    let item = seed_work_item(&stack, &project, "Wire up login")
        .await
        .expect("work item creation should succeed");
    authoring
        .assign_work_item_to_epic(item.id(), epic.id())
        .await
        .expect("attachment should succeed");

    let roster = stack.roster();
    let person = roster
        .register_person("Ada Lovelace", "ada@example.org", None)
        .await
        .expect("registration should succeed");
    let assignment_service = stack.assignment();
    assignment_service
        .assign_person(AssignPersonRequest::new(person.id()).to_epic(epic.id()))
        .await
        .expect("person assignment should succeed");
    let cost = assignment_service
        .create_cost("Licences", None, None)
        .await
        .expect("cost creation should succeed");
    assignment_service
        .assign_cost(cost.id(), Some(epic.id()), None)
        .await
        .expect("cost assignment should succeed");
    assignment_service
        .allocate_resource(
            epic.id(),
            person.id(),
            sprint.id(),
            FteFraction::new(0.5).expect("valid fraction"),
        )
        .await
        .expect("allocation should succeed");

    let removal = stack
        .removal()
        .delete_epic(epic.id())
        .await
        .expect("removal should succeed");

    assert_eq!(removal.detached_items, vec![item.id()]);
    assert_eq!(removal.removed_assignments, 2);
    assert_eq!(removal.removed_allocations, 1);

    let detached = stack
        .planning
        .find_work_item(item.id())
        .await
        .expect("lookup should succeed")
        .expect("item should survive");
    assert_eq!(detached.epic(), None);
    assert_eq!(
        stack
            .planning
            .find_epic(epic.id())
            .await
            .expect("lookup should succeed"),
        None
    );
    let (cost_assignments, person_assignments) = stack
        .staffing
        .assignments_for_epic(epic.id())
        .await
        .expect("query should succeed");
    assert!(cost_assignments.is_empty() && person_assignments.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_missing_epic_reports_not_found(stack: Stack) {
    let missing = cadence::planning::domain::EpicId::new();
    let result = stack.removal().delete_epic(missing).await;
    assert!(matches!(
        result,
        Err(RemovalError::EpicNotFound(id)) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_cascades_through_both_contexts(stack: Stack) {
    let (project, sprint) = seed_project_with_active_sprint(&stack)
        .await
        .expect("seeding should succeed");
    let authoring = stack.authoring();
    let epic = authoring
        .create_epic(project.id(), "Checkout flow")
        .await
        .expect("epic creation should succeed");
    let item = seed_work_item(&stack, &project, "Wire up login")
        .await
        .expect("work item creation should succeed");

    let roster = stack.roster();
    let person = roster
        .register_person("Ada Lovelace", "ada@example.org", None)
        .await
        .expect("registration should succeed");
    let team = roster
        .create_team(project.id(), "Platform", None)
        .await
        .expect("team creation should succeed");
    let assignment_service = stack.assignment();
    assignment_service
        .assign_person(AssignPersonRequest::new(person.id()).to_work_item(item.id()))
        .await
        .expect("person assignment should succeed");
    assignment_service
        .allocate_resource(
            epic.id(),
            person.id(),
            sprint.id(),
            FteFraction::new(1.0).expect("valid fraction"),
        )
        .await
        .expect("allocation should succeed");

    let removal = stack
        .removal()
        .delete_project(project.id())
        .await
        .expect("removal should succeed");

    assert_eq!(removal.cascade.sprints, vec![sprint.id()]);
    assert_eq!(removal.cascade.epics, vec![epic.id()]);
    assert_eq!(removal.cascade.work_items, vec![item.id()]);
    assert_eq!(removal.removed_assignments, 1);
    assert_eq!(removal.removed_allocations, 1);
    assert_eq!(removal.removed_teams, 1);

    assert_eq!(
        stack
            .planning
            .find_project(project.id())
            .await
            .expect("lookup should succeed"),
        None
    );
    assert_eq!(
        stack
            .staffing
            .find_team(team.id())
            .await
            .expect("lookup should succeed"),
        None
    );
    // People are project-independent and survive the cascade.
    assert!(
        stack
            .staffing
            .find_person(person.id())
            .await
            .expect("lookup should succeed")
            .is_some()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_missing_project_reports_not_found(stack: Stack) {
    let missing = cadence::planning::domain::ProjectId::new();
    let result = stack.removal().delete_project(missing).await;
    assert!(matches!(
        result,
        Err(RemovalError::Planning(
            PlanningRepositoryError::ProjectNotFound(id)
        )) if id == missing
    ));
}
