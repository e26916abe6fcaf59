//! In-memory integration tests for adapter-level constraints and queries.

use cadence::planning::{
    adapters::InMemoryPlanningRepository,
    domain::{Epic, Project, Sprint, WorkItem, WorkItemType},
    ports::{PlanningRepository, PlanningRepositoryError},
};
use cadence::staffing::{
    adapters::InMemoryStaffingRepository,
    domain::{FteFraction, Person, PersonId, ResourceAllocation},
    ports::{StaffingRepository, StaffingRepositoryError},
};
use rstest::{fixture, rstest};

#[fixture]
fn planning() -> InMemoryPlanningRepository {
    InMemoryPlanningRepository::new()
}

#[fixture]
fn staffing() -> InMemoryStaffingRepository {
    InMemoryStaffingRepository::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn storing_the_same_project_twice_is_rejected(planning: InMemoryPlanningRepository) {
    let project = Project::new("Apollo").expect("valid title");
    planning
        .store_project(&project)
        .await
        .expect("first store should succeed");

    let result = planning.store_project(&project).await;

    assert!(matches!(
        result,
        Err(PlanningRepositoryError::DuplicateProject(id)) if id == project.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn renaming_onto_a_taken_title_is_rejected(planning: InMemoryPlanningRepository) {
    let first = Project::new("Apollo").expect("valid title");
    let mut second = Project::new("Artemis").expect("valid title");
    planning.store_project(&first).await.expect("store should succeed");
    planning
        .store_project(&second)
        .await
        .expect("store should succeed");

    second.rename("Apollo").expect("valid title");
    let result = planning.update_project(&second).await;

    assert!(matches!(
        result,
        Err(PlanningRepositoryError::DuplicateProjectTitle(title)) if title == "Apollo"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_scoped_queries_return_only_owned_entities(planning: InMemoryPlanningRepository) {
    let mine = Project::new("Apollo").expect("valid title");
    let other = Project::new("Artemis").expect("valid title");
    planning.store_project(&mine).await.expect("store should succeed");
    planning.store_project(&other).await.expect("store should succeed");

    let sprint = Sprint::new(mine.id(), "Iteration 1").expect("valid name");
    let foreign_sprint = Sprint::new(other.id(), "Iteration 1").expect("valid name");
    planning.store_sprint(&sprint).await.expect("store should succeed");
    planning
        .store_sprint(&foreign_sprint)
        .await
        .expect("store should succeed");

    let epic = Epic::new(mine.id(), "Checkout flow").expect("valid title");
    planning.store_epic(&epic).await.expect("store should succeed");

    let item = WorkItem::new(mine.id(), "Wire up login", WorkItemType::Task).expect("valid title");
    planning
        .store_work_item(&item)
        .await
        .expect("store should succeed");

    let sprints = planning
        .sprints_of_project(mine.id())
        .await
        .expect("query should succeed");
    assert_eq!(
        sprints.iter().map(Sprint::id).collect::<Vec<_>>(),
        vec![sprint.id()]
    );

    let epics = planning
        .epics_of_project(mine.id())
        .await
        .expect("query should succeed");
    assert_eq!(epics, vec![epic.clone()]);

    let items = planning
        .work_items_of_project(mine.id())
        .await
        .expect("query should succeed");
    assert_eq!(items, vec![item.clone()]);

    let in_epic = planning
        .work_items_in_epic(epic.id())
        .await
        .expect("query should succeed");
    assert!(in_epic.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn storing_an_item_into_an_unknown_sprint_writes_neither(
    planning: InMemoryPlanningRepository,
) {
    let project = Project::new("Apollo").expect("valid title");
    planning.store_project(&project).await.expect("store should succeed");
    let mut sprint = Sprint::new(project.id(), "Iteration 1").expect("valid name");
    let mut item =
        WorkItem::new(project.id(), "Wire up login", WorkItemType::Task).expect("valid title");
    sprint.add_work_item(&mut item).expect("scheduling should succeed");

    let result = planning.store_work_item_in_sprint(&item, &sprint).await;

    assert!(matches!(
        result,
        Err(PlanningRepositoryError::SprintNotFound(id)) if id == sprint.id()
    ));
    assert_eq!(
        planning
            .find_work_item(item.id())
            .await
            .expect("lookup should succeed"),
        None
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_update_with_an_unknown_item_changes_nothing(
    planning: InMemoryPlanningRepository,
) {
    let project = Project::new("Apollo").expect("valid title");
    planning.store_project(&project).await.expect("store should succeed");
    let mut known =
        WorkItem::new(project.id(), "Known item", WorkItemType::Task).expect("valid title");
    planning
        .store_work_item(&known)
        .await
        .expect("store should succeed");
    let unknown =
        WorkItem::new(project.id(), "Never stored", WorkItemType::Task).expect("valid title");

    known.complete();
    let result = planning
        .update_work_items(&[known.clone(), unknown.clone()])
        .await;

    assert!(matches!(
        result,
        Err(PlanningRepositoryError::WorkItemNotFound(id)) if id == unknown.id()
    ));
    let stored = planning
        .find_work_item(known.id())
        .await
        .expect("lookup should succeed")
        .expect("item should exist");
    assert_ne!(stored, known);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updating_a_person_onto_a_taken_email_is_rejected(staffing: InMemoryStaffingRepository) {
    let ada = Person::new("Ada", "ada@example.org").expect("valid person");
    let mut grace = Person::new("Grace", "grace@example.org").expect("valid person");
    staffing.store_person(&ada).await.expect("store should succeed");
    staffing.store_person(&grace).await.expect("store should succeed");

    grace
        .set_email("ada@example.org")
        .expect("structurally valid email");
    let result = staffing.update_person(&grace).await;

    assert!(matches!(
        result,
        Err(StaffingRepositoryError::DuplicateEmail(email)) if email == "ada@example.org"
    ));

    let stored = staffing
        .find_person(grace.id())
        .await
        .expect("lookup should succeed")
        .expect("person should exist");
    assert_eq!(stored.email(), "grace@example.org");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn allocations_are_queryable_by_sprint(staffing: InMemoryStaffingRepository) {
    let sprint = cadence::planning::domain::SprintId::new();
    let other_sprint = cadence::planning::domain::SprintId::new();
    let epic = cadence::planning::domain::EpicId::new();
    let fte = FteFraction::new(0.5).expect("valid fraction");

    let in_sprint = ResourceAllocation::new(epic, PersonId::new(), sprint, fte);
    let elsewhere = ResourceAllocation::new(epic, PersonId::new(), other_sprint, fte);
    staffing
        .store_resource_allocation(&in_sprint)
        .await
        .expect("store should succeed");
    staffing
        .store_resource_allocation(&elsewhere)
        .await
        .expect("store should succeed");

    let found = staffing
        .allocations_for_sprint(sprint)
        .await
        .expect("query should succeed");

    assert_eq!(found, vec![in_sprint.clone()]);
    assert_eq!(
        staffing
            .find_resource_allocation(in_sprint.id())
            .await
            .expect("lookup should succeed"),
        Some(in_sprint)
    );
}
