//! Reorder service tests: batch application and partial failure.

use crate::identity::{ProjectId, UserId};
use crate::task::adapters::memory::InMemoryTaskRepository;
use crate::task::domain::{Task, TaskDraft, TaskId, TaskTitle};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use crate::task::services::{PositionAssignment, TaskReorderService};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;

async fn seed_task(repository: &InMemoryTaskRepository, project: ProjectId, position: i32) -> Task {
    let draft = TaskDraft::new(
        project,
        TaskTitle::new(format!("Task {position}")).expect("valid title"),
    );
    let task = Task::new(draft, UserId::new(), position, &DefaultClock);
    repository.store(&task).await.expect("store should succeed");
    task
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn apply_sets_every_position_in_the_batch() {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let project = ProjectId::new();
    let first = seed_task(&repository, project, 0).await;
    let second = seed_task(&repository, project, 1).await;
    let third = seed_task(&repository, project, 2).await;

    let service = TaskReorderService::new(Arc::clone(&repository));
    service
        .apply(&[
            PositionAssignment {
                id: third.id(),
                position: 0,
            },
            PositionAssignment {
                id: first.id(),
                position: 1,
            },
            PositionAssignment {
                id: second.id(),
                position: 2,
            },
        ])
        .await
        .expect("reorder should succeed");

    let listed = repository
        .list_for_project(project)
        .await
        .expect("listing should succeed");
    let order: Vec<TaskId> = listed.iter().map(Task::id).collect();
    assert_eq!(order, [third.id(), first.id(), second.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn apply_stops_at_first_failure_and_keeps_earlier_pairs() {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let project = ProjectId::new();
    let first = seed_task(&repository, project, 0).await;
    let second = seed_task(&repository, project, 1).await;
    let missing = TaskId::new();

    let service = TaskReorderService::new(Arc::clone(&repository));
    let result = service
        .apply(&[
            PositionAssignment {
                id: first.id(),
                position: 5,
            },
            PositionAssignment {
                id: missing,
                position: 6,
            },
            PositionAssignment {
                id: second.id(),
                position: 7,
            },
        ])
        .await;

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == missing));
    let moved = repository
        .find_by_id(first.id())
        .await
        .expect("lookup should succeed")
        .expect("task exists");
    assert_eq!(moved.position(), 5, "earlier pair stays applied");
    let untouched = repository
        .find_by_id(second.id())
        .await
        .expect("lookup should succeed")
        .expect("task exists");
    assert_eq!(untouched.position(), 1, "later pair is never applied");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn positions_are_independent_per_sibling_group() {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let project = ProjectId::new();
    let parent = seed_task(&repository, project, 0).await;

    let child_draft = TaskDraft::new(project, TaskTitle::new("Child").expect("valid title"))
        .with_parent(parent.id());
    let child = Task::new(child_draft, UserId::new(), 0, &DefaultClock);
    repository.store(&child).await.expect("store should succeed");

    let top_level_max = repository
        .max_position(project, None)
        .await
        .expect("max should succeed");
    let nested_max = repository
        .max_position(project, Some(parent.id()))
        .await
        .expect("max should succeed");

    assert_eq!(top_level_max, Some(0));
    assert_eq!(nested_max, Some(0));
}
