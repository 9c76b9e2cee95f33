//! Feed assembly and audit-row rendering tests.

use crate::activity::adapters::memory::{
    InMemoryActivityRepository, InMemoryAttachmentRepository, InMemoryCommentRepository,
};
use crate::activity::domain::{
    ActivityAction, ActivityId, Attachment, AttachmentId, AttachmentOwner, Comment, CommentId,
    FeedItem, FeedItemKind, PersistedActivityData, PersistedAttachmentData, PersistedCommentData,
    TaskActivity, render_activity_content,
};
use crate::activity::ports::{ActivityRepository, AttachmentRepository, CommentRepository};
use crate::activity::services::{FeedError, FeedService, FeedServiceDeps, PROJECT_FEED_PAGE_SIZE};
use crate::identity::memory::InMemoryDirectory;
use crate::identity::{DirectoryError, DirectoryResult, ProjectId, User, UserDirectory, UserId};
use async_trait::async_trait;
use mockall::mock;
use crate::task::adapters::memory::InMemoryTaskRepository;
use crate::task::domain::{Task, TaskDraft, TaskId, TaskTitle};
use crate::task::ports::TaskRepository;
use chrono::{DateTime, TimeZone, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::sync::Arc;

struct Harness {
    service: FeedService,
    tasks: Arc<InMemoryTaskRepository>,
    activities: Arc<InMemoryActivityRepository>,
    comments: Arc<InMemoryCommentRepository>,
    attachments: Arc<InMemoryAttachmentRepository>,
    directory: Arc<InMemoryDirectory>,
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let activities = Arc::new(InMemoryActivityRepository::new());
    let comments = Arc::new(InMemoryCommentRepository::new());
    let attachments = Arc::new(InMemoryAttachmentRepository::new());
    let directory = Arc::new(InMemoryDirectory::new());
    let service = FeedService::new(FeedServiceDeps {
        tasks: Arc::clone(&tasks) as _,
        activities: Arc::clone(&activities) as _,
        comments: Arc::clone(&comments) as _,
        attachments: Arc::clone(&attachments) as _,
        users: Arc::clone(&directory) as _,
    });
    Harness {
        service,
        tasks,
        activities,
        comments,
        attachments,
        directory,
    }
}

fn at(second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, second)
        .single()
        .expect("valid timestamp")
}

fn activity_at(
    task: TaskId,
    user: Option<UserId>,
    action: ActivityAction,
    old: Value,
    new: Value,
    created_at: DateTime<Utc>,
) -> TaskActivity {
    TaskActivity::from_persisted(PersistedActivityData {
        id: ActivityId::new(),
        task,
        user,
        action,
        old_value: old,
        new_value: new,
        created_at,
    })
}

fn comment_at(task: TaskId, author: UserId, content: &str, created_at: DateTime<Utc>) -> Comment {
    Comment::from_persisted(PersistedCommentData {
        id: CommentId::new(),
        task,
        author,
        content: content.to_owned(),
        created_at,
    })
}

fn attachment_at(task: TaskId, uploader: UserId, created_at: DateTime<Utc>) -> Attachment {
    Attachment::from_persisted(PersistedAttachmentData {
        id: AttachmentId::new(),
        owner: AttachmentOwner::Task(task),
        uploader,
        file_name: "notes.txt".to_owned(),
        storage_path: "attachments/feedblob".to_owned(),
        byte_size: 5,
        mime_type: "text/plain".to_owned(),
        created_at,
    })
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_feed_merges_sources_ascending_and_skips_comment_mirrors(harness: Harness) {
    let author = harness
        .directory
        .seed_user("Alice", None)
        .expect("seed user");
    let task = TaskId::new();

    harness
        .comments
        .store(&comment_at(task, author, "looks good", at(1)))
        .await
        .expect("store should succeed");
    harness
        .activities
        .append(&activity_at(
            task,
            Some(author),
            ActivityAction::Comment,
            Value::Null,
            json!({ "content": "looks good" }),
            at(1),
        ))
        .await
        .expect("append should succeed");
    harness
        .activities
        .append(&activity_at(
            task,
            Some(author),
            ActivityAction::updated("Status"),
            json!("None"),
            json!("Done"),
            at(2),
        ))
        .await
        .expect("append should succeed");
    harness
        .attachments
        .store(&attachment_at(task, author, at(3)))
        .await
        .expect("store should succeed");

    let feed = harness
        .service
        .task_feed(task)
        .await
        .expect("feed should assemble");

    let kinds: Vec<FeedItemKind> = feed.iter().map(FeedItem::kind).collect();
    assert_eq!(
        kinds,
        [
            FeedItemKind::Comment,
            FeedItemKind::Activity,
            FeedItemKind::File,
        ]
    );
    let contents: Vec<&str> = feed.iter().map(|item| item.content.as_str()).collect();
    assert_eq!(
        contents,
        [
            "looks good",
            "Changed Status from 'None' to 'Done'",
            "Uploaded file: notes.txt",
        ]
    );
    assert!(feed.iter().all(|item| item
        .user
        .as_ref()
        .is_some_and(|user| user.name == "Alice")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_feed_keeps_source_order_for_equal_timestamps(harness: Harness) {
    let author = harness
        .directory
        .seed_user("Alice", None)
        .expect("seed user");
    let task = TaskId::new();
    let moment = at(5);

    harness
        .activities
        .append(&activity_at(
            task,
            Some(author),
            ActivityAction::updated("Title"),
            json!("Old"),
            json!("New"),
            moment,
        ))
        .await
        .expect("append should succeed");
    harness
        .comments
        .store(&comment_at(task, author, "same instant", moment))
        .await
        .expect("store should succeed");

    let feed = harness
        .service
        .task_feed(task)
        .await
        .expect("feed should assemble");
    // Stable sort: comments are collected before activities.
    assert_eq!(feed.first().expect("first item").kind(), FeedItemKind::Comment);
    assert_eq!(
        feed.get(1).expect("second item").kind(),
        FeedItemKind::Activity
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_feed_resolves_deleted_users_to_none(harness: Harness) {
    let task = TaskId::new();
    harness
        .comments
        .store(&comment_at(task, UserId::new(), "ghost", at(1)))
        .await
        .expect("store should succeed");

    let feed = harness
        .service
        .task_feed(task)
        .await
        .expect("feed should assemble");
    assert!(feed.first().expect("one item").user.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_feed_pages_newest_first_with_eager_task_and_user(harness: Harness) {
    let author = harness
        .directory
        .seed_user("Alice", None)
        .expect("seed user");
    let project = ProjectId::new();
    let draft = TaskDraft::new(project, TaskTitle::new("Visible").expect("valid title"));
    let task = Task::new(draft, author, 0, &DefaultClock);
    harness
        .tasks
        .store(&task)
        .await
        .expect("store should succeed");

    harness
        .activities
        .append(&activity_at(
            task.id(),
            Some(author),
            ActivityAction::Created,
            Value::Null,
            json!({ "title": "Visible" }),
            at(1),
        ))
        .await
        .expect("append should succeed");
    harness
        .activities
        .append(&activity_at(
            task.id(),
            Some(author),
            ActivityAction::updated("Priority"),
            json!("Medium"),
            json!("High"),
            at(2),
        ))
        .await
        .expect("append should succeed");
    // Activity of a task in another project must not leak in.
    harness
        .activities
        .append(&activity_at(
            TaskId::new(),
            Some(author),
            ActivityAction::Created,
            Value::Null,
            json!({ "title": "Elsewhere" }),
            at(3),
        ))
        .await
        .expect("append should succeed");

    let page = harness
        .service
        .project_feed(project, 1)
        .await
        .expect("feed should assemble");

    assert_eq!(page.total, 2);
    assert_eq!(page.page, 1);
    assert_eq!(page.per_page, PROJECT_FEED_PAGE_SIZE);
    assert_eq!(page.entries.len(), 2);

    let newest = page.entries.first().expect("newest entry");
    assert_eq!(newest.activity.action().label(), "Priority_updated");
    assert_eq!(
        newest.task.as_ref().map(Task::id),
        Some(task.id()),
        "task is eagerly attached"
    );
    assert!(
        newest
            .user
            .as_ref()
            .is_some_and(|user| user.name == "Alice")
    );

    let older = page.entries.get(1).expect("older entry");
    assert_eq!(older.activity.action().label(), "created");
}

#[rstest]
fn render_handles_legacy_status_changed_rows() {
    let row = activity_at(
        TaskId::new(),
        None,
        ActivityAction::from_label("status_changed"),
        json!({ "status_id": 3 }),
        json!({ "status_id": 4 }),
        at(1),
    );
    assert_eq!(render_activity_content(&row), "Changed Status");
}

#[rstest]
fn render_substitutes_display_snapshots() {
    let row = activity_at(
        TaskId::new(),
        None,
        ActivityAction::updated("Assignee"),
        json!("Unassigned"),
        json!("Bob"),
        at(1),
    );
    assert_eq!(
        render_activity_content(&row),
        "Changed Assignee from 'Unassigned' to 'Bob'"
    );
}

#[rstest]
fn render_degrades_object_values_to_id_form() {
    let row = activity_at(
        TaskId::new(),
        None,
        ActivityAction::updated("Status"),
        json!({ "status_id": 7 }),
        json!("Done"),
        at(1),
    );
    assert_eq!(
        render_activity_content(&row),
        "Changed Status from 'ID: 7' to 'Done'"
    );
}

mock! {
    Directory {}

    #[async_trait]
    impl UserDirectory for Directory {
        async fn find_by_id(&self, id: UserId) -> DirectoryResult<Option<User>>;
        async fn find_by_email(&self, email: &str) -> DirectoryResult<Option<User>>;
        async fn find_by_names(&self, names: &[String]) -> DirectoryResult<Vec<User>>;
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_feed_propagates_user_lookup_failures() {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let activities = Arc::new(InMemoryActivityRepository::new());
    let comments = Arc::new(InMemoryCommentRepository::new());
    let attachments = Arc::new(InMemoryAttachmentRepository::new());
    let mut users = MockDirectory::new();
    users.expect_find_by_id().returning(|_| {
        Err(DirectoryError::store(std::io::Error::other(
            "directory offline",
        )))
    });

    let task = TaskId::new();
    comments
        .store(&comment_at(task, UserId::new(), "orphaned", at(1)))
        .await
        .expect("store should succeed");

    let service = FeedService::new(FeedServiceDeps {
        tasks: tasks as _,
        activities: activities as _,
        comments: Arc::clone(&comments) as _,
        attachments: attachments as _,
        users: Arc::new(users) as _,
    });
    let result = service.task_feed(task).await;
    assert!(matches!(result, Err(FeedError::Directory(_))));
}

#[rstest]
fn render_uses_empty_string_for_null_values() {
    let row = activity_at(
        TaskId::new(),
        None,
        ActivityAction::updated("Due Date"),
        Value::Null,
        json!("2026-09-15"),
        at(1),
    );
    assert_eq!(
        render_activity_content(&row),
        "Changed Due Date from '' to '2026-09-15'"
    );
}
