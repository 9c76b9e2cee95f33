//! End-to-end collaboration flow over the in-memory adapters.
//!
//! Exercises the public API the way a request handler would: invite a user
//! into an organization, redeem the token, create and update a task, post a
//! mentioning comment, and read both feeds back.

#![expect(
    clippy::cognitive_complexity,
    reason = "Flow tests walk several operations in sequence"
)]

use chrono::NaiveDate;
use gantry::activity::adapters::memory::{
    InMemoryActivityRepository, InMemoryAttachmentRepository, InMemoryBlobStore,
    InMemoryCommentRepository,
};
use gantry::activity::domain::FeedItemKind;
use gantry::activity::services::{
    CommentService, CommentServiceDeps, FeedService, FeedServiceDeps,
};
use gantry::identity::{InMemoryDirectory, Role};
use gantry::invitation::adapters::memory::InMemoryInvitationRepository;
use gantry::invitation::services::{InvitationService, InvitationServiceDeps, InviteOutcome};
use gantry::notify::{Notification, RecordingNotifier};
use gantry::task::adapters::memory::InMemoryTaskRepository;
use gantry::task::domain::{FieldPatch, Priority, TaskDraft, TaskPatch, TaskTitle};
use gantry::task::services::{TaskMutationDeps, TaskMutationService};
use mockable::DefaultClock;
use std::sync::Arc;

struct World {
    directory: Arc<InMemoryDirectory>,
    notifier: Arc<RecordingNotifier>,
    invitations: InvitationService,
    mutation: TaskMutationService,
    comments: CommentService,
    feed: FeedService,
}

fn world() -> World {
    let directory = Arc::new(InMemoryDirectory::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let activities = Arc::new(InMemoryActivityRepository::new());
    let comment_rows = Arc::new(InMemoryCommentRepository::new());
    let attachments = Arc::new(InMemoryAttachmentRepository::new());
    let blobs = Arc::new(InMemoryBlobStore::new());
    let invitation_rows = Arc::new(InMemoryInvitationRepository::new());
    let clock = Arc::new(DefaultClock);

    let invitations = InvitationService::new(InvitationServiceDeps {
        invitations: Arc::clone(&invitation_rows) as _,
        users: Arc::clone(&directory) as _,
        membership: Arc::clone(&directory) as _,
        notifier: Arc::clone(&notifier) as _,
        clock: Arc::clone(&clock) as _,
        accept_base_url: "https://tracker.example.com".to_owned(),
    });
    let mutation = TaskMutationService::new(TaskMutationDeps {
        tasks: Arc::clone(&tasks) as _,
        activities: Arc::clone(&activities) as _,
        comments: Arc::clone(&comment_rows) as _,
        attachments: Arc::clone(&attachments) as _,
        blobs: Arc::clone(&blobs) as _,
        users: Arc::clone(&directory) as _,
        statuses: Arc::clone(&directory) as _,
        membership: Arc::clone(&directory) as _,
        notifier: Arc::clone(&notifier) as _,
        clock: Arc::clone(&clock) as _,
    });
    let comments = CommentService::new(CommentServiceDeps {
        tasks: Arc::clone(&tasks) as _,
        comments: Arc::clone(&comment_rows) as _,
        activities: Arc::clone(&activities) as _,
        attachments: Arc::clone(&attachments) as _,
        blobs: Arc::clone(&blobs) as _,
        users: Arc::clone(&directory) as _,
        notifier: Arc::clone(&notifier) as _,
        clock: Arc::clone(&clock) as _,
    });
    let feed = FeedService::new(FeedServiceDeps {
        tasks: Arc::clone(&tasks) as _,
        activities: Arc::clone(&activities) as _,
        comments: Arc::clone(&comment_rows) as _,
        attachments: Arc::clone(&attachments) as _,
        users: Arc::clone(&directory) as _,
    });

    World {
        directory,
        notifier,
        invitations,
        mutation,
        comments,
        feed,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn invite_accept_mutate_comment_and_read_feeds() {
    let world = world();

    // Organization setup: Alice runs the Launch project, Bob is invited in.
    let org = world
        .directory
        .seed_organization("Acme")
        .expect("seed organization");
    let project = world
        .directory
        .seed_project(org, "Launch")
        .expect("seed project");
    let in_progress = world
        .directory
        .seed_status("In Progress")
        .expect("seed status");
    let alice = world
        .directory
        .seed_user("Alice", Some("alice@example.com".to_owned()))
        .expect("seed user");
    let bob = world
        .directory
        .seed_user("Bob", Some("bob@example.com".to_owned()))
        .expect("seed user");

    let outcome = world
        .invitations
        .invite(org, "bob@example.com", Some(project))
        .await
        .expect("invite should succeed");
    let InviteOutcome::InvitationSent(invitation) = outcome else {
        panic!("Bob is not yet a member, an invitation must be stored");
    };
    let joined = world
        .invitations
        .accept(bob, invitation.token().as_str())
        .await
        .expect("accept should succeed");
    assert_eq!(joined, org);
    assert_eq!(
        world
            .directory
            .project_role(project, bob)
            .expect("role lookup"),
        Some(Role::Member)
    );

    // Task lifecycle: create, then a multi-field update assigning Bob.
    let draft = TaskDraft::new(project, TaskTitle::new("Ship the release").expect("valid title"));
    let task = world
        .mutation
        .create(alice, draft)
        .await
        .expect("create should succeed");
    assert_eq!(task.position(), 0);

    let patch = TaskPatch {
        status: FieldPatch::Set(in_progress),
        priority: Some(Priority::High),
        assignee: FieldPatch::Set(bob),
        due_date: FieldPatch::Set(
            NaiveDate::from_ymd_opt(2026, 9, 15).expect("valid date"),
        ),
        ..TaskPatch::default()
    };
    let updated = world
        .mutation
        .update(alice, task.id(), &patch)
        .await
        .expect("update should succeed");
    assert_eq!(updated.assignee(), Some(bob));

    // Bob replies and mentions Alice.
    world
        .comments
        .post(
            bob,
            task.id(),
            Some("@Alice release notes are drafted".to_owned()),
            Vec::new(),
        )
        .await
        .expect("post should succeed");

    // The task feed shows the audit trail plus the comment, oldest first,
    // without duplicating the comment's audit mirror.
    let feed = world
        .feed
        .task_feed(task.id())
        .await
        .expect("feed should assemble");
    assert_eq!(feed.len(), 6, "created + four field changes + one comment");
    let last = feed.last().expect("feed is non-empty");
    assert_eq!(last.kind(), FeedItemKind::Comment);
    assert_eq!(last.content, "@Alice release notes are drafted");
    assert!(
        feed.iter()
            .any(|item| item.content == "Changed Status from 'None' to 'In Progress'")
    );
    assert!(
        feed.iter()
            .any(|item| item.content == "Changed Assignee from 'Unassigned' to 'Bob'")
    );
    assert!(
        feed.iter()
            .any(|item| item.content == "Changed Due Date from '' to '2026-09-15'")
    );

    // The project feed pages raw audit rows newest first with the task and
    // user eagerly attached.
    let page = world
        .feed
        .project_feed(project, 1)
        .await
        .expect("feed should assemble");
    assert_eq!(page.total, 6, "comment mirrors count as audit rows here");
    let newest = page.entries.first().expect("page is non-empty");
    assert_eq!(newest.activity.action().label(), "comment");
    assert_eq!(
        newest.task.as_ref().map(gantry::task::domain::Task::id),
        Some(task.id())
    );
    assert!(newest.user.as_ref().is_some_and(|user| user.name == "Bob"));

    // Every side-channel message in dispatch order: the invitation email,
    // the assignment notice, the mention notice.
    let sent = world.notifier.sent();
    assert_eq!(sent.len(), 3);
    assert!(matches!(
        sent.first(),
        Some(Notification::InvitationIssued { recipient, .. }) if recipient == "bob@example.com"
    ));
    assert!(matches!(
        sent.get(1),
        Some(Notification::TaskAssigned { recipient, task_title, .. })
            if recipient == "bob@example.com" && task_title == "Ship the release"
    ));
    assert!(matches!(
        sent.get(2),
        Some(Notification::CommentMentioned { recipient, .. })
            if recipient == "alice@example.com"
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_clears_its_feed() {
    let world = world();
    let org = world
        .directory
        .seed_organization("Acme")
        .expect("seed organization");
    let project = world
        .directory
        .seed_project(org, "Launch")
        .expect("seed project");
    let alice = world
        .directory
        .seed_user("Alice", None)
        .expect("seed user");

    let draft = TaskDraft::new(project, TaskTitle::new("Throwaway").expect("valid title"));
    let task = world
        .mutation
        .create(alice, draft)
        .await
        .expect("create should succeed");
    world
        .comments
        .post(alice, task.id(), Some("scratch note".to_owned()), Vec::new())
        .await
        .expect("post should succeed");

    world
        .mutation
        .delete(task.id())
        .await
        .expect("delete should succeed");

    let feed = world
        .feed
        .task_feed(task.id())
        .await
        .expect("feed should assemble");
    assert!(feed.is_empty(), "comments and audit rows are cascaded");
    let page = world
        .feed
        .project_feed(project, 1)
        .await
        .expect("feed should assemble");
    assert_eq!(page.total, 0);
}
