//! Notification rendering and recording tests.

use super::{Notification, Notifier, RecordingNotifier};
use rstest::rstest;

fn assigned(project: Option<&str>, assigner: Option<&str>) -> Notification {
    Notification::TaskAssigned {
        recipient: "bob@example.com".to_owned(),
        task_title: "Ship the release".to_owned(),
        project_name: project.map(str::to_owned),
        assigner_name: assigner.map(str::to_owned),
    }
}

#[rstest]
fn recipient_is_exposed_for_every_variant() {
    let mention = Notification::CommentMentioned {
        recipient: "carol@example.com".to_owned(),
        task_title: "Thread".to_owned(),
        commenter_name: "Alice".to_owned(),
        comment_body: "@Carol ping".to_owned(),
    };
    assert_eq!(assigned(None, None).recipient(), "bob@example.com");
    assert_eq!(mention.recipient(), "carol@example.com");
}

#[rstest]
fn task_assigned_body_names_project_and_assigner() {
    let body = assigned(Some("Launch"), Some("Alice"))
        .body()
        .expect("body should render");
    assert!(body.contains("Task: Ship the release"));
    assert!(body.contains("Project: Launch"));
    assert!(body.contains("Assigned by: Alice"));
}

#[rstest]
fn task_assigned_body_falls_back_when_context_is_missing() {
    let body = assigned(None, None).body().expect("body should render");
    assert!(body.contains("Project: Unknown Project"));
    assert!(body.contains("Assigned by: System"));
}

#[rstest]
fn comment_mentioned_body_quotes_the_comment() {
    let notification = Notification::CommentMentioned {
        recipient: "carol@example.com".to_owned(),
        task_title: "Thread".to_owned(),
        commenter_name: "Alice".to_owned(),
        comment_body: "@Carol please look".to_owned(),
    };
    assert_eq!(notification.subject(), "You were mentioned in a comment");
    let body = notification.body().expect("body should render");
    assert!(body.contains("Task: Thread"));
    assert!(body.contains("User: Alice"));
    assert!(body.contains("\"@Carol please look\""));
}

#[rstest]
fn invitation_subject_and_body_carry_the_accept_link() {
    let notification = Notification::InvitationIssued {
        recipient: "newcomer@example.com".to_owned(),
        organization_name: "Acme".to_owned(),
        accept_url: "https://tracker.example.com/accept-invite?token=abc123".to_owned(),
    };
    assert_eq!(notification.subject(), "Invitation to join Acme");
    let body = notification.body().expect("body should render");
    assert!(body.contains("join the organization Acme"));
    assert!(body.contains("https://tracker.example.com/accept-invite?token=abc123"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recording_notifier_keeps_dispatch_order() {
    let notifier = RecordingNotifier::new();
    notifier
        .dispatch(assigned(None, None))
        .await
        .expect("dispatch should succeed");
    notifier
        .dispatch(assigned(Some("Launch"), None))
        .await
        .expect("dispatch should succeed");
    assert_eq!(notifier.sent().len(), 2);
    assert_eq!(
        notifier.sent().first(),
        Some(&assigned(None, None)),
        "first dispatch stays first"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_notifier_rejects_and_records_nothing() {
    let notifier = RecordingNotifier::failing();
    let result = notifier.dispatch(assigned(None, None)).await;
    assert!(result.is_err());
    assert!(notifier.sent().is_empty());
}
