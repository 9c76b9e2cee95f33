//! Invitation issue and redemption workflow tests.

use crate::identity::memory::InMemoryDirectory;
use crate::identity::{MembershipStore, Role};
use crate::invitation::adapters::memory::InMemoryInvitationRepository;
use crate::invitation::domain::InviteToken;
use crate::invitation::ports::InvitationRepository;
use crate::invitation::services::{
    InvitationError, InvitationService, InvitationServiceDeps, InviteOutcome,
};
use crate::notify::{Notification, RecordingNotifier};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

const BASE_URL: &str = "https://tracker.example.com";

struct Harness {
    service: InvitationService,
    invitations: Arc<InMemoryInvitationRepository>,
    directory: Arc<InMemoryDirectory>,
    notifier: Arc<RecordingNotifier>,
}

#[fixture]
fn harness() -> Harness {
    let invitations = Arc::new(InMemoryInvitationRepository::new());
    let directory = Arc::new(InMemoryDirectory::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let service = InvitationService::new(InvitationServiceDeps {
        invitations: Arc::clone(&invitations) as _,
        users: Arc::clone(&directory) as _,
        membership: Arc::clone(&directory) as _,
        notifier: Arc::clone(&notifier) as _,
        clock: Arc::new(DefaultClock),
        accept_base_url: BASE_URL.to_owned(),
    });
    Harness {
        service,
        invitations,
        directory,
        notifier,
    }
}

fn sent_invitation(outcome: InviteOutcome) -> crate::invitation::domain::Invitation {
    match outcome {
        InviteOutcome::InvitationSent(invitation) => invitation,
        InviteOutcome::MemberAdded(user) => {
            panic!("expected a stored invitation, got direct add of {}", user.id)
        }
    }
}

#[rstest]
fn minted_tokens_are_32_characters() {
    let token = InviteToken::mint();
    assert_eq!(token.as_str().len(), 32);
    assert!(token.as_str().chars().all(|c| c.is_ascii_hexdigit()));
}

#[rstest]
fn token_parse_rejects_malformed_input() {
    assert!(InviteToken::parse("short").is_err());
    assert!(InviteToken::parse(&"g".repeat(32)).is_err());
    assert!(InviteToken::parse(&"a".repeat(32)).is_ok());
}

#[rstest]
fn replace_grant_refreshes_token_but_keeps_row_identity() {
    let clock = DefaultClock;
    let mut invitation = crate::invitation::domain::Invitation::new(
        crate::identity::OrganizationId::new(),
        "newcomer@example.com",
        Role::Member,
        None,
        &clock,
    );
    let original_id = invitation.id();
    let original_created = invitation.created_at();
    let original_token = invitation.token().clone();
    let project = crate::identity::ProjectId::new();

    invitation.replace_grant(Role::Admin, Some(project), &clock);

    assert_eq!(invitation.id(), original_id);
    assert_eq!(invitation.created_at(), original_created);
    assert_ne!(invitation.token(), &original_token);
    assert_eq!(invitation.role(), Role::Admin);
    assert_eq!(invitation.project(), Some(project));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invite_stores_invitation_and_emails_the_accept_link(harness: Harness) {
    let org = harness
        .directory
        .seed_organization("Acme")
        .expect("seed organization");

    let outcome = harness
        .service
        .invite(org, "newcomer@example.com", None)
        .await
        .expect("invite should succeed");
    let invitation = sent_invitation(outcome);

    assert_eq!(invitation.email(), "newcomer@example.com");
    assert_eq!(invitation.role(), Role::Member);
    assert_eq!(invitation.organization(), org);

    let sent = harness.notifier.sent();
    let Some(Notification::InvitationIssued {
        recipient,
        organization_name,
        accept_url,
    }) = sent.first()
    else {
        panic!("expected an invitation email");
    };
    assert_eq!(recipient, "newcomer@example.com");
    assert_eq!(organization_name, "Acme");
    assert_eq!(
        accept_url,
        &format!("{BASE_URL}/accept-invite?token={}", invitation.token())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reinvite_overwrites_the_row_and_invalidates_the_old_token(harness: Harness) {
    let org = harness
        .directory
        .seed_organization("Acme")
        .expect("seed organization");

    let first = sent_invitation(
        harness
            .service
            .invite(org, "newcomer@example.com", None)
            .await
            .expect("invite should succeed"),
    );
    let second = sent_invitation(
        harness
            .service
            .invite(org, "newcomer@example.com", None)
            .await
            .expect("re-invite should succeed"),
    );

    assert_eq!(second.id(), first.id(), "row identity survives the upsert");
    assert_eq!(second.created_at(), first.created_at());
    assert_ne!(second.token(), first.token());

    let stored = harness
        .invitations
        .find_by_key(org, "newcomer@example.com")
        .await
        .expect("lookup should succeed")
        .expect("one live row per (organization, email)");
    assert_eq!(stored.token(), second.token());

    let stale = harness
        .invitations
        .find_by_token(first.token())
        .await
        .expect("lookup should succeed");
    assert!(stale.is_none(), "old token no longer resolves");

    let user = harness
        .directory
        .seed_user("Newcomer", Some("newcomer@example.com".to_owned()))
        .expect("seed user");
    let rejected = harness.service.accept(user, first.token().as_str()).await;
    assert!(matches!(rejected, Err(InvitationError::InvalidToken)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inviting_an_existing_org_member_without_project_is_a_conflict(harness: Harness) {
    let org = harness
        .directory
        .seed_organization("Acme")
        .expect("seed organization");
    let member = harness
        .directory
        .seed_user("Member", Some("member@example.com".to_owned()))
        .expect("seed user");
    harness
        .directory
        .attach_organization_member(org, member, Role::Member)
        .await
        .expect("attach should succeed");

    let result = harness.service.invite(org, "member@example.com", None).await;
    assert!(matches!(
        result,
        Err(InvitationError::AlreadyOrganizationMember)
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inviting_an_existing_org_member_attaches_them_to_the_project(harness: Harness) {
    let org = harness
        .directory
        .seed_organization("Acme")
        .expect("seed organization");
    let project = harness
        .directory
        .seed_project(org, "Launch")
        .expect("seed project");
    let member = harness
        .directory
        .seed_user("Member", Some("member@example.com".to_owned()))
        .expect("seed user");
    harness
        .directory
        .attach_organization_member(org, member, Role::Member)
        .await
        .expect("attach should succeed");

    let outcome = harness
        .service
        .invite(org, "member@example.com", Some(project))
        .await
        .expect("invite should succeed");
    assert!(matches!(outcome, InviteOutcome::MemberAdded(user) if user.id == member));
    assert_eq!(
        harness
            .directory
            .project_role(project, member)
            .expect("role lookup"),
        Some(Role::Member)
    );
    assert!(harness.notifier.sent().is_empty(), "no email for direct adds");

    let again = harness
        .service
        .invite(org, "member@example.com", Some(project))
        .await;
    assert!(matches!(again, Err(InvitationError::AlreadyProjectMember)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inviting_into_a_foreign_project_is_rejected(harness: Harness) {
    let org = harness
        .directory
        .seed_organization("Acme")
        .expect("seed organization");
    let other_org = harness
        .directory
        .seed_organization("Rival")
        .expect("seed organization");
    let foreign_project = harness
        .directory
        .seed_project(other_org, "Elsewhere")
        .expect("seed project");

    let result = harness
        .service
        .invite(org, "newcomer@example.com", Some(foreign_project))
        .await;
    assert!(matches!(
        result,
        Err(InvitationError::ProjectNotInOrganization(id)) if id == foreign_project
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn accept_attaches_org_and_project_membership_and_consumes_the_token(harness: Harness) {
    let org = harness
        .directory
        .seed_organization("Acme")
        .expect("seed organization");
    let project = harness
        .directory
        .seed_project(org, "Launch")
        .expect("seed project");
    let invitation = sent_invitation(
        harness
            .service
            .invite(org, "newcomer@example.com", Some(project))
            .await
            .expect("invite should succeed"),
    );
    let user = harness
        .directory
        .seed_user("Newcomer", Some("newcomer@example.com".to_owned()))
        .expect("seed user");

    let joined = harness
        .service
        .accept(user, invitation.token().as_str())
        .await
        .expect("accept should succeed");
    assert_eq!(joined, org);

    assert_eq!(
        harness
            .directory
            .organization_role(org, user)
            .expect("role lookup"),
        Some(Role::Member)
    );
    assert_eq!(
        harness
            .directory
            .project_role(project, user)
            .expect("role lookup"),
        Some(Role::Member)
    );
    let consumed = harness
        .invitations
        .find_by_token(invitation.token())
        .await
        .expect("lookup should succeed");
    assert!(consumed.is_none(), "invitation is single-use");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn accept_with_mismatched_email_mutates_nothing(harness: Harness) {
    let org = harness
        .directory
        .seed_organization("Acme")
        .expect("seed organization");
    let invitation = sent_invitation(
        harness
            .service
            .invite(org, "invited@example.com", None)
            .await
            .expect("invite should succeed"),
    );
    let impostor = harness
        .directory
        .seed_user("Impostor", Some("other@example.com".to_owned()))
        .expect("seed user");

    let result = harness
        .service
        .accept(impostor, invitation.token().as_str())
        .await;
    assert!(matches!(
        result,
        Err(InvitationError::EmailMismatch { ref invited, .. }) if invited == "invited@example.com"
    ));

    assert_eq!(
        harness
            .directory
            .organization_role(org, impostor)
            .expect("role lookup"),
        None
    );
    let live = harness
        .invitations
        .find_by_token(invitation.token())
        .await
        .expect("lookup should succeed");
    assert!(live.is_some(), "invitation stays live after the rejection");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn accept_rejects_garbage_tokens(harness: Harness) {
    let user = harness
        .directory
        .seed_user("Anyone", Some("anyone@example.com".to_owned()))
        .expect("seed user");

    let malformed = harness.service.accept(user, "not-a-token").await;
    assert!(matches!(malformed, Err(InvitationError::InvalidToken)));

    let unknown = harness
        .service
        .accept(user, InviteToken::mint().as_str())
        .await;
    assert!(matches!(unknown, Err(InvitationError::InvalidToken)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn accept_skips_a_project_that_moved_organizations(harness: Harness) {
    let org = harness
        .directory
        .seed_organization("Acme")
        .expect("seed organization");
    let other_org = harness
        .directory
        .seed_organization("Rival")
        .expect("seed organization");
    let project = harness
        .directory
        .seed_project(other_org, "Moved")
        .expect("seed project");

    // Simulate an invite issued before the project changed hands by storing
    // the row directly.
    let invitation = crate::invitation::domain::Invitation::new(
        org,
        "newcomer@example.com",
        Role::Member,
        Some(project),
        &DefaultClock,
    );
    harness
        .invitations
        .upsert(&invitation)
        .await
        .expect("upsert should succeed");
    let user = harness
        .directory
        .seed_user("Newcomer", Some("newcomer@example.com".to_owned()))
        .expect("seed user");

    let joined = harness
        .service
        .accept(user, invitation.token().as_str())
        .await
        .expect("accept should still succeed");
    assert_eq!(joined, org);
    assert_eq!(
        harness
            .directory
            .project_role(project, user)
            .expect("role lookup"),
        None,
        "foreign project attach is skipped"
    );
}
