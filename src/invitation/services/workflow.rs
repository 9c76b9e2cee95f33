//! Invitation issue and redemption workflow.

use crate::identity::{
    DirectoryError, MembershipStore, OrganizationId, ProjectId, Role, User, UserDirectory, UserId,
};
use crate::invitation::domain::{Invitation, InviteToken};
use crate::invitation::ports::{InvitationRepository, InvitationRepositoryError};
use crate::notify::{Notification, Notifier};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Errors returned by the invitation workflow.
#[derive(Debug, Error)]
pub enum InvitationError {
    /// The invited user already belongs to the organization.
    #[error("user is already a member of this organization")]
    AlreadyOrganizationMember,
    /// The invited user already belongs to the target project.
    #[error("user is already a member of this project")]
    AlreadyProjectMember,
    /// The supplied project belongs to a different organization.
    #[error("project {0} does not belong to the inviting organization")]
    ProjectNotInOrganization(ProjectId),
    /// The token is malformed or addresses no live invitation.
    #[error("invitation token is invalid or has been superseded")]
    InvalidToken,
    /// The accepting user's email does not match the invitation.
    #[error("invitation was issued to a different email address")]
    EmailMismatch {
        /// Email address the invitation was issued to.
        invited: String,
        /// Email address of the accepting user, when known.
        actual: Option<String>,
    },
    /// The accepting user does not exist.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),
    /// Identity store round-trip failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// Invitation persistence failed.
    #[error(transparent)]
    Repository(#[from] InvitationRepositoryError),
}

/// Result type for invitation workflow operations.
pub type InvitationResult<T> = Result<T, InvitationError>;

/// Outcome of an invite call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteOutcome {
    /// The invitee was already an organization member and was attached to
    /// the project directly; no invitation was created.
    MemberAdded(User),
    /// A pending invitation was stored and its notification dispatched.
    InvitationSent(Invitation),
}

/// Collaborator handles required by the invitation service.
pub struct InvitationServiceDeps {
    /// Invitation persistence.
    pub invitations: Arc<dyn InvitationRepository>,
    /// Email and identity lookup.
    pub users: Arc<dyn UserDirectory>,
    /// Membership reads and writes.
    pub membership: Arc<dyn MembershipStore>,
    /// Best-effort invitation email dispatch.
    pub notifier: Arc<dyn Notifier>,
    /// Timestamp source.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Base URL the accept link is built from.
    pub accept_base_url: String,
}

/// Issues and redeems organization invitations.
#[derive(Clone)]
pub struct InvitationService {
    invitations: Arc<dyn InvitationRepository>,
    users: Arc<dyn UserDirectory>,
    membership: Arc<dyn MembershipStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock + Send + Sync>,
    accept_base_url: String,
}

impl InvitationService {
    /// Creates a new invitation service from its collaborator handles.
    #[must_use]
    pub fn new(deps: InvitationServiceDeps) -> Self {
        Self {
            invitations: deps.invitations,
            users: deps.users,
            membership: deps.membership,
            notifier: deps.notifier,
            clock: deps.clock,
            accept_base_url: deps.accept_base_url,
        }
    }

    /// Invites an email address into an organization, optionally scoped to
    /// one project.
    ///
    /// An invitee who is already an organization member is attached to the
    /// project directly (when one is given and they are not yet a member);
    /// otherwise the call is a conflict. For everyone else an invitation row
    /// is upserted on `(organization, email)` with a fresh token, and the
    /// invitation email is dispatched fire-and-forget.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationError::ProjectNotInOrganization`] for a foreign
    /// project, the `Already*Member` conflicts described above, or a
    /// persistence error.
    pub async fn invite(
        &self,
        organization: OrganizationId,
        email: &str,
        project: Option<ProjectId>,
    ) -> InvitationResult<InviteOutcome> {
        if let Some(project_id) = project {
            let owner = self.membership.project_organization(project_id).await?;
            if owner != Some(organization) {
                return Err(InvitationError::ProjectNotInOrganization(project_id));
            }
        }

        if let Some(user) = self.users.find_by_email(email).await? {
            if self
                .membership
                .is_organization_member(organization, user.id)
                .await?
            {
                return self.add_existing_member(user, project).await;
            }
        }

        let invitation = Invitation::new(
            organization,
            email,
            Role::Member,
            project,
            &*self.clock,
        );
        let stored = self.invitations.upsert(&invitation).await?;

        self.send_invitation_email(&stored).await;
        Ok(InviteOutcome::InvitationSent(stored))
    }

    /// Redeems an invitation token for the acting user.
    ///
    /// The token must address a live invitation and the user's email must
    /// exactly match the invited address; on any failure no membership is
    /// mutated. Redemption attaches the user to the organization with the
    /// invitation role (unless already a member), attaches them to the
    /// invitation's project as `member` when it still belongs to the
    /// organization, deletes the invitation, and returns the organization.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationError::InvalidToken`],
    /// [`InvitationError::EmailMismatch`], [`InvitationError::UnknownUser`],
    /// or a persistence error.
    pub async fn accept(&self, actor: UserId, token: &str) -> InvitationResult<OrganizationId> {
        let parsed = InviteToken::parse(token).map_err(|_| InvitationError::InvalidToken)?;
        let invitation = self
            .invitations
            .find_by_token(&parsed)
            .await?
            .ok_or(InvitationError::InvalidToken)?;

        let user = self
            .users
            .find_by_id(actor)
            .await?
            .ok_or(InvitationError::UnknownUser(actor))?;
        if user.email.as_deref() != Some(invitation.email()) {
            return Err(InvitationError::EmailMismatch {
                invited: invitation.email().to_owned(),
                actual: user.email,
            });
        }

        let organization = invitation.organization();
        if !self
            .membership
            .is_organization_member(organization, actor)
            .await?
        {
            self.membership
                .attach_organization_member(organization, actor, invitation.role())
                .await?;
        }

        if let Some(project) = invitation.project() {
            self.attach_project_if_eligible(organization, project, actor)
                .await?;
        }

        self.invitations.delete(invitation.id()).await?;
        Ok(organization)
    }

    /// Handles an invitee who is already an organization member.
    async fn add_existing_member(
        &self,
        user: User,
        project: Option<ProjectId>,
    ) -> InvitationResult<InviteOutcome> {
        let Some(project_id) = project else {
            return Err(InvitationError::AlreadyOrganizationMember);
        };
        if self
            .membership
            .is_project_member(project_id, user.id)
            .await?
        {
            return Err(InvitationError::AlreadyProjectMember);
        }
        self.membership
            .attach_project_member(project_id, user.id, Role::Member)
            .await?;
        Ok(InviteOutcome::MemberAdded(user))
    }

    /// Attaches the user to the invitation's project when the project still
    /// belongs to the organization and the user is not yet a member. A
    /// project moved or deleted since the invite is skipped silently.
    async fn attach_project_if_eligible(
        &self,
        organization: OrganizationId,
        project: ProjectId,
        user: UserId,
    ) -> InvitationResult<()> {
        let owner = self.membership.project_organization(project).await?;
        if owner != Some(organization) {
            return Ok(());
        }
        if self.membership.is_project_member(project, user).await? {
            return Ok(());
        }
        self.membership
            .attach_project_member(project, user, Role::Member)
            .await?;
        Ok(())
    }

    /// Dispatches the invitation email, best-effort. Failures are logged
    /// and never fail the invite.
    async fn send_invitation_email(&self, invitation: &Invitation) {
        let organization_name = match self
            .membership
            .organization_name(invitation.organization())
            .await
        {
            Ok(name) => name.unwrap_or_else(|| "your organization".to_owned()),
            Err(err) => {
                warn!(error = %err, "organization name lookup failed, using fallback");
                "your organization".to_owned()
            }
        };
        let accept_url = format!(
            "{}/accept-invite?token={}",
            self.accept_base_url,
            invitation.token()
        );
        let notification = Notification::InvitationIssued {
            recipient: invitation.email().to_owned(),
            organization_name,
            accept_url,
        };
        if let Err(err) = self.notifier.dispatch(notification).await {
            warn!(error = %err, "invitation email failed");
        }
    }
}
