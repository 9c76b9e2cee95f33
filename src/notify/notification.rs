//! Notification payloads and message rendering.

use super::NotifyResult;
use minijinja::{Environment, context};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const TASK_ASSIGNED_BODY: &str = "\
You have been assigned to a task.

Task: {{ task_title }}
Project: {{ project_name }}
Assigned by: {{ assigner_name }}
";

const COMMENT_MENTIONED_BODY: &str = "\
You were mentioned in a comment.

Task: {{ task_title }}
User: {{ commenter_name }}

\"{{ comment_body }}\"
";

const INVITATION_ISSUED_BODY: &str = "\
You have been invited to join the organization {{ organization_name }}.

Accept the invitation: {{ accept_url }}

If you did not expect this invitation, you can ignore this email.
";

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(Environment::new);

/// A fully resolved notification ready for dispatch.
///
/// The core resolves every display value (names, titles, URLs) before
/// constructing one of these, so the notifier needs no further lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// A task has been assigned to the recipient.
    TaskAssigned {
        /// Contact address of the new assignee.
        recipient: String,
        /// Title of the assigned task.
        task_title: String,
        /// Display name of the owning project, when known.
        project_name: Option<String>,
        /// Display name of the user who made the assignment, when known.
        assigner_name: Option<String>,
    },
    /// The recipient was mentioned in a comment.
    CommentMentioned {
        /// Contact address of the mentioned user.
        recipient: String,
        /// Title of the commented task.
        task_title: String,
        /// Display name of the comment author.
        commenter_name: String,
        /// Raw comment text.
        comment_body: String,
    },
    /// An invitation token has been issued to the recipient.
    InvitationIssued {
        /// Invited email address.
        recipient: String,
        /// Display name of the inviting organization.
        organization_name: String,
        /// Redemption URL carrying the single-use token.
        accept_url: String,
    },
}

impl Notification {
    /// Returns the recipient contact address.
    #[must_use]
    pub fn recipient(&self) -> &str {
        match self {
            Self::TaskAssigned { recipient, .. }
            | Self::CommentMentioned { recipient, .. }
            | Self::InvitationIssued { recipient, .. } => recipient,
        }
    }

    /// Returns the message subject line.
    #[must_use]
    pub fn subject(&self) -> String {
        match self {
            Self::TaskAssigned { .. } => "You have been assigned to a task".to_owned(),
            Self::CommentMentioned { .. } => "You were mentioned in a comment".to_owned(),
            Self::InvitationIssued {
                organization_name, ..
            } => format!("Invitation to join {organization_name}"),
        }
    }

    /// Renders the plain-text message body.
    ///
    /// # Errors
    ///
    /// Returns [`super::NotifyError::Render`] when template rendering fails.
    pub fn body(&self) -> NotifyResult<String> {
        let rendered = match self {
            Self::TaskAssigned {
                task_title,
                project_name,
                assigner_name,
                ..
            } => TEMPLATES.render_str(
                TASK_ASSIGNED_BODY,
                context! {
                    task_title,
                    project_name => project_name.as_deref().unwrap_or("Unknown Project"),
                    assigner_name => assigner_name.as_deref().unwrap_or("System"),
                },
            )?,
            Self::CommentMentioned {
                task_title,
                commenter_name,
                comment_body,
                ..
            } => TEMPLATES.render_str(
                COMMENT_MENTIONED_BODY,
                context! { task_title, commenter_name, comment_body },
            )?,
            Self::InvitationIssued {
                organization_name,
                accept_url,
                ..
            } => TEMPLATES.render_str(
                INVITATION_ISSUED_BODY,
                context! { organization_name, accept_url },
            )?,
        };
        Ok(rendered)
    }
}
