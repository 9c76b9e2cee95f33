//! Normalized feed items and audit-row rendering.

use super::{ActivityAction, TaskActivity};
use crate::identity::User;
use crate::task::domain::Task;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Type tag of a feed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedItemKind {
    /// A posted comment.
    Comment,
    /// An audit event.
    Activity,
    /// A file upload.
    File,
}

/// Type-specific payload carried alongside the rendered content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedItemDetail {
    /// No extra payload beyond the comment text in `content`.
    Comment,
    /// Captured old/new display values of the audit row.
    Activity {
        /// Old display value.
        old: Value,
        /// New display value.
        new: Value,
    },
    /// Blob-store location of the uploaded file.
    File {
        /// Storage path of the blob.
        path: String,
        /// Original filename.
        name: String,
    },
}

/// One normalized entry of the per-task activity feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedItem {
    /// Acting user, when still resolvable.
    pub user: Option<User>,
    /// Render-ready content string.
    pub content: String,
    /// Event timestamp; the feed is sorted ascending on this value.
    pub created_at: DateTime<Utc>,
    /// Type-specific metadata.
    pub detail: FeedItemDetail,
}

impl FeedItem {
    /// Returns the type tag of this item.
    #[must_use]
    pub const fn kind(&self) -> FeedItemKind {
        match self.detail {
            FeedItemDetail::Comment => FeedItemKind::Comment,
            FeedItemDetail::Activity { .. } => FeedItemKind::Activity,
            FeedItemDetail::File { .. } => FeedItemKind::File,
        }
    }
}

/// One entry of the per-project audit feed, with its task and user eagerly
/// attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectActivityEntry {
    /// The audit record.
    pub activity: TaskActivity,
    /// The owning task, when it still exists.
    pub task: Option<Task>,
    /// The acting user, when still resolvable.
    pub user: Option<User>,
}

/// One page of the per-project audit feed, newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectActivityPage {
    /// Entries on this page, descending by creation time.
    pub entries: Vec<ProjectActivityEntry>,
    /// One-based page number.
    pub page: u32,
    /// Page size the listing was cut to.
    pub per_page: u32,
    /// Total number of audit records across all pages.
    pub total: u64,
}

/// Renders an audit row into its human-readable feed line.
///
/// Values were stored as display snapshots at write time, so rendering is a
/// plain substitution. Legacy rows degrade gracefully: the retired
/// `status_changed` label renders a generic line, and object-shaped values
/// fall back to their JSON text (or an `ID: n` form for old status
/// payloads).
#[must_use]
pub fn render_activity_content(activity: &TaskActivity) -> String {
    if matches!(activity.action(), ActivityAction::Other(label) if label == "status_changed") {
        return "Changed Status".to_owned();
    }
    let field = match activity.action() {
        ActivityAction::Updated { field } => field.clone(),
        other => other.label(),
    };
    let old = display_value(activity.old_value());
    let new = display_value(activity.new_value());
    format!("Changed {field} from '{old}' to '{new}'")
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Object(map) => map
            .get("status_id")
            .map_or_else(|| value.to_string(), |id| format!("ID: {id}")),
        other => other.to_string(),
    }
}
