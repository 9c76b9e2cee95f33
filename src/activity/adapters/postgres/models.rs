//! Diesel row models for activity, comment, and attachment persistence.

use super::schema::{attachments, comments, task_activities};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for audit records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_activities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Monotonic insertion sequence.
    pub seq: i64,
    /// Owning task identifier.
    pub task_id: uuid::Uuid,
    /// Acting user identifier, if user-generated.
    pub user_id: Option<uuid::Uuid>,
    /// Action storage label.
    pub action: String,
    /// Old display value snapshot.
    pub old_value: Value,
    /// New display value snapshot.
    pub new_value: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for audit records; `seq` is database-assigned.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_activities)]
pub struct NewActivityRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Owning task identifier.
    pub task_id: uuid::Uuid,
    /// Acting user identifier, if user-generated.
    pub user_id: Option<uuid::Uuid>,
    /// Action storage label.
    pub action: String,
    /// Old display value snapshot.
    pub old_value: Value,
    /// New display value snapshot.
    pub new_value: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for comments.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Owning task identifier.
    pub task_id: uuid::Uuid,
    /// Authoring user identifier.
    pub user_id: uuid::Uuid,
    /// Text content.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for comments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub struct NewCommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Owning task identifier.
    pub task_id: uuid::Uuid,
    /// Authoring user identifier.
    pub user_id: uuid::Uuid,
    /// Text content.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for attachment records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = attachments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AttachmentRow {
    /// Attachment identifier.
    pub id: uuid::Uuid,
    /// Owner kind discriminant.
    pub owner_kind: String,
    /// Owner identifier.
    pub owner_id: uuid::Uuid,
    /// Uploading user identifier.
    pub user_id: uuid::Uuid,
    /// Original filename.
    pub file_name: String,
    /// Blob-store path.
    pub storage_path: String,
    /// Size in bytes.
    pub byte_size: i64,
    /// Declared MIME type.
    pub mime_type: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for attachment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = attachments)]
pub struct NewAttachmentRow {
    /// Attachment identifier.
    pub id: uuid::Uuid,
    /// Owner kind discriminant.
    pub owner_kind: String,
    /// Owner identifier.
    pub owner_id: uuid::Uuid,
    /// Uploading user identifier.
    pub user_id: uuid::Uuid,
    /// Original filename.
    pub file_name: String,
    /// Blob-store path.
    pub storage_path: String,
    /// Size in bytes.
    pub byte_size: i64,
    /// Declared MIME type.
    pub mime_type: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
