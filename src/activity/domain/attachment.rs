//! File attachment records with polymorphic ownership.

use super::{AttachmentId, ParseOwnerKindError};
use crate::identity::{ProjectId, UserId};
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Owner of an attachment: either a task or a project.
///
/// Query code must branch explicitly on the owner kind; there is no
/// language-level polymorphic relation here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AttachmentOwner {
    /// Owned by a task.
    Task(TaskId),
    /// Owned by a project.
    Project(ProjectId),
}

impl AttachmentOwner {
    /// Returns the storage discriminant for the owner kind.
    #[must_use]
    pub const fn kind_str(self) -> &'static str {
        match self {
            Self::Task(_) => "task",
            Self::Project(_) => "project",
        }
    }

    /// Returns the owner identifier as a raw UUID.
    #[must_use]
    pub const fn owner_uuid(self) -> Uuid {
        match self {
            Self::Task(id) => id.into_inner(),
            Self::Project(id) => id.into_inner(),
        }
    }

    /// Reconstructs an owner from its storage discriminant and UUID.
    ///
    /// # Errors
    ///
    /// Returns [`ParseOwnerKindError`] for an unknown discriminant.
    pub fn from_parts(kind: &str, id: Uuid) -> Result<Self, ParseOwnerKindError> {
        match kind {
            "task" => Ok(Self::Task(TaskId::from_uuid(id))),
            "project" => Ok(Self::Project(ProjectId::from_uuid(id))),
            _ => Err(ParseOwnerKindError(kind.to_owned())),
        }
    }
}

/// A stored file reference.
///
/// The blob at `storage_path` is exclusively owned by this record: deleting
/// the record must delete the blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    id: AttachmentId,
    owner: AttachmentOwner,
    uploader: UserId,
    file_name: String,
    storage_path: String,
    byte_size: i64,
    mime_type: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAttachmentData {
    /// Persisted attachment identifier.
    pub id: AttachmentId,
    /// Persisted owner.
    pub owner: AttachmentOwner,
    /// Persisted uploading user.
    pub uploader: UserId,
    /// Persisted original filename.
    pub file_name: String,
    /// Persisted blob-store path.
    pub storage_path: String,
    /// Persisted size in bytes.
    pub byte_size: i64,
    /// Persisted MIME type.
    pub mime_type: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Attachment {
    /// Creates a new attachment record stamped with the current clock time.
    #[must_use]
    pub fn new(
        owner: AttachmentOwner,
        uploader: UserId,
        file_name: impl Into<String>,
        storage_path: impl Into<String>,
        byte_size: i64,
        mime_type: impl Into<String>,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            id: AttachmentId::new(),
            owner,
            uploader,
            file_name: file_name.into(),
            storage_path: storage_path.into(),
            byte_size,
            mime_type: mime_type.into(),
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an attachment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAttachmentData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            uploader: data.uploader,
            file_name: data.file_name,
            storage_path: data.storage_path,
            byte_size: data.byte_size,
            mime_type: data.mime_type,
            created_at: data.created_at,
        }
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the owner.
    #[must_use]
    pub const fn owner(&self) -> AttachmentOwner {
        self.owner
    }

    /// Returns the uploading user.
    #[must_use]
    pub const fn uploader(&self) -> UserId {
        self.uploader
    }

    /// Returns the original filename.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the blob-store path.
    #[must_use]
    pub fn storage_path(&self) -> &str {
        &self.storage_path
    }

    /// Returns the size in bytes.
    #[must_use]
    pub const fn byte_size(&self) -> i64 {
        self.byte_size
    }

    /// Returns the MIME type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
