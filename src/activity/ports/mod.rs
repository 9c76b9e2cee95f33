//! Port contracts for activity, comment, attachment, and blob persistence.

pub mod blob;
pub mod repository;

pub use blob::{BlobStore, BlobStoreError, BlobStoreResult};
pub use repository::{
    ActivityRepository, ActivityRepositoryError, ActivityRepositoryResult, AttachmentRepository,
    AttachmentRepositoryError, AttachmentRepositoryResult, CommentRepository,
    CommentRepositoryError, CommentRepositoryResult,
};
