//! In-memory adapters for activity persistence tests.

mod activity;
mod attachment;
mod blob;
mod comment;

pub use activity::InMemoryActivityRepository;
pub use attachment::InMemoryAttachmentRepository;
pub use blob::InMemoryBlobStore;
pub use comment::InMemoryCommentRepository;
