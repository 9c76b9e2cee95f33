//! Orchestration services for comments, attachments, and feeds.

mod attachments;
mod comments;
mod feed;

pub use attachments::{AttachmentService, AttachmentServiceError, AttachmentServiceResult};
pub use comments::{
    CommentService, CommentServiceDeps, CommentServiceError, CommentServiceResult, FileUpload,
};
pub use feed::{FeedError, FeedResult, FeedService, FeedServiceDeps, PROJECT_FEED_PAGE_SIZE};
