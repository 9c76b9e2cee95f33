//! Domain model for audit events, comments, attachments, and feed items.

mod activity;
mod attachment;
mod comment;
mod error;
mod feed;
mod ids;

pub use activity::{ActivityAction, PersistedActivityData, TaskActivity};
pub use attachment::{Attachment, AttachmentOwner, PersistedAttachmentData};
pub use comment::{Comment, PersistedCommentData};
pub use error::ParseOwnerKindError;
pub use feed::{
    FeedItem, FeedItemDetail, FeedItemKind, ProjectActivityEntry, ProjectActivityPage,
    render_activity_content,
};
pub use ids::{ActivityId, AttachmentId, CommentId};
