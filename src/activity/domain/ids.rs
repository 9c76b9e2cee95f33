//! Identifier types for the activity domain.

use crate::identity::ids::uuid_id;

uuid_id!(
    /// Unique identifier for an audit activity record.
    ActivityId,
    "activity"
);

uuid_id!(
    /// Unique identifier for a comment.
    CommentId,
    "comment"
);

uuid_id!(
    /// Unique identifier for an attachment record.
    AttachmentId,
    "attachment"
);
