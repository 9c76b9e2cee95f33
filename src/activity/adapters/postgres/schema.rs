//! Diesel schema for activity, comment, and attachment persistence.

diesel::table! {
    /// Append-only audit records for task changes.
    task_activities (id) {
        /// Record identifier.
        id -> Uuid,
        /// Monotonic insertion sequence; tiebreak for equal timestamps.
        seq -> Int8,
        /// Owning task identifier.
        task_id -> Uuid,
        /// Acting user identifier; null for system rows.
        user_id -> Nullable<Uuid>,
        /// Action storage label.
        #[max_length = 255]
        action -> Varchar,
        /// Old display value snapshot.
        old_value -> Jsonb,
        /// New display value snapshot.
        new_value -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task comments.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Owning task identifier.
        task_id -> Uuid,
        /// Authoring user identifier.
        user_id -> Uuid,
        /// Text content; may be empty for file-only comments.
        content -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// File attachment records with polymorphic ownership.
    attachments (id) {
        /// Attachment identifier.
        id -> Uuid,
        /// Owner kind discriminant (`task` or `project`).
        #[max_length = 50]
        owner_kind -> Varchar,
        /// Owner identifier.
        owner_id -> Uuid,
        /// Uploading user identifier.
        user_id -> Uuid,
        /// Original filename.
        #[max_length = 255]
        file_name -> Varchar,
        /// Blob-store path.
        #[max_length = 255]
        storage_path -> Varchar,
        /// Size in bytes.
        byte_size -> Int8,
        /// Declared MIME type.
        #[max_length = 255]
        mime_type -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(task_activities, comments, attachments);
