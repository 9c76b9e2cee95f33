//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with ordering and scheduling metadata.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning project identifier.
        project_id -> Uuid,
        /// Optional parent task identifier for subtasks.
        parent_id -> Nullable<Uuid>,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional long-form description.
        description -> Nullable<Text>,
        /// Optional workflow status identifier.
        status_id -> Nullable<Uuid>,
        /// Optional milestone identifier.
        milestone_id -> Nullable<Uuid>,
        /// Optional assigned user identifier.
        assignee_id -> Nullable<Uuid>,
        /// Creating user identifier.
        creator_id -> Uuid,
        /// Priority level.
        #[max_length = 50]
        priority -> Varchar,
        /// Optional estimated effort in hours.
        estimated_hours -> Nullable<Double>,
        /// Optional actual effort in hours.
        actual_hours -> Nullable<Double>,
        /// Optional scheduled start date.
        start_date -> Nullable<Date>,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Ordering position within the sibling group.
        position -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
