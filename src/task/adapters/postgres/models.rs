//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Optional parent task identifier.
    pub parent_id: Option<uuid::Uuid>,
    /// Task title.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Optional workflow status identifier.
    pub status_id: Option<uuid::Uuid>,
    /// Optional milestone identifier.
    pub milestone_id: Option<uuid::Uuid>,
    /// Optional assigned user identifier.
    pub assignee_id: Option<uuid::Uuid>,
    /// Creating user identifier.
    pub creator_id: uuid::Uuid,
    /// Priority level.
    pub priority: String,
    /// Optional estimated effort in hours.
    pub estimated_hours: Option<f64>,
    /// Optional actual effort in hours.
    pub actual_hours: Option<f64>,
    /// Optional scheduled start date.
    pub start_date: Option<NaiveDate>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Ordering position within the sibling group.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Optional parent task identifier.
    pub parent_id: Option<uuid::Uuid>,
    /// Task title.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Optional workflow status identifier.
    pub status_id: Option<uuid::Uuid>,
    /// Optional milestone identifier.
    pub milestone_id: Option<uuid::Uuid>,
    /// Optional assigned user identifier.
    pub assignee_id: Option<uuid::Uuid>,
    /// Creating user identifier.
    pub creator_id: uuid::Uuid,
    /// Priority level.
    pub priority: String,
    /// Optional estimated effort in hours.
    pub estimated_hours: Option<f64>,
    /// Optional actual effort in hours.
    pub actual_hours: Option<f64>,
    /// Optional scheduled start date.
    pub start_date: Option<NaiveDate>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Ordering position within the sibling group.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model applied on task mutation.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Optional parent task identifier.
    pub parent_id: Option<uuid::Uuid>,
    /// Task title.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Optional workflow status identifier.
    pub status_id: Option<uuid::Uuid>,
    /// Optional milestone identifier.
    pub milestone_id: Option<uuid::Uuid>,
    /// Optional assigned user identifier.
    pub assignee_id: Option<uuid::Uuid>,
    /// Priority level.
    pub priority: String,
    /// Optional estimated effort in hours.
    pub estimated_hours: Option<f64>,
    /// Optional actual effort in hours.
    pub actual_hours: Option<f64>,
    /// Optional scheduled start date.
    pub start_date: Option<NaiveDate>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
