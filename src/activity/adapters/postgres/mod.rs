//! `PostgreSQL` adapters for audit records, comments, and attachments.

mod activity;
mod attachment;
mod comment;
mod models;
mod schema;

pub use activity::PostgresActivityRepository;
pub use attachment::PostgresAttachmentRepository;
pub use comment::PostgresCommentRepository;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by activity adapters.
pub type ActivityPgPool = Pool<ConnectionManager<PgConnection>>;
