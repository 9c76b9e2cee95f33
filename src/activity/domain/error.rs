//! Error types for activity domain parsing.

use thiserror::Error;

/// Error returned while parsing attachment owner kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown attachment owner kind: {0}")]
pub struct ParseOwnerKindError(pub String);
