//! Application-level errors

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::Key;

/// Application errors: loading records, resolving config, required lookups.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("cannot load records from {path}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("no record with id: {0}")]
    ItemNotFound(Key),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
