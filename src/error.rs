//! Error types for session-todo
//!
//! This module defines the domain error enum using `thiserror`. Operations
//! propagate errors as `anyhow::Error`; the HTTP layer downcasts back to
//! [`TodoError`] to pick a status code.

use thiserror::Error;

/// Main error type for session-todo operations
#[derive(Error, Debug)]
pub enum TodoError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors (open, query, schema)
    #[error("Storage error: {0}")]
    Storage(String),

    /// No to-do row matches the requested id
    #[error("ToDo not found: id={id}")]
    NotFound {
        /// The id that was looked up
        id: i64,
    },

    /// Request payload failed validation (e.g. missing `content`)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Template rendering failed
    #[error("Render error: {0}")]
    Render(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for session-todo operations
///
/// Uses `anyhow::Error` so callers can attach context while the concrete
/// [`TodoError`] stays recoverable via `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;
