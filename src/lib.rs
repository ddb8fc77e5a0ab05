//! session-todo - server-rendered to-do list library
//!
//! Visitors get an opaque session key in a cookie; every to-do row is
//! partitioned by that key. The crate exposes the pieces the binary wires
//! together so tests and embedders can swap the storage backend.
//!
//! # Architecture
//!
//! - `session`: cookie-based session identity
//! - `storage`: the `TodoStore` trait with SQLite and in-memory backends
//! - `render`: askama templates for the page and list fragment
//! - `server`: axum router, handlers, and HTTP error mapping
//! - `config`: configuration loading and validation
//! - `commands`: CLI command handlers
//! - `error`: error types and result aliases
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use session_todo::config::Config;
//! use session_todo::server;
//! use session_todo::storage::MemoryStorage;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!     server::serve(&config, Arc::new(MemoryStorage::new())).await
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod server;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, TodoError};
pub use server::{router, AppState};
pub use storage::{MemoryStorage, SqliteStorage, Todo, TodoStore};

#[cfg(test)]
pub mod test_utils;
