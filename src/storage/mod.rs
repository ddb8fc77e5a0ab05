//! To-do persistence
//!
//! [`TodoStore`] is the data-access seam used by the HTTP handlers. Two
//! implementations ship with the crate: [`SqliteStorage`] for real
//! deployments and [`MemoryStorage`] for tests and throwaway servers.

use crate::config::{StorageBackend, StorageConfig};
use crate::error::{Result, TodoError};
use async_trait::async_trait;
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub mod memory;
pub mod types;
pub use memory::MemoryStorage;
pub use types::Todo;

/// Environment variable that overrides the default database location
pub const DB_PATH_ENV: &str = "SESSION_TODO_DB";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        content TEXT NOT NULL,
        session_key TEXT NOT NULL DEFAULT ''
    );
    CREATE INDEX IF NOT EXISTS idx_todos_session_key ON todos(session_key);
";

/// Create/read/update/delete access to to-do rows
///
/// Implementations must be safe to share across request tasks. `update`
/// reports a missing row as [`TodoError::NotFound`]; `delete` treats a
/// missing row as success.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All rows for `session_key`, in insertion order
    async fn list(&self, session_key: &str) -> Result<Vec<Todo>>;

    /// Insert a new row and return it with its assigned id
    async fn create(&self, content: &str, session_key: &str) -> Result<Todo>;

    /// Overwrite the content of row `id`
    async fn update(&self, id: i64, content: &str) -> Result<Todo>;

    /// Remove row `id` if present
    async fn delete(&self, id: i64) -> Result<()>;

    /// Look up a single row
    async fn get(&self, id: i64) -> Result<Option<Todo>>;
}

/// Open the SQLite database named by `config`, or the default location
pub fn open_sqlite(config: &StorageConfig) -> Result<SqliteStorage> {
    match &config.path {
        Some(path) => SqliteStorage::new_with_path(path.clone()),
        None => SqliteStorage::new(),
    }
}

/// Construct the store selected by `config.backend`
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn TodoStore>> {
    let store: Arc<dyn TodoStore> = match config.backend {
        StorageBackend::Sqlite => {
            let storage = open_sqlite(config)?;
            tracing::info!(path = %storage.db_path().display(), "Using SQLite storage");
            Arc::new(storage)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; to-dos will not survive a restart");
            Arc::new(MemoryStorage::new())
        }
    };
    Ok(store)
}

/// SQLite-backed to-do storage
///
/// Every operation opens its own connection on the blocking pool and drops
/// it before returning, on success and on error alike.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    db_path: PathBuf,
}

impl SqliteStorage {
    /// Create a storage instance at the default location
    ///
    /// Honors the `SESSION_TODO_DB` environment variable, otherwise places
    /// `todo.db` in the platform data directory.
    pub fn new() -> Result<Self> {
        if let Ok(override_path) = std::env::var(DB_PATH_ENV) {
            return Self::new_with_path(override_path);
        }

        let proj_dirs = ProjectDirs::from("org", "session-todo", "session-todo")
            .ok_or_else(|| TodoError::Storage("Could not determine data directory".into()))?;

        Self::new_with_path(proj_dirs.data_dir().join("todo.db"))
    }

    /// Create a storage instance backed by the given file
    ///
    /// Parent directories are created and the schema is applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use session_todo::storage::SqliteStorage;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let storage = SqliteStorage::new_with_path(dir.path().join("todo.db")).unwrap();
    /// assert!(storage.db_path().exists());
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(db_path: P) -> Result<Self> {
        let db_path = db_path.into();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    TodoError::Storage(format!(
                        "Failed to create parent directory for database: {}",
                        e
                    ))
                })?;
            }
        }

        let storage = Self { db_path };
        storage.init()?;
        tracing::debug!(path = %storage.db_path.display(), "SQLite storage ready");
        Ok(storage)
    }

    /// Path of the backing database file
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn init(&self) -> Result<()> {
        let conn = open(&self.db_path)?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| TodoError::Storage(format!("Failed to create tables: {}", e)))?;
        Ok(())
    }

    /// Drop and re-create the `todos` table, discarding every row
    pub fn reset(&self) -> Result<()> {
        let mut conn = open(&self.db_path)?;
        let tx = conn
            .transaction()
            .map_err(|e| TodoError::Storage(format!("Failed to start transaction: {}", e)))?;
        tx.execute_batch("DROP TABLE IF EXISTS todos;")
            .map_err(|e| TodoError::Storage(format!("Failed to drop tables: {}", e)))?;
        tx.execute_batch(SCHEMA)
            .map_err(|e| TodoError::Storage(format!("Failed to create tables: {}", e)))?;
        tx.commit()
            .map_err(|e| TodoError::Storage(format!("Failed to commit transaction: {}", e)))?;
        tracing::info!(path = %self.db_path.display(), "Database reset");
        Ok(())
    }

    /// Every row regardless of session, in insertion order
    pub fn list_all(&self) -> Result<Vec<Todo>> {
        let conn = open(&self.db_path)?;
        query_todos(
            &conn,
            "SELECT id, content, session_key FROM todos ORDER BY id",
            params![],
        )
    }

    /// Rows of one session in insertion order, on the calling thread
    pub fn list_session(&self, session_key: &str) -> Result<Vec<Todo>> {
        let conn = open(&self.db_path)?;
        query_session(&conn, session_key)
    }

    /// Run `f` against a fresh connection on the blocking pool
    async fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = open(&db_path)?;
            f(&mut conn)
        })
        .await
        .map_err(|e| TodoError::Storage(format!("Storage worker failed: {}", e)))?
    }
}

#[async_trait]
impl TodoStore for SqliteStorage {
    async fn list(&self, session_key: &str) -> Result<Vec<Todo>> {
        let session_key = session_key.to_string();
        self.with_connection(move |conn| query_session(conn, &session_key))
            .await
    }

    async fn create(&self, content: &str, session_key: &str) -> Result<Todo> {
        let content = content.to_string();
        let session_key = session_key.to_string();
        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO todos (content, session_key) VALUES (?, ?)",
                params![content, session_key],
            )
            .map_err(|e| TodoError::Storage(format!("Failed to insert todo: {}", e)))?;
            let id = conn.last_insert_rowid();
            tracing::debug!(id, "Inserted todo");
            Ok(Todo {
                id,
                content,
                session_key,
            })
        })
        .await
    }

    async fn update(&self, id: i64, content: &str) -> Result<Todo> {
        let content = content.to_string();
        self.with_connection(move |conn| {
            let tx = conn
                .transaction()
                .map_err(|e| TodoError::Storage(format!("Failed to start transaction: {}", e)))?;

            let changed = tx
                .execute(
                    "UPDATE todos SET content = ? WHERE id = ?",
                    params![content, id],
                )
                .map_err(|e| TodoError::Storage(format!("Failed to update todo: {}", e)))?;
            if changed == 0 {
                return Err(TodoError::NotFound { id }.into());
            }

            let todo = fetch_one(&tx, id)?.ok_or(TodoError::NotFound { id })?;
            tx.commit()
                .map_err(|e| TodoError::Storage(format!("Failed to commit transaction: {}", e)))?;
            tracing::debug!(id, "Updated todo");
            Ok(todo)
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.with_connection(move |conn| {
            let removed = conn
                .execute("DELETE FROM todos WHERE id = ?", params![id])
                .map_err(|e| TodoError::Storage(format!("Failed to delete todo: {}", e)))?;
            tracing::debug!(id, removed, "Deleted todo");
            Ok(())
        })
        .await
    }

    async fn get(&self, id: i64) -> Result<Option<Todo>> {
        self.with_connection(move |conn| fetch_one(conn, id)).await
    }
}

fn open(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .map_err(|e| TodoError::Storage(format!("Failed to open database: {}", e)))?;
    conn.busy_timeout(Duration::from_secs(5))
        .map_err(|e| TodoError::Storage(format!("Failed to set busy timeout: {}", e)))?;
    Ok(conn)
}

fn fetch_one(conn: &Connection, id: i64) -> Result<Option<Todo>> {
    let todo = conn
        .query_row(
            "SELECT id, content, session_key FROM todos WHERE id = ?",
            params![id],
            row_to_todo,
        )
        .optional()
        .map_err(|e| TodoError::Storage(format!("Failed to query todo: {}", e)))?;
    Ok(todo)
}

fn query_session(conn: &Connection, session_key: &str) -> Result<Vec<Todo>> {
    query_todos(
        conn,
        "SELECT id, content, session_key FROM todos WHERE session_key = ? ORDER BY id",
        params![session_key],
    )
}

fn query_todos<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Todo>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| TodoError::Storage(format!("Failed to prepare statement: {}", e)))?;
    let rows = stmt
        .query_map(params, row_to_todo)
        .map_err(|e| TodoError::Storage(format!("Failed to query todos: {}", e)))?;

    let mut todos = Vec::new();
    for row in rows {
        todos.push(row.map_err(|e| TodoError::Storage(format!("Failed to read row: {}", e)))?);
    }
    Ok(todos)
}

fn row_to_todo(row: &rusqlite::Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        content: row.get(1)?,
        session_key: row.get(2)?,
    })
}
