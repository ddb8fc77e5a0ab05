//! In-process to-do storage

use super::{Todo, TodoStore};
use crate::error::{Result, TodoError};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug)]
struct MemoryState {
    next_id: i64,
    rows: Vec<Todo>,
}

/// A [`TodoStore`] that keeps rows in memory
///
/// Ids come from a monotonic counter and are never reused. Contents are lost
/// when the value is dropped.
///
/// # Examples
///
/// ```
/// use session_todo::storage::{MemoryStorage, TodoStore};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let store = MemoryStorage::new();
/// let todo = store.create("Buy milk", "abc").await.unwrap();
/// assert_eq!(store.list("abc").await.unwrap(), vec![todo]);
/// # }
/// ```
#[derive(Debug)]
pub struct MemoryStorage {
    state: RwLock<MemoryState>,
}

impl MemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                next_id: 1,
                rows: Vec::new(),
            }),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for MemoryStorage {
    async fn list(&self, session_key: &str) -> Result<Vec<Todo>> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .iter()
            .filter(|t| t.session_key == session_key)
            .cloned()
            .collect())
    }

    async fn create(&self, content: &str, session_key: &str) -> Result<Todo> {
        let mut state = self.state.write().await;
        let todo = Todo {
            id: state.next_id,
            content: content.to_string(),
            session_key: session_key.to_string(),
        };
        state.next_id += 1;
        state.rows.push(todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: i64, content: &str) -> Result<Todo> {
        let mut state = self.state.write().await;
        let row = state
            .rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TodoError::NotFound { id })?;
        row.content = content.to_string();
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.state.write().await.rows.retain(|t| t.id != id);
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<Option<Todo>> {
        let state = self.state.read().await;
        Ok(state.rows.iter().find(|t| t.id == id).cloned())
    }
}
