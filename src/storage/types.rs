use serde::{Deserialize, Serialize};

/// A single to-do row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Store-assigned identifier, never reused
    pub id: i64,
    /// User-supplied text
    pub content: String,
    /// Session the row belongs to; empty when the creating request had no cookie
    pub session_key: String,
}
