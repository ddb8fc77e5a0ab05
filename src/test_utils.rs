//! Test utilities for session-todo
//!
//! Temporary storage, canned configuration, and assertion helpers shared by
//! the unit tests.

use crate::config::Config;
use crate::error::Result;
use crate::storage::SqliteStorage;
use tempfile::TempDir;

/// Create a SQLite store in a fresh temporary directory
///
/// The `TempDir` must be kept alive for as long as the store is used.
pub fn temp_storage() -> (SqliteStorage, TempDir) {
    let dir = TempDir::new().expect("Failed to create temporary directory");
    let storage =
        SqliteStorage::new_with_path(dir.path().join("todo.db")).expect("Failed to create storage");
    (storage, dir)
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Configuration YAML exercising every section
pub fn test_config_yaml() -> String {
    r#"
server:
  host: 127.0.0.1
  port: 8123
storage:
  backend: memory
session:
  cookie_name: session_key
  http_only: true
  secure: false
logging:
  json: false
"#
    .to_string()
}

/// Parse [`test_config_yaml`]
pub fn test_config() -> Config {
    serde_yaml::from_str(&test_config_yaml()).expect("test config must parse")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TodoError;
    use crate::storage::TodoStore;

    #[tokio::test]
    async fn test_temp_storage_is_empty_and_usable() {
        let (storage, _dir) = temp_storage();
        assert!(storage.list_all().unwrap().is_empty());
        storage.create("x", "s").await.unwrap();
        assert_eq!(storage.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: Result<()> = Err(TodoError::NotFound { id: 5 }.into());
        assert_error_contains(result, "id=5");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        let result: Result<()> = Ok(());
        assert_error_contains(result, "error");
    }

    #[test]
    fn test_test_config_is_valid() {
        let config = test_config();
        assert_eq!(config.server.port, 8123);
        assert!(config.validate().is_ok());
    }
}
