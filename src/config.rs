//! Configuration management for session-todo
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, TodoError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for session-todo
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Persistence settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Session cookie settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Which [`crate::storage::TodoStore`] implementation to serve from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// SQLite database file
    #[default]
    Sqlite,
    /// Process memory; rows vanish on restart
    Memory,
}

/// Persistence configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage implementation
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database file; when unset, `SESSION_TODO_DB` or the platform data dir is used
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Session cookie configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session key
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Emit the `HttpOnly` attribute
    #[serde(default = "default_http_only")]
    pub http_only: bool,

    /// Emit the `Secure` attribute
    #[serde(default)]
    pub secure: bool,
}

fn default_cookie_name() -> String {
    "session_key".to_string()
}

fn default_http_only() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            http_only: default_http_only(),
            secure: false,
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error; defaults are used instead. Problems
    /// that were tolerated are logged through `tracing`.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let (config, warnings) = Self::load_with_warnings(path, cli)?;
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
        Ok(config)
    }

    /// Like [`Config::load`], but hands tolerated problems back to the caller
    ///
    /// Used before a tracing subscriber exists, so the caller can log the
    /// warnings once logging is up.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load_with_warnings(
        path: &str,
        cli: &crate::cli::Cli,
    ) -> Result<(Self, Vec<String>)> {
        let mut warnings = Vec::new();
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            warnings.push(format!("Config file not found at {}, using defaults", path));
            Self::default()
        };

        config.apply_env_vars(&mut warnings);
        config.apply_cli_overrides(cli);

        Ok((config, warnings))
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TodoError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| TodoError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self, warnings: &mut Vec<String>) {
        if let Ok(host) = std::env::var("SESSION_TODO_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("SESSION_TODO_PORT") {
            match port.parse() {
                Ok(v) => self.server.port = v,
                Err(_) => warnings.push(format!("Invalid SESSION_TODO_PORT: {}", port)),
            }
        }

        if let Ok(backend) = std::env::var("SESSION_TODO_STORAGE_BACKEND") {
            self.storage.backend = match backend.to_lowercase().as_str() {
                "sqlite" => StorageBackend::Sqlite,
                "memory" => StorageBackend::Memory,
                _ => {
                    warnings.push(format!(
                        "Invalid storage backend: {}, keeping {:?}",
                        backend, self.storage.backend
                    ));
                    self.storage.backend
                }
            };
        }

        if let Ok(db_path) = std::env::var(crate::storage::DB_PATH_ENV) {
            self.storage.path = Some(PathBuf::from(db_path));
        }

        if let Ok(cookie_name) = std::env::var("SESSION_TODO_COOKIE_NAME") {
            self.session.cookie_name = cookie_name;
        }

        if let Ok(secure) = std::env::var("SESSION_TODO_COOKIE_SECURE") {
            match secure.parse::<bool>() {
                Ok(v) => self.session.secure = v,
                Err(_) => warnings.push(format!(
                    "Invalid value for SESSION_TODO_COOKIE_SECURE: {}",
                    secure
                )),
            }
        }

        if let Ok(json_logs) = std::env::var("SESSION_TODO_JSON_LOGS") {
            match json_logs.parse::<bool>() {
                Ok(v) => self.logging.json = v,
                Err(_) => warnings.push(format!(
                    "Invalid value for SESSION_TODO_JSON_LOGS: {}",
                    json_logs
                )),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(db) = &cli.db {
            self.storage.path = Some(db.clone());
        }

        if let crate::cli::Commands::Serve { host, port, memory } = &cli.command {
            if let Some(host) = host {
                self.server.host = host.clone();
            }
            if let Some(port) = port {
                self.server.port = *port;
            }
            if *memory {
                self.storage.backend = StorageBackend::Memory;
            }
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(TodoError::Config("server.host cannot be empty".to_string()).into());
        }

        if self.server.port == 0 {
            return Err(
                TodoError::Config("server.port must be greater than 0".to_string()).into(),
            );
        }

        let name = &self.session.cookie_name;
        if name.is_empty() {
            return Err(
                TodoError::Config("session.cookie_name cannot be empty".to_string()).into(),
            );
        }

        if name
            .chars()
            .any(|c| c == '=' || c == ';' || c == ',' || c.is_whitespace() || c.is_control())
        {
            return Err(TodoError::Config(format!(
                "session.cookie_name contains invalid characters: {:?}",
                name
            ))
            .into());
        }

        Ok(())
    }
}
