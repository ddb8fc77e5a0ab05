//! Command-line interface definition for session-todo
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// session-todo - server-rendered to-do list with cookie sessions
#[derive(Parser, Debug, Clone)]
#[command(name = "session-todo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// SQLite database file (overrides storage.path)
    #[arg(long, env = "SESSION_TODO_DB")]
    pub db: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Interface to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Keep to-dos in memory instead of SQLite
        #[arg(long)]
        memory: bool,
    },

    /// Create the database schema
    InitDb {
        /// Drop existing tables first, discarding all rows
        #[arg(long)]
        reset: bool,
    },

    /// Print stored to-dos
    List {
        /// Only show rows for this session key
        #[arg(short, long)]
        session: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            db: None,
            command: Commands::Serve {
                host: None,
                port: None,
                memory: false,
            },
        }
    }
}
