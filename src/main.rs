//! session-todo - server-rendered to-do list
//!
#![doc = "Main entry point for the session-todo server and admin commands."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use session_todo::cli::{Cli, Commands};
use session_todo::commands;
use session_todo::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // The log format comes from the config, so warnings gathered while
    // loading are held until the subscriber is installed.
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let (config, warnings) = Config::load_with_warnings(config_path, &cli)?;
    init_tracing(cli.verbose, config.logging.json);
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    config.validate()?;

    match cli.command {
        Commands::Serve { .. } => {
            tracing::info!("Starting HTTP server");
            commands::serve::run_server(config).await?;
        }
        Commands::InitDb { reset } => {
            if reset {
                tracing::warn!("Dropping and re-creating the todos table");
            }
            commands::init_db::run_init_db(&config, reset)?;
        }
        Commands::List { session } => {
            tracing::debug!(?session, "Listing to-dos");
            commands::list::list_todos(&config, session.as_deref())?;
        }
    }

    Ok(())
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose {
        "session_todo=debug"
    } else {
        "session_todo=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
