/*!
Command handlers for the CLI

- `serve`: run the HTTP server
- `init_db`: create or reset the SQLite schema
- `list`: print stored to-dos as a table
*/

use crate::config::Config;
use crate::error::Result;

// To-do listing with table output
pub mod list;

// HTTP server command handler
pub mod serve {
    //! Opens the configured store and hands it to the HTTP server.

    use super::*;
    use crate::server;
    use crate::storage::open_store;

    /// Run the server until interrupted
    pub async fn run_server(config: Config) -> Result<()> {
        let store = open_store(&config.storage)?;
        server::serve(&config, store).await
    }
}

// Schema management command handler
pub mod init_db {
    //! Creates the `todos` table, optionally dropping it first.

    use super::*;
    use crate::storage::open_sqlite;

    /// Create the schema, or drop and re-create it when `reset` is set
    pub fn run_init_db(config: &Config, reset: bool) -> Result<()> {
        let storage = open_sqlite(&config.storage)?;
        if reset {
            storage.reset()?;
            println!("Database reset at {}", storage.db_path().display());
        } else {
            println!("Database ready at {}", storage.db_path().display());
        }
        Ok(())
    }

}
