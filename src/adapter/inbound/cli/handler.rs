//! Command handlers.
//!
//! Every command except `status` initializes the manager, does its work and
//! closes it again, so the store is never left open between invocations.

use std::path::Path;

use serde_json::json;
use tracing::warn;

use super::command::{Commands, ExistsArgs, InitArgs};
use crate::application::{PersistenceManager, StoreStatus};
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Outcome of a command, mapped to the process exit code by `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    /// The command ran but the answer was negative (`exists` on a missing table).
    NotFound,
}

/// Load configuration for a CLI invocation.
///
/// # Errors
/// Returns an error when the config file is unreadable or invalid.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load_or_default(path)
}

/// Run one subcommand against the configured store.
///
/// `status` inspects the store without initializing it; every other command
/// initializes first. The manager is closed before returning either way.
///
/// # Errors
/// Propagates initialization, query and fixture errors. A command error
/// takes precedence over a failure to close.
pub async fn execute(command: &Commands, config: &Config, json: bool) -> Result<Exit> {
    let manager = PersistenceManager::from_config(&config.database);

    if !matches!(command, Commands::Status) {
        manager.initialize().await?;
    }
    let result = run(&manager, command, config, json).await;
    finish(result, manager.close().await)
}

fn finish(result: Result<Exit>, closed: Result<()>) -> Result<Exit> {
    match (result, closed) {
        (result, Ok(())) => result,
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(e), Err(close_err)) => {
            warn!(error = %close_err, "Failed to close store after command error");
            Err(e)
        }
    }
}

async fn run(
    manager: &PersistenceManager,
    command: &Commands,
    config: &Config,
    json: bool,
) -> Result<Exit> {
    match command {
        Commands::Init(InitArgs { fixtures }) => {
            let seeded = *fixtures || config.database.load_fixtures;
            if seeded {
                manager.load_fixtures().await?;
            }
            let tables = manager.all_tables().await?;
            if json {
                println!(
                    "{}",
                    json!({ "store": manager.store_name(), "tables": tables.len(), "fixtures": seeded })
                );
            } else {
                println!(
                    "Initialized {} ({} tables{})",
                    manager.store_name(),
                    tables.len(),
                    if seeded { ", fixtures loaded" } else { "" }
                );
            }
            Ok(Exit::Success)
        }
        Commands::Tables => {
            let tables = manager.all_tables().await?;
            if json {
                println!("{}", json!(tables));
            } else {
                for table in tables {
                    println!("{table}");
                }
            }
            Ok(Exit::Success)
        }
        Commands::Exists(ExistsArgs { table }) => {
            let exists = manager.table_exists(table).await?;
            if json {
                println!("{}", json!({ "table": table, "exists": exists }));
            } else {
                println!("{table}: {}", if exists { "present" } else { "missing" });
            }
            Ok(if exists { Exit::Success } else { Exit::NotFound })
        }
        Commands::Seed => {
            manager.load_fixtures().await?;
            if json {
                println!("{}", json!({ "fixtures": true }));
            } else {
                println!("Fixtures loaded into {}", manager.store_name());
            }
            Ok(Exit::Success)
        }
        Commands::Status => {
            print_status(&manager.status().await?, json);
            Ok(Exit::Success)
        }
    }
}

fn print_status(status: &StoreStatus, json: bool) {
    if json {
        println!(
            "{}",
            json!({
                "store": status.store,
                "applied": status.applied,
                "pending": status.pending,
            })
        );
        return;
    }

    println!("Store: {}", status.store);
    for version in &status.applied {
        println!("  applied  {version}");
    }
    for version in &status.pending {
        println!("  pending  {version}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.database.directory = Some(dir.to_path_buf());
        config
    }

    #[test]
    fn command_error_wins_over_close_error() {
        let result = finish(
            Err(Error::NotInitialized),
            Err(Error::Database("close failed".into())),
        );
        assert!(matches!(result, Err(Error::NotInitialized)));
    }

    #[test]
    fn close_error_surfaces_after_successful_command() {
        let result = finish(Ok(Exit::Success), Err(Error::Database("close failed".into())));
        assert!(matches!(result, Err(Error::Database(_))));
        assert_eq!(finish(Ok(Exit::NotFound), Ok(())).unwrap(), Exit::NotFound);
    }

    #[tokio::test]
    async fn status_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let exit = execute(&Commands::Status, &config, true).await.unwrap();
        assert_eq!(exit, Exit::Success);
        assert!(!config.database.path().exists());

        execute(&Commands::Tables, &config, true).await.unwrap();
        assert!(config.database.path().exists());
    }
}
