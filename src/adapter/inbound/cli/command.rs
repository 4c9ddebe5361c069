//! Command-line interface definitions.
//!
//! Defines the CLI structure for the `examprep-store` binary using `clap`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Local exam-preparation store: migrations, catalog and fixtures
#[derive(Parser, Debug)]
#[command(name = "examprep-store")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database and apply pending migrations
    Init(InitArgs),

    /// List user tables
    Tables,

    /// Check whether a table exists (exit code 1 when it does not)
    Exists(ExistsArgs),

    /// Load the development fixtures
    Seed,

    /// Show applied and pending migrations
    Status,
}

/// Arguments for `init`.
#[derive(Parser, Debug, Default)]
pub struct InitArgs {
    /// Also load development fixtures
    #[arg(long)]
    pub fixtures: bool,
}

/// Arguments for `exists`.
#[derive(Parser, Debug)]
pub struct ExistsArgs {
    /// Table name to look up
    pub table: String,
}
