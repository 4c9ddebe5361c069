use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use examprep_store::adapter::inbound::cli::command::Cli;
use examprep_store::adapter::inbound::cli::handler::{self, Exit};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(Exit::Success) => ExitCode::SUCCESS,
        Ok(Exit::NotFound) => ExitCode::from(1),
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<Exit> {
    let config = handler::load_config(cli.config.as_deref()).context("failed to load config")?;
    config.init_logging();

    handler::execute(&cli.command, &config, cli.json)
        .await
        .with_context(|| format!("{} failed", command_name(cli)))
}

fn command_name(cli: &Cli) -> &'static str {
    use examprep_store::adapter::inbound::cli::command::Commands;
    match cli.command {
        Commands::Init(_) => "init",
        Commands::Tables => "tables",
        Commands::Exists(_) => "exists",
        Commands::Seed => "seed",
        Commands::Status => "status",
    }
}
