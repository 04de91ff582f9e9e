// ABOUTME: Entry point for the maas-redeploy CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use maas_redeploy::config::{self, Config};
use maas_redeploy::error::Result;
use maas_redeploy::output::{Output, OutputMode};
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(mode);

    if let Err(e) = run(cli, &mut output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &mut Output) -> Result<()> {
    match cli.command {
        Commands::Init { url, force } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, url.as_deref(), force)?;
            output.success(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Redeploy {
            system_ids,
            timeout,
            interval,
            concurrency,
        } => {
            let mut config = load_config(cli.config.as_deref())?;

            // Command-line flags override the config file
            if let Some(timeout) = timeout {
                config.readiness.timeout = timeout;
            }
            if let Some(interval) = interval {
                config.readiness.interval = interval;
            }
            if let Some(concurrency) = concurrency {
                config.concurrency = concurrency;
            }
            config.validate()?;

            let system_ids = commands::parse_system_ids(&system_ids, output)?;
            commands::redeploy(&config, system_ids, output).await
        }
        Commands::Check { system_ids } => {
            let config = load_config(cli.config.as_deref())?;
            let system_ids = commands::parse_system_ids(&system_ids, output)?;
            commands::check(&config, system_ids, output).await
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::discover(&env::current_dir()?),
    }
}
