// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "maas-redeploy")]
#[command(about = "Upgrade MAAS machines to the newest image of their family")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (default: discovered in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print final results
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new maas-redeploy.yml configuration file
    Init {
        /// MAAS region URL, e.g. http://maas.example.com:5240/MAAS
        #[arg(long)]
        url: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Release and redeploy machines that have a newer image available
    Redeploy {
        /// MAAS system IDs of the machines to upgrade
        #[arg(required = true)]
        system_ids: Vec<String>,

        /// Maximum time to wait for a released machine to become ready (e.g. 100s, 5m)
        #[arg(long, value_parser = humantime::parse_duration)]
        timeout: Option<Duration>,

        /// Time between readiness polls (e.g. 5s)
        #[arg(long, value_parser = humantime::parse_duration)]
        interval: Option<Duration>,

        /// Number of machines processed at once
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Show which machines have a newer image without changing anything
    Check {
        /// MAAS system IDs of the machines to inspect
        #[arg(required = true)]
        system_ids: Vec<String>,
    },
}
