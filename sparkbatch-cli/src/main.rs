//! Sparkbatch CLI
//!
//! Command-line interface for submitting Spark batch jobs to an Apache Livy
//! server and polling them to completion.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sparkbatch")]
#[command(about = "Submit and track Spark batches on an Apache Livy server", long_about = None)]
struct Cli {
    /// Livy server URL
    #[arg(long, env = "LIVY_URL", default_value = "http://localhost:8998")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sparkbatch_cli=info,sparkbatch_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config { livy_url: cli.url };

    handle_command(cli.command, &config).await
}
