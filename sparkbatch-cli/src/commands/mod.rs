//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod batch;

pub use batch::{JobSpecArgs, PollArgs};

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List batches known to the server
    List,
    /// Submit a batch job without waiting for it
    Submit {
        #[command(flatten)]
        spec: JobSpecArgs,

        /// Explicit session name (default: a generated unique name)
        #[arg(long)]
        name: Option<String>,

        /// Prefix for the generated unique name
        #[arg(long, default_value = "job")]
        name_prefix: String,
    },
    /// Poll a batch until it reaches a terminal state
    Watch {
        /// Server-assigned batch id
        id: i64,

        #[command(flatten)]
        poll: PollArgs,
    },
    /// Submit one or more batches and poll them all to success
    Run {
        #[command(flatten)]
        spec: JobSpecArgs,

        /// Number of independent batches to submit
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Prefix for the generated unique names
        #[arg(long, default_value = "job")]
        name_prefix: String,

        #[command(flatten)]
        poll: PollArgs,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
///
/// # Returns
/// Result indicating success or failure
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::List => batch::list(config).await,
        Commands::Submit {
            spec,
            name,
            name_prefix,
        } => batch::submit(config, spec, name, &name_prefix).await,
        Commands::Watch { id, poll } => batch::watch(config, id, &poll).await,
        Commands::Run {
            spec,
            count,
            name_prefix,
            poll,
        } => batch::run(config, spec, count, &name_prefix, &poll).await,
    }
}
