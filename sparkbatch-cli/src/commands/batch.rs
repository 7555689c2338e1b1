//! Batch command handlers
//!
//! Handles all batch-related CLI commands: listing, one-shot submission,
//! watching a running batch, and the full submit-then-poll workflow for
//! one or more concurrent batches.

use std::time::Duration;

use anyhow::{Context, Result, bail, ensure};
use clap::Args;
use colored::*;
use tracing::info;

use sparkbatch_client::{LivyClient, PollPolicy};
use sparkbatch_core::domain::batch::{Batch, BatchState};
use sparkbatch_core::dto::batch::{CreateBatch, unique_job_name};

use crate::config::Config;

/// Job description flags shared by `submit` and `run`
#[derive(Args)]
pub struct JobSpecArgs {
    /// Path of the application artifact, as visible to the server
    #[arg(long)]
    pub file: String,

    /// Entry point class for JVM applications
    #[arg(long = "class")]
    pub class_name: Option<String>,

    /// Application argument (repeatable)
    #[arg(long = "arg")]
    pub args: Vec<String>,

    /// Driver memory, e.g. "512m"
    #[arg(long)]
    pub driver_memory: Option<String>,

    /// Executor memory, e.g. "512m"
    #[arg(long)]
    pub executor_memory: Option<String>,

    /// Cores per executor
    #[arg(long)]
    pub executor_cores: Option<u32>,

    /// Number of executors to launch
    #[arg(long)]
    pub num_executors: Option<u32>,
}

impl JobSpecArgs {
    /// Builds the submission payload with the given session name
    fn to_request(&self, name: String) -> CreateBatch {
        CreateBatch {
            file: self.file.clone(),
            class_name: self.class_name.clone(),
            args: self.args.clone(),
            driver_memory: self.driver_memory.clone(),
            executor_memory: self.executor_memory.clone(),
            executor_cores: self.executor_cores,
            num_executors: self.num_executors,
            name: Some(name),
        }
    }
}

/// Poll timing flags shared by `watch` and `run`
#[derive(Args)]
pub struct PollArgs {
    /// Lower bound of the random wait between polls, in milliseconds
    #[arg(long, default_value_t = 3000)]
    pub min_wait_ms: u64,

    /// Upper bound of the random wait between polls, in milliseconds
    #[arg(long, default_value_t = 10_000)]
    pub max_wait_ms: u64,

    /// Give up polling after this many seconds (default: poll until terminal)
    #[arg(long)]
    pub give_up_after_secs: Option<u64>,
}

impl PollArgs {
    /// Builds the poll policy these flags describe
    fn to_policy(&self) -> PollPolicy {
        let mut policy = PollPolicy::new(
            Duration::from_millis(self.min_wait_ms),
            Duration::from_millis(self.max_wait_ms),
        );
        if let Some(secs) = self.give_up_after_secs {
            policy = policy.with_give_up_after(Duration::from_secs(secs));
        }
        policy
    }
}

/// List all batches on the server
pub async fn list(config: &Config) -> Result<()> {
    let client = LivyClient::new(&config.livy_url);
    let page = client.list_batches().await?;

    if page.sessions.is_empty() {
        println!("{}", "No batches found.".yellow());
    } else {
        println!("{}", format!("Found {} batch(es):", page.total).bold());
        println!();
        for batch in &page.sessions {
            print_batch_summary(batch);
        }
    }

    Ok(())
}

/// Submit a single batch and print the created record, without polling
pub async fn submit(
    config: &Config,
    spec: JobSpecArgs,
    name: Option<String>,
    name_prefix: &str,
) -> Result<()> {
    let client = LivyClient::new(&config.livy_url);

    let name = name.unwrap_or_else(|| unique_job_name(name_prefix, 0));
    let batch = client.create_batch(&spec.to_request(name)).await?;

    // Creation contract: non-negative id, launch state.
    ensure!(batch.id >= 0, "server assigned invalid batch id {}", batch.id);
    ensure!(
        batch.state.is_launch_state(),
        "batch {} created in unexpected state {}",
        batch.id,
        batch.state
    );

    println!("{}", "Batch created:".bold());
    println!("  ID:    {}", batch.id.to_string().cyan());
    if let Some(name) = &batch.name {
        println!("  Name:  {}", name);
    }
    println!("  State: {}", colorize_state(&batch.state));

    Ok(())
}

/// Poll an existing batch until it terminates
pub async fn watch(config: &Config, id: i64, poll: &PollArgs) -> Result<()> {
    let client = LivyClient::new(&config.livy_url);
    let policy = poll.to_policy();

    let state = client.await_completion(id, &policy).await?;

    println!("Batch {} finished in state {}", id, colorize_state(&state));
    ensure!(
        state == BatchState::Success,
        "batch {} ended in state {}",
        id,
        state
    );

    Ok(())
}

/// Submit `count` batches and poll them all to success concurrently
pub async fn run(
    config: &Config,
    spec: JobSpecArgs,
    count: usize,
    name_prefix: &str,
    poll: &PollArgs,
) -> Result<()> {
    ensure!(count > 0, "--count must be at least 1");

    let client = LivyClient::new(&config.livy_url);
    let policy = poll.to_policy();

    info!("Submitting {} batch(es) to {}", count, client.base_url());

    // One task per batch; each workflow is independent and owns its own
    // client handle and uniquely named job.
    let mut handles = Vec::with_capacity(count);
    for index in 0..count {
        let name = unique_job_name(name_prefix, index);
        let job = spec.to_request(name.clone());
        let client = client.clone();
        let policy = policy.clone();

        let handle = tokio::spawn(async move { client.submit_and_await(&job, &policy).await });
        handles.push((name, handle));
    }

    println!("{}", format!("Tracking {} batch(es):", count).bold());
    println!();

    let mut failures = 0;
    for (name, handle) in handles {
        match handle.await.context("batch task panicked")? {
            Ok(id) => {
                println!(
                    "  {} {} (batch {}): {}",
                    "▸".cyan(),
                    name,
                    id,
                    "success".green()
                );
            }
            Err(e) => {
                failures += 1;
                println!("  {} {}: {}", "▸".cyan(), name, format!("{:#}", e).red());
            }
        }
    }
    println!();

    if failures > 0 {
        bail!("{} of {} batch(es) failed", failures, count);
    }

    println!("{}", format!("All {} batch(es) succeeded.", count).green().bold());
    Ok(())
}

/// Print a batch summary
fn print_batch_summary(batch: &Batch) {
    println!("  {} Batch {}", "▸".cyan(), batch.id);
    if let Some(name) = &batch.name {
        println!("    Name:  {}", name.dimmed());
    }
    if let Some(app_id) = &batch.app_id {
        println!("    App:   {}", app_id.dimmed());
    }
    println!("    State: {}", colorize_state(&batch.state));
    println!();
}

/// Colorize a batch state for display
fn colorize_state(state: &BatchState) -> colored::ColoredString {
    let state_str = state.to_string();
    match state {
        BatchState::NotStarted | BatchState::Starting | BatchState::Recovering => {
            state_str.yellow()
        }
        BatchState::Running => state_str.cyan(),
        BatchState::Success => state_str.green(),
        BatchState::Error | BatchState::Dead | BatchState::Killed => state_str.red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_args_build_policy() {
        let args = PollArgs {
            min_wait_ms: 100,
            max_wait_ms: 200,
            give_up_after_secs: None,
        };

        let policy = args.to_policy();
        assert_eq!(policy.min_wait, Duration::from_millis(100));
        assert_eq!(policy.max_wait, Duration::from_millis(200));
        assert!(policy.give_up_after.is_none());

        let bounded = PollArgs {
            give_up_after_secs: Some(30),
            ..args
        };
        assert_eq!(
            bounded.to_policy().give_up_after,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_job_spec_builds_request() {
        let spec = JobSpecArgs {
            file: "/opt/jars/spark-examples.jar".to_string(),
            class_name: Some("org.apache.spark.examples.SparkPi".to_string()),
            args: vec!["1".to_string()],
            driver_memory: Some("512m".to_string()),
            executor_memory: None,
            executor_cores: Some(1),
            num_executors: None,
        };

        let req = spec.to_request("job-0-AB12C".to_string());
        assert_eq!(req.file, "/opt/jars/spark-examples.jar");
        assert_eq!(req.args, vec!["1".to_string()]);
        assert_eq!(req.name.as_deref(), Some("job-0-AB12C"));
    }
}
