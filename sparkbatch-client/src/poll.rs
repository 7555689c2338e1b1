//! Batch polling workflow
//!
//! Re-reads a submitted batch until it leaves the continue-set, waiting a
//! uniformly random duration between attempts. The jitter keeps many
//! concurrently tracked batches from synchronizing into request bursts
//! against the server.

use std::time::Duration;

use rand::Rng;
use tokio::time::{self, Instant};
use tracing::{debug, info};

use crate::LivyClient;
use crate::error::{ClientError, Result};
use sparkbatch_core::domain::batch::BatchState;
use sparkbatch_core::dto::batch::CreateBatch;

/// Poll timing policy
///
/// The continue-set itself is fixed by [`BatchState::is_active`]; this
/// policy carries the timing knobs as explicit configuration instead of
/// burying them in a retry combinator.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Lower bound of the random wait between polls.
    pub min_wait: Duration,
    /// Upper bound of the random wait between polls.
    pub max_wait: Duration,
    /// Overall budget after which polling gives up with
    /// [`ClientError::Timeout`]. `None` polls until the batch terminates,
    /// which mirrors the server contract that batches always do.
    pub give_up_after: Option<Duration>,
}

impl PollPolicy {
    /// Default lower bound of the wait between polls.
    pub const DEFAULT_MIN_WAIT: Duration = Duration::from_millis(3000);
    /// Default upper bound of the wait between polls.
    pub const DEFAULT_MAX_WAIT: Duration = Duration::from_millis(10_000);

    /// Creates a policy with the given jitter window and no overall deadline
    pub fn new(min_wait: Duration, max_wait: Duration) -> Self {
        Self {
            min_wait,
            max_wait,
            give_up_after: None,
        }
    }

    /// Sets an overall deadline after which polling stops
    pub fn with_give_up_after(mut self, budget: Duration) -> Self {
        self.give_up_after = Some(budget);
        self
    }

    /// Validates the policy
    pub fn validate(&self) -> Result<()> {
        if self.max_wait.is_zero() {
            return Err(ClientError::InvalidPolicy(
                "max_wait must be greater than zero".to_string(),
            ));
        }

        if self.min_wait > self.max_wait {
            return Err(ClientError::InvalidPolicy(format!(
                "min_wait {:?} exceeds max_wait {:?}",
                self.min_wait, self.max_wait
            )));
        }

        Ok(())
    }

    /// Draws a uniformly random wait in `[min_wait, max_wait]`
    pub fn jitter(&self) -> Duration {
        if self.max_wait <= self.min_wait {
            return self.min_wait;
        }

        let spread = (self.max_wait - self.min_wait).as_millis() as u64;
        let offset = rand::thread_rng().gen_range(0..=spread);
        self.min_wait + Duration::from_millis(offset)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_WAIT, Self::DEFAULT_MAX_WAIT)
    }
}

impl LivyClient {
    // =============================================================================
    // Polling
    // =============================================================================

    /// Polls a batch until it reaches a terminal state
    ///
    /// Re-reads the batch record in a loop, sleeping a random
    /// `[min_wait, max_wait]` duration between attempts while the state
    /// stays in the continue-set (`not_started`, `starting`, `running`).
    /// Every observation is logged with the batch id. A non-200 status
    /// query aborts the loop immediately.
    ///
    /// The first state outside the continue-set is returned as-is; whether
    /// that state is acceptable is the caller's call (see
    /// [`await_success`](Self::await_success)).
    pub async fn await_completion(&self, id: i64, policy: &PollPolicy) -> Result<BatchState> {
        policy.validate()?;

        let started = Instant::now();

        loop {
            let batch = self.get_batch(id).await?;
            info!("Batch {} -> {}", id, batch.state);

            if batch.state.is_terminal() {
                return Ok(batch.state);
            }

            if let Some(budget) = policy.give_up_after {
                let elapsed = started.elapsed();
                if elapsed >= budget {
                    return Err(ClientError::Timeout { id, elapsed });
                }
            }

            let wait = policy.jitter();
            debug!("Batch {} still {}, next poll in {:?}", id, batch.state, wait);
            time::sleep(wait).await;
        }
    }

    /// Polls a batch to completion and requires it to succeed
    ///
    /// Any terminal state other than `success` becomes
    /// [`ClientError::UnexpectedState`].
    pub async fn await_success(&self, id: i64, policy: &PollPolicy) -> Result<()> {
        match self.await_completion(id, policy).await? {
            BatchState::Success => Ok(()),
            state => Err(ClientError::UnexpectedState { id, state }),
        }
    }

    /// Runs the full submit-then-poll workflow for one batch
    ///
    /// Submits the job, checks the creation contract (a non-negative id in
    /// a launch state), then polls the batch until it succeeds. A rejected
    /// submission aborts before the first poll is issued.
    ///
    /// # Returns
    /// The server-assigned id of the succeeded batch
    ///
    /// # Example
    /// ```no_run
    /// # use sparkbatch_client::{LivyClient, PollPolicy};
    /// # use sparkbatch_core::dto::batch::CreateBatch;
    /// # use sparkbatch_core::dto::batch::unique_job_name;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = LivyClient::new("http://localhost:8998");
    /// let job = CreateBatch {
    ///     file: "/opt/jars/spark-examples.jar".to_string(),
    ///     name: Some(unique_job_name("job", 0)),
    ///     ..Default::default()
    /// };
    /// let id = client.submit_and_await(&job, &PollPolicy::default()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit_and_await(&self, req: &CreateBatch, policy: &PollPolicy) -> Result<i64> {
        let batch = self.create_batch(req).await?;

        if batch.id < 0 {
            return Err(ClientError::ParseError(format!(
                "server assigned invalid batch id {}",
                batch.id
            )));
        }

        if !batch.state.is_launch_state() {
            return Err(ClientError::UnexpectedState {
                id: batch.id,
                state: batch.state,
            });
        }

        info!("Batch {} created in state {}", batch.id, batch.state);

        self.await_success(batch.id, policy).await?;
        Ok(batch.id)
    }
}
