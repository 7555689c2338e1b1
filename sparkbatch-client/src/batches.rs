//! Batches API endpoints

use reqwest::StatusCode;

use crate::LivyClient;
use crate::error::{ClientError, Result};
use sparkbatch_core::domain::batch::{Batch, BatchList};
use sparkbatch_core::dto::batch::CreateBatch;

impl LivyClient {
    // =============================================================================
    // Batch Lifecycle
    // =============================================================================

    /// Submit a new batch job
    ///
    /// Issues a single `POST /batches` with the job description as the JSON
    /// body. The server must answer exactly 201; any other status, including
    /// other 2xx codes, is a submission failure surfaced immediately with no
    /// retry. Immediately after creation the server reports a non-negative
    /// id and a launch state (`starting` or `running`), which the caller is
    /// expected to assert.
    ///
    /// # Example
    /// ```no_run
    /// # use sparkbatch_client::LivyClient;
    /// # use sparkbatch_core::dto::batch::CreateBatch;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = LivyClient::new("http://localhost:8998");
    /// let batch = client.create_batch(&CreateBatch {
    ///     file: "/opt/jars/spark-examples.jar".to_string(),
    ///     class_name: Some("org.apache.spark.examples.SparkPi".to_string()),
    ///     ..Default::default()
    /// }).await?;
    /// println!("created batch {} in state {}", batch.id, batch.state);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_batch(&self, req: &CreateBatch) -> Result<Batch> {
        let url = format!("{}/batches", self.base_url);
        let response = self.client.post(&url).json(req).send().await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let message = Self::error_text(response).await;
            return Err(ClientError::SubmissionFailed {
                status: status.as_u16(),
                message,
            });
        }

        Self::parse_json(response).await
    }

    /// Get the current record of a batch
    ///
    /// # Arguments
    /// * `id` - The server-assigned batch id
    ///
    /// # Returns
    /// The batch record, re-read from the server. The server must answer
    /// exactly 200; any other status is a hard failure, no retry.
    pub async fn get_batch(&self, id: i64) -> Result<Batch> {
        let url = format!("{}/batches/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let message = Self::error_text(response).await;
            return Err(ClientError::StatusQueryFailed {
                id,
                status: status.as_u16(),
                message,
            });
        }

        Self::parse_json(response).await
    }

    /// List all batches known to the server
    ///
    /// # Returns
    /// One page of batches. A reachable, initialized server answers 200.
    pub async fn list_batches(&self) -> Result<BatchList> {
        let url = format!("{}/batches", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let message = Self::error_text(response).await;
            return Err(ClientError::ListFailed {
                status: status.as_u16(),
                message,
            });
        }

        Self::parse_json(response).await
    }
}
