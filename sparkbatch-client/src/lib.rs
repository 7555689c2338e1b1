//! Livy Batches HTTP Client
//!
//! A typed client for the Apache Livy batches REST API: submit Spark batch
//! jobs, query their status, and poll them to completion with randomized
//! inter-poll delays.
//!
//! # Example
//!
//! ```no_run
//! use sparkbatch_client::{LivyClient, PollPolicy};
//! use sparkbatch_core::dto::batch::CreateBatch;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = LivyClient::new("http://localhost:8998");
//!
//!     let job = CreateBatch {
//!         file: "/opt/jars/spark-examples.jar".to_string(),
//!         class_name: Some("org.apache.spark.examples.SparkPi".to_string()),
//!         args: vec!["1".to_string()],
//!         ..Default::default()
//!     };
//!
//!     let id = client.submit_and_await(&job, &PollPolicy::default()).await?;
//!     println!("Batch {} succeeded", id);
//!     Ok(())
//! }
//! ```

pub mod error;
mod batches;
mod poll;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use poll::PollPolicy;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Livy batches API
///
/// The client holds no state of its own beyond the server address: the
/// server is the sole owner of every batch record, and this client only
/// creates and re-reads them. Cloning is cheap and clones share the
/// underlying connection pool, so concurrent batch workflows can each hold
/// their own handle.
#[derive(Debug, Clone)]
pub struct LivyClient {
    /// Base URL of the Livy server (e.g., "http://localhost:8998")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl LivyClient {
    /// Create a new Livy client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Livy server (e.g., "http://localhost:8998")
    ///
    /// # Example
    /// ```
    /// use sparkbatch_client::LivyClient;
    ///
    /// let client = LivyClient::new("http://localhost:8998");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new Livy client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Livy server
    /// * `client` - A configured reqwest Client
    ///
    /// # Example
    /// ```
    /// use sparkbatch_client::LivyClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = LivyClient::with_client("http://localhost:8998", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the Livy server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Read the body of a failed response for error reporting
    pub(crate) async fn error_text(response: reqwest::Response) -> String {
        response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string())
    }

    /// Parse a successful response body into the expected type
    ///
    /// Responses that do not match the statically known schema (missing
    /// required fields, unknown state strings, malformed JSON) are rejected
    /// with [`ClientError::ParseError`] instead of being patched over.
    pub(crate) async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = LivyClient::new("http://localhost:8998");
        assert_eq!(client.base_url(), "http://localhost:8998");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = LivyClient::new("http://localhost:8998/");
        assert_eq!(client.base_url(), "http://localhost:8998");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = LivyClient::with_client("http://localhost:8998", http_client);
        assert_eq!(client.base_url(), "http://localhost:8998");
    }
}
