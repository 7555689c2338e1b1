//! Error types for the Livy client

use std::time::Duration;

use sparkbatch_core::domain::batch::BatchState;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Livy client
///
/// None of these are retried automatically: the only retry in this client is
/// the state-based polling loop, and it only continues while the batch state
/// stays in the continue-set.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Batch creation answered with anything but 201
    #[error("batch submission rejected (status {status}): {message}")]
    SubmissionFailed {
        /// HTTP status code
        status: u16,
        /// Error message from the server
        message: String,
    },

    /// Status query answered with anything but 200
    #[error("status query for batch {id} failed (status {status}): {message}")]
    StatusQueryFailed {
        /// Batch id being queried
        id: i64,
        /// HTTP status code
        status: u16,
        /// Error message from the server
        message: String,
    },

    /// Listing the batches collection answered with anything but 200
    #[error("listing batches failed (status {status}): {message}")]
    ListFailed {
        /// HTTP status code
        status: u16,
        /// Error message from the server
        message: String,
    },

    /// Response body did not match the known schema
    #[error("failed to parse response: {0}")]
    ParseError(String),

    /// A batch reported a state the workflow does not accept
    #[error("batch {id} reported unexpected state {state}")]
    UnexpectedState {
        /// Batch id
        id: i64,
        /// The state that stopped the workflow
        state: BatchState,
    },

    /// Poll policy failed validation
    #[error("invalid poll policy: {0}")]
    InvalidPolicy(String),

    /// Optional overall polling deadline was exceeded
    #[error("gave up waiting for batch {id} after {elapsed:?}")]
    Timeout {
        /// Batch id still being polled
        id: i64,
        /// Time spent polling before giving up
        elapsed: Duration,
    },
}

impl ClientError {
    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::SubmissionFailed { status, .. }
            | Self::StatusQueryFailed { status, .. }
            | Self::ListFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error is a rejected submission
    pub fn is_submission_failure(&self) -> bool {
        matches!(self, Self::SubmissionFailed { .. })
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_helper() {
        let err = ClientError::SubmissionFailed {
            status: 400,
            message: "bad request".to_string(),
        };
        assert_eq!(err.status(), Some(400));
        assert!(err.is_submission_failure());
        assert!(!err.is_server_error());

        let err = ClientError::StatusQueryFailed {
            id: 7,
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert!(err.is_server_error());

        let err = ClientError::ParseError("truncated".to_string());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_messages_name_the_batch() {
        let err = ClientError::UnexpectedState {
            id: 7,
            state: BatchState::Dead,
        };
        assert_eq!(err.to_string(), "batch 7 reported unexpected state dead");
    }
}
