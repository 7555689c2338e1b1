//! Batch domain types

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a batch, as reported by the Livy server.
///
/// Wire values are lowercase snake_case strings. The enum is closed on
/// purpose: a state string outside this set fails deserialization instead of
/// being carried around as an opaque value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchState {
    NotStarted,
    Starting,
    Running,
    Recovering,
    Success,
    Error,
    Dead,
    Killed,
}

impl BatchState {
    /// States during which polling should continue.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::NotStarted | Self::Starting | Self::Running)
    }

    /// States after which no further transitions occur.
    ///
    /// Everything outside the continue-set counts as terminal, including
    /// `recovering`: the client stops polling there and lets the caller
    /// decide what the state means.
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// States a freshly created batch is allowed to report.
    pub fn is_launch_state(&self) -> bool {
        matches!(self, Self::Starting | Self::Running)
    }

    /// The wire name of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Recovering => "recovering",
            Self::Success => "success",
            Self::Error => "error",
            Self::Dead => "dead",
            Self::Killed => "killed",
        }
    }
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A batch as returned by the server.
///
/// `id` and `state` must always be present; a response missing either is
/// rejected at parse time. The remaining fields default when a server
/// version omits them, and fields beyond the known schema are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    /// Server-assigned batch id.
    pub id: i64,
    /// Session name, if one was supplied at creation.
    #[serde(default)]
    pub name: Option<String>,
    /// Spark application id, once the application is up.
    #[serde(default)]
    pub app_id: Option<String>,
    /// Application info published by the server (driver log URL, Spark UI URL).
    #[serde(default)]
    pub app_info: HashMap<String, Option<String>>,
    /// Tail of the batch log lines.
    #[serde(default)]
    pub log: Vec<String>,
    /// Current lifecycle state.
    pub state: BatchState,
}

/// One page of batches, as returned by `GET /batches`.
///
/// The server names the page items `sessions` regardless of session kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchList {
    /// Index of the first batch in this page.
    pub from: i64,
    /// Number of batches in this page.
    pub total: i64,
    /// The batches themselves.
    pub sessions: Vec<Batch>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_wire_names() {
        let state: BatchState = serde_json::from_str(r#""not_started""#).unwrap();
        assert_eq!(state, BatchState::NotStarted);

        let state: BatchState = serde_json::from_str(r#""running""#).unwrap();
        assert_eq!(state, BatchState::Running);

        assert_eq!(
            serde_json::to_string(&BatchState::Success).unwrap(),
            r#""success""#
        );
        assert_eq!(BatchState::NotStarted.to_string(), "not_started");
        assert_eq!(BatchState::Dead.to_string(), "dead");
    }

    #[test]
    fn test_unknown_state_is_rejected() {
        let result = serde_json::from_str::<BatchState>(r#""shutting_down""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_continue_set() {
        for state in [
            BatchState::NotStarted,
            BatchState::Starting,
            BatchState::Running,
        ] {
            assert!(state.is_active());
            assert!(!state.is_terminal());
        }

        for state in [
            BatchState::Recovering,
            BatchState::Success,
            BatchState::Error,
            BatchState::Dead,
            BatchState::Killed,
        ] {
            assert!(!state.is_active());
            assert!(state.is_terminal());
        }
    }

    #[test]
    fn test_launch_states() {
        assert!(BatchState::Starting.is_launch_state());
        assert!(BatchState::Running.is_launch_state());
        assert!(!BatchState::NotStarted.is_launch_state());
        assert!(!BatchState::Success.is_launch_state());
    }

    #[test]
    fn test_batch_parses_full_creation_response() {
        // Shape of a real 201 body, including fields outside the known schema.
        let body = r#"{
            "id": 7,
            "name": "job-0-AB12C",
            "owner": null,
            "proxyUser": null,
            "state": "starting",
            "appId": null,
            "appInfo": {"driverLogUrl": null, "sparkUiUrl": null},
            "log": ["stdout: ", "\nstderr: "]
        }"#;

        let batch: Batch = serde_json::from_str(body).unwrap();
        assert_eq!(batch.id, 7);
        assert_eq!(batch.name.as_deref(), Some("job-0-AB12C"));
        assert_eq!(batch.state, BatchState::Starting);
        assert!(batch.app_id.is_none());
        assert_eq!(batch.app_info.len(), 2);
        assert_eq!(batch.log.len(), 2);
    }

    #[test]
    fn test_batch_parses_minimal_response() {
        let batch: Batch = serde_json::from_str(r#"{"id": 0, "state": "success"}"#).unwrap();
        assert_eq!(batch.id, 0);
        assert_eq!(batch.state, BatchState::Success);
        assert!(batch.name.is_none());
        assert!(batch.log.is_empty());
    }

    #[test]
    fn test_batch_requires_id_and_state() {
        assert!(serde_json::from_str::<Batch>(r#"{"state": "running"}"#).is_err());
        assert!(serde_json::from_str::<Batch>(r#"{"id": 3}"#).is_err());
    }

    #[test]
    fn test_batch_list_page_shape() {
        let body = r#"{
            "from": 0,
            "total": 2,
            "sessions": [
                {"id": 1, "state": "running"},
                {"id": 2, "state": "success"}
            ]
        }"#;

        let page: BatchList = serde_json::from_str(body).unwrap();
        assert_eq!(page.from, 0);
        assert_eq!(page.total, 2);
        assert_eq!(page.sessions.len(), 2);
        assert_eq!(page.sessions[1].state, BatchState::Success);
    }
}
