//! Batch submission payload

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Characters the unique-name suffix is drawn from.
const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Length of the random suffix appended to generated job names.
const SUFFIX_LEN: usize = 5;

/// Payload for `POST /batches`.
///
/// Serializes to the camelCase field names the server expects. Unset
/// optional fields are omitted from the JSON entirely rather than sent as
/// null, so the payload contains exactly what the caller filled in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatch {
    /// Path of the application artifact, as visible to the server.
    pub file: String,
    /// Entry point class for JVM applications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Command line arguments passed to the application.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Driver memory, e.g. "512m".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_memory: Option<String>,
    /// Executor memory, e.g. "512m".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor_memory: Option<String>,
    /// Cores per executor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor_cores: Option<u32>,
    /// Number of executors to launch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_executors: Option<u32>,
    /// Session name. Must be unique among live batches on the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Builds a job name that is unique per submission.
///
/// Combines the caller's prefix and sequence index with a 5-character random
/// suffix drawn from `A-Z0-9`, so batches created concurrently do not collide
/// on the server's unique-name constraint.
pub fn unique_job_name(prefix: &str, index: usize) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect();
    format!("{}-{}-{}", prefix, index, suffix)
}
