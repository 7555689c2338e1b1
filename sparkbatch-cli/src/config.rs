//! Configuration module
//!
//! Holds the CLI configuration resolved from arguments and environment.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the Livy server
    pub livy_url: String,
}
