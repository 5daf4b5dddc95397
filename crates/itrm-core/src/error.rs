//! Typed errors for the parts of the assistant that can fail.
//!
//! Only [`ConfigError`] is allowed to stop the process. Ledger and agent
//! errors are caught by the handlers and turned into reply text.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Startup configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing credential: {name} (set {env_var} or {config_key} in config.json)")]
    MissingCredential {
        name: &'static str,
        env_var: &'static str,
        config_key: &'static str,
    },

    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by ledger arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("revenue is zero, the IT-to-revenue ratio is undefined")]
    DivisionByZero,

    #[error("the amount is too large to represent")]
    Overflow,
}

/// Failures of the external research agent.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("the research agent did not answer within {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("the research agent stopped after {0} tool iterations without an answer")]
    IterationLimit(u32),

    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}
