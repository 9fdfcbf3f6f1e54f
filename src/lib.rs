//! polybench - cross-language micro-benchmark harness
//!
//! Times three fixed workloads (recursive Fibonacci, integer sort and the
//! Sieve of Eratosthenes) and reports them in a record shape shared with
//! sibling runners written in other languages.

use std::fmt;
use std::time::Duration;

// Public re-exports
pub mod bench;
pub mod compare;
pub mod config;
pub mod logging;
pub mod models;
pub mod util;
pub mod workloads;

// Common error types
#[derive(Debug)]
pub enum PolybenchError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Result (de)serialization error
    SerializationError(String),
    /// A sibling runner failed to start, exited non-zero or printed garbage
    RunnerError {
        /// Language tag of the failing runner
        language: String,
        /// What went wrong
        message: String,
    },
    /// A sibling runner exceeded the configured timeout
    Timeout {
        /// Language tag of the runner
        language: String,
        /// Timeout that was exceeded
        after: Duration,
    },
}

impl fmt::Display for PolybenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolybenchError::IoError(err) => write!(f, "I/O error: {}", err),
            PolybenchError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            PolybenchError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            PolybenchError::RunnerError { language, message } => {
                write!(f, "{} runner failed: {}", language, message)
            }
            PolybenchError::Timeout { language, after } => write!(
                f,
                "{} runner timed out after {}",
                language,
                humantime::format_duration(*after)
            ),
        }
    }
}

impl std::error::Error for PolybenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PolybenchError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PolybenchError {
    fn from(err: std::io::Error) -> Self {
        PolybenchError::IoError(err)
    }
}

impl From<serde_json::Error> for PolybenchError {
    fn from(err: serde_json::Error) -> Self {
        PolybenchError::SerializationError(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for PolybenchError {
    fn from(err: toml::de::Error) -> Self {
        PolybenchError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for PolybenchError {
    fn from(err: toml::ser::Error) -> Self {
        PolybenchError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for polybench operations
pub type Result<T> = std::result::Result<T, PolybenchError>;

/// Error handling utilities
pub mod error {
    use super::PolybenchError;

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &PolybenchError) -> String {
        match error {
            PolybenchError::ConfigError(msg) => {
                format!("Configuration error: {}. Check polybench.toml.", msg)
            }
            PolybenchError::RunnerError { language, .. } => format!(
                "The {} runner could not produce results. Is its toolchain installed and on PATH?",
                language
            ),
            PolybenchError::Timeout { language, .. } => format!(
                "The {} runner took too long. Raise `timeout` in polybench.toml.",
                language
            ),
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "polybench";
pub const CONFIG_FILE: &str = "polybench.toml";
/// Environment variable that overrides the comparison config path
pub const CONFIG_ENV: &str = "POLYBENCH_CONFIG";
/// Language tag written by the native runner
pub const LANGUAGE: &str = "Rust";

pub use bench::runner::BenchmarkRunner;
pub use models::{BenchmarkResult, ComparisonReport};
pub use workloads::Workload;
