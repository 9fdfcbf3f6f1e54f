//! Utility functions module
//! 
//! Contains helpers for throughput derivation and human-readable
//! formatting of timings.

pub mod units;

// Re-export commonly used functions
pub use units::{
    calculate_ops_per_second, duration_to_millis,
    format_duration_ms, format_ops,
    ZeroDurationPolicy, MIN_DURATION_MS,
};
