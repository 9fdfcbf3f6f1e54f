//! Units formatting and conversion utilities
//!
//! Provides throughput derivation and human-readable formatting of
//! millisecond timings and operation rates.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Smallest duration the runner reports, used as the clamp floor
pub const MIN_DURATION_MS: f64 = 0.001;

/// How to derive throughput when a workload finished in zero measured time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroDurationPolicy {
    /// Divide by zero anyway; throughput becomes infinite (JSON `null`)
    Literal,
    /// Divide by [`MIN_DURATION_MS`] instead of zero. The record then keeps
    /// `duration_ms: 0.0` next to a throughput derived from the floor.
    #[default]
    Clamp,
}

/// Derive operations per second from a nominal unit count and elapsed
/// milliseconds: `units / (duration_ms / 1000)`.
///
/// # Examples
/// ```
/// use polybench::util::units::{calculate_ops_per_second, ZeroDurationPolicy};
///
/// let ops = calculate_ops_per_second(100_000, 50.0, ZeroDurationPolicy::Clamp);
/// assert!((ops - 2_000_000.0).abs() < 1e-6);
/// ```
pub fn calculate_ops_per_second(units: u64, duration_ms: f64, policy: ZeroDurationPolicy) -> f64 {
    let denominator = if duration_ms > 0.0 {
        duration_ms
    } else {
        match policy {
            ZeroDurationPolicy::Literal => 0.0,
            ZeroDurationPolicy::Clamp => MIN_DURATION_MS,
        }
    };

    units as f64 * 1000.0 / denominator
}

/// Fractional milliseconds of a duration
pub fn duration_to_millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Format a millisecond count with a fitting unit
///
/// # Examples
/// ```
/// use polybench::util::units::format_duration_ms;
///
/// assert_eq!(format_duration_ms(12.345), "12.35ms");
/// assert_eq!(format_duration_ms(1500.0), "1.50s");
/// ```
pub fn format_duration_ms(duration_ms: f64) -> String {
    if !duration_ms.is_finite() || duration_ms < 0.0 {
        return "n/a".to_string();
    }

    if duration_ms < 1.0 {
        format!("{:.0}μs", duration_ms * 1000.0)
    } else if duration_ms < 1000.0 {
        format!("{:.2}ms", duration_ms)
    } else if duration_ms < 60_000.0 {
        format!("{:.2}s", duration_ms / 1000.0)
    } else {
        let total_secs = (duration_ms / 1000.0) as u64;
        format!("{}m {}s", total_secs / 60, total_secs % 60)
    }
}

/// Format an operation rate with K/M suffixes
///
/// # Examples
/// ```
/// use polybench::util::units::format_ops;
///
/// assert_eq!(format_ops(1500.0), "1.5K ops/s");
/// assert_eq!(format_ops(2500000.0), "2.5M ops/s");
/// ```
pub fn format_ops(ops: f64) -> String {
    if !ops.is_finite() {
        "inf ops/s".to_string()
    } else if ops >= 1_000_000.0 {
        format!("{:.1}M ops/s", ops / 1_000_000.0)
    } else if ops >= 1_000.0 {
        format!("{:.1}K ops/s", ops / 1_000.0)
    } else {
        format!("{:.2} ops/s", ops)
    }
}
