//! Sequential benchmark runner
//!
//! Runs each workload to completion on the calling thread, timing only the
//! workload call, and collects one record per workload in execution order.

use std::io::Write;
use std::time::Instant;

use tracing::debug;

use crate::models::BenchmarkResult;
use crate::util::units::ZeroDurationPolicy;
use crate::workloads::Workload;
use crate::{Result, LANGUAGE};

/// Benchmark runner for the native suite
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    language: String,
    policy: ZeroDurationPolicy,
}

impl Default for BenchmarkRunner {
    fn default() -> Self {
        Self {
            language: LANGUAGE.to_string(),
            policy: ZeroDurationPolicy::default(),
        }
    }
}

impl BenchmarkRunner {
    /// Create a runner with the default language tag and clamp policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the language tag written into every record
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the zero-duration throughput policy
    pub fn with_policy(mut self, policy: ZeroDurationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Language tag written into every record
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Time a single workload
    pub fn time_workload(&self, workload: Workload) -> BenchmarkResult {
        self.time_with(workload.test_name(), workload.unit_count(), || workload.run())
    }

    /// Time an arbitrary closure as a test with `units` nominal work.
    ///
    /// The clock brackets only `f`.
    pub fn time_with<F>(&self, test_name: &str, units: u64, f: F) -> BenchmarkResult
    where
        F: FnOnce(),
    {
        let start = Instant::now();
        f();
        let elapsed = start.elapsed();

        let result =
            BenchmarkResult::from_units(self.language.as_str(), test_name, units, elapsed, self.policy);
        debug!(
            test = %result.test_name,
            duration_ms = result.duration_ms,
            ops = result.operations_per_second,
            "workload finished"
        );
        result
    }

    /// Run every workload in [`Workload::ALL`] order
    pub fn run_all(&self) -> Vec<BenchmarkResult> {
        let mut results = Vec::with_capacity(Workload::ALL.len());
        for workload in Workload::ALL {
            results.push(self.time_workload(workload));
        }
        results
    }

    /// Run the suite and write the results as one JSON line to `out`
    pub fn run_and_print<W: Write>(&self, mut out: W) -> Result<Vec<BenchmarkResult>> {
        let results = self.run_all();
        let line = render_line(&results)?;
        writeln!(out, "{}", line)?;
        out.flush()?;
        Ok(results)
    }
}

/// Serialize results as a compact single-line JSON array
pub fn render_line(results: &[BenchmarkResult]) -> Result<String> {
    Ok(serde_json::to_string(results)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_runner() {
        let runner = BenchmarkRunner::default();
        assert_eq!(runner.language(), "Rust");
        assert_eq!(runner.policy, ZeroDurationPolicy::Clamp);
    }

    #[test]
    fn test_time_with_brackets_closure() {
        let runner = BenchmarkRunner::new();
        let result = runner.time_with("sleep", 100_000, || {
            std::thread::sleep(Duration::from_millis(20))
        });
        assert_eq!(result.test_name, "sleep");
        assert!(result.duration_ms >= 20.0);
        let expected = 100_000.0 / (result.duration_ms / 1000.0);
        assert!((result.operations_per_second - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn test_time_with_custom_language() {
        let runner = BenchmarkRunner::new()
            .with_language("Rust (release)")
            .with_policy(ZeroDurationPolicy::Literal);
        let result = runner.time_with("noop", 1, || {});
        assert_eq!(result.language, "Rust (release)");
        assert!(result.duration_ms >= 0.0);
    }

    #[test]
    fn test_time_cheap_workloads() {
        let runner = BenchmarkRunner::new();
        for workload in [Workload::Sort, Workload::Primes] {
            let result = runner.time_workload(workload);
            assert_eq!(result.test_name, workload.test_name());
            assert!(result.duration_ms >= 0.0);
            assert!(result.operations_per_second.is_finite());
            if result.duration_ms > 0.0 {
                let expected = 100_000.0 / (result.duration_ms / 1000.0);
                assert!((result.operations_per_second - expected).abs() / expected < 1e-9);
            }
        }
    }

    #[test]
    fn test_render_line_is_single_line() {
        let results = vec![
            BenchmarkResult::new("Rust", "Fibonacci(40)", 310.5, 3.22),
            BenchmarkResult::new("Rust", "Sort 100k integers", 0.8, 125_000_000.0),
        ];
        let line = render_line(&results).expect("render");
        assert!(!line.contains('\n'));
        assert!(line.starts_with('['));
        let parsed: Vec<BenchmarkResult> = serde_json::from_str(&line).expect("parse");
        assert_eq!(parsed, results);
    }
}
