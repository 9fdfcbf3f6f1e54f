//! Benchmark result data models
//!
//! Contains the per-workload record shared by every language runner and the
//! merged report produced by a comparison run.

use crate::util::units::{
    calculate_ops_per_second, duration_to_millis, format_duration_ms, format_ops,
    ZeroDurationPolicy,
};
use crate::workloads::Workload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing record for one workload run by one language runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Language tag of the runner that produced the record
    pub language: String,
    /// Human-readable workload label
    pub test_name: String,
    /// Elapsed wall-clock time in milliseconds
    pub duration_ms: f64,
    /// Derived throughput; runners that divided by zero print `null`,
    /// which reads back as infinity
    #[serde(deserialize_with = "ops_serde::deserialize")]
    pub operations_per_second: f64,
}

/// Merged results of a comparison run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Records from every runner that succeeded, in run order
    pub results: Vec<BenchmarkResult>,
    /// When the comparison finished
    pub timestamp: DateTime<Utc>,
}

impl BenchmarkResult {
    /// Create a record from already derived values
    pub fn new(
        language: impl Into<String>,
        test_name: impl Into<String>,
        duration_ms: f64,
        operations_per_second: f64,
    ) -> Self {
        Self {
            language: language.into(),
            test_name: test_name.into(),
            duration_ms,
            operations_per_second,
        }
    }

    /// Build a record for `workload` from its measured elapsed time
    pub fn from_elapsed(
        language: impl Into<String>,
        workload: Workload,
        elapsed: Duration,
        policy: ZeroDurationPolicy,
    ) -> Self {
        Self::from_units(language, workload.test_name(), workload.unit_count(), elapsed, policy)
    }

    /// Build a record for an arbitrary test with `units` nominal work
    pub fn from_units(
        language: impl Into<String>,
        test_name: impl Into<String>,
        units: u64,
        elapsed: Duration,
        policy: ZeroDurationPolicy,
    ) -> Self {
        let duration_ms = duration_to_millis(elapsed);
        Self::new(
            language,
            test_name,
            duration_ms,
            calculate_ops_per_second(units, duration_ms, policy),
        )
    }

    /// Get a human-readable summary of the record
    pub fn summary(&self) -> String {
        format!(
            "{} - {} - {} - {}",
            self.language,
            self.test_name,
            format_duration_ms(self.duration_ms),
            format_ops(self.operations_per_second)
        )
    }
}

impl ComparisonReport {
    /// Wrap results, stamping the current time
    pub fn new(results: Vec<BenchmarkResult>) -> Self {
        Self {
            results,
            timestamp: Utc::now(),
        }
    }

    /// Distinct languages in first-seen order
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = Vec::new();
        for result in &self.results {
            if !languages.contains(&result.language.as_str()) {
                languages.push(&result.language);
            }
        }
        languages
    }

    /// Distinct test names in first-seen order
    pub fn test_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for result in &self.results {
            if !names.contains(&result.test_name.as_str()) {
                names.push(&result.test_name);
            }
        }
        names
    }

    /// Record with the smallest duration for `test_name`
    pub fn fastest(&self, test_name: &str) -> Option<&BenchmarkResult> {
        self.results
            .iter()
            .filter(|r| r.test_name == test_name && r.duration_ms.is_finite())
            .min_by(|a, b| a.duration_ms.total_cmp(&b.duration_ms))
    }
}

/// Accepts `null` throughput (JSON has no infinity)
mod ops_serde {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}
