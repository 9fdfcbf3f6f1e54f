//! Data models module
//! 
//! Contains the benchmark result record and the comparison report.

pub mod result;

// Re-export commonly used types
pub use result::{BenchmarkResult, ComparisonReport};
