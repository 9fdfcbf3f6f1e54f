//! Benchmark execution module
//!
//! Contains the sequential runner that times each workload.

pub mod runner;

// Re-export commonly used types
pub use runner::{render_line, BenchmarkRunner};
