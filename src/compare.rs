//! Cross-language comparison
//!
//! Runs the native suite plus each configured sibling runner, parses the
//! single JSON line every runner prints, and merges the records into one
//! report. A runner that fails is logged and left out of the report.

use std::fmt::Write as _;
use std::process::Stdio;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::process::Command;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::bench::runner::BenchmarkRunner;
use crate::config::{CommandSpec, CompareConfig, RunnerSpec};
use crate::models::{BenchmarkResult, ComparisonReport};
use crate::util::units::{format_duration_ms, format_ops};
use crate::workloads::Workload;
use crate::{PolybenchError, Result};

/// Parse a runner's stdout: the last non-empty line must be a JSON array of
/// result records.
pub fn parse_runner_output(stdout: &str) -> Result<Vec<BenchmarkResult>> {
    let line = stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| PolybenchError::SerializationError("runner printed nothing".to_string()))?;

    Ok(serde_json::from_str(line)?)
}

/// Labels in `results` that match none of the known workloads
pub fn unexpected_test_names(results: &[BenchmarkResult]) -> Vec<&str> {
    let mut unexpected: Vec<&str> = Vec::new();
    for result in results {
        let known = Workload::ALL.iter().any(|w| w.test_name() == result.test_name);
        if !known && !unexpected.contains(&result.test_name.as_str()) {
            unexpected.push(&result.test_name);
        }
    }
    unexpected
}

/// Run one command to completion before `deadline`, returning its stdout
async fn run_command(
    language: &str,
    command: &CommandSpec,
    spec: &RunnerSpec,
    deadline: Instant,
    timeout: Duration,
) -> Result<String> {
    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(dir) = &spec.working_dir {
        cmd.current_dir(dir);
    }

    info!(language, command = %command.display(), "launching");

    let output = match tokio::time::timeout_at(deadline, cmd.output()).await {
        Ok(output) => output.map_err(|e| PolybenchError::RunnerError {
            language: language.to_string(),
            message: format!("failed to start `{}`: {}", command.program, e),
        })?,
        Err(_) => {
            return Err(PolybenchError::Timeout {
                language: language.to_string(),
                after: timeout,
            })
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PolybenchError::RunnerError {
            language: language.to_string(),
            message: format!("`{}` exited with {}: {}", command.display(), output.status, stderr.trim()),
        });
    }

    String::from_utf8(output.stdout).map_err(|e| PolybenchError::RunnerError {
        language: language.to_string(),
        message: format!("output is not UTF-8: {}", e),
    })
}

/// Run a sibling runner (and its prepare step) and parse its records.
///
/// `timeout` bounds both steps together.
pub async fn run_sibling(spec: &RunnerSpec, timeout: Duration) -> Result<Vec<BenchmarkResult>> {
    let deadline = Instant::now() + timeout;

    if let Some(prepare) = &spec.prepare {
        run_command(&spec.language, prepare, spec, deadline, timeout).await?;
    }

    let stdout = run_command(&spec.language, &spec.command(), spec, deadline, timeout).await?;
    let results = parse_runner_output(&stdout).map_err(|e| PolybenchError::RunnerError {
        language: spec.language.clone(),
        message: format!("unreadable output: {}", e),
    })?;

    if results.is_empty() {
        return Err(PolybenchError::RunnerError {
            language: spec.language.clone(),
            message: "runner reported no results".to_string(),
        });
    }

    let unexpected = unexpected_test_names(&results);
    if !unexpected.is_empty() {
        warn!(
            language = %spec.language,
            tests = ?unexpected,
            "runner reported unknown test names"
        );
    }

    if results.iter().any(|r| r.language != spec.language) {
        warn!(
            language = %spec.language,
            "runner reported records under a different language tag"
        );
    }

    Ok(results)
}

/// Run the native suite and every sibling runner in configured order
pub async fn run_comparison(config: &CompareConfig) -> Result<ComparisonReport> {
    config.validate()?;

    let steps = config.runners.len() as u64 + u64::from(config.include_native);
    let pb = ProgressBar::new(steps);
    pb.set_style(
        ProgressStyle::with_template("{spinner} [{pos}/{len}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(120));

    let mut results = Vec::new();

    if config.include_native {
        pb.set_message("Rust (native)");
        let native = tokio::task::spawn_blocking(|| BenchmarkRunner::default().run_all())
            .await
            .map_err(|e| PolybenchError::RunnerError {
                language: crate::LANGUAGE.to_string(),
                message: format!("native suite panicked: {}", e),
            })?;
        results.extend(native);
        pb.inc(1);
    }

    for spec in &config.runners {
        pb.set_message(spec.language.clone());
        match run_sibling(spec, config.timeout).await {
            Ok(sibling) => results.extend(sibling),
            Err(err) => warn!(language = %spec.language, error = %err, "skipping runner"),
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(ComparisonReport::new(results))
}

/// Render the report as an aligned text table grouped by test
pub fn render_table(report: &ComparisonReport) -> String {
    let mut output = String::new();
    let lang_width = report
        .languages()
        .iter()
        .map(|l| l.len())
        .max()
        .unwrap_or(8)
        .max("Language".len());

    for test_name in report.test_names() {
        let fastest = report.fastest(test_name);
        let _ = writeln!(output, "{}", test_name);
        let _ = writeln!(
            output,
            "  {:<width$}  {:>12}  {:>14}",
            "Language",
            "Duration",
            "Throughput",
            width = lang_width
        );
        for result in report.results.iter().filter(|r| r.test_name == test_name) {
            let marker = if fastest == Some(result) { " *" } else { "" };
            let _ = writeln!(
                output,
                "  {:<width$}  {:>12}  {:>14}{}",
                result.language,
                format_duration_ms(result.duration_ms),
                format_ops(result.operations_per_second),
                marker,
                width = lang_width
            );
        }
        let _ = writeln!(output);
    }

    let _ = write!(
        output,
        "{} records from {} runners at {}",
        report.results.len(),
        report.languages().len(),
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    output
}
