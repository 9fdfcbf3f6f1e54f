use polybench::bench::render_line;
use polybench::{BenchmarkResult, BenchmarkRunner, Workload};

#[test]
fn test_full_suite_produces_three_ordered_records() {
    let runner = BenchmarkRunner::default();
    let mut out = Vec::new();
    let results = runner.run_and_print(&mut out).expect("run suite");

    assert_eq!(results.len(), 3);
    let names: Vec<_> = results.iter().map(|r| r.test_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Fibonacci(40)", "Sort 100k integers", "Primes up to 100k"]
    );

    for result in &results {
        assert_eq!(result.language, "Rust");
        assert!(result.duration_ms >= 0.0);
        assert!(result.operations_per_second.is_finite());
    }

    for result in &results[1..] {
        if result.duration_ms > 0.0 {
            let expected = 100_000.0 / (result.duration_ms / 1000.0);
            assert!((result.operations_per_second - expected).abs() / expected < 1e-9);
        }
    }

    let text = String::from_utf8(out).expect("utf8");
    assert!(text.ends_with('\n'));
    assert_eq!(text.lines().count(), 1);
    let parsed: Vec<BenchmarkResult> = serde_json::from_str(text.trim_end()).expect("json");
    assert_eq!(parsed, results);
}

#[test]
fn test_output_keys_match_sibling_runners() {
    let runner = BenchmarkRunner::default();
    let results = vec![runner.time_workload(Workload::Primes)];
    let line = render_line(&results).expect("render");
    let value: serde_json::Value = serde_json::from_str(&line).expect("json");
    let record = &value[0];
    assert!(record["language"].is_string());
    assert!(record["test_name"].is_string());
    assert!(record["duration_ms"].is_number());
    assert!(record["operations_per_second"].is_number());
}

#[test]
fn test_labels_are_stable_across_runs() {
    let runner = BenchmarkRunner::default();
    let first = runner.time_workload(Workload::Sort);
    let second = runner.time_workload(Workload::Sort);
    assert_eq!(first.language, second.language);
    assert_eq!(first.test_name, second.test_name);
}
