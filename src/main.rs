use polybench::{logging, BenchmarkRunner, Result};

fn main() -> Result<()> {
    logging::init();

    // One JSON line on stdout; diagnostics stay on stderr.
    let stdout = std::io::stdout();
    let results = BenchmarkRunner::default().run_and_print(stdout.lock())?;

    for result in &results {
        tracing::info!("{}", result.summary());
    }
    Ok(())
}
