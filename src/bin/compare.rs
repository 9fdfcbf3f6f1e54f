use polybench::compare::{render_table, run_comparison};
use polybench::config::CompareConfig;
use polybench::{error, logging, Result};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = match CompareConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", error::user_friendly_message(&e));
            std::process::exit(2);
        }
    };

    let report = run_comparison(&config).await?;
    if report.results.is_empty() {
        tracing::warn!("no runner produced results");
    }

    eprintln!("{}", render_table(&report));
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
