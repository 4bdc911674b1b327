use anyhow::{Context, Result};
use clap::Parser;
use sales_analytics::config::{init_logging, ConsoleArgs};
use sales_analytics::{render_report, SalesProcessor};
use tracing::info;

fn main() -> Result<()> {
    let args = ConsoleArgs::parse();
    init_logging(args.common.verbose);

    let data_path = &args.common.data;
    info!("Loading data from {}...", data_path.display());

    let processor = SalesProcessor::new();
    processor
        .load(data_path)
        .with_context(|| format!("Failed to load sales data from {}", data_path.display()))?;

    let report = processor.summary();

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print!("{}", render_report(&report));
    }

    Ok(())
}
