// Sales Analytics - Web Server
// REST API with Axum over a single in-memory dataset

use anyhow::{Context, Result};
use clap::Parser;
use sales_analytics::api::{router, AppState};
use sales_analytics::config::{init_logging, ServerArgs};
use sales_analytics::SalesProcessor;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();
    init_logging(args.common.verbose);

    let data_path = args.common.data.clone();
    let processor = Arc::new(SalesProcessor::new());

    // Load data on startup if available
    if data_path.exists() {
        let count = processor
            .load(&data_path)
            .with_context(|| format!("Failed to load {}", data_path.display()))?;
        info!("Loaded {} records.", count);
    } else {
        warn!(
            "No data file found at {}. Waiting for data generation.",
            data_path.display()
        );
    }

    let app = router(AppState::new(processor, data_path));

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", args.bind))?;

    info!("Server running on http://{}", args.bind);
    info!("  Reload: POST http://{}/data/reload", args.bind);

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
