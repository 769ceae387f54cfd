mod config;
mod plan;
mod report;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use chainfolio_core::{collect, summarize};
use chainfolio_sources::{fetch_prices, PriceTable};

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "chainfolio")]
#[command(about = "One-shot USD-valued portfolio report across chains and exchanges")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short = 'c', long = "config", default_value = "configs/config.json")]
    config: PathBuf,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    // Prices are fetched once, before any producer starts; the table is
    // immutable from here on. A dead price feed downgrades the run to
    // zero USD values instead of aborting it.
    let prices = match fetch_prices().await {
        Ok(table) => table,
        Err(err) => {
            warn!("price feed unavailable ({err}); proceeding with zero USD values");
            PriceTable::empty()
        }
    };
    let prices = Arc::new(prices);

    let plan = plan::build(&config, prices)?;

    report::print_header();
    let records = collect(plan).await;
    let summary = summarize(&records);
    report::print_report(&summary);

    Ok(())
}
