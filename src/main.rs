use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use vestfa::cli::Cli;
use vestfa::config::Config;
use vestfa::series::TimeSeries;
use vestfa::{pricing, report};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stderr only, stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let schedule = config.schedule()?;

    // Both series are loaded up front, sequentially; any failure here is
    // fatal and no report line is printed.
    let stock = load_stock(&cli, &config).await?;
    let fx = load_fx(&cli, &config).await?;
    info!(
        "Loaded {} stock and {} FX trading days for {}",
        stock.len(),
        fx.len(),
        config.year
    );

    let lines = report::generate_report(&stock, &fx, &schedule, config.year, config.vest_day)?;
    for line in &lines {
        println!("{}", line);
    }

    Ok(())
}

async fn load_stock(cli: &Cli, config: &Config) -> Result<TimeSeries> {
    match cli.stock_json.as_deref() {
        Some(path) => {
            let payload = read_payload(path)?;
            pricing::parse_stock_payload(&payload, config.year)
        }
        None => pricing::fetch_daily_stock(&config.symbol, &config.api_key()?, config.year).await,
    }
}

async fn load_fx(cli: &Cli, config: &Config) -> Result<TimeSeries> {
    match cli.fx_json.as_deref() {
        Some(path) => {
            let payload = read_payload(path)?;
            pricing::parse_fx_payload(&payload, config.year)
        }
        None => {
            pricing::fetch_daily_fx(
                &config.from_currency,
                &config.to_currency,
                &config.api_key()?,
                config.year,
            )
            .await
        }
    }
}

fn read_payload(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read payload file {}", path.display()))
}
