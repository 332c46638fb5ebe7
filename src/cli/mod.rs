use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "vestfa")]
#[command(
    version,
    about = "Foreign RSU vesting tracker with INR valuations"
)]
#[command(
    long_about = "Value foreign RSU vests in INR for Indian Schedule FA reporting: per-month vest-day value, after-tax residual, peak value through year end, and year-end closing value, from daily stock and USD/INR series."
)]
pub struct Cli {
    /// Path to a TOML config file (symbol, year, share counts, API key)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read the stock payload from a JSON file instead of Alpha Vantage
    #[arg(long, value_name = "FILE")]
    pub stock_json: Option<PathBuf>,

    /// Read the FX payload from a JSON file instead of Alpha Vantage
    #[arg(long, value_name = "FILE")]
    pub fx_json: Option<PathBuf>,
}
