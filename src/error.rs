//! Error handling for the vestfa reporter
//!
//! Defines custom error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use chrono::NaiveDate;
use thiserror::Error;

/// Core error types for valuation operations
#[derive(Error, Debug)]
pub enum VestError {
    /// Upstream payload is missing the expected structure. Fatal: the run
    /// aborts before any report line is produced.
    #[error("data format error: {0}")]
    DataFormat(String),

    /// A date required by the calling contract is absent from a series.
    /// Contract violation, not a recoverable condition.
    #[error("no entry for {date} in {series} series")]
    MissingDate { date: NaiveDate, series: &'static str },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for valuation operations
pub type Result<T> = anyhow::Result<T>;
