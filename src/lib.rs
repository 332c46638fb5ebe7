//! Vestfa - foreign RSU vesting tracker
//!
//! This library values foreign RSU vests in INR for Indian Schedule FA
//! reporting: for each month of a target year it computes the vest-day
//! value of the granted shares, the after-tax residual, the peak value the
//! remaining shares could have reached before year end, and the year-end
//! closing value, from daily stock and USD/INR close series.

pub mod cli;
pub mod config;
pub mod error;
pub mod grants;
pub mod pricing;
pub mod report;
pub mod series;
pub mod valuation;
