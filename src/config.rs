//! Run configuration
//!
//! Everything the original run baked in as constants lives here instead:
//! the Alpha Vantage API key, the instrument and currency pair, the target
//! year, the vest day-of-month, and the twelve gross/net share counts.
//! Values come from an optional TOML file with per-field defaults; the API
//! key can also come from the `ALPHAVANTAGE_API_KEY` environment variable,
//! which wins over the file.

use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{Result, VestError};
use crate::grants::GrantSchedule;

/// Environment variable overriding the configured API key
pub const API_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Alpha Vantage API key; only needed when fetching over the network
    pub api_key: Option<String>,
    /// Stock ticker symbol
    pub symbol: String,
    pub from_currency: String,
    pub to_currency: String,
    /// Calendar year both series are restricted to
    pub year: i32,
    /// Day of month the grants vest on
    pub vest_day: u32,
    /// Gross shares vested per month, January first. Kept as strings so
    /// counts like "5.504" survive the TOML round trip exactly.
    pub gross_shares: Vec<String>,
    /// Net shares left after tax withholding, January first
    pub net_shares: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            symbol: "GOOG".to_string(),
            from_currency: "USD".to_string(),
            to_currency: "INR".to_string(),
            year: 2023,
            vest_day: 24,
            gross_shares: [
                "200", "250", "300", "350", "400", "450", "500", "550", "600", "650", "230",
                "123",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            net_shares: [
                "5.504", "5.504", "5.504", "5.505", "4.817", "5.504", "5.505", "5.504", "5.504",
                "5.504", "5.504", "5.504",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Config {
    /// Load from a TOML file, or fall back to the built-in defaults when no
    /// path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("failed to parse config file {}", path.display()))?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=31).contains(&self.vest_day) {
            return Err(
                VestError::Config(format!("vest_day {} is not a day of month", self.vest_day))
                    .into(),
            );
        }
        Ok(())
    }

    /// API key for network fetches: environment override first, then the
    /// config file. Missing key is a config error, not a crash at request
    /// time.
    pub fn api_key(&self) -> Result<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.api_key.clone())
            .ok_or_else(|| {
                VestError::Config(format!(
                    "no API key: set {} or api_key in the config file",
                    API_KEY_ENV
                ))
                .into()
            })
    }

    /// Parse the two share-count sequences into the validated schedule.
    pub fn schedule(&self) -> Result<GrantSchedule> {
        let gross = parse_counts(&self.gross_shares, "gross_shares")?;
        let net = parse_counts(&self.net_shares, "net_shares")?;
        GrantSchedule::from_parallel(&gross, &net)
    }
}

fn parse_counts(raw: &[String], field: &str) -> Result<Vec<Decimal>> {
    raw.iter()
        .map(|s| {
            Decimal::from_str(s).map_err(|e| {
                anyhow::Error::from(VestError::Config(format!(
                    "bad {} entry '{}': {}",
                    field, s, e
                )))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config_produces_valid_schedule() {
        let config = Config::default();
        let schedule = config.schedule().unwrap();
        assert_eq!(schedule.for_month(1).unwrap().gross_shares, dec!(200));
        assert_eq!(schedule.for_month(5).unwrap().net_shares, dec!(4.817));
        assert_eq!(config.year, 2023);
        assert_eq!(config.vest_day, 24);
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let raw = r#"
            symbol = "MSFT"
            year = 2022
            api_key = "demo"
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.symbol, "MSFT");
        assert_eq!(config.year, 2022);
        assert_eq!(config.to_currency, "INR");
        assert_eq!(config.api_key.as_deref(), Some("demo"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let raw = r#"symbols = ["GOOG"]"#;
        assert!(toml::from_str::<Config>(raw).is_err());
    }

    #[test]
    fn test_bad_share_count_is_config_error() {
        let mut config = Config::default();
        config.net_shares[3] = "five".to_string();
        let err = config.schedule().unwrap_err().to_string();
        assert!(err.contains("net_shares"), "unexpected error: {}", err);
    }

    #[test]
    fn test_vest_day_out_of_range_rejected() {
        let mut config = Config::default();
        config.vest_day = 32;
        assert!(config.validate().is_err());
    }
}
