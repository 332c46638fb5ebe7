use std::collections::BTreeMap;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::VestError;
use crate::series::TimeSeries;

const ENDPOINT: &str = "https://www.alphavantage.co/query";

/// Alpha Vantage TIME_SERIES_DAILY response
#[derive(Debug, Deserialize)]
struct DailyStockResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<BTreeMap<String, DailyBar>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
}

/// Alpha Vantage FX_DAILY response
#[derive(Debug, Deserialize)]
struct DailyFxResponse {
    #[serde(rename = "Time Series FX (Daily)")]
    time_series: Option<BTreeMap<String, DailyBar>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
}

/// One daily bar. Alpha Vantage serves every field as a string; only the
/// close is used, parsed once into Decimal at series construction.
#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "4. close")]
    close: String,
}

/// Parse a raw TIME_SERIES_DAILY payload into a close-price series for
/// `year`. A payload without the series key is malformed and fatal.
pub fn parse_stock_payload(payload: &str, year: i32) -> Result<TimeSeries> {
    let response: DailyStockResponse =
        serde_json::from_str(payload).context("failed to parse stock payload as JSON")?;
    let bars = response.time_series.ok_or_else(|| {
        VestError::DataFormat(payload_problem(
            "Time Series (Daily)",
            response.error_message,
            response.note,
        ))
    })?;
    build_series(bars, year)
}

/// Parse a raw FX_DAILY payload into an exchange-rate series for `year`.
pub fn parse_fx_payload(payload: &str, year: i32) -> Result<TimeSeries> {
    let response: DailyFxResponse =
        serde_json::from_str(payload).context("failed to parse FX payload as JSON")?;
    let bars = response.time_series.ok_or_else(|| {
        VestError::DataFormat(payload_problem(
            "Time Series FX (Daily)",
            response.error_message,
            response.note,
        ))
    })?;
    build_series(bars, year)
}

fn payload_problem(key: &str, error_message: Option<String>, note: Option<String>) -> String {
    match error_message.or(note) {
        Some(detail) => format!("missing '{}' key: {}", key, detail),
        None => format!("missing '{}' key", key),
    }
}

fn build_series(bars: BTreeMap<String, DailyBar>, year: i32) -> Result<TimeSeries> {
    let mut entries = Vec::with_capacity(bars.len());
    for (date_str, bar) in bars {
        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|e| VestError::Parse(format!("bad date '{}': {}", date_str, e)))?;
        let close: Decimal = bar
            .close
            .parse()
            .map_err(|e| VestError::Parse(format!("bad close '{}' on {}: {}", bar.close, date, e)))?;
        entries.push((date, close));
    }
    let series = TimeSeries::from_closes(entries, year);
    debug!("Built series with {} trading days for {}", series.len(), year);
    Ok(series)
}

/// Fetch daily stock closes for `symbol` from Alpha Vantage, filtered
/// to `year`.
pub async fn fetch_daily_stock(symbol: &str, api_key: &str, year: i32) -> Result<TimeSeries> {
    info!("Fetching daily series for {} from Alpha Vantage", symbol);
    let payload = request(
        &[
            ("function", "TIME_SERIES_DAILY"),
            ("symbol", symbol),
            ("outputsize", "full"),
            ("apikey", api_key),
        ],
    )
    .await
    .with_context(|| format!("failed to fetch daily series for {}", symbol))?;
    parse_stock_payload(&payload, year)
}

/// Fetch daily exchange rates for the `from`→`to` pair from Alpha Vantage,
/// filtered to `year`.
pub async fn fetch_daily_fx(from: &str, to: &str, api_key: &str, year: i32) -> Result<TimeSeries> {
    info!("Fetching daily FX rates for {}/{} from Alpha Vantage", from, to);
    let payload = request(
        &[
            ("function", "FX_DAILY"),
            ("from_symbol", from),
            ("to_symbol", to),
            ("outputsize", "full"),
            ("apikey", api_key),
        ],
    )
    .await
    .with_context(|| format!("failed to fetch FX rates for {}/{}", from, to))?;
    parse_fx_payload(&payload, year)
}

async fn request(params: &[(&str, &str)]) -> Result<String> {
    let client = Client::builder()
        .user_agent("Mozilla/5.0 (compatible; VestfaBot/1.0)")
        .build()?;

    let response = client
        .get(ENDPOINT)
        .query(params)
        .send()
        .await
        .context("Failed to send request to Alpha Vantage")?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Alpha Vantage returned error status: {}",
            response.status()
        ));
    }

    Ok(response.text().await.context("Failed to read response body")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_stock_payload() {
        let payload = r#"{
            "Meta Data": {"2. Symbol": "GOOG"},
            "Time Series (Daily)": {
                "2023-02-23": {"1. open": "99.00", "4. close": "100.0000"},
                "2023-02-27": {"1. open": "105.00", "4. close": "110.0000"},
                "2022-12-30": {"1. open": "88.00", "4. close": "88.0000"}
            }
        }"#;
        let series = parse_stock_payload(payload, 2023).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(
            series.close(NaiveDate::from_ymd_opt(2023, 2, 27).unwrap()),
            Some(dec!(110.0000))
        );
    }

    #[test]
    fn test_parse_fx_payload() {
        let payload = r#"{
            "Time Series FX (Daily)": {
                "2023-02-23": {"4. close": "82.1200"}
            }
        }"#;
        let series = parse_fx_payload(payload, 2023).unwrap();
        assert_eq!(
            series.close(NaiveDate::from_ymd_opt(2023, 2, 23).unwrap()),
            Some(dec!(82.1200))
        );
    }

    #[test]
    fn test_missing_series_key_is_data_format_error() {
        let payload = r#"{"Note": "API call frequency limit reached"}"#;
        let err = parse_stock_payload(payload, 2023).unwrap_err();
        let root = err.downcast_ref::<VestError>().expect("expected VestError");
        assert!(matches!(root, VestError::DataFormat(_)));
        assert!(err.to_string().contains("Time Series (Daily)"));
        assert!(err.to_string().contains("frequency limit"));
    }

    #[test]
    fn test_unparseable_close_is_parse_error() {
        let payload = r#"{
            "Time Series (Daily)": {
                "2023-02-23": {"4. close": "not-a-number"}
            }
        }"#;
        let err = parse_stock_payload(payload, 2023).unwrap_err();
        let root = err.downcast_ref::<VestError>().expect("expected VestError");
        assert!(matches!(root, VestError::Parse(_)));
    }

    #[test]
    fn test_bad_date_is_parse_error() {
        let payload = r#"{
            "Time Series FX (Daily)": {
                "23/02/2023": {"4. close": "82.12"}
            }
        }"#;
        assert!(parse_fx_payload(payload, 2023).is_err());
    }
}
