//! Grant valuation
//!
//! Turns one resolved trading date plus a monthly grant into the full set of
//! INR figures the report prints: spot gross/net/taxed values, the peak the
//! net shares could have reached before year end, and the year-end closing
//! value.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{Result, VestError};
use crate::grants::MonthlyGrant;
use crate::series::TimeSeries;

/// All figures derived for one month. Produced fresh per month, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationResult {
    pub target_date: NaiveDate,
    /// Stock close (USD) on the target date
    pub spot_price: Decimal,
    /// USD→INR close on the target date
    pub fx_rate: Decimal,
    pub gross_value_inr: Decimal,
    pub net_value_inr: Decimal,
    /// gross − net, the value of the withheld shares
    pub taxed_value_inr: Decimal,
    /// Peak value of the net shares from the target date to year end
    pub peak_value_inr: Decimal,
    /// Per-share peak in INR (highest close in the window at the target
    /// date's FX rate), the FMV shown on the peak line
    pub peak_inr_per_share: Decimal,
    pub closing_value_inr: Decimal,
    /// Stock close (USD) on the last available date
    pub closing_price: Decimal,
}

/// Highest INR per-share value reachable from `start` through the end of
/// the stock series, converted at `start`'s FX rate. The rate is fixed at
/// the window start, not revalued per day.
///
/// `start` must be present in both series; the report generator establishes
/// that before calling. If the window is a single element the result is
/// `close(start) * fx(start)`.
pub fn peak_value(stock: &TimeSeries, fx: &TimeSeries, start: NaiveDate) -> Result<Decimal> {
    let fx_rate = fx.close(start).ok_or(VestError::MissingDate {
        date: start,
        series: "fx",
    })?;
    if !stock.contains(start) {
        return Err(VestError::MissingDate {
            date: start,
            series: "stock",
        }
        .into());
    }
    // start is in the series, so the window holds at least one close
    let max_close = stock.max_close_from(start).ok_or(VestError::MissingDate {
        date: start,
        series: "stock",
    })?;
    Ok(max_close * fx_rate)
}

/// Value one month's grant at `target_date`, which must be a trading date
/// present in both series.
pub fn value_month(
    stock: &TimeSeries,
    fx: &TimeSeries,
    target_date: NaiveDate,
    grant: &MonthlyGrant,
) -> Result<ValuationResult> {
    let spot_price = stock.close(target_date).ok_or(VestError::MissingDate {
        date: target_date,
        series: "stock",
    })?;
    let fx_rate = fx.close(target_date).ok_or(VestError::MissingDate {
        date: target_date,
        series: "fx",
    })?;

    let peak_inr_per_share = peak_value(stock, fx, target_date)?;

    // The two series are fetched over the same range; each contributes its
    // own last close.
    let closing_price = stock.last_close().ok_or(VestError::MissingDate {
        date: target_date,
        series: "stock",
    })?;
    let closing_fx_rate = fx.last_close().ok_or(VestError::MissingDate {
        date: target_date,
        series: "fx",
    })?;

    let gross_value_inr = spot_price * grant.gross_shares * fx_rate;
    let net_value_inr = spot_price * grant.net_shares * fx_rate;

    Ok(ValuationResult {
        target_date,
        spot_price,
        fx_rate,
        gross_value_inr,
        net_value_inr,
        taxed_value_inr: gross_value_inr - net_value_inr,
        peak_value_inr: peak_inr_per_share * grant.net_shares,
        peak_inr_per_share,
        closing_value_inr: closing_price * grant.net_shares * closing_fx_rate,
        closing_price,
    })
}
