//! Monthly report generation
//!
//! Drives the valuation once per month: pick the vest day, roll forward to
//! the next common trading date when the market was closed, value the grant,
//! and render the fixed seven-line block. Output is a vector of lines;
//! writing them anywhere is the caller's job.

use chrono::NaiveDate;

use crate::error::{Result, VestError};
use crate::grants::GrantSchedule;
use crate::series::TimeSeries;
use crate::valuation;

/// Resolve the trading date for `target`: `target` itself when both series
/// have it, otherwise the first later date present in both. `None` when the
/// stock series is exhausted before a common date is found.
///
/// Rolling forward on the stock series alone could land on a date the FX
/// series lacks (a market holiday on one side only), so resolution keeps
/// walking until the date is in both.
pub fn resolve_trading_date(
    stock: &TimeSeries,
    fx: &TimeSeries,
    target: NaiveDate,
) -> Option<NaiveDate> {
    if stock.contains(target) && fx.contains(target) {
        return Some(target);
    }
    let mut probe = target;
    while let Some(next) = stock.next_available(probe) {
        if fx.contains(next) {
            return Some(next);
        }
        probe = next;
    }
    None
}

/// Generate the twelve-month report: one seven-line block (plus blank
/// separator) per valued month, or a "no data" block when no trading date
/// on/after the vest day exists in the series.
pub fn generate_report(
    stock: &TimeSeries,
    fx: &TimeSeries,
    schedule: &GrantSchedule,
    year: i32,
    vest_day: u32,
) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    for grant in schedule.iter() {
        let target = NaiveDate::from_ymd_opt(year, grant.month, vest_day).ok_or_else(|| {
            VestError::Config(format!(
                "{}-{:02}-{:02} is not a valid calendar date",
                year, grant.month, vest_day
            ))
        })?;

        let resolved = match resolve_trading_date(stock, fx, target) {
            Some(date) => date,
            None => {
                lines.push(format!(
                    "No data available for {:02}/{:02}/{:02}.",
                    vest_day,
                    grant.month,
                    year.rem_euclid(100)
                ));
                lines.push(String::new());
                continue;
            }
        };

        let result = valuation::value_month(stock, fx, resolved, grant)?;

        lines.push(format!(
            "Date: {}, Stocks vested: {}, Stocks withheld: {}, Stocks Taxed: {}",
            result.target_date.format("%B %d, %A, %Y"),
            grant.gross_shares,
            grant.withheld_shares(),
            grant.withheld_shares(),
        ));
        lines.push(format!(
            "Investment Value: ₹{:.2} at FMV {}",
            result.gross_value_inr, result.spot_price
        ));
        lines.push(format!(
            "Investment Value (Taxed): ₹{:.2} at FMV {}",
            result.net_value_inr, result.spot_price
        ));
        lines.push(format!(
            "Taxed Amount: ₹{:.2} at FMV {}",
            result.taxed_value_inr, result.spot_price
        ));
        lines.push(format!(
            "Peak Values of investment: ₹{:.2} at FMV {}",
            result.peak_value_inr, result.peak_inr_per_share
        ));
        lines.push(format!(
            "Closing Value: ₹{:.2} at FMV {}",
            result.closing_value_inr, result.closing_price
        ));
        lines.push(format!("INR/USD Conversion Rate: {:.4}", result.fx_rate));
        lines.push(String::new());
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn schedule() -> GrantSchedule {
        let mut gross = [dec!(100); 12];
        gross[0] = dec!(200);
        GrantSchedule::from_parallel(&gross, &[dec!(5.504); 12]).unwrap()
    }

    /// Both series covering the 24th of every month of 2023, flat prices.
    fn full_year_series(close: Decimal) -> TimeSeries {
        let entries = (1..=12)
            .map(|m| (ymd(2023, m, 24), close))
            .collect::<Vec<_>>();
        TimeSeries::from_closes(entries, 2023)
    }

    #[test]
    fn test_resolve_prefers_target_when_in_both() {
        let stock = full_year_series(dec!(100));
        let fx = full_year_series(dec!(80));
        assert_eq!(
            resolve_trading_date(&stock, &fx, ymd(2023, 3, 24)),
            Some(ymd(2023, 3, 24))
        );
    }

    #[test]
    fn test_resolve_rolls_past_fx_only_gap() {
        // Stock trades on the 25th but FX does not; resolution continues
        // to the 26th, present in both.
        let stock = TimeSeries::from_closes(
            vec![
                (ymd(2023, 4, 25), dec!(100)),
                (ymd(2023, 4, 26), dec!(101)),
            ],
            2023,
        );
        let fx = TimeSeries::from_closes(vec![(ymd(2023, 4, 26), dec!(80))], 2023);
        assert_eq!(
            resolve_trading_date(&stock, &fx, ymd(2023, 4, 24)),
            Some(ymd(2023, 4, 26))
        );
    }

    #[test]
    fn test_resolve_exhausted_returns_none() {
        let stock = TimeSeries::from_closes(vec![(ymd(2023, 11, 30), dec!(100))], 2023);
        let fx = TimeSeries::from_closes(vec![(ymd(2023, 11, 30), dec!(80))], 2023);
        assert_eq!(resolve_trading_date(&stock, &fx, ymd(2023, 12, 24)), None);
    }

    #[test]
    fn test_report_block_shape_and_values() {
        let stock = full_year_series(dec!(100));
        let fx = full_year_series(dec!(80));
        let lines = generate_report(&stock, &fx, &schedule(), 2023, 24).unwrap();

        // 12 months, 8 lines each (7 content + blank)
        assert_eq!(lines.len(), 12 * 8);

        // January: gross 200, net 5.504 at price 100 and rate 80
        assert_eq!(
            lines[0],
            "Date: January 24, Tuesday, 2023, Stocks vested: 200, Stocks withheld: 194.496, Stocks Taxed: 194.496"
        );
        assert_eq!(lines[1], "Investment Value: ₹1600000.00 at FMV 100");
        assert_eq!(lines[2], "Investment Value (Taxed): ₹44032.00 at FMV 100");
        assert_eq!(lines[3], "Taxed Amount: ₹1555968.00 at FMV 100");
        assert_eq!(lines[4], "Peak Values of investment: ₹44032.00 at FMV 8000");
        assert_eq!(lines[5], "Closing Value: ₹44032.00 at FMV 100");
        assert_eq!(lines[6], "INR/USD Conversion Rate: 80.0000");
        assert_eq!(lines[7], "");
    }

    #[test]
    fn test_no_data_block_for_exhausted_month() {
        // Series end in November; December has nothing to roll to.
        let entries: Vec<_> = (1..=11).map(|m| (ymd(2023, m, 24), dec!(100))).collect();
        let stock = TimeSeries::from_closes(entries.clone(), 2023);
        let fx = TimeSeries::from_closes(
            entries.iter().map(|&(d, _)| (d, dec!(80))).collect::<Vec<_>>(),
            2023,
        );
        let lines = generate_report(&stock, &fx, &schedule(), 2023, 24).unwrap();

        assert_eq!(lines.len(), 11 * 8 + 2);
        assert_eq!(lines[11 * 8], "No data available for 24/12/23.");
        assert_eq!(lines[11 * 8 + 1], "");
    }

    #[test]
    fn test_weekend_rollforward_reports_resolved_date() {
        // 2023-02-24 absent, next common trading date is Monday the 27th
        let stock = TimeSeries::from_closes(
            vec![
                (ymd(2023, 2, 23), dec!(100)),
                (ymd(2023, 2, 27), dec!(110)),
            ],
            2023,
        );
        let fx = TimeSeries::from_closes(
            vec![(ymd(2023, 2, 23), dec!(80)), (ymd(2023, 2, 27), dec!(81))],
            2023,
        );
        let schedule =
            GrantSchedule::from_parallel(&[dec!(10); 12], &[dec!(4); 12]).unwrap();
        let lines = generate_report(&stock, &fx, &schedule, 2023, 24).unwrap();

        // The walk has no month bound: January's 24th rolls into February.
        // Months 3..12 have nothing on/after their 24th.
        let dated: Vec<&String> = lines.iter().filter(|l| l.starts_with("Date:")).collect();
        assert_eq!(dated.len(), 2);
        assert!(dated[0].starts_with("Date: February 23, Thursday, 2023"));
        assert!(dated[1].starts_with("Date: February 27, Monday, 2023"));
        assert!(lines.contains(&"No data available for 24/03/23.".to_string()));
        assert!(lines.contains(&"No data available for 24/12/23.".to_string()));
    }

    #[test]
    fn test_report_is_deterministic() {
        let stock = full_year_series(dec!(123.45));
        let fx = full_year_series(dec!(82.1234));
        let first = generate_report(&stock, &fx, &schedule(), 2023, 24).unwrap();
        let second = generate_report(&stock, &fx, &schedule(), 2023, 24).unwrap();
        assert_eq!(first, second);
    }
}
