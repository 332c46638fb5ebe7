//! Date-indexed close-price series
//!
//! A `TimeSeries` is an ordered mapping from calendar date to closing price
//! for a single instrument (stock or FX pair), restricted to one calendar
//! year. It is built once from fetched data and never mutated afterwards.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// Ordered date → close mapping for one instrument, one calendar year.
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    closes: BTreeMap<NaiveDate, Decimal>,
}

impl TimeSeries {
    /// Build a series from raw (date, close) pairs, keeping only entries
    /// that fall in `year`. The map keeps keys sorted and unique; a repeated
    /// date keeps the last close seen.
    pub fn from_closes<I>(entries: I, year: i32) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, Decimal)>,
    {
        let closes = entries
            .into_iter()
            .filter(|(date, _)| date.year() == year)
            .collect();
        Self { closes }
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.closes.contains_key(&date)
    }

    pub fn close(&self, date: NaiveDate) -> Option<Decimal> {
        self.closes.get(&date).copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.closes.keys().next_back().copied()
    }

    /// Close on the last available date of the series.
    pub fn last_close(&self) -> Option<Decimal> {
        self.closes.values().next_back().copied()
    }

    /// Next trading date strictly after `target`.
    ///
    /// Walks forward one calendar day at a time starting at `target + 1`,
    /// up to the last date present in the series. Returns `None` when the
    /// series is exhausted (or empty); the caller decides how to report
    /// that. Callers wanting "target itself if present" check membership
    /// first, this never returns `target`.
    pub fn next_available(&self, target: NaiveDate) -> Option<NaiveDate> {
        let last = self.last_date()?;
        let mut probe = target.succ_opt()?;
        while probe <= last {
            if self.contains(probe) {
                return Some(probe);
            }
            probe = probe.succ_opt()?;
        }
        None
    }

    /// Highest close over the window `[start, end-of-series]`, inclusive.
    /// `None` when no entry falls on or after `start`.
    pub fn max_close_from(&self, start: NaiveDate) -> Option<Decimal> {
        self.closes.range(start..).map(|(_, close)| *close).max()
    }
}
