//! Date formats and the per-day calendar used by the day picker.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use thiserror::Error;

use crate::TimeEntry;

/// Format of `from`/`to` query parameters and submitted dates.
pub const WIRE_FORMAT: &str = "%Y%m%d";

/// Format used when printing a day, e.g. `Mon Jan 05`.
pub const SHORT_FORMAT: &str = "%a %b %d";

/// How many days before today the day picker offers.
pub const DAY_BUFFER: i64 = 14;

/// A date in a response could not be read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid date: {value:?}")]
pub struct DateError {
    pub value: String,
}

pub fn to_wire(date: NaiveDate) -> String {
    date.format(WIRE_FORMAT).to_string()
}

pub fn to_short(date: NaiveDate) -> String {
    date.format(SHORT_FORMAT).to_string()
}

/// Parses a date as returned by `time.api/list`.
///
/// Times come back as `2024-01-05T00:00:00`; bare `2024-01-05` and the
/// `20240105` wire form are accepted too.
pub fn parse_api_date(value: &str) -> Result<NaiveDate, DateError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map(|datetime| datetime.date())
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .or_else(|_| NaiveDate::parse_from_str(value, WIRE_FORMAT))
        .map_err(|_| DateError {
            value: value.to_string(),
        })
}

pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Minutes logged on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub minutes: i64,
}

/// Totals `entries` per day for the `days_back + 1` days ending on `today`.
///
/// Days are returned oldest first. Days without entries total zero; entries
/// outside the window are ignored.
pub fn summarize_days(entries: &[TimeEntry], today: NaiveDate, days_back: i64) -> Vec<DaySummary> {
    let mut totals: HashMap<NaiveDate, i64> = HashMap::new();
    for entry in entries {
        let total = totals.entry(entry.date).or_insert(0);
        *total = total.saturating_add(entry.minutes);
    }

    (0..=days_back)
        .rev()
        .map(|days_ago| {
            let date = today - Duration::days(days_ago);
            DaySummary {
                date,
                minutes: totals.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}
