//! # Dashboard Analytics
//!
//! Buckets orders by calendar month for the admin dashboard chart.
//!
//! ```text
//! /stats/graphData                     chart series
//! ───────────────────                  ─────────────────────────
//! [{"month": "March"},        ──►      [{ month: "Jan", orders: 0 },
//!  {"month": "march"},                  { month: "Feb", orders: 0 },
//!  {"month": "April"},                  { month: "Mar", orders: 2 },
//!  {"month": "Smarch"}]  (ignored)      { month: "Apr", orders: 1 },
//!                                       ... through "Dec" ]
//! ```
//!
//! The series always has twelve entries in calendar order, so the chart's
//! x-axis never shifts when a month has no orders.

use chrono::{DateTime, Datelike, Month, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use ts_rs::TS;

/// Orders counted for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MonthlyOrderCount {
    /// Three-letter label, `"Jan"` .. `"Dec"`.
    pub month: String,
    pub orders: u64,
}

/// All twelve months in calendar order.
fn calendar() -> impl Iterator<Item = Month> {
    (1u8..=12).filter_map(|n| Month::try_from(n).ok())
}

/// Three-letter label for a month.
pub fn short_name(month: Month) -> &'static str {
    &month.name()[..3]
}

/// Matches a full English month name, ignoring case and surrounding space.
///
/// Abbreviations are deliberately not accepted; the stats endpoint always
/// sends full names.
///
/// ## Example
/// ```rust
/// use chrono::Month;
/// use loop_core::analytics::parse_full_month;
///
/// assert_eq!(parse_full_month("march"), Some(Month::March));
/// assert_eq!(parse_full_month("Mar"), None);
/// ```
pub fn parse_full_month(name: &str) -> Option<Month> {
    let name = name.trim();
    calendar().find(|m| m.name().eq_ignore_ascii_case(name))
}

fn series(counts: [u64; 12]) -> Vec<MonthlyOrderCount> {
    calendar()
        .zip(counts)
        .map(|(month, orders)| MonthlyOrderCount {
            month: short_name(month).to_string(),
            orders,
        })
        .collect()
}

/// Counts month names into twelve buckets. Unknown names are skipped.
pub fn orders_by_month<I, S>(month_names: I) -> Vec<MonthlyOrderCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = [0u64; 12];

    for name in month_names {
        match parse_full_month(name.as_ref()) {
            Some(month) => counts[month.number_from_month() as usize - 1] += 1,
            None => warn!(month = name.as_ref(), "ignoring unrecognised month"),
        }
    }

    series(counts)
}

/// Counts the raw `/stats/graphData` records.
///
/// Each record is an object whose first field holds the month name, e.g.
/// `{"month": "March"}` or `{"month": "March", "count": 1}`. Fields are read
/// in document order; a record whose first field is not a string is skipped.
pub fn orders_by_month_from_records(records: &[Value]) -> Vec<MonthlyOrderCount> {
    let names = records.iter().filter_map(|record| {
        record
            .as_object()
            .and_then(|fields| fields.values().next().and_then(Value::as_str))
    });

    orders_by_month(names)
}

/// Counts orders by the month they were created in, regardless of year.
pub fn orders_by_month_from_dates<'a, I>(created: I) -> Vec<MonthlyOrderCount>
where
    I: IntoIterator<Item = &'a DateTime<Utc>>,
{
    let mut counts = [0u64; 12];

    for at in created {
        counts[at.month0() as usize] += 1;
    }

    series(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn orders_for(series: &[MonthlyOrderCount], month: &str) -> u64 {
        series
            .iter()
            .find(|m| m.month == month)
            .map(|m| m.orders)
            .unwrap()
    }

    #[test]
    fn test_empty_input_yields_twelve_zero_buckets() {
        let series = orders_by_month(Vec::<String>::new());

        assert_eq!(series.len(), 12);
        assert_eq!(series[0].month, "Jan");
        assert_eq!(series[11].month, "Dec");
        assert!(series.iter().all(|m| m.orders == 0));
    }

    #[test]
    fn test_counts_are_case_insensitive() {
        let series = orders_by_month(["March", "march", "MARCH", "April"]);

        assert_eq!(orders_for(&series, "Mar"), 3);
        assert_eq!(orders_for(&series, "Apr"), 1);
        assert_eq!(series.iter().map(|m| m.orders).sum::<u64>(), 4);
    }

    #[test]
    fn test_unknown_and_abbreviated_names_are_ignored() {
        let series = orders_by_month(["Smarch", "Sep", "", "September"]);

        assert_eq!(orders_for(&series, "Sep"), 1);
        assert_eq!(series.iter().map(|m| m.orders).sum::<u64>(), 1);
    }

    #[test]
    fn test_records_use_string_value() {
        let records = vec![
            json!({"month": "January"}),
            json!({"month": "january", "count": 3}),
            json!({"count": 3, "month": "January"}),
            json!({"month": 7}),
            json!("December"),
            json!({}),
        ];

        let series = orders_by_month_from_records(&records);

        assert_eq!(orders_for(&series, "Jan"), 2);
        assert_eq!(orders_for(&series, "Dec"), 0);
    }

    #[test]
    fn test_records_read_first_field_only() {
        let records = vec![
            json!({"month": "March", "_id": "65f1a2b3c4d5e6f708091a2b"}),
            json!({"month": "March", "count": 1, "name": "Zara"}),
        ];

        let series = orders_by_month_from_records(&records);

        assert_eq!(orders_for(&series, "Mar"), 2);
        assert_eq!(series.iter().map(|m| m.orders).sum::<u64>(), 2);
    }

    #[test]
    fn test_counts_by_creation_date() {
        let dates = vec![
            Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap(),
        ];

        let series = orders_by_month_from_dates(&dates);

        assert_eq!(orders_for(&series, "Feb"), 2);
        assert_eq!(orders_for(&series, "Dec"), 1);
        assert_eq!(orders_for(&series, "Jan"), 0);
    }
}
