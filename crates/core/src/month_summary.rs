//! Month-bucketed aggregation for the incidents bar chart.
//!
//! Buckets a list of nullable record dates into 12 fixed calendar-month
//! slots. Records with a missing or unparsable date are skipped. No year
//! filtering is performed: records sharing a calendar month across any year
//! are merged into that month's bucket. This cross-year merge matches the
//! shipped chart behaviour and is kept on purpose.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::Serialize;

/// Fixed month labels in calendar order.
pub const MONTH_LABELS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// One chart bucket: a month label and the number of records in that month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: &'static str,
    pub count: u32,
}

/// Bucket dates into exactly 12 `(label, count)` pairs, January..December.
///
/// Months with no records are zero-filled. Output ordering is always
/// calendar order, independent of input order.
pub fn monthly_counts<I>(dates: I) -> Vec<MonthCount>
where
    I: IntoIterator<Item = Option<NaiveDate>>,
{
    let mut buckets = [0u32; 12];
    for date in dates.into_iter().flatten() {
        buckets[date.month0() as usize] += 1;
    }

    MONTH_LABELS
        .into_iter()
        .zip(buckets)
        .map(|(month, count)| MonthCount { month, count })
        .collect()
}

/// Like [`monthly_counts`], but over raw date strings as stored by older
/// clients. Unparsable strings are skipped, never an error.
pub fn monthly_counts_from_strings<'a, I>(dates: I) -> Vec<MonthCount>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    monthly_counts(dates.into_iter().map(|d| d.and_then(parse_record_date)))
}

/// Lenient date parse: RFC 3339 first, then plain `YYYY-MM-DD`.
///
/// Returns `None` for anything else; bad display data never errors.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
