//! Time-bucketed series for the spending trend chart.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    period::{start_of_day, start_of_next_month, DateWindow, SummaryPeriod},
    records::Record,
    summary,
};

/// Bucket width for the trend series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    /// Picks a width for an arbitrary window: up to a month of days, up to
    /// a quarter of weeks, months beyond that.
    pub fn for_span(window: &DateWindow) -> Self {
        match window.span_days() {
            ..=31 => Granularity::Daily,
            ..=92 => Granularity::Weekly,
            _ => Granularity::Monthly,
        }
    }

    /// Fixed widths for the named summary filters; custom ranges fall back
    /// to the span rule.
    pub fn for_period(period: SummaryPeriod, window: &DateWindow) -> Self {
        match period {
            SummaryPeriod::Week => Granularity::Daily,
            SummaryPeriod::Month => Granularity::Weekly,
            SummaryPeriod::Year => Granularity::Monthly,
            SummaryPeriod::Custom => Self::for_span(window),
        }
    }
}

/// One chart point: the summed amount of records falling in
/// `[bucket_start, bucket_end]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendBucket {
    pub label: String,
    pub value: f64,
    pub bucket_start: DateTime<Utc>,
}

/// Splits `window` into `granularity`-sized buckets and sums record amounts
/// per bucket. The final bucket is clamped to the window end rather than
/// dropped, so a partial trailing week or month still charts. A window with
/// no records yields an empty series; the caller renders a placeholder
/// instead of a flat zero line.
pub fn bucketize(
    records: &[Record],
    window: &DateWindow,
    granularity: Granularity,
) -> Vec<TrendBucket> {
    let dated: Vec<(DateTime<Utc>, f64)> = summary::filter_by_window(records, window)
        .into_iter()
        .filter_map(|record| {
            record
                .parsed_date()
                .map(|date| (date, record.amount_value()))
        })
        .collect();
    if dated.is_empty() {
        return Vec::new();
    }

    let multi_year = window.start.year() != window.end.year();
    let mut buckets = Vec::new();
    let mut cursor = window.start;
    while cursor <= window.end {
        let next_start = next_bucket_start(cursor, granularity);
        let bucket_end = (next_start - Duration::milliseconds(1)).min(window.end);
        let value = dated
            .iter()
            .filter(|(date, _)| *date >= cursor && *date <= bucket_end)
            .map(|(_, amount)| amount)
            .sum();
        buckets.push(TrendBucket {
            label: bucket_label(cursor, granularity, multi_year),
            value,
            bucket_start: cursor,
        });
        cursor = next_start;
    }
    buckets
}

fn next_bucket_start(cursor: DateTime<Utc>, granularity: Granularity) -> DateTime<Utc> {
    match granularity {
        Granularity::Daily => start_of_day(cursor) + Duration::days(1),
        Granularity::Weekly => start_of_day(cursor) + Duration::days(7),
        Granularity::Monthly => start_of_next_month(cursor.date_naive())
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc(),
    }
}

fn bucket_label(start: DateTime<Utc>, granularity: Granularity, multi_year: bool) -> String {
    match granularity {
        Granularity::Daily => start.format("%d %b").to_string(),
        Granularity::Weekly => format!("W{}", start.iso_week().week()),
        Granularity::Monthly if multi_year => start.format("%b %y").to_string(),
        Granularity::Monthly => start.format("%b").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::TimeZone;

    use crate::period::end_of_day;

    use super::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn record(amount: &str, date: &str) -> Record {
        Record::new(amount, "Dining", "🍕", date)
    }

    #[test]
    fn ten_day_window_gets_ten_daily_buckets() {
        let window = DateWindow::new(at(2025, 3, 1), end_of_day(at(2025, 3, 10))).unwrap();
        assert_eq!(Granularity::for_span(&window), Granularity::Daily);

        let records = vec![
            record("5.00", "2025-03-01T10:00:00.000Z"),
            record("7.50", "2025-03-05T09:00:00.000Z"),
            record("2.50", "2025-03-05T21:00:00.000Z"),
        ];
        let buckets = bucketize(&records, &window, Granularity::Daily);

        assert_eq!(buckets.len(), 10);
        assert_eq!(buckets[0].value, 5.0);
        assert_eq!(buckets[4].value, 10.0);
        for (index, bucket) in buckets.iter().enumerate() {
            if index != 0 && index != 4 {
                assert_eq!(bucket.value, 0.0, "bucket {index} should be empty");
            }
        }
    }

    #[test]
    fn bucket_labels_are_unique_within_the_series() {
        let window = DateWindow::new(at(2025, 3, 1), end_of_day(at(2025, 3, 31))).unwrap();
        let records = vec![record("1", "2025-03-15T12:00:00.000Z")];
        let buckets = bucketize(&records, &window, Granularity::Daily);
        let labels: HashSet<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels.len(), buckets.len());
    }

    #[test]
    fn final_weekly_bucket_is_clamped_to_the_window() {
        // March 2025: 31 days, so the fifth weekly bucket is partial.
        let window = DateWindow::new(at(2025, 3, 1), end_of_day(at(2025, 3, 31))).unwrap();
        let records = vec![record("9.00", "2025-03-30T12:00:00.000Z")];
        let buckets = bucketize(&records, &window, Granularity::Weekly);

        assert_eq!(buckets.len(), 5);
        assert_eq!(buckets[4].bucket_start, at(2025, 3, 29));
        assert_eq!(buckets[4].value, 9.0);
    }

    #[test]
    fn monthly_buckets_align_to_calendar_months() {
        let window = DateWindow::new(at(2025, 1, 1), end_of_day(at(2025, 12, 31))).unwrap();
        let records = vec![
            record("10", "2025-01-15T12:00:00.000Z"),
            record("20", "2025-06-30T12:00:00.000Z"),
        ];
        let buckets = bucketize(&records, &window, Granularity::Monthly);
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0].label, "Jan");
        assert_eq!(buckets[0].value, 10.0);
        assert_eq!(buckets[5].value, 20.0);
    }

    #[test]
    fn empty_window_yields_no_buckets() {
        let window = DateWindow::new(at(2025, 3, 1), end_of_day(at(2025, 3, 10))).unwrap();
        assert!(bucketize(&[], &window, Granularity::Daily).is_empty());

        let outside = vec![record("5", "2025-04-01T00:00:00.000Z")];
        assert!(bucketize(&outside, &window, Granularity::Daily).is_empty());
    }

    #[test]
    fn span_rule_picks_widths() {
        let days31 = DateWindow::new(at(2025, 3, 1), end_of_day(at(2025, 3, 31))).unwrap();
        let days60 = DateWindow::new(at(2025, 3, 1), end_of_day(at(2025, 4, 29))).unwrap();
        let days200 = DateWindow::new(at(2025, 1, 1), end_of_day(at(2025, 7, 19))).unwrap();
        assert_eq!(Granularity::for_span(&days31), Granularity::Daily);
        assert_eq!(Granularity::for_span(&days60), Granularity::Weekly);
        assert_eq!(Granularity::for_span(&days200), Granularity::Monthly);
    }

    #[test]
    fn fixed_periods_use_fixed_widths() {
        let window = DateWindow::new(at(2025, 3, 1), end_of_day(at(2025, 3, 31))).unwrap();
        assert_eq!(
            Granularity::for_period(SummaryPeriod::Week, &window),
            Granularity::Daily
        );
        assert_eq!(
            Granularity::for_period(SummaryPeriod::Month, &window),
            Granularity::Weekly
        );
        assert_eq!(
            Granularity::for_period(SummaryPeriod::Year, &window),
            Granularity::Monthly
        );
        assert_eq!(
            Granularity::for_period(SummaryPeriod::Custom, &window),
            Granularity::Daily
        );
    }
}
