//! Period selectors and the calendar windows they resolve to.
//!
//! Budget tracking and the summary screen intentionally resolve the same
//! named period to different windows: budget spend uses a rolling window that
//! stops at "now", while summary totals cover the full calendar period. Both
//! conventions live here, each behind its own entry point.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A named recurring budget window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Day, Period::Week, Period::Month];

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Day => "Day",
            Period::Week => "Week",
            Period::Month => "Month",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Day" => Some(Period::Day),
            "Week" => Some(Period::Week),
            "Month" => Some(Period::Month),
            _ => None,
        }
    }

    /// The window used when computing spend against a budget: it never
    /// extends past the end of the current day, since nothing can be spent
    /// in the future.
    pub fn rolling_window(self, now: DateTime<Utc>) -> DateWindow {
        let end = end_of_day(now);
        let start = match self {
            Period::Day => start_of_day(now),
            Period::Week => start_of_week(now),
            Period::Month => start_of_month(now),
        };
        DateWindow { start, end }
    }
}

/// Filter options offered by the summary screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SummaryPeriod {
    Week,
    Month,
    Year,
    Custom,
}

/// Outcome of resolving a summary filter. `reverted` is set when a custom
/// selection was unusable and the resolver fell back to the month window;
/// the caller should clear its custom selector state in response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWindow {
    pub window: DateWindow,
    pub reverted: bool,
}

impl SummaryPeriod {
    /// Resolves this selector to a concrete window around `now`.
    ///
    /// Unlike [`Period::rolling_window`], summary windows span the whole
    /// calendar period so historical totals stay stable within it. A custom
    /// range is taken verbatim except that its end is normalized to
    /// end-of-day; a custom request missing either bound (or with reversed
    /// bounds) resolves to the month window with `reverted` set.
    pub fn resolve(
        self,
        now: DateTime<Utc>,
        custom_start: Option<DateTime<Utc>>,
        custom_end: Option<DateTime<Utc>>,
    ) -> ResolvedWindow {
        let window = match self {
            SummaryPeriod::Week => DateWindow {
                start: start_of_week(now),
                end: end_of_week(now),
            },
            SummaryPeriod::Month => month_window(now),
            SummaryPeriod::Year => DateWindow {
                start: start_of_year(now),
                end: end_of_year(now),
            },
            SummaryPeriod::Custom => match (custom_start, custom_end) {
                (Some(start), Some(end)) if start <= end_of_day(end) => DateWindow {
                    start,
                    end: end_of_day(end),
                },
                _ => {
                    tracing::warn!("unusable custom range, falling back to month window");
                    return ResolvedWindow {
                        window: month_window(now),
                        reverted: true,
                    };
                }
            },
        };
        ResolvedWindow {
            window,
            reverted: false,
        }
    }
}

fn month_window(now: DateTime<Utc>) -> DateWindow {
    DateWindow {
        start: start_of_month(now),
        end: end_of_month(now),
    }
}

/// An inclusive `[start, end]` reporting window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, CoreError> {
        if end < start {
            return Err(CoreError::InvalidInput(
                "window end must not precede start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Both bounds are inclusive: a record stamped exactly at `start` or
    /// `end` belongs to the window.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Number of calendar days the window touches.
    pub fn span_days(&self) -> i64 {
        (self.end.date_naive() - self.start.date_naive()).num_days() + 1
    }
}

pub fn start_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    day_start(instant.date_naive())
}

pub fn end_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    day_end(instant.date_naive())
}

/// Weeks always start on Sunday, never locale-dependent.
pub fn start_of_week(instant: DateTime<Utc>) -> DateTime<Utc> {
    let date = instant.date_naive();
    let back = date.weekday().num_days_from_sunday() as i64;
    day_start(date - Duration::days(back))
}

pub fn end_of_week(instant: DateTime<Utc>) -> DateTime<Utc> {
    let start = start_of_week(instant).date_naive();
    day_end(start + Duration::days(6))
}

pub fn start_of_month(instant: DateTime<Utc>) -> DateTime<Utc> {
    let date = instant.date_naive();
    day_start(date.with_day(1).unwrap_or(date))
}

pub fn end_of_month(instant: DateTime<Utc>) -> DateTime<Utc> {
    let date = instant.date_naive();
    day_end(last_day_of_month(date.year(), date.month()))
}

pub fn start_of_year(instant: DateTime<Utc>) -> DateTime<Utc> {
    let date = instant.date_naive();
    day_start(NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date))
}

pub fn end_of_year(instant: DateTime<Utc>) -> DateTime<Utc> {
    let date = instant.date_naive();
    day_end(NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date))
}

/// First day of the month following the one containing `date`.
pub fn start_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    match first {
        Some(first) => start_of_next_month(first) - Duration::days(1),
        None => NaiveDate::from_ymd_opt(year, month, 28).unwrap_or_default(),
    }
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc()
}

fn day_end(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_default()
        .and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn day_rolling_window_covers_the_whole_day() {
        // 2025-03-12 is a Wednesday.
        let now = at(2025, 3, 12, 14, 30);
        let window = Period::Day.rolling_window(now);
        assert_eq!(window.start, at(2025, 3, 12, 0, 0));
        assert_eq!(window.end.date_naive(), now.date_naive());
        assert!(window.contains(at(2025, 3, 12, 23, 59)));
        assert!(!window.contains(at(2025, 3, 13, 0, 0)));
    }

    #[test]
    fn week_rolling_window_starts_sunday_and_stops_today() {
        let now = at(2025, 3, 12, 14, 30);
        let window = Period::Week.rolling_window(now);
        // Sunday before 2025-03-12 is 2025-03-09.
        assert_eq!(window.start, at(2025, 3, 9, 0, 0));
        assert_eq!(window.end.date_naive(), now.date_naive());
        // Rest of the calendar week is excluded from budget spend.
        assert!(!window.contains(at(2025, 3, 14, 10, 0)));
    }

    #[test]
    fn week_starts_sunday_even_when_now_is_sunday() {
        let sunday = at(2025, 3, 9, 8, 0);
        let window = Period::Week.rolling_window(sunday);
        assert_eq!(window.start, at(2025, 3, 9, 0, 0));
    }

    #[test]
    fn month_rolling_window_stops_today() {
        let now = at(2025, 3, 12, 9, 0);
        let window = Period::Month.rolling_window(now);
        assert_eq!(window.start, at(2025, 3, 1, 0, 0));
        assert_eq!(window.end.date_naive(), now.date_naive());
    }

    #[test]
    fn summary_week_spans_the_full_calendar_week() {
        let now = at(2025, 3, 12, 14, 30);
        let resolved = SummaryPeriod::Week.resolve(now, None, None);
        assert!(!resolved.reverted);
        assert_eq!(resolved.window.start, at(2025, 3, 9, 0, 0));
        // Saturday 2025-03-15, end of day.
        assert_eq!(resolved.window.end.date_naive(), at(2025, 3, 15, 0, 0).date_naive());
        assert!(resolved.window.contains(at(2025, 3, 15, 18, 0)));
    }

    #[test]
    fn summary_month_spans_the_full_calendar_month() {
        let now = at(2024, 2, 10, 12, 0);
        let resolved = SummaryPeriod::Month.resolve(now, None, None);
        assert_eq!(resolved.window.start, at(2024, 2, 1, 0, 0));
        // Leap year February.
        assert_eq!(resolved.window.end.date_naive(), at(2024, 2, 29, 0, 0).date_naive());
    }

    #[test]
    fn summary_year_spans_the_full_calendar_year() {
        let now = at(2025, 6, 15, 12, 0);
        let resolved = SummaryPeriod::Year.resolve(now, None, None);
        assert_eq!(resolved.window.start, at(2025, 1, 1, 0, 0));
        assert_eq!(resolved.window.end.date_naive(), at(2025, 12, 31, 0, 0).date_naive());
    }

    #[test]
    fn custom_end_is_normalized_to_end_of_day() {
        let now = at(2025, 3, 12, 14, 30);
        let resolved = SummaryPeriod::Custom.resolve(
            now,
            Some(at(2025, 2, 1, 0, 0)),
            Some(at(2025, 2, 10, 9, 15)),
        );
        assert!(!resolved.reverted);
        assert_eq!(resolved.window.start, at(2025, 2, 1, 0, 0));
        assert!(resolved.window.contains(at(2025, 2, 10, 23, 0)));
        assert!(!resolved.window.contains(at(2025, 2, 11, 0, 0)));
    }

    #[test]
    fn custom_missing_a_bound_falls_back_to_month() {
        let now = at(2025, 3, 12, 14, 30);
        let resolved = SummaryPeriod::Custom.resolve(now, Some(at(2025, 2, 1, 0, 0)), None);
        assert!(resolved.reverted);
        assert_eq!(resolved.window, SummaryPeriod::Month.resolve(now, None, None).window);
    }

    #[test]
    fn custom_reversed_bounds_fall_back_to_month() {
        let now = at(2025, 3, 12, 14, 30);
        let resolved = SummaryPeriod::Custom.resolve(
            now,
            Some(at(2025, 3, 10, 0, 0)),
            Some(at(2025, 2, 1, 0, 0)),
        );
        assert!(resolved.reverted);
    }

    #[test]
    fn window_rejects_reversed_bounds() {
        let start = at(2025, 3, 10, 0, 0);
        assert!(DateWindow::new(start, at(2025, 3, 9, 0, 0)).is_err());
        // A single-instant window is valid since bounds are inclusive.
        assert!(DateWindow::new(start, start).is_ok());
    }

    #[test]
    fn span_days_counts_both_endpoints() {
        let window = DateWindow::new(at(2025, 3, 1, 0, 0), end_of_day(at(2025, 3, 10, 0, 0))).unwrap();
        assert_eq!(window.span_days(), 10);
    }

    #[test]
    fn period_round_trips_through_strings() {
        for period in Period::ALL {
            assert_eq!(Period::parse(period.as_str()), Some(period));
        }
        assert_eq!(Period::parse("Fortnight"), None);
    }
}
