use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::Serialize;

/// Inclusive calendar-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    pub fn week_of(date: NaiveDate, week_start: Weekday) -> Self {
        Self {
            from: start_of_week(date, week_start),
            to: end_of_week(date, week_start),
        }
    }

    pub fn month_of(date: NaiveDate) -> Self {
        Self {
            from: start_of_month(date),
            to: end_of_month(date),
        }
    }

    /// `days` days back from `today`, both ends inclusive.
    pub fn trailing(today: NaiveDate, days: i64) -> Self {
        Self {
            from: today - Duration::days(days),
            to: today,
        }
    }
}

pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday() as i64
        - week_start.num_days_from_monday() as i64)
        % 7;
    date - Duration::days(offset)
}

pub fn end_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    start_of_week(date, week_start) + Duration::days(6)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn sunday_week_bounds() {
        // 2026-02-11 is a Wednesday
        let date = d(2026, 2, 11);
        assert_eq!(start_of_week(date, Weekday::Sun), d(2026, 2, 8));
        assert_eq!(end_of_week(date, Weekday::Sun), d(2026, 2, 14));
    }

    #[test]
    fn monday_week_bounds() {
        let date = d(2026, 2, 8); // Sunday
        assert_eq!(start_of_week(date, Weekday::Mon), d(2026, 2, 2));
        assert_eq!(end_of_week(date, Weekday::Mon), d(2026, 2, 8));
        assert_eq!(start_of_week(date, Weekday::Sun), date);
    }

    #[test]
    fn month_bounds_handle_leap_years() {
        assert_eq!(start_of_month(d(2028, 2, 17)), d(2028, 2, 1));
        assert_eq!(end_of_month(d(2028, 2, 17)), d(2028, 2, 29));
        assert_eq!(end_of_month(d(2026, 12, 3)), d(2026, 12, 31));
    }

    #[test]
    fn trailing_window_is_inclusive() {
        let w = DateWindow::trailing(d(2026, 3, 31), 30);
        assert_eq!(w.from, d(2026, 3, 1));
        assert_eq!(w.to, d(2026, 3, 31));
    }
}
