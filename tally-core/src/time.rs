//! Time utilities: tolerant statement date parsing and bucket labels.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};

/// Date-time layouts without an offset; the calendar day is taken as written.
const DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts. `%Y` accepts a single digit, so "1/5/24" would parse as
/// year 1 under a year-first layout: month-first layouts go first, and two-digit
/// years before four-digit ones.
const DATE_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%y",
    "%m-%d-%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%Y%m%d",
];

/// Accepted year range. Signed `%Y` reaches chrono's limits, where week
/// arithmetic on the parsed day would overflow.
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Parse a statement date field into a UTC calendar day.
///
/// Values carrying an offset (RFC 3339, "... +0200") are converted to UTC first.
/// Returns `None` for empty or unrecognized input and for years outside 1..=9999.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    parse_any_date(raw).filter(|d| (MIN_YEAR..=MAX_YEAR).contains(&d.year()))
}

fn parse_any_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|ndt| ndt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
}

/// Today's UTC calendar day.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// The Monday on or before `date`. Sunday counts as day 7 of the previous week.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// "January 2024"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// "Jan 5"
pub fn day_label(date: NaiveDate) -> String {
    format!("{} {}", date.format("%b"), date.day())
}

/// "Mar 4 - 10" for the week starting on `start`
pub fn week_label(start: NaiveDate) -> String {
    let end = start + Duration::days(6);
    format!("{} - {}", day_label(start), end.day())
}

/// Zero-padded ISO day, e.g. "2024-03-04"
pub fn iso_day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_common_bank_formats() {
        assert_eq!(parse_calendar_date("2024-01-05"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_calendar_date("01/05/2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_calendar_date("1/5/2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_calendar_date("1/5/24"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_calendar_date("2024/01/05"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_calendar_date("Jan 5, 2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_calendar_date("January 5, 2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_calendar_date("05 Jan 2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_calendar_date(" 2024-01-05 "), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn test_parse_datetimes() {
        assert_eq!(parse_calendar_date("2024-01-05T10:30:00"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_calendar_date("01/05/2024 23:10"), Some(ymd(2024, 1, 5)));
        // 01:00 at +02:00 is still the previous day in UTC
        assert_eq!(
            parse_calendar_date("2024-01-05T01:00:00+02:00"),
            Some(ymd(2024, 1, 4))
        );
        assert_eq!(parse_calendar_date("2024-01-05T23:00:00Z"), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("   "), None);
        assert_eq!(parse_calendar_date("yesterday"), None);
        assert_eq!(parse_calendar_date("2024-13-40"), None);
    }

    #[test]
    fn test_parse_rejects_out_of_range_years() {
        assert_eq!(parse_calendar_date("+262142-12-31"), None);
        assert_eq!(parse_calendar_date("-0005-01-01"), None);
        assert_eq!(parse_calendar_date("9999-12-31"), Some(ymd(9999, 12, 31)));
        assert_eq!(parse_calendar_date("0001-01-01"), Some(ymd(1, 1, 1)));
        // boundary days still get week buckets without overflowing
        assert_eq!(week_start(ymd(1, 1, 1)), ymd(1, 1, 1));
        assert_eq!(week_start(ymd(9999, 12, 31)), ymd(9999, 12, 27));
        assert_eq!(week_label(ymd(9999, 12, 27)), "Dec 27 - 2");
    }

    #[test]
    fn test_week_start_monday_through_sunday() {
        // 2024-03-04 is a Monday
        assert_eq!(week_start(ymd(2024, 3, 4)), ymd(2024, 3, 4));
        assert_eq!(week_start(ymd(2024, 3, 6)), ymd(2024, 3, 4));
        assert_eq!(week_start(ymd(2024, 3, 10)), ymd(2024, 3, 4));
        assert_eq!(week_start(ymd(2024, 3, 11)), ymd(2024, 3, 11));
        // crosses a month boundary
        assert_eq!(week_start(ymd(2024, 3, 2)), ymd(2024, 2, 26));
    }

    #[test]
    fn test_labels() {
        assert_eq!(month_label(ymd(2024, 1, 20)), "January 2024");
        assert_eq!(day_label(ymd(2024, 1, 5)), "Jan 5");
        assert_eq!(week_label(ymd(2024, 3, 4)), "Mar 4 - 10");
        assert_eq!(week_label(ymd(2024, 2, 26)), "Feb 26 - 3");
        assert_eq!(iso_day(ymd(2024, 3, 4)), "2024-03-04");
        assert_eq!(month_start(ymd(2024, 3, 17)), ymd(2024, 3, 1));
    }
}
