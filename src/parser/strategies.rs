//! Cascade strategies 1–7. Each one either recognises its own shape and
//! produces a date, or returns `None` and lets the next strategy try.

use std::sync::LazyLock;

use chrono::{DateTime, Days, NaiveDate};
use regex::Regex;
use tracing::trace;

use super::ParserConfig;
use crate::calendar::{CalendarDate, expand_two_digit_year};

/// 2100-12-31T23:59:59Z
const MAX_UNIX_TIMESTAMP: u64 = 4_133_980_799;

/// Day 0 of the spreadsheet serial calendar.
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 31);

/// First serial after the fictitious 1900-02-29.
const EXCEL_LEAP_BUG_SERIAL: u64 = 60;

#[allow(clippy::expect_used)] // Infallible with valid static patterns
static JULIAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{1,3})$").expect("julian pattern"));

#[allow(clippy::expect_used)]
static EXCEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d{1,5}|\d{7})$").expect("excel pattern"));

#[allow(clippy::expect_used)]
static QUARTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})[-\s]q([1-4])$").expect("quarter pattern"));

#[allow(clippy::expect_used)]
static ORDINAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)(?:st|nd|rd|th)\b").expect("ordinal pattern"));

#[allow(clippy::expect_used)]
static DAY_OF_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}) of (.+)$").expect("day-of pattern"));

#[allow(clippy::expect_used)]
static COMPACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d{6}|\d{8})$").expect("compact pattern"));

/// Layouts tried after ordinal suffixes and "of" are removed.
const ORDINAL_LAYOUTS: [&str; 5] =
    ["%B %d, %Y", "%B. %d, %Y", "%d %B, %Y", "%B %d %Y", "%d %B %Y"];

/// Seconds since the epoch, read in UTC regardless of the host zone.
///
/// Only `0` or nine- and ten-digit values qualify; shorter digit strings
/// are left to the serial, compact and year readings.
pub(super) fn unix_timestamp(text: &str) -> Option<CalendarDate> {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if text != "0" && !(9..=10).contains(&text.len()) {
        return None;
    }

    let secs: u64 = text.parse().ok()?;
    if secs > MAX_UNIX_TIMESTAMP {
        trace!(secs, "Timestamp beyond supported range");
        return None;
    }

    let instant = DateTime::from_timestamp(i64::try_from(secs).ok()?, 0)?;
    Some(instant.date_naive().into())
}

/// Fixed keyword vocabulary resolved against `today`.
///
/// "month" is 30 days and "year" is 365 days. These are approximations,
/// unlike the calendar arithmetic of the age calculator.
pub(super) fn relative_keyword(text: &str, today: NaiveDate) -> Option<CalendarDate> {
    let offset: i64 = match text {
        "today" | "now" => 0,
        "yesterday" => -1,
        "tomorrow" => 1,
        "last week" => -7,
        "next week" => 7,
        "last month" => -30,
        "next month" => 30,
        "last year" => -365,
        "next year" => 365,
        _ => return None,
    };

    let days = Days::new(offset.unsigned_abs());
    let date = if offset < 0 {
        today.checked_sub_days(days)
    } else {
        today.checked_add_days(days)
    }?;
    Some(date.into())
}

/// `YYYY-D` through `YYYY-DDD`.
pub(super) fn julian_day(text: &str) -> Option<CalendarDate> {
    let caps = JULIAN.captures(text)?;
    let year: i32 = caps[1].parse().ok()?;
    let ordinal: u32 = caps[2].parse().ok()?;

    match NaiveDate::from_yo_opt(year, ordinal) {
        Some(date) => Some(date.into()),
        None => {
            trace!(year, ordinal, "Day of year out of range");
            None
        }
    }
}

/// Days since 1899-12-31, keeping the spreadsheet's phantom 1900-02-29.
///
/// A four-digit value inside the configured year range reads as a year
/// instead.
pub(super) fn excel_serial(text: &str, config: &ParserConfig) -> Option<CalendarDate> {
    if !EXCEL.is_match(text) {
        return None;
    }

    let serial: u64 = text.parse().ok()?;
    if text.len() == 4 && i32::try_from(serial).is_ok_and(|year| config.year_in_range(year)) {
        return None;
    }

    let offset = if serial >= EXCEL_LEAP_BUG_SERIAL { serial - 1 } else { serial };
    let (y, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    epoch.checked_add_days(Days::new(offset)).map(Into::into)
}

/// `YYYY-Q#` or `YYYY Q#`, resolved to the first day of the quarter.
pub(super) fn fiscal_quarter(text: &str) -> Option<CalendarDate> {
    let caps = QUARTER.captures(text)?;
    let year: i32 = caps[1].parse().ok()?;
    let quarter: u32 = caps[2].parse().ok()?;
    CalendarDate::new(year, (quarter - 1) * 3 + 1, 1)
}

/// Natural-language dates carrying ordinal suffixes or a "day of month"
/// phrase.
pub(super) fn ordinal(text: &str) -> Option<CalendarDate> {
    let has_suffix = ORDINAL_SUFFIX.is_match(text);
    let cleaned = ORDINAL_SUFFIX.replace_all(text, "$1");

    // "25th of december" only exposes the "of" phrase once the suffix is gone
    let reshaped = match DAY_OF_MONTH.captures(&cleaned) {
        Some(caps) => format!("{} {}", &caps[1], &caps[2]),
        None if has_suffix => cleaned.to_string(),
        None => return None,
    };

    ORDINAL_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(&reshaped, layout).ok())
        .map(Into::into)
}

/// Six or eight bare digits, tried in a fixed preference order:
///   - 8 digits: YYYYMMDD, DDMMYYYY, MMDDYYYY
///   - 6 digits: MMDDYY, DDMMYY
///
/// A candidate only counts if it is a real date inside the year range.
pub(super) fn compact_numeric(text: &str, config: &ParserConfig) -> Option<CalendarDate> {
    if !COMPACT.is_match(text) {
        return None;
    }

    let field = |range: std::ops::Range<usize>| text.get(range)?.parse::<u32>().ok();
    let candidate = |year: i32, month: Option<u32>, day: Option<u32>| {
        CalendarDate::new(year, month?, day?).filter(|date| config.year_in_range(date.year()))
    };

    if text.len() == 8 {
        let full_year = |range| field(range).and_then(|y| i32::try_from(y).ok());
        full_year(0..4)
            .and_then(|y| candidate(y, field(4..6), field(6..8)))
            .or_else(|| full_year(4..8).and_then(|y| candidate(y, field(2..4), field(0..2))))
            .or_else(|| full_year(4..8).and_then(|y| candidate(y, field(0..2), field(2..4))))
    } else {
        let year = expand_two_digit_year(field(4..6)?);
        candidate(year, field(0..2), field(2..4))
            .or_else(|| candidate(year, field(2..4), field(0..2)))
    }
}
