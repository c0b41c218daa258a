//! age.rs
//!
//! This module computes a calendar-aware age breakdown:
//!     years / months / days, total days, weekday of birth and the
//! countdown to the next birthday.
//!
//! Chrono has no year/month/day difference, so the borrowing rules live here.
//!
//! Handled:
//!   • month underflow (borrowing from years)
//!   • day underflow (borrowing from previous month)
//!   • birth days on the 29th–31st landing in shorter months
//!   • Feb 29 birthdays in common years (observed on Feb 28)

use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::calendar::{CalendarDate, days_in_month, last_day_of_previous_month, weekday_name};
use crate::error::AgeError;

/// Age of a birth date as seen from a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeResult {
    /// Whole years completed.
    pub years: u32,
    /// Whole months since the last year-anniversary, 0–11.
    pub months: u32,
    /// Days since the last month-anniversary, 0–30.
    pub days: u32,
    /// Exact day count between birth and reference.
    pub total_days: i64,
    #[serde(serialize_with = "serialize_weekday")]
    pub birth_day_of_week: Weekday,
    /// 0 when the reference date is the birthday.
    pub next_birthday_in_days: i64,
}

impl AgeResult {
    pub fn birth_day_name(&self) -> &'static str {
        weekday_name(self.birth_day_of_week)
    }

    pub fn is_birthday(&self) -> bool {
        self.next_birthday_in_days == 0
    }
}

fn serialize_weekday<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*weekday))
}

/// Calculates the age of `birth` on the current local date.
pub fn calculate_age_today(birth: CalendarDate) -> Result<AgeResult, AgeError> {
    calculate_age(birth, Local::now().date_naive().into())
}

/// Calculates the precise age of `birth` on `reference`.
///
/// Fails when `birth` is strictly later than `reference`; future dates are
/// never clamped.
pub fn calculate_age(birth: CalendarDate, reference: CalendarDate) -> Result<AgeResult, AgeError> {
    if birth > reference {
        debug!(%birth, %reference, "Rejected future birth date");
        return Err(AgeError::FutureBirthDate { birth, reference });
    }

    let birthdate = birth.as_naive();
    let today = reference.as_naive();

    let mut years = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        years -= 1;
    }

    let mut months = today.month() as i32 - birthdate.month() as i32;
    if today.day() < birthdate.day() {
        months -= 1;
    }
    if months < 0 {
        months += 12;
    }

    let days = if today.day() >= birthdate.day() {
        i64::from(today.day() - birthdate.day())
    } else {
        // Borrow from the previous month, clamping the anniversary day to
        // that month's length.
        let prev_month_end = last_day_of_previous_month(today).unwrap_or(today);
        let anniversary_day = birthdate.day().min(prev_month_end.day());
        let anniversary = prev_month_end.with_day(anniversary_day).unwrap_or(prev_month_end);
        today.signed_duration_since(anniversary).num_days()
    };

    let total_days = birth.days_until(&reference);

    Ok(AgeResult {
        years: years.max(0) as u32,
        months: months as u32,
        days: days as u32,
        total_days,
        birth_day_of_week: birth.weekday(),
        next_birthday_in_days: next_birthday_in_days(birthdate, today),
    })
}

/// Birth month/day moved onto `year`. Feb 29 is observed on Feb 28 in
/// common years.
pub fn anniversary_in(birth: CalendarDate, year: i32) -> Option<CalendarDate> {
    let month = birth.month();
    let day = birth.day().min(days_in_month(year, month));
    CalendarDate::new(year, month, day)
}

fn next_birthday_in_days(birthdate: NaiveDate, today: NaiveDate) -> i64 {
    let birth = CalendarDate::from_naive(birthdate);
    let reference = CalendarDate::from_naive(today);

    let this_year = anniversary_in(birth, today.year());
    let next = match this_year {
        Some(date) if date >= reference => Some(date),
        _ => anniversary_in(birth, today.year() + 1),
    };

    next.map(|date| reference.days_until(&date)).unwrap_or(0)
}
