//! Property-based tests for parsing and age arithmetic
//!
//! These tests use proptest to verify invariants across many random dates.

use agecalc::age::anniversary_in;
use agecalc::{CalendarDate, DateParser, ParserConfig, calculate_age, parse_date};
use chrono::{Days, Months, NaiveDate};
use proptest::prelude::*;

/// Days from 1900-01-01 to 2100-12-31 inclusive.
const SPAN: u64 = 73_414;

fn day(offset: u64) -> CalendarDate {
    let epoch = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
    CalendarDate::from_naive(epoch.checked_add_days(Days::new(offset)).unwrap())
}

// ============================================================================
// Parsing Property Tests
// ============================================================================

mod parse_tests {
    use super::*;

    proptest! {
        #[test]
        fn iso_text_round_trips(offset in 0..SPAN) {
            let date = day(offset);
            prop_assert_eq!(parse_date(&date.to_string()), Some(date));
            prop_assert_eq!(date.to_string().parse::<CalendarDate>().ok(), Some(date));
        }

        #[test]
        fn long_month_names_parse(offset in 0..SPAN) {
            let date = day(offset);
            let text = date.as_naive().format("%B %d, %Y").to_string();
            prop_assert_eq!(parse_date(&text), Some(date));
        }

        #[test]
        fn any_match_is_inside_year_range(input in "\\PC{0,40}") {
            let config = ParserConfig::default();
            if let Some(date) = DateParser::new(config.clone()).parse(&input).date() {
                prop_assert!(config.year_in_range(date.year()));
            }
        }

        #[test]
        fn digit_strings_never_escape_range(input in "[0-9]{1,12}") {
            if let Some(date) = parse_date(&input) {
                prop_assert!((1900..=2100).contains(&date.year()));
            }
        }
    }
}

// ============================================================================
// Age Property Tests
// ============================================================================

mod age_tests {
    use super::*;

    proptest! {
        #[test]
        fn components_rebuild_the_reference(a in 0..SPAN, b in 0..SPAN) {
            let (birth, reference) = (day(a.min(b)), day(a.max(b)));
            let age = calculate_age(birth, reference).unwrap();

            prop_assert!(age.months < 12);
            prop_assert!(age.days < 31);

            let rebuilt = birth
                .as_naive()
                .checked_add_months(Months::new(age.years * 12 + age.months))
                .and_then(|d| d.checked_add_days(Days::new(u64::from(age.days))));
            prop_assert_eq!(rebuilt, Some(reference.as_naive()));
        }

        #[test]
        fn total_days_is_the_plain_difference(a in 0..SPAN, b in 0..SPAN) {
            let (birth, reference) = (day(a.min(b)), day(a.max(b)));
            let age = calculate_age(birth, reference).unwrap();
            prop_assert_eq!(age.total_days, (a.max(b) - a.min(b)) as i64);
            prop_assert_eq!(age.birth_day_of_week, birth.weekday());
        }

        #[test]
        fn future_birth_dates_are_rejected(reference in 0..SPAN - 1, ahead in 1u64..1000) {
            let reference = day(reference);
            let birth = CalendarDate::from_naive(
                reference.as_naive().checked_add_days(Days::new(ahead)).unwrap(),
            );
            prop_assert!(calculate_age(birth, reference).is_err());
        }

        #[test]
        fn countdown_lands_on_an_anniversary(a in 0..SPAN - 400, b in 0..SPAN - 400) {
            let (birth, reference) = (day(a.min(b)), day(a.max(b)));
            let age = calculate_age(birth, reference).unwrap();

            prop_assert!((0..=365).contains(&age.next_birthday_in_days));

            let target = reference
                .as_naive()
                .checked_add_days(Days::new(age.next_birthday_in_days as u64))
                .map(CalendarDate::from_naive)
                .unwrap();
            prop_assert_eq!(anniversary_in(birth, target.year()), Some(target));
        }

        #[test]
        fn countdown_is_zero_only_on_the_anniversary(a in 0..SPAN, b in 0..SPAN) {
            let (birth, reference) = (day(a.min(b)), day(a.max(b)));
            let age = calculate_age(birth, reference).unwrap();
            let is_anniversary = anniversary_in(birth, reference.year()) == Some(reference);
            prop_assert_eq!(age.next_birthday_in_days == 0, is_anniversary);
            prop_assert_eq!(age.is_birthday(), is_anniversary);
        }
    }
}
