//! The exhaustive layout table, the last step of the cascade.
//!
//! Layouts are chrono format strings tried in table order against the
//! cleaned, lower-cased input. The first layout that matches structurally
//! and yields a plausible date wins.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;

use super::ParserConfig;
use crate::calendar::{CalendarDate, expand_two_digit_year};

/// How a layout's pattern is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LayoutKind {
    /// A complete date.
    Date,
    /// A date followed by a time of day; the time is discarded.
    DateTime,
    /// A complete date with a two-digit `%y` year.
    ShortYear,
    /// Month and year only; the day defaults to the 1st.
    MonthYear,
    /// A date whose month name is Spanish, Portuguese, French, German or Italian.
    Localized,
    /// A bare four-digit year, resolved to January 1.
    YearOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) pattern: &'static str,
    pub(crate) kind: LayoutKind,
}

const fn layout(pattern: &'static str, kind: LayoutKind) -> Layout {
    Layout { pattern, kind }
}

use LayoutKind::{Date, DateTime, Localized, MonthYear, ShortYear, YearOnly};

/// Table order is match priority: month-first before day-first for
/// numeric dates, four-digit years before two-digit years.
pub(crate) static LAYOUTS: &[Layout] = &[
    // ISO-like
    layout("%Y-%m-%d", Date),
    layout("%Y/%m/%d", Date),
    layout("%Y.%m.%d", Date),
    layout("%Y %m %d", Date),
    // US
    layout("%m/%d/%Y", Date),
    layout("%m-%d-%Y", Date),
    layout("%m.%d.%Y", Date),
    layout("%m %d %Y", Date),
    // European
    layout("%d/%m/%Y", Date),
    layout("%d-%m-%Y", Date),
    layout("%d.%m.%Y", Date),
    layout("%d %m %Y", Date),
    // Month names (%B also accepts the three-letter form)
    layout("%B %d, %Y", Date),
    layout("%B %d %Y", Date),
    layout("%B. %d, %Y", Date),
    layout("%d %B %Y", Date),
    layout("%d %B, %Y", Date),
    layout("%d-%B-%Y", Date),
    layout("%B-%d-%Y", Date),
    layout("%Y-%B-%d", Date),
    layout("%d/%B/%Y", Date),
    // Two-digit years
    layout("%m/%d/%y", ShortYear),
    layout("%m-%d-%y", ShortYear),
    layout("%m.%d.%y", ShortYear),
    layout("%d/%m/%y", ShortYear),
    layout("%d-%m-%y", ShortYear),
    layout("%d.%m.%y", ShortYear),
    layout("%B %d, %y", ShortYear),
    layout("%d %B %y", ShortYear),
    layout("%d-%B-%y", ShortYear),
    // ISO week dates
    layout("%G-w%V-%u", Date),
    layout("%Gw%V%u", Date),
    // ISO timestamps
    layout("%Y-%m-%d %H:%M:%S%.f", DateTime),
    layout("%Y-%m-%d %H:%M:%S%.fz", DateTime),
    layout("%Y-%m-%d %H:%M:%S%.f%z", DateTime),
    layout("%Y-%m-%d %H:%M", DateTime),
    layout("%Y/%m/%d %H:%M:%S", DateTime),
    layout("%Y/%m/%d %H:%M", DateTime),
    layout("%Y%m%d %H%M%S", DateTime),
    // US timestamps
    layout("%m/%d/%Y %I:%M:%S %p", DateTime),
    layout("%m/%d/%Y %I:%M %p", DateTime),
    layout("%m/%d/%Y %H:%M:%S", DateTime),
    layout("%m/%d/%Y %H:%M", DateTime),
    // European timestamps
    layout("%d/%m/%Y %H:%M:%S", DateTime),
    layout("%d/%m/%Y %H:%M", DateTime),
    layout("%d.%m.%Y %H:%M:%S", DateTime),
    layout("%d.%m.%Y %H:%M", DateTime),
    layout("%d-%m-%Y %H:%M:%S", DateTime),
    // Natural-language timestamps
    layout("%B %d, %Y %I:%M %p", DateTime),
    layout("%B %d, %Y %H:%M", DateTime),
    // RFC 2822 / asctime
    layout("%d %B %Y %H:%M:%S %z", DateTime),
    layout("%d %B %Y %H:%M:%S gmt", DateTime),
    layout("%d %B %Y %H:%M:%S", DateTime),
    layout("%d %B %Y %H:%M %z", DateTime),
    layout("%B %d %H:%M:%S %Y", DateTime),
    // Compact month names
    layout("%d%B%Y", Date),
    layout("%Y%B%d", Date),
    layout("%d%B%y", ShortYear),
    // Non-English month names
    layout("%d de %B de %Y", Localized),
    layout("%d. %B %Y", Localized),
    layout("%d %B %Y", Localized),
    // Month and year
    layout("%B %Y", MonthYear),
    layout("%B, %Y", MonthYear),
    layout("%B-%Y", MonthYear),
    layout("%m/%Y", MonthYear),
    layout("%m-%Y", MonthYear),
    // YYYY-MM is taken earlier as a day of year
    layout("%Y/%m", MonthYear),
    // Year
    layout("%Y", YearOnly),
];

#[allow(clippy::expect_used)] // Infallible with valid static patterns
static FOUR_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("year pattern"));

#[allow(clippy::expect_used)]
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{L}+").expect("word pattern"));

/// Foreign month names mapped to the English names chrono understands.
static FOREIGN_MONTHS: &[(&str, &str)] = &[
    // Spanish
    ("enero", "january"),
    ("febrero", "february"),
    ("marzo", "march"),
    ("abril", "april"),
    ("mayo", "may"),
    ("junio", "june"),
    ("julio", "july"),
    ("agosto", "august"),
    ("septiembre", "september"),
    ("setiembre", "september"),
    ("octubre", "october"),
    ("noviembre", "november"),
    ("diciembre", "december"),
    // Portuguese
    ("janeiro", "january"),
    ("fevereiro", "february"),
    ("março", "march"),
    ("maio", "may"),
    ("junho", "june"),
    ("julho", "july"),
    ("setembro", "september"),
    ("outubro", "october"),
    ("novembro", "november"),
    ("dezembro", "december"),
    // French
    ("janvier", "january"),
    ("février", "february"),
    ("fevrier", "february"),
    ("mars", "march"),
    ("avril", "april"),
    ("mai", "may"),
    ("juin", "june"),
    ("juillet", "july"),
    ("août", "august"),
    ("aout", "august"),
    ("septembre", "september"),
    ("octobre", "october"),
    ("décembre", "december"),
    ("decembre", "december"),
    // German
    ("januar", "january"),
    ("jänner", "january"),
    ("februar", "february"),
    ("märz", "march"),
    ("maerz", "march"),
    ("juni", "june"),
    ("juli", "july"),
    ("oktober", "october"),
    ("dezember", "december"),
    // Italian
    ("gennaio", "january"),
    ("febbraio", "february"),
    ("aprile", "april"),
    ("maggio", "may"),
    ("giugno", "june"),
    ("luglio", "july"),
    ("settembre", "september"),
    ("ottobre", "october"),
    ("dicembre", "december"),
];

impl Layout {
    /// chrono's `%Y`/`%G` accept one to four digits; the table wants four.
    fn wants_full_year(&self) -> bool {
        self.pattern.contains("%Y") || self.pattern.contains("%G")
    }

    /// Structural match only; range checks happen in `match_table`.
    pub(crate) fn apply(&self, text: &str) -> Option<NaiveDate> {
        match self.kind {
            LayoutKind::Date => NaiveDate::parse_from_str(text, self.pattern).ok(),
            LayoutKind::DateTime => NaiveDateTime::parse_from_str(text, self.pattern)
                .ok()
                .map(|dt| dt.date()),
            LayoutKind::ShortYear => {
                let date = NaiveDate::parse_from_str(text, self.pattern).ok()?;
                // chrono pivots %y at 70; re-pivot at 50
                let year = expand_two_digit_year(date.year().rem_euclid(100) as u32);
                date.with_year(year)
            }
            LayoutKind::MonthYear => {
                let pattern = format!("{} %d", self.pattern);
                NaiveDate::parse_from_str(&format!("{text} 1"), &pattern).ok()
            }
            LayoutKind::Localized => {
                let translated = translate_month_names(text)?;
                NaiveDate::parse_from_str(&translated, self.pattern).ok()
            }
            LayoutKind::YearOnly => {
                if !FOUR_DIGITS.is_match(text) {
                    return None;
                }
                NaiveDate::from_ymd_opt(text.parse().ok()?, 1, 1)
            }
        }
    }
}

/// Replaces foreign month names with English ones. `None` when the text
/// holds no foreign month name.
fn translate_month_names(text: &str) -> Option<String> {
    let mut replaced = false;
    let translated = WORD.replace_all(text, |caps: &regex::Captures<'_>| {
        let word = &caps[0];
        match FOREIGN_MONTHS.iter().find(|(foreign, _)| *foreign == word) {
            Some((_, english)) => {
                replaced = true;
                (*english).to_string()
            }
            None => word.to_string(),
        }
    });
    replaced.then(|| translated.into_owned())
}

/// Tries every layout in order.
pub(super) fn match_table(text: &str, config: &ParserConfig) -> Option<CalendarDate> {
    LAYOUTS.iter().find_map(|layout| {
        let date = layout.apply(text)?;
        if layout.wants_full_year() && date.year() < 1000 {
            return None;
        }
        config.year_in_range(date.year()).then(|| date.into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    fn table(text: &str) -> Option<CalendarDate> {
        match_table(text, &ParserConfig::default())
    }

    #[test]
    fn test_numeric_layouts() {
        assert_eq!(table("1995-12-25"), Some(date(1995, 12, 25)));
        assert_eq!(table("1990/12/25"), Some(date(1990, 12, 25)));
        assert_eq!(table("2000.01.01"), Some(date(2000, 1, 1)));
        assert_eq!(table("2010 03 15"), Some(date(2010, 3, 15)));
        assert_eq!(table("12/25/1995"), Some(date(1995, 12, 25)));
        assert_eq!(table("01-15-2000"), Some(date(2000, 1, 15)));
        assert_eq!(table("03.31.2010"), Some(date(2010, 3, 31)));
        assert_eq!(table("06 04 1990"), Some(date(1990, 6, 4)));
        assert_eq!(table("25/12/1995"), Some(date(1995, 12, 25)));
        assert_eq!(table("15-01-2000"), Some(date(2000, 1, 15)));
        assert_eq!(table("31.03.2010"), Some(date(2010, 3, 31)));
        assert_eq!(table("25 12 1995"), Some(date(1995, 12, 25)));
    }

    #[test]
    fn test_month_first_wins_when_ambiguous() {
        assert_eq!(table("01/02/2000"), Some(date(2000, 1, 2)));
    }

    #[test]
    fn test_month_name_layouts() {
        assert_eq!(table("january 15, 2001"), Some(date(2001, 1, 15)));
        assert_eq!(table("15 january 2001"), Some(date(2001, 1, 15)));
        assert_eq!(table("jan 15, 2001"), Some(date(2001, 1, 15)));
        assert_eq!(table("25-dec-1990"), Some(date(1990, 12, 25)));
        assert_eq!(table("dec 25 1990"), Some(date(1990, 12, 25)));
        assert_eq!(table("dec. 25, 1990"), Some(date(1990, 12, 25)));
    }

    #[test]
    fn test_two_digit_years_use_pivot_fifty() {
        assert_eq!(table("12/25/90"), Some(date(1990, 12, 25)));
        assert_eq!(table("12/25/49"), Some(date(2049, 12, 25)));
        assert_eq!(table("01/01/05"), Some(date(2005, 1, 1)));
        assert_eq!(table("01/01/50"), Some(date(1950, 1, 1)));
        assert_eq!(table("01/01/69"), Some(date(1969, 1, 1)));
        assert_eq!(table("25/12/90"), Some(date(1990, 12, 25)));
        assert_eq!(table("25-dec-90"), Some(date(1990, 12, 25)));
    }

    #[test]
    fn test_iso_week_dates() {
        assert_eq!(table("2025-w37-2"), Some(date(2025, 9, 9)));
        assert_eq!(table("2020-w01-1"), Some(date(2019, 12, 30)));
    }

    #[test]
    fn test_timestamps_keep_only_the_date() {
        assert_eq!(table("2025-09-09 19:30:00"), Some(date(2025, 9, 9)));
        assert_eq!(table("2025-09-09 19:30:00.123456"), Some(date(2025, 9, 9)));
        assert_eq!(table("2025-09-09 19:30"), Some(date(2025, 9, 9)));
        assert_eq!(table("2025-09-09 19:30:00z"), Some(date(2025, 9, 9)));
        assert_eq!(table("2025-09-09 23:30:00+0530"), Some(date(2025, 9, 9)));
        assert_eq!(table("09/09/2025 07:30:00 pm"), Some(date(2025, 9, 9)));
        assert_eq!(table("09/09/2025 07:30 pm"), Some(date(2025, 9, 9)));
        assert_eq!(table("25.12.1990 10:15"), Some(date(1990, 12, 25)));
        assert_eq!(table("25 dec 1990 10:00:00 +0000"), Some(date(1990, 12, 25)));
        assert_eq!(table("dec 25 10:00:00 1990"), Some(date(1990, 12, 25)));
    }

    #[test]
    fn test_compact_month_names() {
        assert_eq!(table("25dec2023"), Some(date(2023, 12, 25)));
        assert_eq!(table("2023dec25"), Some(date(2023, 12, 25)));
        assert_eq!(table("01jan2000"), Some(date(2000, 1, 1)));
        assert_eq!(table("01jan00"), Some(date(2000, 1, 1)));
    }

    #[test]
    fn test_localized_month_names() {
        assert_eq!(table("25 de diciembre de 1990"), Some(date(1990, 12, 25)));
        assert_eq!(table("3 de março de 2001"), Some(date(2001, 3, 3)));
        assert_eq!(table("25. dezember 1990"), Some(date(1990, 12, 25)));
        assert_eq!(table("14 juillet 1989"), Some(date(1989, 7, 14)));
        assert_eq!(table("2 giugno 1946"), Some(date(1946, 6, 2)));
        assert_eq!(translate_month_names("25 december 1990"), None);
    }

    #[test]
    fn test_month_and_year_default_to_first() {
        assert_eq!(table("dec 1990"), Some(date(1990, 12, 1)));
        assert_eq!(table("december 2000"), Some(date(2000, 12, 1)));
        assert_eq!(table("january 1995"), Some(date(1995, 1, 1)));
        assert_eq!(table("12/1990"), Some(date(1990, 12, 1)));
        assert_eq!(table("1990/12"), Some(date(1990, 12, 1)));
    }

    #[test]
    fn test_year_only() {
        assert_eq!(table("1990"), Some(date(1990, 1, 1)));
        assert_eq!(table("2024"), Some(date(2024, 1, 1)));
        assert_eq!(table("1850"), None);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(table("feb 30, 2023"), None);
        assert_eq!(table("sep 31, 2023"), None);
        assert_eq!(table("2023-13-01"), None);
        assert_eq!(table("2023-00-01"), None);
        assert_eq!(table("99/99/9999"), None);
    }
}
