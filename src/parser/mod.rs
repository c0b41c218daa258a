//! Free-form date parsing.
//!
//! A raw string is cleaned once (trimmed, lower-cased, leading weekday
//! removed, `T` date/time separator replaced by a space) and then handed to
//! an ordered cascade of strategies. The first strategy that produces a date
//! inside the configured year range wins. The order is significant: several
//! strategies accept the same digits with different meanings (`19991020` is
//! a compact date, not a timestamp; `1990` is a year, not a spreadsheet
//! serial).

mod formats;
mod strategies;

use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use regex::Regex;
use tracing::{debug, trace};

use crate::calendar::CalendarDate;

/// Limits applied to every parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Inputs longer than this many characters are rejected outright.
    pub max_input_len: usize,
    /// Earliest year a parsed date may carry.
    pub min_year: i32,
    /// Latest year a parsed date may carry.
    pub max_year: i32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_input_len: 1000,
            min_year: 1900,
            max_year: 2100,
        }
    }
}

impl ParserConfig {
    pub fn year_in_range(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }
}

/// One step of the parse cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Seconds since 1970-01-01 UTC.
    UnixTimestamp,
    /// `today`, `yesterday`, `next week`, ...
    Relative,
    /// `YYYY-DDD` day of year.
    JulianDay,
    /// Spreadsheet day serial counted from 1899-12-31.
    ExcelSerial,
    /// `YYYY-Q#`, first day of the quarter.
    FiscalQuarter,
    /// `25th December 1990`, `25 of December 1990`.
    Ordinal,
    /// Six or eight bare digits.
    CompactNumeric,
    /// The ordered layout table in `formats`.
    FormatTable,
}

impl Strategy {
    /// Cascade order. First success wins.
    pub const CASCADE: [Strategy; 8] = [
        Strategy::UnixTimestamp,
        Strategy::Relative,
        Strategy::JulianDay,
        Strategy::ExcelSerial,
        Strategy::FiscalQuarter,
        Strategy::Ordinal,
        Strategy::CompactNumeric,
        Strategy::FormatTable,
    ];

    fn apply(self, text: &str, parser: &DateParser) -> Option<CalendarDate> {
        let config = &parser.config;
        match self {
            Strategy::UnixTimestamp => strategies::unix_timestamp(text),
            Strategy::Relative => strategies::relative_keyword(text, parser.today()),
            Strategy::JulianDay => strategies::julian_day(text),
            Strategy::ExcelSerial => strategies::excel_serial(text, config),
            Strategy::FiscalQuarter => strategies::fiscal_quarter(text),
            Strategy::Ordinal => strategies::ordinal(text),
            Strategy::CompactNumeric => strategies::compact_numeric(text, config),
            Strategy::FormatTable => formats::match_table(text, config),
        }
    }
}

/// Result of a parse. Unrecognised input is an ordinary outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    Matched {
        date: CalendarDate,
        strategy: Strategy,
    },
    NoMatch,
}

impl ParseOutcome {
    pub fn date(self) -> Option<CalendarDate> {
        match self {
            ParseOutcome::Matched { date, .. } => Some(date),
            ParseOutcome::NoMatch => None,
        }
    }

    pub fn strategy(self) -> Option<Strategy> {
        match self {
            ParseOutcome::Matched { strategy, .. } => Some(strategy),
            ParseOutcome::NoMatch => None,
        }
    }

    pub fn is_match(self) -> bool {
        matches!(self, ParseOutcome::Matched { .. })
    }
}

/// Stateless date parser. Safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct DateParser {
    config: ParserConfig,
    today: Option<NaiveDate>,
}

impl DateParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config, today: None }
    }

    /// Pins the date relative keywords are resolved against.
    pub fn with_today(mut self, today: CalendarDate) -> Self {
        self.today = Some(today.as_naive());
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Parses `input` through the strategy cascade.
    pub fn parse(&self, input: &str) -> ParseOutcome {
        if input.chars().count() > self.config.max_input_len {
            debug!(len = input.len(), "Rejected oversized date input");
            return ParseOutcome::NoMatch;
        }

        let Some(text) = preprocess(input) else {
            return ParseOutcome::NoMatch;
        };

        for strategy in Strategy::CASCADE {
            let Some(date) = strategy.apply(&text, self) else {
                continue;
            };
            if !self.config.year_in_range(date.year()) {
                trace!(input = %text, ?strategy, %date, "Discarded date outside year range");
                continue;
            }
            debug!(input = %text, ?strategy, %date, "Parsed date");
            return ParseOutcome::Matched { date, strategy };
        }

        debug!(input = %text, "Failed to parse date");
        ParseOutcome::NoMatch
    }
}

#[allow(clippy::expect_used)] // Infallible with valid static patterns
static LEADING_WEEKDAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday|mon|tues|tue|wed|thurs|thur|thu|fri|sat|sun)\b\.?,?\s*",
    )
    .expect("weekday pattern")
});

#[allow(clippy::expect_used)]
static TIME_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)t(\d)").expect("separator pattern"));

/// Normalises raw input before any strategy sees it.
///
/// The stripped weekday is never checked against the resolved date.
fn preprocess(input: &str) -> Option<String> {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }

    let lowered = collapsed.to_lowercase();
    let without_weekday = LEADING_WEEKDAY.replace(&lowered, "");
    let without_weekday = without_weekday.trim();
    if without_weekday.is_empty() {
        return None;
    }

    Some(TIME_SEPARATOR.replace_all(without_weekday, "$1 $2").into_owned())
}
