//! Free-form birth date parsing and calendar-aware age calculation.
//!
//! ```
//! use agecalc::{CalendarDate, calculate_age, parse_date};
//!
//! let birth = parse_date("December 25th, 1990").unwrap();
//! let reference = CalendarDate::new(2025, 9, 9).unwrap();
//! let age = calculate_age(birth, reference).unwrap();
//! assert_eq!((age.years, age.months, age.days), (34, 8, 15));
//! ```

pub mod age;
pub mod calendar;
pub mod error;
pub mod parser;
pub mod report;

pub use age::{AgeResult, calculate_age, calculate_age_today};
pub use calendar::CalendarDate;
pub use error::AgeError;
pub use parser::{DateParser, ParseOutcome, ParserConfig, Strategy};

/// Parses `text` with the default configuration. `None` means the format
/// was not recognised.
pub fn parse_date(text: &str) -> Option<CalendarDate> {
    DateParser::default().parse(text).date()
}
