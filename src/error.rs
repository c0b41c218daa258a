//! Age calculation errors

use thiserror::Error;

use crate::calendar::CalendarDate;

/// Errors returned by the age calculator.
///
/// Unrecognised date strings are not errors; see `ParseOutcome::NoMatch`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgeError {
    /// The birth date lies after the reference date.
    #[error("Birthday cannot be in the future.")]
    FutureBirthDate {
        birth: CalendarDate,
        reference: CalendarDate,
    },
}
