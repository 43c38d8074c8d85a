//! Error types for daftar-calendar

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The input does not have the shape of a date at all
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    /// Well-formed numbers that do not name a day of the calendar
    #[error("Date out of range: {message}")]
    OutOfRange { message: String },
}

impl CalendarError {
    pub(crate) fn invalid(input: &str, reason: &str) -> Self {
        CalendarError::InvalidDate {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn out_of_range(message: impl Into<String>) -> Self {
        CalendarError::OutOfRange { message: message.into() }
    }
}

/// Result type with CalendarError
pub type CalendarResult<T> = Result<T, CalendarError>;
