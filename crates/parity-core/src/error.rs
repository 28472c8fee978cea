//! Error types for the Parity core crate.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type ParityResult<T> = Result<T, ParityError>;

/// The main error type for date, calendar, and day-count operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParityError {
    /// Invalid or out-of-range date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A numeric input was non-finite or otherwise unusable.
    #[error("Invalid input '{field}': {reason}")]
    InvalidInput {
        /// Name of the offending field or argument.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Day count calculation error.
    #[error("Day count error: {reason}")]
    DayCountError {
        /// Description of the error.
        reason: String,
    },

    /// Calendar lookup or business day error.
    #[error("Calendar error: {reason}")]
    CalendarError {
        /// Description of the error.
        reason: String,
    },

    /// A convention name could not be parsed.
    #[error("Unknown {kind}: '{name}'")]
    UnknownConvention {
        /// The kind of convention (day count, frequency, ...).
        kind: &'static str,
        /// The unrecognized name.
        name: String,
    },
}

impl ParityError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a day count error.
    #[must_use]
    pub fn day_count(reason: impl Into<String>) -> Self {
        Self::DayCountError {
            reason: reason.into(),
        }
    }

    /// Creates a calendar error.
    #[must_use]
    pub fn calendar(reason: impl Into<String>) -> Self {
        Self::CalendarError {
            reason: reason.into(),
        }
    }

    /// Creates an unknown convention error.
    #[must_use]
    pub fn unknown_convention(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownConvention {
            kind,
            name: name.into(),
        }
    }
}

/// Rejects non-finite floating point inputs.
///
/// # Errors
///
/// Returns `ParityError::InvalidInput` if `value` is NaN or infinite.
pub fn ensure_finite(field: &str, value: f64) -> ParityResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParityError::invalid_input(field, format!("{value} is not finite")))
    }
}
