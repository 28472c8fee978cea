//! Error types for curve and market data operations.

use parity_core::{Date, ParityError};
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve and market data operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// No curve is registered under the requested label.
    #[error("No {kind} curve for label '{label}'")]
    CurveNotFound {
        /// The kind of curve (funding, credit, forward, fx).
        kind: &'static str,
        /// The label that was looked up.
        label: String,
    },

    /// No fixing is stored for a label on a date.
    #[error("Missing fixing for '{label}' on {date}")]
    MissingFixing {
        /// The fixing label.
        label: String,
        /// The fixing date.
        date: Date,
    },

    /// A curve parameter is invalid.
    #[error("Invalid curve parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name.
        parameter: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Not enough data points for interpolation.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// Pillar dates are not strictly increasing.
    #[error("Non-monotonic pillar dates at index {index}: {prev} >= {current}")]
    NonMonotonicDates {
        /// Index where monotonicity is violated.
        index: usize,
        /// Previous pillar date.
        prev: Date,
        /// Offending pillar date.
        current: Date,
    },

    /// Error from the core crate.
    #[error(transparent)]
    Core(#[from] ParityError),
}

impl CurveError {
    /// Creates a curve-not-found error.
    #[must_use]
    pub fn curve_not_found(kind: &'static str, label: impl ToString) -> Self {
        Self::CurveNotFound {
            kind,
            label: label.to_string(),
        }
    }

    /// Creates a missing fixing error.
    #[must_use]
    pub fn missing_fixing(label: impl Into<String>, date: Date) -> Self {
        Self::MissingFixing {
            label: label.into(),
            date,
        }
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Creates an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, got: usize) -> Self {
        Self::InsufficientPoints { required, got }
    }
}

/// Rejects a non-finite curve parameter.
pub(crate) fn finite(parameter: &str, value: f64) -> CurveResult<f64> {
    Ok(parity_core::ensure_finite(parameter, value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CurveError::curve_not_found("funding", "FUNDING/USD");
        assert_eq!(err.to_string(), "No funding curve for label 'FUNDING/USD'");

        let date = Date::from_ymd(2024, 4, 15).unwrap();
        let err = CurveError::missing_fixing("USD-SOFR-3M", date);
        assert!(err.to_string().contains("2024-04-15"));
    }

    #[test]
    fn test_from_core_error() {
        let err: CurveError = ParityError::invalid_input("rate", "NaN is not finite").into();
        assert!(matches!(err, CurveError::Core(_)));
    }

    #[test]
    fn test_finite() {
        assert!(finite("rate", 0.05).is_ok());
        assert!(finite("rate", f64::NAN).is_err());
    }
}
