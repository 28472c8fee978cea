//! Error types for period construction and valuation.

use parity_core::{Date, ParityError};
use parity_curves::CurveError;
use thiserror::Error;

/// A specialized Result type for period operations.
pub type PeriodResult<T> = Result<T, PeriodError>;

/// Errors raised while building or valuing periods.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PeriodError {
    /// Malformed period dates or fractions.
    #[error("Invalid period: {reason}")]
    InvalidPeriod {
        /// Description of the problem.
        reason: String,
    },

    /// A construction contract was violated (fixed/floating terms, currency).
    #[error("Contract violation: {reason}")]
    ContractViolation {
        /// Description of the violation.
        reason: String,
    },

    /// A queried date lies outside the period.
    #[error("Date {date} is outside [{start}, {end}]")]
    DateOutsidePeriod {
        /// The queried date.
        date: Date,
        /// Lower bound.
        start: Date,
        /// Upper bound.
        end: Date,
    },

    /// Market data needed for a computation is not available.
    #[error("Missing market data: {what}")]
    MissingMarketData {
        /// What was missing.
        what: String,
    },

    /// A floating rate could not be resolved from fixings or curves.
    #[error("Cannot resolve rate for '{label}' fixing on {fixing_date}")]
    UnresolvableRate {
        /// The forward label.
        label: String,
        /// The fixing date of the sub-period.
        fixing_date: Date,
    },

    /// A valuation output was read before being set.
    #[error("Valuation field '{field}' has not been set")]
    NotSet {
        /// The field name.
        field: &'static str,
    },

    /// A valuation output was set twice in one pass.
    #[error("Valuation field '{field}' is already set")]
    AlreadySet {
        /// The field name.
        field: &'static str,
    },

    /// Loss quadrature produced no sub-intervals.
    #[error("Loss quadrature grid over [{start}, {end}] is empty")]
    EmptyLossGrid {
        /// Start of the integration range.
        start: Date,
        /// End of the integration range.
        end: Date,
    },

    /// Configuration failed validation or could not be parsed.
    #[error("Invalid configuration '{field}': {reason}")]
    InvalidConfig {
        /// Offending field (or source format).
        field: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Error from curve or market data lookup.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Error from dates, calendars, or day counts.
    #[error(transparent)]
    Core(#[from] ParityError),
}

impl PeriodError {
    /// Creates an invalid period error.
    #[must_use]
    pub fn invalid_period(reason: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            reason: reason.into(),
        }
    }

    /// Creates a contract violation error.
    #[must_use]
    pub fn contract_violation(reason: impl Into<String>) -> Self {
        Self::ContractViolation {
            reason: reason.into(),
        }
    }

    /// Creates a date-outside-period error.
    #[must_use]
    pub fn date_outside(date: Date, start: Date, end: Date) -> Self {
        Self::DateOutsidePeriod { date, start, end }
    }

    /// Creates a missing market data error.
    #[must_use]
    pub fn missing_market_data(what: impl Into<String>) -> Self {
        Self::MissingMarketData { what: what.into() }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True if the error means the market snapshot cannot value the period.
    #[must_use]
    pub fn is_market_data_error(&self) -> bool {
        matches!(
            self,
            PeriodError::MissingMarketData { .. }
                | PeriodError::UnresolvableRate { .. }
                | PeriodError::Curve(CurveError::CurveNotFound { .. })
                | PeriodError::Curve(CurveError::MissingFixing { .. })
        )
    }
}

/// Rejects a non-finite numeric input.
pub(crate) fn finite(field: &str, value: f64) -> PeriodResult<f64> {
    Ok(parity_core::ensure_finite(field, value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PeriodError::invalid_period("start after end");
        assert_eq!(err.to_string(), "Invalid period: start after end");

        let err = PeriodError::NotSet { field: "end_df" };
        assert!(err.to_string().contains("end_df"));
    }

    #[test]
    fn test_market_data_classification() {
        let err: PeriodError = CurveError::curve_not_found("funding", "FUNDING/USD").into();
        assert!(err.is_market_data_error());
        assert!(!PeriodError::invalid_period("x").is_market_data_error());
    }

    #[test]
    fn test_finite() {
        assert!(finite("coupon", 0.05).is_ok());
        assert!(matches!(finite("coupon", f64::NAN), Err(PeriodError::Core(_))));
    }
}
