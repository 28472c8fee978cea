//! Convexity adjustment seam.
//!
//! Adjustments are multiplicative factors. Volatility surfaces are not
//! modelled here; an adjuster receives only dates and returns a factor.

use parity_core::Date;

/// Supplies convexity corrections to projected rates and risky discounting.
pub trait ConvexityAdjuster: Send + Sync {
    /// Factor applied to a projected rate over `[start, end]` fixing on
    /// `fixing_date`.
    fn rate_adjustment(&self, value_date: Date, fixing_date: Date, start: Date, end: Date) -> f64;

    /// Factor applied to the risky discount of a period paying on `pay`.
    fn period_adjustment(&self, value_date: Date, start: Date, pay: Date) -> f64;
}

/// No adjustment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoConvexity;

impl ConvexityAdjuster for NoConvexity {
    fn rate_adjustment(&self, _value_date: Date, _fixing_date: Date, _start: Date, _end: Date) -> f64 {
        1.0
    }

    fn period_adjustment(&self, _value_date: Date, _start: Date, _pay: Date) -> f64 {
        1.0
    }
}

/// Adjustment from the covariance of two lognormal drivers.
///
/// $$c(t) = e^{\rho \sigma_1 \sigma_2 t}$$
///
/// with `t` the ACT/365F time from the value date to the fixing (for
/// rates) or to the pay date (for periods), floored at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationConvexity {
    rho: f64,
    sigma_1: f64,
    sigma_2: f64,
}

impl CorrelationConvexity {
    /// Creates the adjuster from a correlation and two volatilities.
    #[must_use]
    pub fn new(rho: f64, sigma_1: f64, sigma_2: f64) -> Self {
        Self {
            rho,
            sigma_1,
            sigma_2,
        }
    }

    fn factor(&self, value_date: Date, to: Date) -> f64 {
        let t = ((to - value_date) as f64 / 365.0).max(0.0);
        (self.rho * self.sigma_1 * self.sigma_2 * t).exp()
    }
}

impl ConvexityAdjuster for CorrelationConvexity {
    fn rate_adjustment(&self, value_date: Date, fixing_date: Date, _start: Date, _end: Date) -> f64 {
        self.factor(value_date, fixing_date)
    }

    fn period_adjustment(&self, value_date: Date, _start: Date, pay: Date) -> f64 {
        self.factor(value_date, pay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_convexity() {
        let date = Date::from_ymd(2024, 1, 15).unwrap();
        assert_eq!(NoConvexity.rate_adjustment(date, date, date, date), 1.0);
        assert_eq!(NoConvexity.period_adjustment(date, date, date), 1.0);
    }

    #[test]
    fn test_correlation_convexity() {
        let value_date = Date::from_ymd(2024, 1, 15).unwrap();
        let fixing = value_date.add_days(365);
        let adj = CorrelationConvexity::new(0.5, 0.2, 0.1);
        assert_relative_eq!(
            adj.rate_adjustment(value_date, fixing, fixing, fixing.add_days(90)),
            (0.5f64 * 0.2 * 0.1).exp(),
            epsilon = 1e-15
        );
        // Past fixings are not adjusted.
        assert_eq!(adj.rate_adjustment(value_date, value_date.add_days(-10), value_date, fixing), 1.0);
    }
}
