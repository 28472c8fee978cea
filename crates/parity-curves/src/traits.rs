//! Curve capability traits consumed during period valuation.
//!
//! Each trait exposes only what a period needs from a market object. All
//! curves are read-only snapshots for the duration of a valuation call.

use parity_core::daycounts::{DayCountConvention, DayCountOracle, StandardDayCounts};
use parity_core::Date;

use crate::error::{CurveError, CurveResult};

/// A funding (discount) curve.
pub trait DiscountCurve: Send + Sync {
    /// Returns the curve's reference date.
    fn reference_date(&self) -> Date;

    /// Returns the discount factor from the reference date to `date`.
    ///
    /// Returns 1.0 for dates on or before the reference date.
    fn df(&self, date: Date) -> CurveResult<f64>;

    /// Returns a representative discount factor over `[d1, d2]`.
    ///
    /// The default is the trapezoid average of the endpoint factors.
    fn effective_df(&self, d1: Date, d2: Date) -> CurveResult<f64> {
        Ok(0.5 * (self.df(d1)? + self.df(d2)?))
    }

    /// Projects a simple forward rate over `[d1, d2]` with accrual `dcf`.
    ///
    /// $$F = \frac{1}{\tau}\left(\frac{P(d_1)}{P(d_2)} - 1\right)$$
    fn forward(&self, d1: Date, d2: Date, dcf: f64) -> CurveResult<f64> {
        if !dcf.is_finite() || dcf <= 0.0 {
            return Err(CurveError::invalid_parameter(
                "dcf",
                format!("forward projection needs a positive fraction, got {dcf}"),
            ));
        }
        let df_end = self.df(d2)?;
        if df_end <= 0.0 {
            return Err(CurveError::invalid_parameter(
                "df",
                format!("non-positive discount factor {df_end} at {d2}"),
            ));
        }
        Ok((self.df(d1)? / df_end - 1.0) / dcf)
    }
}

/// A credit (survival) curve.
pub trait CreditCurve: Send + Sync {
    /// Returns the curve's reference date.
    fn reference_date(&self) -> Date;

    /// Returns the survival probability to `date`, in `[0, 1]`.
    fn survival(&self, date: Date) -> CurveResult<f64>;

    /// Returns the recovery rate applying to defaults within `[d1, d2]`.
    fn effective_recovery(&self, d1: Date, d2: Date) -> CurveResult<f64>;
}

/// A projection curve for a floating rate index.
pub trait ForwardCurve: Send + Sync {
    /// Returns the projected simple rate over `[start, end]`.
    fn forward_rate(&self, start: Date, end: Date) -> CurveResult<f64>;
}

/// A univariate curve of FX forwards for one currency pair.
pub trait FxCurve: Send + Sync {
    /// Returns the FX forward for delivery on `date`.
    fn fx(&self, date: Date) -> CurveResult<f64>;
}

/// Year fraction from a curve's reference date, floored at zero.
pub(crate) fn time_from(reference: Date, date: Date, day_count: DayCountConvention) -> CurveResult<f64> {
    if date <= reference {
        return Ok(0.0);
    }
    Ok(StandardDayCounts.year_fraction(reference, date, day_count, false, None, None)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct LinearDf {
        reference: Date,
    }

    impl DiscountCurve for LinearDf {
        fn reference_date(&self) -> Date {
            self.reference
        }

        fn df(&self, date: Date) -> CurveResult<f64> {
            let t = time_from(self.reference, date, DayCountConvention::Act365Fixed)?;
            Ok(1.0 - 0.04 * t)
        }
    }

    #[test]
    fn test_default_effective_df_is_trapezoid() {
        let reference = Date::from_ymd(2025, 1, 1).unwrap();
        let curve = LinearDf { reference };
        let d1 = Date::from_ymd(2026, 1, 1).unwrap();
        let d2 = Date::from_ymd(2027, 1, 1).unwrap();
        let expected = 0.5 * (curve.df(d1).unwrap() + curve.df(d2).unwrap());
        assert_relative_eq!(curve.effective_df(d1, d2).unwrap(), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_default_forward() {
        let reference = Date::from_ymd(2025, 1, 1).unwrap();
        let curve = LinearDf { reference };
        let d1 = Date::from_ymd(2026, 1, 1).unwrap();
        let d2 = Date::from_ymd(2027, 1, 1).unwrap();
        let fwd = curve.forward(d1, d2, 1.0).unwrap();
        let expected = curve.df(d1).unwrap() / curve.df(d2).unwrap() - 1.0;
        assert_relative_eq!(fwd, expected, epsilon = 1e-15);
        assert!(curve.forward(d1, d2, 0.0).is_err());
    }

    #[test]
    fn test_time_from_floors_at_zero() {
        let reference = Date::from_ymd(2025, 1, 1).unwrap();
        let before = Date::from_ymd(2024, 6, 1).unwrap();
        assert_eq!(time_from(reference, before, DayCountConvention::Act365Fixed).unwrap(), 0.0);
    }
}
