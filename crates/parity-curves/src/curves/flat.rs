//! Flat curves.

use parity_core::daycounts::DayCountConvention;
use parity_core::Date;

use crate::error::{finite, CurveError, CurveResult};
use crate::traits::{time_from, CreditCurve, DiscountCurve, ForwardCurve, FxCurve};

/// A continuously compounded flat funding curve.
///
/// $$P(t) = e^{-r t}$$
///
/// Time is measured ACT/365F from the reference date unless another day
/// count is configured.
///
/// ```rust
/// use parity_core::Date;
/// use parity_curves::{DiscountCurve, FlatDiscountCurve};
///
/// let today = Date::from_ymd(2025, 1, 1).unwrap();
/// let curve = FlatDiscountCurve::new(today, 0.05).unwrap();
/// let df = curve.df(Date::from_ymd(2026, 1, 1).unwrap()).unwrap();
/// assert!((df - (-0.05f64).exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatDiscountCurve {
    reference_date: Date,
    rate: f64,
    day_count: DayCountConvention,
}

impl FlatDiscountCurve {
    /// Creates a flat curve at a continuously compounded rate.
    ///
    /// # Errors
    ///
    /// Returns an error if `rate` is not finite.
    pub fn new(reference_date: Date, rate: f64) -> CurveResult<Self> {
        Ok(Self {
            reference_date,
            rate: finite("rate", rate)?,
            day_count: DayCountConvention::Act365Fixed,
        })
    }

    /// Sets the day count used to measure time.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Returns the rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl DiscountCurve for FlatDiscountCurve {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn df(&self, date: Date) -> CurveResult<f64> {
        let t = time_from(self.reference_date, date, self.day_count)?;
        Ok((-self.rate * t).exp())
    }
}

/// A credit curve with a constant hazard rate and recovery.
///
/// $$Q(t) = e^{-h t}$$
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatHazardCurve {
    reference_date: Date,
    hazard_rate: f64,
    recovery: f64,
    day_count: DayCountConvention,
}

impl FlatHazardCurve {
    /// Creates a flat hazard curve.
    ///
    /// # Errors
    ///
    /// Returns an error if the hazard rate is negative or non-finite, or the
    /// recovery is outside `[0, 1]`.
    pub fn new(reference_date: Date, hazard_rate: f64, recovery: f64) -> CurveResult<Self> {
        let hazard_rate = finite("hazard_rate", hazard_rate)?;
        if hazard_rate < 0.0 {
            return Err(CurveError::invalid_parameter(
                "hazard_rate",
                format!("{hazard_rate} is negative"),
            ));
        }
        let recovery = finite("recovery", recovery)?;
        if !(0.0..=1.0).contains(&recovery) {
            return Err(CurveError::invalid_parameter(
                "recovery",
                format!("{recovery} is outside [0, 1]"),
            ));
        }
        Ok(Self {
            reference_date,
            hazard_rate,
            recovery,
            day_count: DayCountConvention::Act365Fixed,
        })
    }

    /// Sets the day count used to measure time.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Returns the hazard rate.
    #[must_use]
    pub fn hazard_rate(&self) -> f64 {
        self.hazard_rate
    }
}

impl CreditCurve for FlatHazardCurve {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn survival(&self, date: Date) -> CurveResult<f64> {
        let t = time_from(self.reference_date, date, self.day_count)?;
        Ok((-self.hazard_rate * t).exp())
    }

    fn effective_recovery(&self, _d1: Date, _d2: Date) -> CurveResult<f64> {
        Ok(self.recovery)
    }
}

/// A projection curve returning the same rate for every interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatForwardCurve {
    rate: f64,
}

impl FlatForwardCurve {
    /// Creates a flat projection curve.
    ///
    /// # Errors
    ///
    /// Returns an error if `rate` is not finite.
    pub fn new(rate: f64) -> CurveResult<Self> {
        Ok(Self {
            rate: finite("rate", rate)?,
        })
    }
}

impl ForwardCurve for FlatForwardCurve {
    fn forward_rate(&self, _start: Date, _end: Date) -> CurveResult<f64> {
        Ok(self.rate)
    }
}

/// An FX curve returning the same forward for every date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatFxCurve {
    spot: f64,
}

impl FlatFxCurve {
    /// Creates a flat FX curve.
    ///
    /// # Errors
    ///
    /// Returns an error if `spot` is not finite and positive.
    pub fn new(spot: f64) -> CurveResult<Self> {
        let spot = finite("spot", spot)?;
        if spot <= 0.0 {
            return Err(CurveError::invalid_parameter("spot", format!("{spot} is not positive")));
        }
        Ok(Self { spot })
    }
}

impl FxCurve for FlatFxCurve {
    fn fx(&self, _date: Date) -> CurveResult<f64> {
        Ok(self.spot)
    }
}
