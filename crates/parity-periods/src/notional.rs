//! Notional schedules.

use parity_core::Date;
use serde::{Deserialize, Serialize};

use crate::error::{finite, PeriodError, PeriodResult};

/// A step function of notional factors over time.
///
/// The factor is 1.0 before the first step and equals the factor of the
/// latest step on or before the queried date afterwards. An empty
/// schedule is a bullet.
///
/// ```rust
/// use parity_core::Date;
/// use parity_periods::NotionalSchedule;
///
/// let amortizes = Date::from_ymd(2024, 4, 15).unwrap();
/// let schedule = NotionalSchedule::amortizing(vec![(amortizes, 0.5)]).unwrap();
///
/// assert_eq!(schedule.factor_at(Date::from_ymd(2024, 4, 14).unwrap()), 1.0);
/// assert_eq!(schedule.factor_at(amortizes), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NotionalSchedule {
    steps: Vec<(Date, f64)>,
}

impl NotionalSchedule {
    /// A flat unit-factor schedule.
    #[must_use]
    pub fn bullet() -> Self {
        Self::default()
    }

    /// A step schedule from `(effective date, factor)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if dates are not strictly increasing or a factor
    /// is negative or not finite.
    pub fn amortizing(steps: Vec<(Date, f64)>) -> PeriodResult<Self> {
        for (date, factor) in &steps {
            let factor = finite("notional factor", *factor)?;
            if factor < 0.0 {
                return Err(PeriodError::invalid_period(format!(
                    "notional factor {factor} on {date} is negative"
                )));
            }
        }
        if let Some(pair) = steps.windows(2).find(|pair| pair[1].0 <= pair[0].0) {
            return Err(PeriodError::invalid_period(format!(
                "notional steps are not increasing: {} then {}",
                pair[0].0, pair[1].0
            )));
        }
        Ok(Self { steps })
    }

    /// Returns true for a bullet schedule.
    #[must_use]
    pub fn is_bullet(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the steps.
    #[must_use]
    pub fn steps(&self) -> &[(Date, f64)] {
        &self.steps
    }

    /// Returns the factor in effect on `date`.
    #[must_use]
    pub fn factor_at(&self, date: Date) -> f64 {
        let count = self.steps.partition_point(|(effective, _)| *effective <= date);
        if count == 0 {
            1.0
        } else {
            self.steps[count - 1].1
        }
    }

    /// Returns the time-weighted average factor over `[d1, d2]`.
    ///
    /// Equals `factor_at(d1)` when `d1 == d2`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidPeriod` if `d2 < d1`.
    pub fn average_factor(&self, d1: Date, d2: Date) -> PeriodResult<f64> {
        if d2 < d1 {
            return Err(PeriodError::invalid_period(format!(
                "averaging range {d1} to {d2} is reversed"
            )));
        }
        if d1 == d2 {
            return Ok(self.factor_at(d1));
        }

        let mut weighted = 0.0;
        let mut cursor = d1;
        for (effective, _) in self.steps.iter().filter(|(e, _)| d1 < *e && *e < d2) {
            weighted += self.factor_at(cursor) * (*effective - cursor) as f64;
            cursor = *effective;
        }
        weighted += self.factor_at(cursor) * (d2 - cursor) as f64;

        Ok(weighted / (d2 - d1) as f64)
    }
}
