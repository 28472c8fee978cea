//! The basic accrual period.

use std::cmp::Ordering;

use parity_core::Date;
use serde::{Deserialize, Serialize};

use crate::error::{finite, PeriodError, PeriodResult};

/// One accrual / cash-flow interval.
///
/// Holds the nominal `[start, end]` interval, the accrual interval, the pay
/// date, and the day count fraction of the whole accrual interval. The pay
/// date is unconstrained relative to the other dates, so payment lags and
/// payments in advance are both representable.
///
/// # Example
///
/// ```rust
/// use parity_core::Date;
/// use parity_periods::Period;
///
/// let start = Date::from_ymd(2024, 1, 15).unwrap();
/// let end = Date::from_ymd(2024, 7, 15).unwrap();
/// let period = Period::new(start, end, start, end, end, 0.5).unwrap();
///
/// assert!(period.contains(start));
/// assert_eq!(period.accrual_dcf(end).unwrap(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Period {
    start: Date,
    end: Date,
    accrual_start: Date,
    accrual_end: Date,
    pay: Date,
    dcf: f64,
}

impl Period {
    /// Creates a period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidPeriod` if `start > end` or
    /// `accrual_start > accrual_end`, and an invalid input error if `dcf`
    /// is not finite.
    pub fn new(
        start: Date,
        end: Date,
        accrual_start: Date,
        accrual_end: Date,
        pay: Date,
        dcf: f64,
    ) -> PeriodResult<Self> {
        if start > end {
            return Err(PeriodError::invalid_period(format!(
                "start {start} is after end {end}"
            )));
        }
        if accrual_start > accrual_end {
            return Err(PeriodError::invalid_period(format!(
                "accrual start {accrual_start} is after accrual end {accrual_end}"
            )));
        }
        Ok(Self {
            start,
            end,
            accrual_start,
            accrual_end,
            pay,
            dcf: finite("dcf", dcf)?,
        })
    }

    /// Creates a period whose accrual interval equals `[start, end]`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Period::new`].
    pub fn simple(start: Date, end: Date, pay: Date, dcf: f64) -> PeriodResult<Self> {
        Self::new(start, end, start, end, pay, dcf)
    }

    /// Returns the nominal start date.
    #[must_use]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Returns the nominal end date.
    #[must_use]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Returns the accrual start date.
    #[must_use]
    pub fn accrual_start(&self) -> Date {
        self.accrual_start
    }

    /// Returns the accrual end date.
    #[must_use]
    pub fn accrual_end(&self) -> Date {
        self.accrual_end
    }

    /// Returns the pay date.
    #[must_use]
    pub fn pay_date(&self) -> Date {
        self.pay
    }

    /// Returns the day count fraction of the whole accrual interval.
    #[must_use]
    pub fn dcf(&self) -> f64 {
        self.dcf
    }

    /// Returns the number of calendar days in the accrual interval.
    #[must_use]
    pub fn accrual_days(&self) -> i64 {
        self.accrual_end - self.accrual_start
    }

    /// Returns true if `start <= date <= end`.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns true if `accrual_start <= date <= accrual_end`.
    #[must_use]
    pub fn accrues_on(&self, date: Date) -> bool {
        self.accrual_start <= date && date <= self.accrual_end
    }

    /// Returns the fraction accrued from the accrual start to `date`.
    ///
    /// The total fraction is apportioned linearly in calendar days:
    ///
    /// $$\text{dcf}(d) = \frac{d - a_s}{a_e - a_s} \cdot \text{dcf}$$
    ///
    /// A zero-length accrual interval accrues nothing.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::DateOutsidePeriod` unless
    /// `accrual_start <= date <= accrual_end`.
    pub fn accrual_dcf(&self, date: Date) -> PeriodResult<f64> {
        if !self.accrues_on(date) {
            return Err(PeriodError::date_outside(
                date,
                self.accrual_start,
                self.accrual_end,
            ));
        }
        Ok(self.apportion(date))
    }

    /// Returns the fraction attributable to `[from, to]`, clipped to the
    /// accrual interval. Empty or reversed ranges give 0.
    #[must_use]
    pub fn dcf_between(&self, from: Date, to: Date) -> f64 {
        let from = from.max(self.accrual_start);
        let to = to.min(self.accrual_end);
        if to <= from {
            return 0.0;
        }
        self.apportion(to) - self.apportion(from)
    }

    fn apportion(&self, date: Date) -> f64 {
        let total = self.accrual_days();
        if total == 0 {
            return 0.0;
        }
        (date - self.accrual_start) as f64 / total as f64 * self.dcf
    }

    /// Returns a copy with a different pay date.
    #[must_use]
    pub fn with_pay_date(&self, pay: Date) -> Self {
        Self { pay, ..*self }
    }

    /// Returns a copy with a different accrual start.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidPeriod` if the new accrual start is
    /// after the accrual end.
    pub fn with_accrual_start(&self, accrual_start: Date) -> PeriodResult<Self> {
        Self::new(
            self.start,
            self.end,
            accrual_start,
            self.accrual_end,
            self.pay,
            self.dcf,
        )
    }
}

impl AsRef<Period> for Period {
    fn as_ref(&self) -> &Period {
        self
    }
}

/// Orders periods by pay date only.
///
/// Periods paying on the same day compare equal whatever their other
/// fields, so this is deliberately not an `Ord` impl.
#[must_use]
pub fn cmp_by_pay_date(a: &Period, b: &Period) -> Ordering {
    a.pay.cmp(&b.pay)
}

/// Sorts periods by pay date, keeping the input order for equal pay dates.
pub fn sort_by_pay_date<P: AsRef<Period>>(periods: &mut [P]) {
    periods.sort_by(|a, b| cmp_by_pay_date(a.as_ref(), b.as_ref()));
}
