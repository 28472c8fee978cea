//! Periods carrying their day count conventions.

use parity_core::daycounts::{ActActParams, DayCountConvention, DayCountOracle};
use parity_core::{Currency, Date, Frequency};
use serde::{Deserialize, Serialize};

use crate::error::{PeriodError, PeriodResult};
use crate::period::Period;

/// A [`Period`] enriched with frequency, reset date, and conventions.
///
/// Coupon and accrual day counts carry independent end-of-month flags.
/// The holiday calendar is held by name and resolved on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowPeriod {
    period: Period,
    frequency: Frequency,
    reset_date: Date,
    coupon_day_count: DayCountConvention,
    coupon_eom: bool,
    accrual_day_count: DayCountConvention,
    accrual_eom: bool,
    currency: Currency,
    calendar: Option<String>,
}

impl CashflowPeriod {
    /// Creates a cash-flow period with ACT/360 conventions, USD, and the
    /// reset date on the accrual start.
    #[must_use]
    pub fn new(period: Period, frequency: Frequency) -> Self {
        Self {
            period,
            frequency,
            reset_date: period.accrual_start(),
            coupon_day_count: DayCountConvention::Act360,
            coupon_eom: false,
            accrual_day_count: DayCountConvention::Act360,
            accrual_eom: false,
            currency: Currency::USD,
            calendar: None,
        }
    }

    /// Sets the reset date.
    #[must_use]
    pub fn with_reset_date(mut self, reset_date: Date) -> Self {
        self.reset_date = reset_date;
        self
    }

    /// Sets the coupon day count and its end-of-month flag.
    #[must_use]
    pub fn with_coupon_day_count(mut self, convention: DayCountConvention, eom: bool) -> Self {
        self.coupon_day_count = convention;
        self.coupon_eom = eom;
        self
    }

    /// Sets the accrual day count and its end-of-month flag.
    #[must_use]
    pub fn with_accrual_day_count(mut self, convention: DayCountConvention, eom: bool) -> Self {
        self.accrual_day_count = convention;
        self.accrual_eom = eom;
        self
    }

    /// Sets the currency.
    #[must_use]
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Sets the holiday calendar name.
    #[must_use]
    pub fn with_calendar(mut self, calendar: impl Into<String>) -> Self {
        self.calendar = Some(calendar.into());
        self
    }

    /// Replaces the underlying period, keeping the conventions.
    #[must_use]
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Returns the underlying period.
    #[must_use]
    pub fn period(&self) -> &Period {
        &self.period
    }

    /// Returns the coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the reset date.
    #[must_use]
    pub fn reset_date(&self) -> Date {
        self.reset_date
    }

    /// Returns the coupon day count convention.
    #[must_use]
    pub fn coupon_day_count(&self) -> DayCountConvention {
        self.coupon_day_count
    }

    /// Returns the coupon end-of-month flag.
    #[must_use]
    pub fn coupon_eom(&self) -> bool {
        self.coupon_eom
    }

    /// Returns the accrual day count convention.
    #[must_use]
    pub fn accrual_day_count(&self) -> DayCountConvention {
        self.accrual_day_count
    }

    /// Returns the accrual end-of-month flag.
    #[must_use]
    pub fn accrual_eom(&self) -> bool {
        self.accrual_eom
    }

    /// Returns the currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the holiday calendar name.
    #[must_use]
    pub fn calendar(&self) -> Option<&str> {
        self.calendar.as_deref()
    }

    /// Returns true if `start <= date <= end`.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.period.contains(date)
    }

    /// ACT/ACT reference parameters spanning the accrual interval, if the
    /// frequency has a regular tenor.
    #[must_use]
    pub fn act_act_params(&self) -> Option<ActActParams> {
        (!self.frequency.is_zero()).then(|| {
            ActActParams::new(
                self.frequency,
                self.period.accrual_start(),
                self.period.accrual_end(),
            )
        })
    }

    /// Returns the fraction accrued from the accrual start to `date` under
    /// the accrual day count.
    ///
    /// The partial fraction is the ratio of two oracle calls (accrual start
    /// to `date` over the whole accrual interval) scaled by the period's
    /// stored fraction, so non-linear ACT/ACT conventions apportion
    /// correctly.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::DateOutsidePeriod` unless `date` lies in the
    /// accrual interval, or a day count error from the oracle.
    pub fn accrual_dcf(&self, date: Date, oracle: &dyn DayCountOracle) -> PeriodResult<f64> {
        let start = self.period.accrual_start();
        let end = self.period.accrual_end();
        if !self.period.accrues_on(date) {
            return Err(PeriodError::date_outside(date, start, end));
        }

        let params = self.act_act_params();
        let fraction = |to: Date| {
            oracle.year_fraction(
                start,
                to,
                self.accrual_day_count,
                self.accrual_eom,
                params.as_ref(),
                self.calendar(),
            )
        };

        let full = fraction(end)?;
        if full == 0.0 {
            return Ok(0.0);
        }
        Ok(fraction(date)? / full * self.period.dcf())
    }
}

impl AsRef<Period> for CashflowPeriod {
    fn as_ref(&self) -> &Period {
        &self.period
    }
}
