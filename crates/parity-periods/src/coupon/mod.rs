//! Coupon periods: rate, notional, credit, and FX aware periods.
//!
//! A [`CouponPeriod`] wraps a [`CashflowPeriod`] with either fixed or
//! floating [`RateTerms`], a notional, and the labels that select market
//! curves. Valuation lives in the submodules:
//!
//! - `metrics`: [`CouponPeriod::base_metrics`], [`CouponPeriod::accrual_metrics`]
//!   and [`CouponPeriod::valuation_snapshot`]
//! - `loss`: [`CouponPeriod::loss_metrics`] for credit-contingent legs

mod loss;
mod metrics;

use log::warn;
use parity_core::{Currency, Date};
use parity_curves::{CollateralLabel, CreditLabel, CurrencyPair, ForwardLabel, FundingLabel, MarketParams};
use serde::{Deserialize, Serialize};

use crate::cashflow_period::CashflowPeriod;
use crate::error::{finite, PeriodError, PeriodResult};
use crate::notional::NotionalSchedule;
use crate::period::Period;
use crate::reset::ResetSubPeriodSet;

/// The rate side of a coupon: exactly one of fixed or floating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RateTerms {
    /// A fixed coupon in an explicitly given currency.
    Fixed {
        /// Annualized coupon rate.
        coupon: f64,
        /// Currency the coupon is denominated in.
        currency: Currency,
    },
    /// A floating coupon on a forward index plus a spread.
    Floating {
        /// The index; its currency is the coupon currency.
        forward_label: ForwardLabel,
        /// Reset sub-periods and their compounding rule.
        reset_set: ResetSubPeriodSet,
        /// Spread added to the index rate.
        spread: f64,
    },
}

impl RateTerms {
    /// Fixed terms.
    #[must_use]
    pub fn fixed(coupon: f64, currency: Currency) -> Self {
        RateTerms::Fixed { coupon, currency }
    }

    /// Floating terms.
    #[must_use]
    pub fn floating(forward_label: ForwardLabel, reset_set: ResetSubPeriodSet, spread: f64) -> Self {
        RateTerms::Floating {
            forward_label,
            reset_set,
            spread,
        }
    }

    /// Builds terms from loosely typed optional fields.
    ///
    /// A forward label selects floating terms and then requires a reset
    /// set; a missing spread means zero. Without a forward label both a
    /// fixed coupon and a coupon currency are required.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::ContractViolation` if both or neither sides
    /// are present, a required field of the chosen side is missing, or an
    /// explicit currency disagrees with the forward label.
    pub fn from_parts(
        fixed_coupon: Option<f64>,
        coupon_currency: Option<Currency>,
        forward_label: Option<ForwardLabel>,
        reset_set: Option<ResetSubPeriodSet>,
        spread: Option<f64>,
    ) -> PeriodResult<Self> {
        match (fixed_coupon, forward_label) {
            (Some(_), Some(label)) => Err(PeriodError::contract_violation(format!(
                "both a fixed coupon and forward label '{label}' were given"
            ))),
            (None, Some(forward_label)) => {
                if let Some(currency) = coupon_currency {
                    if currency != forward_label.currency {
                        return Err(PeriodError::contract_violation(format!(
                            "coupon currency {currency} disagrees with forward label '{forward_label}'"
                        )));
                    }
                }
                let reset_set = reset_set.ok_or_else(|| {
                    PeriodError::contract_violation(format!(
                        "floating coupon on '{forward_label}' has no reset sub-periods"
                    ))
                })?;
                Ok(RateTerms::Floating {
                    forward_label,
                    reset_set,
                    spread: spread.unwrap_or(0.0),
                })
            }
            (Some(coupon), None) => {
                if reset_set.is_some() {
                    return Err(PeriodError::contract_violation(
                        "a fixed coupon cannot carry reset sub-periods",
                    ));
                }
                let currency = coupon_currency.ok_or_else(|| {
                    PeriodError::contract_violation("a fixed coupon requires a coupon currency")
                })?;
                Ok(RateTerms::Fixed { coupon, currency })
            }
            (None, None) => Err(PeriodError::contract_violation(
                "neither a fixed coupon nor a forward label was given",
            )),
        }
    }

    /// Returns true for fixed terms.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, RateTerms::Fixed { .. })
    }

    /// Returns the currency the coupon is denominated in.
    #[must_use]
    pub fn coupon_currency(&self) -> Currency {
        match self {
            RateTerms::Fixed { currency, .. } => *currency,
            RateTerms::Floating { forward_label, .. } => forward_label.currency,
        }
    }

    /// Returns the fixed coupon, if fixed.
    #[must_use]
    pub fn fixed_coupon(&self) -> Option<f64> {
        match self {
            RateTerms::Fixed { coupon, .. } => Some(*coupon),
            RateTerms::Floating { .. } => None,
        }
    }

    /// Returns the forward label, if floating.
    #[must_use]
    pub fn forward_label(&self) -> Option<&ForwardLabel> {
        match self {
            RateTerms::Fixed { .. } => None,
            RateTerms::Floating { forward_label, .. } => Some(forward_label),
        }
    }

    /// Returns the reset set, if floating.
    #[must_use]
    pub fn reset_set(&self) -> Option<&ResetSubPeriodSet> {
        match self {
            RateTerms::Fixed { .. } => None,
            RateTerms::Floating { reset_set, .. } => Some(reset_set),
        }
    }

    /// Returns the floating spread (zero for fixed terms).
    #[must_use]
    pub fn spread(&self) -> f64 {
        match self {
            RateTerms::Fixed { .. } => 0.0,
            RateTerms::Floating { spread, .. } => *spread,
        }
    }
}

/// A coupon-bearing period.
///
/// # Example
///
/// ```rust
/// use parity_core::{Currency, Date, Frequency};
/// use parity_periods::{CashflowPeriod, CouponPeriod, Period, RateTerms};
///
/// let start = Date::from_ymd(2024, 1, 15).unwrap();
/// let end = Date::from_ymd(2024, 7, 15).unwrap();
/// let period = Period::simple(start, end, end, 0.5).unwrap();
/// let coupon = CouponPeriod::new(
///     CashflowPeriod::new(period, Frequency::SemiAnnual),
///     RateTerms::fixed(0.05, Currency::USD),
///     1_000_000.0,
/// )
/// .unwrap();
///
/// assert_eq!(coupon.notional(start).unwrap(), 1_000_000.0);
/// assert!(coupon.fx_label().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponPeriod {
    cashflow: CashflowPeriod,
    terms: RateTerms,
    base_notional: f64,
    notional_schedule: NotionalSchedule,
    credit_label: Option<CreditLabel>,
    fx_fixing_date: Option<Date>,
}

impl CouponPeriod {
    /// Creates a coupon period with a bullet notional, no credit linkage,
    /// and FX (if any) marked to market.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidPeriod` if the accrual interval is
    /// empty, `PeriodError::ContractViolation` for floating terms with no
    /// reset sub-periods, and an invalid input error for a non-finite
    /// coupon, spread, or notional.
    pub fn new(cashflow: CashflowPeriod, terms: RateTerms, base_notional: f64) -> PeriodResult<Self> {
        let period = cashflow.period();
        if period.accrual_start() >= period.accrual_end() {
            return Err(PeriodError::invalid_period(format!(
                "coupon accrual interval [{}, {}] is empty",
                period.accrual_start(),
                period.accrual_end()
            )));
        }
        finite("base_notional", base_notional)?;
        match &terms {
            RateTerms::Fixed { coupon, .. } => {
                finite("fixed_coupon", *coupon)?;
            }
            RateTerms::Floating {
                forward_label,
                reset_set,
                spread,
            } => {
                finite("float_spread", *spread)?;
                if reset_set.is_empty() {
                    return Err(PeriodError::contract_violation(format!(
                        "floating coupon on '{forward_label}' has no reset sub-periods"
                    )));
                }
            }
        }

        Ok(Self {
            cashflow,
            terms,
            base_notional,
            notional_schedule: NotionalSchedule::bullet(),
            credit_label: None,
            fx_fixing_date: None,
        })
    }

    /// Sets the notional schedule.
    #[must_use]
    pub fn with_notional_schedule(mut self, schedule: NotionalSchedule) -> Self {
        self.notional_schedule = schedule;
        self
    }

    /// Links the period to a reference entity's credit curve.
    #[must_use]
    pub fn with_credit_label(mut self, label: CreditLabel) -> Self {
        self.credit_label = Some(label);
        self
    }

    /// Fixes the FX conversion on `date` instead of marking to market.
    #[must_use]
    pub fn with_fx_fixing_date(mut self, date: Date) -> Self {
        self.fx_fixing_date = Some(date);
        self
    }

    // ==================== Accessors ====================

    /// Returns the cash-flow period.
    #[must_use]
    pub fn cashflow(&self) -> &CashflowPeriod {
        &self.cashflow
    }

    /// Returns the underlying period.
    #[must_use]
    pub fn period(&self) -> &Period {
        self.cashflow.period()
    }

    /// Returns the rate terms.
    #[must_use]
    pub fn terms(&self) -> &RateTerms {
        &self.terms
    }

    /// Returns true for a fixed coupon.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.terms.is_fixed()
    }

    /// Returns the base notional.
    #[must_use]
    pub fn base_notional(&self) -> f64 {
        self.base_notional
    }

    /// Returns the notional schedule.
    #[must_use]
    pub fn notional_schedule(&self) -> &NotionalSchedule {
        &self.notional_schedule
    }

    /// Returns the FX fixing date; `None` means FX is marked to market.
    #[must_use]
    pub fn fx_fixing_date(&self) -> Option<Date> {
        self.fx_fixing_date
    }

    /// Returns true if FX is marked to market at the pay date.
    #[must_use]
    pub fn is_fx_mtm(&self) -> bool {
        self.fx_fixing_date.is_none()
    }

    /// Returns the currency the cash flow is paid in.
    #[must_use]
    pub fn pay_currency(&self) -> Currency {
        self.cashflow.currency()
    }

    /// Returns the currency the coupon is denominated in.
    #[must_use]
    pub fn coupon_currency(&self) -> Currency {
        self.terms.coupon_currency()
    }

    // ==================== Labels ====================

    /// Returns the credit label, if credit-linked.
    #[must_use]
    pub fn credit_label(&self) -> Option<&CreditLabel> {
        self.credit_label.as_ref()
    }

    /// Returns the forward label, if floating.
    #[must_use]
    pub fn forward_label(&self) -> Option<&ForwardLabel> {
        self.terms.forward_label()
    }

    /// Returns the funding label of the pay currency.
    #[must_use]
    pub fn funding_label(&self) -> FundingLabel {
        FundingLabel(self.pay_currency())
    }

    /// Returns the collateral label of the pay currency.
    #[must_use]
    pub fn collateral_label(&self) -> CollateralLabel {
        CollateralLabel(self.pay_currency())
    }

    /// Returns the coupon-to-pay currency pair when the two differ.
    #[must_use]
    pub fn fx_label(&self) -> Option<CurrencyPair> {
        let coupon = self.coupon_currency();
        let pay = self.pay_currency();
        (coupon != pay).then(|| CurrencyPair::new(coupon, pay))
    }

    // ==================== Date queries ====================

    /// Returns true if `start <= date <= end`.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.cashflow.contains(date)
    }

    /// Returns the fraction accrued from the accrual start to `date`,
    /// apportioned linearly.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::DateOutsidePeriod` unless `date` lies in the
    /// accrual interval.
    pub fn accrual_dcf(&self, date: Date) -> PeriodResult<f64> {
        self.period().accrual_dcf(date)
    }

    /// Returns the notional in effect on `date`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::DateOutsidePeriod` if the period does not
    /// contain `date`.
    pub fn notional(&self, date: Date) -> PeriodResult<f64> {
        self.require_contains(date)?;
        Ok(self.base_notional * self.notional_schedule.factor_at(date))
    }

    /// Returns the time-weighted average notional over `[d1, d2]`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::DateOutsidePeriod` if either date is outside
    /// the period, and `PeriodError::InvalidPeriod` if `d2 < d1`.
    pub fn notional_between(&self, d1: Date, d2: Date) -> PeriodResult<f64> {
        self.require_contains(d1)?;
        self.require_contains(d2)?;
        Ok(self.base_notional * self.notional_schedule.average_factor(d1, d2)?)
    }

    fn require_contains(&self, date: Date) -> PeriodResult<()> {
        if self.contains(date) {
            Ok(())
        } else {
            let period = self.period();
            Err(PeriodError::date_outside(date, period.start(), period.end()))
        }
    }

    // ==================== FX ====================

    /// Returns the conversion factor from the coupon currency into the
    /// pay currency.
    ///
    /// Same currency: 1.0. Fixed FX: the stored fixing on the fixing date,
    /// else the FX curve at that date. Marked to market: the FX curve at
    /// the pay date. A curve registered for the inverse pair is inverted.
    ///
    /// # Errors
    ///
    /// Returns a curve-not-found error if neither a fixing nor a curve is
    /// available.
    pub fn fx(&self, market: &MarketParams) -> PeriodResult<f64> {
        self.resolve_fx(market, None)
    }

    /// Like [`CouponPeriod::fx`], for a valuation on `value_date`.
    ///
    /// A fixing dated on or before the value date should already be
    /// stored; when it is missing the curve is still read at the fixing
    /// date, and a warning is logged.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`CouponPeriod::fx`].
    pub fn fx_as_of(&self, market: &MarketParams, value_date: Date) -> PeriodResult<f64> {
        self.resolve_fx(market, Some(value_date))
    }

    fn resolve_fx(&self, market: &MarketParams, value_date: Option<Date>) -> PeriodResult<f64> {
        let Some(pair) = self.fx_label() else {
            return Ok(1.0);
        };

        let date = match self.fx_fixing_date {
            Some(fixing_date) => {
                if let Some(rate) = market.fixings().get_fixing(&pair, fixing_date) {
                    return Ok(rate);
                }
                if let Some(value_date) = value_date.filter(|&v| fixing_date <= v) {
                    warn!(
                        "no {pair} fixing on {fixing_date} as of {value_date}; reading the FX curve at the fixing date"
                    );
                }
                fixing_date
            }
            None => self.period().pay_date(),
        };

        if let Some(curve) = market.fx_curve(&pair) {
            return Ok(curve.fx(date)?);
        }
        if let Some(curve) = market.fx_curve(&pair.inverse()) {
            let inverse = curve.fx(date)?;
            if inverse > 0.0 {
                return Ok(1.0 / inverse);
            }
        }
        Ok(market.fx_curve_required(&pair)?.fx(date)?)
    }
}

impl AsRef<Period> for CouponPeriod {
    fn as_ref(&self) -> &Period {
        self.period()
    }
}
