//! Builder turning schedule terms into period lists.

use std::fmt;
use std::sync::Arc;

use log::debug;
use parity_core::calendars::{resolve_calendar, BusinessDayConvention, Calendar};
use parity_core::daycounts::{ActActParams, DayCountConvention, DayCountOracle, StandardDayCounts};
use parity_core::{Currency, Date, Frequency};
use parity_curves::{CreditLabel, ForwardLabel};

use super::{generate_edges, step_months, Direction, EdgeSchedule, StubPolicy, StubPosition};
use crate::cashflow_period::CashflowPeriod;
use crate::coupon::{CouponPeriod, RateTerms};
use crate::error::{finite, PeriodError, PeriodResult};
use crate::notional::NotionalSchedule;
use crate::period::Period;
use crate::reset::{AccrualCompounding, ResetSubPeriod, ResetSubPeriodSet};

/// The rate side of a leg, applied to every generated period.
#[derive(Debug, Clone, PartialEq)]
pub enum LegTerms {
    /// A fixed coupon.
    Fixed {
        /// Annualized coupon rate.
        coupon: f64,
    },
    /// A floating index plus spread.
    Floating {
        /// The index.
        forward_label: ForwardLabel,
        /// Spread over the index.
        spread: f64,
    },
}

/// Generates contiguous period lists from schedule terms.
///
/// Nominal period dates are the raw edges, so consecutive periods share
/// an edge. Accrual dates are the edges rolled by the accrual business day
/// convention; pay dates are accrual ends rolled by the pay convention and
/// then lagged by business days. A stub whose edges roll onto the same
/// business day is merged into its neighbour.
///
/// # Example
///
/// ```rust
/// use parity_core::{Date, Frequency};
/// use parity_periods::{LegTerms, PeriodSequenceBuilder};
///
/// let periods = PeriodSequenceBuilder::new(
///     Date::from_ymd(2024, 1, 15).unwrap(),
///     Date::from_ymd(2026, 1, 15).unwrap(),
///     Frequency::SemiAnnual,
/// )
/// .with_base_notional(1_000_000.0)
/// .build(&LegTerms::Fixed { coupon: 0.05 })
/// .unwrap();
///
/// assert_eq!(periods.len(), 4);
/// ```
#[derive(Clone)]
pub struct PeriodSequenceBuilder {
    effective: Date,
    maturity: Date,
    frequency: Frequency,
    direction: Direction,
    stub_policy: StubPolicy,
    end_of_month: bool,
    calendar: Option<String>,
    accrual_adjustment: BusinessDayConvention,
    pay_adjustment: BusinessDayConvention,
    pay_lag_days: i32,
    coupon_day_count: DayCountConvention,
    coupon_eom: bool,
    accrual_day_count: DayCountConvention,
    accrual_eom: bool,
    currency: Currency,
    coupon_currency: Option<Currency>,
    reset_frequency: Option<Frequency>,
    compounding: AccrualCompounding,
    fixing_lag_days: i32,
    fx_fixing_lag_days: Option<i32>,
    base_notional: f64,
    notional_schedule: NotionalSchedule,
    credit_label: Option<CreditLabel>,
    oracle: Arc<dyn DayCountOracle>,
}

impl PeriodSequenceBuilder {
    /// Creates a builder with backward generation, short stubs,
    /// end-of-month rolling, unadjusted accrual dates, modified following
    /// pay dates, ACT/360, USD, and a unit bullet notional.
    #[must_use]
    pub fn new(effective: Date, maturity: Date, frequency: Frequency) -> Self {
        Self {
            effective,
            maturity,
            frequency,
            direction: Direction::default(),
            stub_policy: StubPolicy::default(),
            end_of_month: true,
            calendar: None,
            accrual_adjustment: BusinessDayConvention::Unadjusted,
            pay_adjustment: BusinessDayConvention::ModifiedFollowing,
            pay_lag_days: 0,
            coupon_day_count: DayCountConvention::Act360,
            coupon_eom: false,
            accrual_day_count: DayCountConvention::Act360,
            accrual_eom: false,
            currency: Currency::USD,
            coupon_currency: None,
            reset_frequency: None,
            compounding: AccrualCompounding::default(),
            fixing_lag_days: 0,
            fx_fixing_lag_days: None,
            base_notional: 1.0,
            notional_schedule: NotionalSchedule::bullet(),
            credit_label: None,
            oracle: Arc::new(StandardDayCounts),
        }
    }

    /// Sets the generation direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the stub policy.
    #[must_use]
    pub fn with_stub_policy(mut self, policy: StubPolicy) -> Self {
        self.stub_policy = policy;
        self
    }

    /// Sets the end-of-month rule.
    #[must_use]
    pub fn with_end_of_month(mut self, eom: bool) -> Self {
        self.end_of_month = eom;
        self
    }

    /// Sets the holiday calendar by name.
    #[must_use]
    pub fn with_calendar(mut self, calendar: impl Into<String>) -> Self {
        self.calendar = Some(calendar.into());
        self
    }

    /// Sets the business day convention for accrual dates.
    #[must_use]
    pub fn with_accrual_adjustment(mut self, convention: BusinessDayConvention) -> Self {
        self.accrual_adjustment = convention;
        self
    }

    /// Sets the business day convention for pay dates.
    #[must_use]
    pub fn with_pay_adjustment(mut self, convention: BusinessDayConvention) -> Self {
        self.pay_adjustment = convention;
        self
    }

    /// Sets the pay lag in business days after the adjusted accrual end.
    #[must_use]
    pub fn with_pay_lag(mut self, days: i32) -> Self {
        self.pay_lag_days = days;
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

    /// Sets the pay currency.
    #[must_use]
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Sets the coupon currency when it differs from the pay currency.
    #[must_use]
    pub fn with_coupon_currency(mut self, currency: Currency) -> Self {
        self.coupon_currency = Some(currency);
        self
    }

    /// Compounds floating coupons over sub-periods at `frequency`.
    #[must_use]
    pub fn with_reset_frequency(mut self, frequency: Frequency, compounding: AccrualCompounding) -> Self {
        self.reset_frequency = Some(frequency);
        self.compounding = compounding;
        self
    }

    /// Sets the fixing lag in business days before each sub-period start.
    #[must_use]
    pub fn with_fixing_lag(mut self, days: i32) -> Self {
        self.fixing_lag_days = days;
        self
    }

    /// Fixes FX `days` business days before each accrual start instead of
    /// marking to market.
    #[must_use]
    pub fn with_fx_fixing_lag(mut self, days: i32) -> Self {
        self.fx_fixing_lag_days = Some(days);
        self
    }

    /// Sets the base notional.
    #[must_use]
    pub fn with_base_notional(mut self, notional: f64) -> Self {
        self.base_notional = notional;
        self
    }

    /// Sets the notional schedule.
    #[must_use]
    pub fn with_notional_schedule(mut self, schedule: NotionalSchedule) -> Self {
        self.notional_schedule = schedule;
        self
    }

    /// Links every period to a credit curve.
    #[must_use]
    pub fn with_credit_label(mut self, label: CreditLabel) -> Self {
        self.credit_label = Some(label);
        self
    }

    /// Replaces the day count oracle.
    #[must_use]
    pub fn with_oracle(mut self, oracle: Arc<dyn DayCountOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    /// Generates the raw edge dates.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidPeriod` unless `effective < maturity`.
    pub fn edge_dates(&self) -> PeriodResult<EdgeSchedule> {
        generate_edges(
            self.effective,
            self.maturity,
            self.frequency,
            self.direction,
            self.stub_policy,
            self.end_of_month,
        )
    }

    /// Builds periods carrying conventions but no rate terms.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid date range, an unknown calendar, or
    /// a day count failure.
    pub fn build_cashflow_periods(&self) -> PeriodResult<Vec<CashflowPeriod>> {
        let calendar = resolve_calendar(self.calendar.as_deref())?;
        let (edges, adjusted) = self.accrual_edges(calendar.as_ref())?;

        let mut periods = Vec::with_capacity(edges.num_periods());
        for (index, ((start, end), accrual)) in edges.periods().zip(adjusted.windows(2)).enumerate() {
            let (accrual_start, accrual_end) = (accrual[0], accrual[1]);
            let pay = calendar.add_business_days(
                calendar.adjust(accrual_end, self.pay_adjustment),
                self.pay_lag_days,
            );

            let reference =
                self.reference_period(&edges, index, (start, end), (accrual_start, accrual_end), calendar.as_ref())?;
            let dcf = self.oracle.year_fraction(
                accrual_start,
                accrual_end,
                self.coupon_day_count,
                self.coupon_eom,
                reference.as_ref(),
                self.calendar.as_deref(),
            )?;

            let period = Period::new(start, end, accrual_start, accrual_end, pay, dcf)?;
            let reset_date = calendar.add_business_days(accrual_start, -self.fixing_lag_days);
            let mut cashflow = CashflowPeriod::new(period, self.frequency)
                .with_reset_date(reset_date)
                .with_coupon_day_count(self.coupon_day_count, self.coupon_eom)
                .with_accrual_day_count(self.accrual_day_count, self.accrual_eom)
                .with_currency(self.currency);
            if let Some(name) = &self.calendar {
                cashflow = cashflow.with_calendar(name.clone());
            }
            periods.push(cashflow);
        }

        debug!(
            "built {} cash-flow period(s) from {} to {}",
            periods.len(),
            self.effective,
            self.maturity
        );
        Ok(periods)
    }

    /// Builds coupon periods for a fixed or floating leg.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`PeriodSequenceBuilder::build_cashflow_periods`],
    /// `PeriodError::ContractViolation` for inconsistent currencies or a
    /// reset tenor longer than the coupon tenor, and invalid input errors
    /// for non-finite rates or notionals.
    pub fn build(&self, terms: &LegTerms) -> PeriodResult<Vec<CouponPeriod>> {
        finite("base_notional", self.base_notional)?;
        let calendar = resolve_calendar(self.calendar.as_deref())?;

        self.build_cashflow_periods()?
            .into_iter()
            .map(|cashflow| -> PeriodResult<CouponPeriod> {
                let rate_terms = match terms {
                    LegTerms::Fixed { coupon } => RateTerms::from_parts(
                        Some(*coupon),
                        Some(self.coupon_currency.unwrap_or(self.currency)),
                        None,
                        None,
                        None,
                    )?,
                    LegTerms::Floating {
                        forward_label,
                        spread,
                    } => RateTerms::from_parts(
                        None,
                        self.coupon_currency,
                        Some(forward_label.clone()),
                        Some(self.reset_set(cashflow.period(), calendar.as_ref())?),
                        Some(*spread),
                    )?,
                };

                let fx_fixing = self.fx_fixing_lag_days.map(|lag| {
                    calendar.add_business_days(cashflow.period().accrual_start(), -lag)
                });

                let mut coupon = CouponPeriod::new(cashflow, rate_terms, self.base_notional)?
                    .with_notional_schedule(self.notional_schedule.clone());
                if let Some(label) = &self.credit_label {
                    coupon = coupon.with_credit_label(label.clone());
                }
                if let Some(date) = fx_fixing {
                    coupon = coupon.with_fx_fixing_date(date);
                }
                Ok(coupon)
            })
            .collect()
    }

    /// Raw edges paired with their accrual-adjusted dates.
    ///
    /// Adjustment can roll two edges of a short stub onto the same business
    /// day. The interior edge of such a pair is dropped, so the stub joins
    /// its neighbour and every accrual interval is non-empty.
    fn accrual_edges(&self, calendar: &dyn Calendar) -> PeriodResult<(EdgeSchedule, Vec<Date>)> {
        let mut edges = self.edge_dates()?;
        let mut adjusted: Vec<Date> = edges
            .dates()
            .iter()
            .map(|&date| calendar.adjust(date, self.accrual_adjustment))
            .collect();

        while let Some(index) = adjusted.windows(2).position(|w| w[0] >= w[1]) {
            if adjusted.len() <= 2 {
                return Err(PeriodError::invalid_period(format!(
                    "accrual dates from {} to {} adjust onto {}",
                    self.effective, self.maturity, adjusted[0]
                )));
            }
            let interior = index.max(1);
            debug!(
                "edge {} adjusts onto its neighbour at {}; merging periods",
                edges.dates()[interior],
                adjusted[interior]
            );
            edges.merge_at(interior);
            adjusted.remove(interior);
        }

        Ok((edges, adjusted))
    }

    /// The regular period ACT/ACT ICMA measures period `index` against.
    ///
    /// Regular periods are their own reference. A stub is measured against
    /// the notional regular period sharing its far edge; notional edges are
    /// rolled by the accrual convention like the real ones.
    fn reference_period(
        &self,
        edges: &EdgeSchedule,
        index: usize,
        (start, end): (Date, Date),
        (accrual_start, accrual_end): (Date, Date),
        calendar: &dyn Calendar,
    ) -> PeriodResult<Option<ActActParams>> {
        if self.frequency.is_zero() {
            return Ok(None);
        }
        let tenor = self.frequency.months_per_period() as i32;
        let notional = |date: Date, months: i32| -> PeriodResult<Date> {
            let stepped = step_months(date, months, self.end_of_month && date.is_end_of_month())?;
            Ok(calendar.adjust(stepped, self.accrual_adjustment))
        };

        let (reference_start, reference_end) = if edges.is_stub(index) {
            match edges.stub() {
                Some(StubPosition::Front) => (notional(end, -tenor)?, accrual_end),
                _ => (accrual_start, notional(start, tenor)?),
            }
        } else {
            (accrual_start, accrual_end)
        };

        Ok(Some(ActActParams::new(self.frequency, reference_start, reference_end)))
    }

    /// Reset sub-periods nested in one accrual interval.
    fn reset_set(&self, period: &Period, calendar: &dyn Calendar) -> PeriodResult<ResetSubPeriodSet> {
        let start = period.accrual_start();
        let end = period.accrual_end();
        let fixing = |date: Date| calendar.add_business_days(date, -self.fixing_lag_days);

        let reset_months = match self.reset_frequency {
            Some(reset) if !reset.is_zero() => reset.months_per_period(),
            _ => {
                let single = ResetSubPeriod::new(start, end, fixing(start))?;
                return Ok(ResetSubPeriodSet::new(self.compounding, vec![single]));
            }
        };
        let coupon_months = self.frequency.months_per_period();
        if !self.frequency.is_zero() && reset_months > coupon_months {
            return Err(PeriodError::contract_violation(format!(
                "reset tenor of {reset_months}M exceeds the coupon tenor of {coupon_months}M"
            )));
        }

        let mut subs = Vec::new();
        let mut sub_start = start;
        let mut k = 1;
        while sub_start < end {
            let sub_end = start.add_months(k * reset_months as i32)?.min(end);
            subs.push(ResetSubPeriod::new(sub_start, sub_end, fixing(sub_start))?);
            sub_start = sub_end;
            k += 1;
        }

        Ok(ResetSubPeriodSet::new(self.compounding, subs))
    }
}

impl fmt::Debug for PeriodSequenceBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeriodSequenceBuilder")
            .field("effective", &self.effective)
            .field("maturity", &self.maturity)
            .field("frequency", &self.frequency)
            .field("direction", &self.direction)
            .field("stub_policy", &self.stub_policy)
            .field("end_of_month", &self.end_of_month)
            .field("calendar", &self.calendar)
            .field("coupon_day_count", &self.coupon_day_count)
            .field("currency", &self.currency)
            .field("reset_frequency", &self.reset_frequency)
            .field("base_notional", &self.base_notional)
            .finish_non_exhaustive()
    }
}
