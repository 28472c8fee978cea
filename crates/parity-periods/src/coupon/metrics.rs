//! Period-level valuation of coupon periods.

use log::{debug, trace, warn};
use parity_core::Date;
use parity_curves::{ForwardLabel, FundingLabel};

use super::{CouponPeriod, RateTerms};
use crate::error::{PeriodError, PeriodResult};
use crate::metrics::{PeriodMetrics, RateSource, SubPeriodMetric};
use crate::reset::{AccrualCompounding, NodeLocation, ResetSubPeriod, ResetSubPeriodSet};
use crate::valuation::{ValuationContext, ValuationSnapshot};

impl CouponPeriod {
    /// Computes the period's metrics over the whole accrual interval.
    ///
    /// Fixed coupons produce one sub-period metric carrying the coupon and
    /// the period fraction. Floating coupons resolve every reset
    /// sub-period, in order of preference, from a stored fixing (fixing
    /// date on or before the value date), the forward curve, or a simple
    /// forward implied by the pay currency's funding curve. Survival and
    /// discount factors are taken at the pay date and default to 1.0 when
    /// no credit or funding curve is registered.
    ///
    /// Under arithmetic compounding each projected sub-period rate gets its
    /// own convexity factor; under geometric compounding one factor is
    /// applied to the compounded rate.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::UnresolvableRate` if any sub-period rate cannot
    /// be resolved, or the curve error raised while evaluating market data.
    pub fn base_metrics(&self, ctx: &ValuationContext<'_>) -> PeriodResult<PeriodMetrics> {
        self.assemble(ctx, None)
            .map_err(|e| self.report_failure("base", ctx.value_date(), e))
    }

    /// Computes the metrics accrued up to the value date.
    ///
    /// Floating coupons walk the reset sub-periods in order: sub-periods
    /// already finished contribute in full, the one containing the value
    /// date contributes from its own start to the value date, and the walk
    /// stops at the first sub-period that is entirely in the future or
    /// starts on the value date.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::DateOutsidePeriod` if the period does not
    /// contain the value date, `PeriodError::InvalidPeriod` if the value
    /// date is the period start, and otherwise the errors of
    /// [`CouponPeriod::base_metrics`].
    pub fn accrual_metrics(&self, ctx: &ValuationContext<'_>) -> PeriodResult<PeriodMetrics> {
        let value_date = ctx.value_date();
        let period = self.period();
        if !self.contains(value_date) {
            return Err(PeriodError::date_outside(value_date, period.start(), period.end()));
        }
        if value_date == period.start() {
            return Err(PeriodError::invalid_period(format!(
                "value date {value_date} is the period start; nothing has accrued"
            )));
        }

        self.assemble(ctx, Some(value_date))
            .map_err(|e| self.report_failure("accrual", value_date, e))
    }

    /// Binds the late-bound outputs of one valuation pass.
    ///
    /// The snapshot is filled from [`CouponPeriod::base_metrics`] and is
    /// returned only if every field could be computed.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`CouponPeriod::base_metrics`].
    pub fn valuation_snapshot(&self, ctx: &ValuationContext<'_>) -> PeriodResult<ValuationSnapshot> {
        let metrics = self.base_metrics(ctx)?;
        let period = self.period();

        let mut snapshot = ValuationSnapshot::new();
        snapshot.set_end_df(metrics.df)?;
        snapshot.set_end_survival(metrics.survival)?;
        snapshot.set_spread(self.terms.spread())?;
        snapshot.set_index_rate(metrics.average_index_rate())?;
        snapshot.set_start_notional(
            self.base_notional * self.notional_schedule.factor_at(period.accrual_start()),
        )?;
        snapshot.set_end_notional(
            self.base_notional * self.notional_schedule.factor_at(period.accrual_end()),
        )?;
        snapshot.set_full_coupon_rate(metrics.compounded_rate())?;
        Ok(snapshot)
    }

    fn assemble(&self, ctx: &ValuationContext<'_>, accrued_to: Option<Date>) -> PeriodResult<PeriodMetrics> {
        let period = self.period();
        let value_date = ctx.value_date();
        let window_end = accrued_to.unwrap_or(period.accrual_end());

        let (compounding, sub_periods, rate_convexity) = match &self.terms {
            RateTerms::Fixed { coupon, .. } => {
                let dcf = match accrued_to {
                    Some(date) => period.accrual_dcf(date)?,
                    None => period.dcf(),
                };
                let metric = SubPeriodMetric {
                    start: period.accrual_start(),
                    end: window_end,
                    fixing: None,
                    index_rate: *coupon,
                    spread: 0.0,
                    convexity: 1.0,
                    dcf,
                    source: RateSource::Fixed,
                };
                (AccrualCompounding::Arithmetic, vec![metric], 1.0)
            }
            RateTerms::Floating {
                forward_label,
                reset_set,
                spread,
            } => {
                let subs = self.floating_sub_periods(ctx, forward_label, reset_set, *spread, accrued_to)?;
                let compounding = reset_set.accrual_compounding();
                let projected = subs.iter().any(|m| m.source != RateSource::Fixing);
                let rate_convexity = if compounding == AccrualCompounding::Geometric && projected {
                    ctx.convexity().rate_adjustment(
                        value_date,
                        self.cashflow.reset_date(),
                        period.accrual_start(),
                        period.accrual_end(),
                    )
                } else {
                    1.0
                };
                (compounding, subs, rate_convexity)
            }
        };

        let market = ctx.market();
        let pay_date = period.pay_date();

        let df = match market.funding_curve(&self.funding_label()) {
            Some(curve) => curve.df(pay_date)?,
            None => {
                debug!("no funding curve for {}; discounting at 1.0", self.funding_label());
                1.0
            }
        };
        let survival = match &self.credit_label {
            Some(label) => match market.credit_curve(label) {
                Some(curve) => curve.survival(pay_date)?,
                None => {
                    debug!("no credit curve for {label}; survival at 1.0");
                    1.0
                }
            },
            None => 1.0,
        };

        let notional =
            self.base_notional * self.notional_schedule.average_factor(period.accrual_start(), window_end)?;
        let fx = self.fx_as_of(market, value_date)?;
        let discount_convexity = ctx
            .convexity()
            .period_adjustment(value_date, period.start(), pay_date);

        debug!(
            "assembled {} sub-period metric(s) for [{}, {}] paying {}",
            sub_periods.len(),
            period.accrual_start(),
            window_end,
            pay_date
        );

        Ok(PeriodMetrics {
            start: period.accrual_start(),
            end: window_end,
            pay_date,
            compounding,
            sub_periods,
            notional,
            survival,
            df,
            fx,
            rate_convexity,
            discount_convexity,
        })
    }

    fn floating_sub_periods(
        &self,
        ctx: &ValuationContext<'_>,
        label: &ForwardLabel,
        reset_set: &ResetSubPeriodSet,
        spread: f64,
        accrued_to: Option<Date>,
    ) -> PeriodResult<Vec<SubPeriodMetric>> {
        let period = self.period();
        let per_sub_convexity = reset_set.accrual_compounding() == AccrualCompounding::Arithmetic;
        let mut metrics = Vec::with_capacity(reset_set.len());

        for sub in reset_set {
            let end = match accrued_to {
                None => sub.end(),
                Some(date) => match sub.node_location(date) {
                    NodeLocation::Left => break,
                    NodeLocation::Inside if sub.start() == date => break,
                    NodeLocation::Inside => date,
                    NodeLocation::Right => sub.end(),
                },
            };

            let (index_rate, source) = self.resolve_rate(ctx, label, sub)?;
            let convexity = if per_sub_convexity && source != RateSource::Fixing {
                ctx.convexity()
                    .rate_adjustment(ctx.value_date(), sub.fixing(), sub.start(), sub.end())
            } else {
                1.0
            };

            metrics.push(SubPeriodMetric {
                start: sub.start(),
                end,
                fixing: Some(sub.fixing()),
                index_rate,
                spread,
                convexity,
                dcf: period.dcf_between(sub.start(), end),
                source,
            });
        }

        Ok(metrics)
    }

    fn resolve_rate(
        &self,
        ctx: &ValuationContext<'_>,
        label: &ForwardLabel,
        sub: &ResetSubPeriod,
    ) -> PeriodResult<(f64, RateSource)> {
        let market = ctx.market();
        let fixing_date = sub.fixing();

        if ctx.config().fixing_lookback && fixing_date <= ctx.value_date() {
            if let Some(rate) = market.fixings().get_fixing(label, fixing_date) {
                trace!("{label} on {fixing_date}: fixing {rate}");
                return Ok((rate, RateSource::Fixing));
            }
        }

        if let Some(curve) = market.forward_curve(label) {
            let rate = curve.forward_rate(sub.start(), sub.end())?;
            trace!("{label} on {fixing_date}: forward curve {rate}");
            return Ok((rate, RateSource::ForwardCurve));
        }

        let dcf = self.period().dcf_between(sub.start(), sub.end());
        if let Some(curve) = market.funding_curve(&FundingLabel(label.currency)) {
            if dcf > 0.0 {
                let rate = curve.forward(sub.start(), sub.end(), dcf)?;
                trace!("{label} on {fixing_date}: funding projection {rate}");
                return Ok((rate, RateSource::FundingProjection));
            }
        }

        Err(PeriodError::UnresolvableRate {
            label: label.to_string(),
            fixing_date,
        })
    }

    fn report_failure(&self, kind: &str, value_date: Date, error: PeriodError) -> PeriodError {
        if error.is_market_data_error() {
            warn!(
                "{kind} metrics for period ending {} unavailable on {value_date}: {error}",
                self.period().end()
            );
        }
        error
    }
}
