//! Loss quadrature for credit-contingent coupon periods.

use log::debug;
use parity_core::Date;

use super::CouponPeriod;
use crate::error::{PeriodError, PeriodResult};
use crate::metrics::{LossMetrics, LossQuadratureMetric};
use crate::valuation::ValuationContext;

impl CouponPeriod {
    /// Splits `[start, min(end, workout)]` into loss quadrature slices.
    ///
    /// The split follows the configured quadrature scheme. Each slice
    /// carries the survival probabilities at its ends, the funding curve's
    /// effective discount factor over the slice shifted by the default
    /// payment lag, the average notional, and the effective recovery
    /// (or the configured override).
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::MissingMarketData` if the period has no
    /// credit label, a curve-not-found error if the credit or funding
    /// curve is absent, `PeriodError::InvalidConfig` for an out-of-range
    /// configuration, and `PeriodError::EmptyLossGrid` if the integration
    /// range is empty.
    pub fn loss_metrics(
        &self,
        ctx: &ValuationContext<'_>,
        workout: Option<Date>,
    ) -> PeriodResult<LossMetrics> {
        let period = self.period();
        let label = self.credit_label.as_ref().ok_or_else(|| {
            PeriodError::missing_market_data(format!(
                "period ending {} has no credit label",
                period.end()
            ))
        })?;

        let market = ctx.market();
        let config = ctx.config();
        config.validate()?;
        let credit = market.credit_curve_required(label)?;
        let funding = market.funding_curve_required(&self.funding_label())?;

        let end = workout.map_or(period.end(), |w| w.min(period.end()));
        let grid = config.loss_quadrature.grid(period.start(), end)?;
        let lag = i64::from(config.default_payment_lag_days);

        let mut slices = Vec::with_capacity(grid.len());
        for (start, end) in grid {
            let recovery = match config.recovery_override {
                Some(recovery) => recovery,
                None => credit.effective_recovery(start, end)?,
            };
            slices.push(LossQuadratureMetric {
                start,
                end,
                survival_start: credit.survival(start)?,
                survival_end: credit.survival(end)?,
                df: funding.effective_df(start.add_days(lag), end.add_days(lag))?,
                notional: self.base_notional * self.notional_schedule.average_factor(start, end)?,
                recovery,
            });
        }

        debug!(
            "loss quadrature for {label} over [{}, {end}]: {} slice(s)",
            period.start(),
            slices.len()
        );

        Ok(LossMetrics { slices })
    }
}
