//! Valuation metrics assembled by coupon periods.

use parity_core::Date;
use serde::{Deserialize, Serialize};

use crate::error::{PeriodError, PeriodResult};
use crate::reset::AccrualCompounding;

/// Where a sub-period's rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateSource {
    /// The fixed coupon.
    Fixed,
    /// A stored historical fixing.
    Fixing,
    /// A forward curve projection.
    ForwardCurve,
    /// A simple forward implied by the funding curve.
    FundingProjection,
}

/// The rate and accrual contribution of one reset sub-period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubPeriodMetric {
    /// Start of the accrual slice.
    pub start: Date,
    /// End of the accrual slice.
    pub end: Date,
    /// Fixing date, if the rate is floating.
    pub fixing: Option<Date>,
    /// Index rate (or fixed coupon) before adjustments.
    pub index_rate: f64,
    /// Spread added after the convexity factor.
    pub spread: f64,
    /// Multiplicative convexity factor on the index rate.
    pub convexity: f64,
    /// Day count fraction of the slice.
    pub dcf: f64,
    /// Source of the index rate.
    pub source: RateSource,
}

impl SubPeriodMetric {
    /// The effective rate: `index_rate * convexity + spread`.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.index_rate * self.convexity + self.spread
    }
}

/// Period-level valuation metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    /// Start of the metric window.
    pub start: Date,
    /// End of the metric window (period end, or the value date when accruing).
    pub end: Date,
    /// Pay date.
    pub pay_date: Date,
    /// How sub-period rates combine.
    pub compounding: AccrualCompounding,
    /// Per sub-period contributions.
    pub sub_periods: Vec<SubPeriodMetric>,
    /// Time-weighted notional over the window.
    pub notional: f64,
    /// Survival probability to the pay date.
    pub survival: f64,
    /// Discount factor to the pay date.
    pub df: f64,
    /// FX conversion into the pay currency.
    pub fx: f64,
    /// Period-level convexity factor on the compounded rate.
    pub rate_convexity: f64,
    /// Period-level convexity factor on the risky discount.
    pub discount_convexity: f64,
}

impl PeriodMetrics {
    /// Sum of the sub-period fractions.
    #[must_use]
    pub fn accrual_fraction(&self) -> f64 {
        self.sub_periods.iter().map(|m| m.dcf).sum()
    }

    /// The period rate implied by the sub-period rates.
    ///
    /// Arithmetic: $\sum r_i d_i / \sum d_i$.
    /// Geometric: $(\prod (1 + r_i d_i) - 1) / \sum d_i$.
    ///
    /// The period-level rate convexity factor is applied on top. An empty
    /// window has rate 0.
    #[must_use]
    pub fn compounded_rate(&self) -> f64 {
        let total = self.accrual_fraction();
        if total == 0.0 {
            return 0.0;
        }
        let raw = match self.compounding {
            AccrualCompounding::Arithmetic => {
                self.sub_periods.iter().map(|m| m.rate() * m.dcf).sum::<f64>() / total
            }
            AccrualCompounding::Geometric => {
                let growth: f64 = self
                    .sub_periods
                    .iter()
                    .map(|m| 1.0 + m.rate() * m.dcf)
                    .product();
                (growth - 1.0) / total
            }
        };
        raw * self.rate_convexity
    }

    /// DCF-weighted average of the adjusted index rates, excluding spread.
    #[must_use]
    pub fn average_index_rate(&self) -> f64 {
        let total = self.accrual_fraction();
        if total == 0.0 {
            return 0.0;
        }
        self.sub_periods
            .iter()
            .map(|m| m.index_rate * m.convexity * m.dcf)
            .sum::<f64>()
            / total
    }

    /// Coupon amount in the pay currency, undiscounted.
    #[must_use]
    pub fn coupon_amount(&self) -> f64 {
        self.notional * self.compounded_rate() * self.accrual_fraction() * self.fx
    }

    /// Present value of the coupon.
    ///
    /// `notional * rate * dcf * fx * df * survival`, times the discount
    /// convexity factor.
    #[must_use]
    pub fn present_value(&self) -> f64 {
        self.coupon_amount() * self.df * self.survival * self.discount_convexity
    }
}

/// How a credit-contingent period is split for loss integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum LossQuadratureScheme {
    /// Fixed steps of `days` calendar days; the last step is truncated.
    DayStep {
        /// Step length in days.
        days: u32,
    },
    /// `count` sub-intervals of (nearly) equal length.
    PeriodUnit {
        /// Number of sub-intervals.
        count: u32,
    },
    /// One interval spanning the whole range.
    FullPeriod,
}

impl Default for LossQuadratureScheme {
    fn default() -> Self {
        LossQuadratureScheme::DayStep { days: 30 }
    }
}

impl LossQuadratureScheme {
    /// Splits `[start, end]` into contiguous sub-intervals.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::EmptyLossGrid` if `end <= start`, and
    /// `PeriodError::InvalidConfig` for a zero step or count.
    pub fn grid(&self, start: Date, end: Date) -> PeriodResult<Vec<(Date, Date)>> {
        if end <= start {
            return Err(PeriodError::EmptyLossGrid { start, end });
        }

        let edges: Vec<Date> = match *self {
            LossQuadratureScheme::DayStep { days } => {
                if days == 0 {
                    return Err(PeriodError::invalid_config("loss_quadrature.days", "step must be positive"));
                }
                let mut edges = vec![start];
                let mut cursor = start;
                while cursor < end {
                    cursor = cursor.add_days(i64::from(days)).min(end);
                    edges.push(cursor);
                }
                edges
            }
            LossQuadratureScheme::PeriodUnit { count } => {
                if count == 0 {
                    return Err(PeriodError::invalid_config("loss_quadrature.count", "count must be positive"));
                }
                let total = end - start;
                let count = i64::from(count);
                let mut edges: Vec<Date> = (0..=count)
                    .map(|k| start.add_days((k * total + count / 2) / count))
                    .collect();
                edges.dedup();
                edges
            }
            LossQuadratureScheme::FullPeriod => vec![start, end],
        };

        let grid: Vec<(Date, Date)> = edges.windows(2).map(|w| (w[0], w[1])).collect();
        if grid.is_empty() {
            return Err(PeriodError::EmptyLossGrid { start, end });
        }
        Ok(grid)
    }
}

/// One loss quadrature slice of a credit-contingent period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossQuadratureMetric {
    /// Slice start.
    pub start: Date,
    /// Slice end.
    pub end: Date,
    /// Survival probability at the slice start.
    pub survival_start: f64,
    /// Survival probability at the slice end.
    pub survival_end: f64,
    /// Discount factor for a default in the slice, shifted by the payment lag.
    pub df: f64,
    /// Effective notional over the slice.
    pub notional: f64,
    /// Effective recovery rate over the slice.
    pub recovery: f64,
}

impl LossQuadratureMetric {
    /// `notional * (1 - recovery) * (S_start - S_end) * df`.
    #[must_use]
    pub fn expected_loss(&self) -> f64 {
        self.notional * (1.0 - self.recovery) * (self.survival_start - self.survival_end) * self.df
    }

    /// Probability of default within the slice.
    #[must_use]
    pub fn default_probability(&self) -> f64 {
        self.survival_start - self.survival_end
    }
}

/// The loss quadrature slices of one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossMetrics {
    /// Slices in chronological order.
    pub slices: Vec<LossQuadratureMetric>,
}

impl LossMetrics {
    /// Total discounted expected loss.
    #[must_use]
    pub fn expected_loss(&self) -> f64 {
        self.slices.iter().map(LossQuadratureMetric::expected_loss).sum()
    }

    /// Number of slices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Returns true if there are no slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}
