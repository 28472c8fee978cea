//! # Parity Periods
//!
//! Accrual period generation and period-level valuation.
//!
//! - **Periods**: [`Period`], [`CashflowPeriod`], [`CouponPeriod`]
//! - **Floating structure**: [`ResetSubPeriod`], [`ResetSubPeriodSet`], [`AccrualCompounding`]
//! - **Schedules**: [`PeriodSequenceBuilder`] with forward/backward generation and stub policies
//! - **Valuation**: [`PeriodMetrics`], [`LossMetrics`], [`ValuationSnapshot`],
//!   the [`ConvexityAdjuster`] seam, and [`ValuationConfig`]
//!
//! ## Example
//!
//! ```rust
//! use parity_core::{Currency, Date, Frequency};
//! use parity_curves::{FlatDiscountCurve, FundingLabel, MarketParams};
//! use parity_periods::prelude::*;
//!
//! let start = Date::from_ymd(2024, 1, 15).unwrap();
//! let periods = PeriodSequenceBuilder::new(start, Date::from_ymd(2025, 1, 15).unwrap(), Frequency::SemiAnnual)
//!     .with_base_notional(1_000_000.0)
//!     .build(&LegTerms::Fixed { coupon: 0.05 })
//!     .unwrap();
//!
//! let market = MarketParams::new()
//!     .with_funding_curve(FundingLabel(Currency::USD), FlatDiscountCurve::new(start, 0.05).unwrap());
//! let ctx = ValuationContext::new(start, &market);
//!
//! let pv: f64 = periods
//!     .iter()
//!     .map(|p| p.base_metrics(&ctx).unwrap().present_value())
//!     .sum();
//! assert!(pv > 45_000.0 && pv < 51_000.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_lines)]

pub mod cashflow_period;
pub mod config;
pub mod convexity;
pub mod coupon;
pub mod error;
pub mod metrics;
pub mod notional;
pub mod period;
pub mod reset;
pub mod schedule;
pub mod valuation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflow_period::CashflowPeriod;
    pub use crate::config::ValuationConfig;
    pub use crate::convexity::{ConvexityAdjuster, CorrelationConvexity, NoConvexity};
    pub use crate::coupon::{CouponPeriod, RateTerms};
    pub use crate::error::{PeriodError, PeriodResult};
    pub use crate::metrics::{
        LossMetrics, LossQuadratureMetric, LossQuadratureScheme, PeriodMetrics, RateSource,
        SubPeriodMetric,
    };
    pub use crate::notional::NotionalSchedule;
    pub use crate::period::{cmp_by_pay_date, sort_by_pay_date, Period};
    pub use crate::reset::{AccrualCompounding, NodeLocation, ResetSubPeriod, ResetSubPeriodSet};
    pub use crate::schedule::{Direction, LegTerms, PeriodSequenceBuilder, StubPolicy, StubPosition};
    pub use crate::valuation::{ValuationContext, ValuationSnapshot};
}

// Re-export commonly used types at crate root
pub use cashflow_period::CashflowPeriod;
pub use config::ValuationConfig;
pub use convexity::{ConvexityAdjuster, CorrelationConvexity, NoConvexity};
pub use coupon::{CouponPeriod, RateTerms};
pub use error::{PeriodError, PeriodResult};
pub use metrics::{
    LossMetrics, LossQuadratureMetric, LossQuadratureScheme, PeriodMetrics, RateSource,
    SubPeriodMetric,
};
pub use notional::NotionalSchedule;
pub use period::{cmp_by_pay_date, sort_by_pay_date, Period};
pub use reset::{AccrualCompounding, NodeLocation, ResetSubPeriod, ResetSubPeriodSet};
pub use schedule::{
    generate_edges, Direction, EdgeSchedule, LegTerms, PeriodSequenceBuilder, StubPolicy,
    StubPosition,
};
pub use valuation::{ValuationContext, ValuationSnapshot};
