//! Valuation inputs and late-bound outputs.

use std::fmt;

use parity_core::Date;
use parity_curves::MarketParams;
use serde::{Deserialize, Serialize};

use crate::config::ValuationConfig;
use crate::convexity::{ConvexityAdjuster, NoConvexity};
use crate::error::{finite, PeriodError, PeriodResult};

/// Everything a valuation pass reads: the value date, a market snapshot,
/// the convexity adjuster, and the configuration.
///
/// The market is borrowed for the duration of the pass.
#[derive(Clone)]
pub struct ValuationContext<'a> {
    value_date: Date,
    market: &'a MarketParams,
    convexity: &'a dyn ConvexityAdjuster,
    config: ValuationConfig,
}

impl<'a> ValuationContext<'a> {
    /// Creates a context with no convexity adjustment and the default
    /// configuration.
    #[must_use]
    pub fn new(value_date: Date, market: &'a MarketParams) -> Self {
        Self {
            value_date,
            market,
            convexity: &NoConvexity,
            config: ValuationConfig::default(),
        }
    }

    /// Sets the convexity adjuster.
    #[must_use]
    pub fn with_convexity(mut self, convexity: &'a dyn ConvexityAdjuster) -> Self {
        self.convexity = convexity;
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ValuationConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the value date.
    #[must_use]
    pub fn value_date(&self) -> Date {
        self.value_date
    }

    /// Returns the market snapshot.
    #[must_use]
    pub fn market(&self) -> &'a MarketParams {
        self.market
    }

    /// Returns the convexity adjuster.
    #[must_use]
    pub fn convexity(&self) -> &'a dyn ConvexityAdjuster {
        self.convexity
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }
}

impl fmt::Debug for ValuationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuationContext")
            .field("value_date", &self.value_date)
            .field("market", &self.market)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Outputs bound to a period during one valuation pass.
///
/// Each field is written at most once and must be written before it is
/// read. A fresh snapshot is used for every pass, so the period itself
/// stays immutable and passes over the same period can run in parallel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationSnapshot {
    end_df: Option<f64>,
    end_survival: Option<f64>,
    spread: Option<f64>,
    index_rate: Option<f64>,
    start_notional: Option<f64>,
    end_notional: Option<f64>,
    full_coupon_rate: Option<f64>,
}

macro_rules! snapshot_field {
    ($field:ident, $setter:ident, $doc:literal) => {
        #[doc = concat!("Returns the ", $doc, ".")]
        ///
        /// # Errors
        ///
        /// Returns `PeriodError::NotSet` if the field has not been written.
        pub fn $field(&self) -> PeriodResult<f64> {
            self.$field.ok_or(PeriodError::NotSet {
                field: stringify!($field),
            })
        }

        #[doc = concat!("Writes the ", $doc, ".")]
        ///
        /// # Errors
        ///
        /// Returns `PeriodError::AlreadySet` on a second write, or an
        /// invalid input error for a non-finite value.
        pub fn $setter(&mut self, value: f64) -> PeriodResult<()> {
            if self.$field.is_some() {
                return Err(PeriodError::AlreadySet {
                    field: stringify!($field),
                });
            }
            self.$field = Some(finite(stringify!($field), value)?);
            Ok(())
        }
    };
}

impl ValuationSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    snapshot_field!(end_df, set_end_df, "discount factor to the pay date");
    snapshot_field!(end_survival, set_end_survival, "survival probability to the pay date");
    snapshot_field!(spread, set_spread, "floating spread");
    snapshot_field!(index_rate, set_index_rate, "average index rate");
    snapshot_field!(start_notional, set_start_notional, "notional at the accrual start");
    snapshot_field!(end_notional, set_end_notional, "notional at the accrual end");
    snapshot_field!(full_coupon_rate, set_full_coupon_rate, "full coupon rate");

    /// Returns true once every field has been written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [
            self.end_df,
            self.end_survival,
            self.spread,
            self.index_rate,
            self.start_notional,
            self.end_notional,
            self.full_coupon_rate,
        ]
        .iter()
        .all(Option::is_some)
    }
}
