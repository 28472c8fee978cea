//! # Parity Curves
//!
//! Market data capabilities consumed by the Parity period engine.
//!
//! - **Traits**: [`DiscountCurve`], [`CreditCurve`], [`ForwardCurve`], [`FxCurve`]
//! - **Curves**: flat and pillar-based reference implementations
//! - **Labels**: [`FundingLabel`], [`CollateralLabel`], [`CreditLabel`],
//!   [`ForwardLabel`], [`CurrencyPair`]
//! - **Market**: [`MarketParams`] curve set and [`FixingStore`]
//!
//! ## Example
//!
//! ```rust
//! use parity_core::{Currency, Date};
//! use parity_curves::prelude::*;
//!
//! let today = Date::from_ymd(2024, 1, 15).unwrap();
//! let market = MarketParams::new()
//!     .with_funding_curve(FundingLabel(Currency::USD), FlatDiscountCurve::new(today, 0.05).unwrap());
//!
//! let curve = market.funding_curve_required(&FundingLabel(Currency::USD)).unwrap();
//! let df = curve.df(Date::from_ymd(2025, 1, 15).unwrap()).unwrap();
//! assert!(df < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod curves;
pub mod error;
pub mod fixings;
pub mod labels;
pub mod market;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::curves::{
        DiscreteDiscountCurve, DiscreteFxCurve, FlatDiscountCurve, FlatForwardCurve, FlatFxCurve,
        FlatHazardCurve,
    };
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::fixings::FixingStore;
    pub use crate::labels::{CollateralLabel, CreditLabel, CurrencyPair, ForwardLabel, FundingLabel};
    pub use crate::market::MarketParams;
    pub use crate::traits::{CreditCurve, DiscountCurve, ForwardCurve, FxCurve};
}

// Re-export commonly used types at crate root
pub use curves::{
    DiscreteDiscountCurve, DiscreteFxCurve, FlatDiscountCurve, FlatForwardCurve, FlatFxCurve,
    FlatHazardCurve,
};
pub use error::{CurveError, CurveResult};
pub use fixings::FixingStore;
pub use labels::{CollateralLabel, CreditLabel, CurrencyPair, ForwardLabel, FundingLabel};
pub use market::MarketParams;
pub use traits::{CreditCurve, DiscountCurve, ForwardCurve, FxCurve};
