//! Reference curve implementations.
//!
//! - [`FlatDiscountCurve`], [`DiscreteDiscountCurve`]: funding curves
//! - [`FlatHazardCurve`]: constant hazard credit curve
//! - [`FlatForwardCurve`]: constant projection
//! - [`FlatFxCurve`], [`DiscreteFxCurve`]: FX forwards

mod discrete;
mod flat;

pub use discrete::{DiscreteDiscountCurve, DiscreteFxCurve};
pub use flat::{FlatDiscountCurve, FlatForwardCurve, FlatFxCurve, FlatHazardCurve};
