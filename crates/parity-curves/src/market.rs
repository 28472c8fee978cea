//! The curve set consulted during period valuation.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use parity_core::Currency;

use crate::error::{CurveError, CurveResult};
use crate::fixings::FixingStore;
use crate::labels::{CreditLabel, CurrencyPair, ForwardLabel, FundingLabel};
use crate::traits::{CreditCurve, DiscountCurve, ForwardCurve, FxCurve};

/// Market parameters: label-keyed curves plus stored fixings.
///
/// Curves are shared behind `Arc`, so cloning a `MarketParams` for a
/// scenario is cheap and the originals are never mutated.
///
/// ```rust
/// use parity_core::{Currency, Date};
/// use parity_curves::{FlatDiscountCurve, FundingLabel, MarketParams};
///
/// let today = Date::from_ymd(2024, 1, 15).unwrap();
/// let market = MarketParams::new()
///     .with_funding_curve(FundingLabel(Currency::USD), FlatDiscountCurve::new(today, 0.05).unwrap());
/// assert!(market.funding_curve(&FundingLabel(Currency::USD)).is_some());
/// assert!(market.funding_curve(&FundingLabel(Currency::EUR)).is_none());
/// ```
#[derive(Clone, Default)]
pub struct MarketParams {
    funding_curves: HashMap<FundingLabel, Arc<dyn DiscountCurve>>,
    credit_curves: HashMap<CreditLabel, Arc<dyn CreditCurve>>,
    forward_curves: HashMap<ForwardLabel, Arc<dyn ForwardCurve>>,
    fx_curves: HashMap<CurrencyPair, Arc<dyn FxCurve>>,
    fixings: FixingStore,
}

impl std::fmt::Debug for MarketParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketParams")
            .field("funding_curves", &self.funding_curves.keys().collect::<Vec<_>>())
            .field("credit_curves", &self.credit_curves.keys().collect::<Vec<_>>())
            .field("forward_curves", &self.forward_curves.keys().collect::<Vec<_>>())
            .field("fx_curves", &self.fx_curves.keys().collect::<Vec<_>>())
            .field("fixings", &self.fixings.len())
            .finish()
    }
}

impl MarketParams {
    /// Creates an empty market.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Registration ====================

    /// Registers a funding curve.
    #[must_use]
    pub fn with_funding_curve(
        mut self,
        label: FundingLabel,
        curve: impl DiscountCurve + 'static,
    ) -> Self {
        debug!("registered funding curve {label}");
        self.funding_curves.insert(label, Arc::new(curve));
        self
    }

    /// Registers a credit curve.
    #[must_use]
    pub fn with_credit_curve(mut self, label: CreditLabel, curve: impl CreditCurve + 'static) -> Self {
        debug!("registered credit curve {label}");
        self.credit_curves.insert(label, Arc::new(curve));
        self
    }

    /// Registers a forward curve.
    #[must_use]
    pub fn with_forward_curve(
        mut self,
        label: ForwardLabel,
        curve: impl ForwardCurve + 'static,
    ) -> Self {
        debug!("registered forward curve {label}");
        self.forward_curves.insert(label, Arc::new(curve));
        self
    }

    /// Registers an FX curve.
    #[must_use]
    pub fn with_fx_curve(mut self, pair: CurrencyPair, curve: impl FxCurve + 'static) -> Self {
        debug!("registered fx curve {pair}");
        self.fx_curves.insert(pair, Arc::new(curve));
        self
    }

    /// Replaces the fixing store.
    #[must_use]
    pub fn with_fixings(mut self, fixings: FixingStore) -> Self {
        self.fixings = fixings;
        self
    }

    /// Returns the fixing store for in-place updates.
    pub fn fixings_mut(&mut self) -> &mut FixingStore {
        &mut self.fixings
    }

    // ==================== Lookup ====================

    /// Returns the funding curve for a label.
    #[must_use]
    pub fn funding_curve(&self, label: &FundingLabel) -> Option<&dyn DiscountCurve> {
        self.funding_curves.get(label).map(Arc::as_ref)
    }

    /// Returns the funding curve for a currency's funding label.
    #[must_use]
    pub fn funding_curve_for(&self, currency: Currency) -> Option<&dyn DiscountCurve> {
        self.funding_curve(&FundingLabel(currency))
    }

    /// Returns the credit curve for a label.
    #[must_use]
    pub fn credit_curve(&self, label: &CreditLabel) -> Option<&dyn CreditCurve> {
        self.credit_curves.get(label).map(Arc::as_ref)
    }

    /// Returns the forward curve for a label.
    #[must_use]
    pub fn forward_curve(&self, label: &ForwardLabel) -> Option<&dyn ForwardCurve> {
        self.forward_curves.get(label).map(Arc::as_ref)
    }

    /// Returns the FX curve for a pair.
    #[must_use]
    pub fn fx_curve(&self, pair: &CurrencyPair) -> Option<&dyn FxCurve> {
        self.fx_curves.get(pair).map(Arc::as_ref)
    }

    /// Returns the stored fixings.
    #[must_use]
    pub fn fixings(&self) -> &FixingStore {
        &self.fixings
    }

    /// Returns the funding curve for a label or an error.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::CurveNotFound` if no curve is registered.
    pub fn funding_curve_required(&self, label: &FundingLabel) -> CurveResult<&dyn DiscountCurve> {
        self.funding_curve(label)
            .ok_or_else(|| CurveError::curve_not_found("funding", label))
    }

    /// Returns the credit curve for a label or an error.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::CurveNotFound` if no curve is registered.
    pub fn credit_curve_required(&self, label: &CreditLabel) -> CurveResult<&dyn CreditCurve> {
        self.credit_curve(label)
            .ok_or_else(|| CurveError::curve_not_found("credit", label))
    }

    /// Returns the forward curve for a label or an error.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::CurveNotFound` if no curve is registered.
    pub fn forward_curve_required(&self, label: &ForwardLabel) -> CurveResult<&dyn ForwardCurve> {
        self.forward_curve(label)
            .ok_or_else(|| CurveError::curve_not_found("forward", label))
    }

    /// Returns the FX curve for a pair or an error.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::CurveNotFound` if no curve is registered.
    pub fn fx_curve_required(&self, pair: &CurrencyPair) -> CurveResult<&dyn FxCurve> {
        self.fx_curve(pair)
            .ok_or_else(|| CurveError::curve_not_found("fx", pair))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{FlatDiscountCurve, FlatForwardCurve, FlatFxCurve, FlatHazardCurve};
    use parity_core::Date;

    fn today() -> Date {
        Date::from_ymd(2024, 1, 15).unwrap()
    }

    fn market() -> MarketParams {
        MarketParams::new()
            .with_funding_curve(FundingLabel(Currency::USD), FlatDiscountCurve::new(today(), 0.05).unwrap())
            .with_credit_curve(CreditLabel::new("ACME"), FlatHazardCurve::new(today(), 0.02, 0.4).unwrap())
            .with_forward_curve(
                ForwardLabel::new(Currency::USD, "SOFR", "3M"),
                FlatForwardCurve::new(0.05).unwrap(),
            )
            .with_fx_curve(
                CurrencyPair::new(Currency::EUR, Currency::USD),
                FlatFxCurve::new(1.1).unwrap(),
            )
    }

    #[test]
    fn test_lookups() {
        let market = market();
        assert!(market.funding_curve_for(Currency::USD).is_some());
        assert!(market.credit_curve(&CreditLabel::new("ACME")).is_some());
        assert!(market
            .forward_curve(&ForwardLabel::new(Currency::USD, "SOFR", "3M"))
            .is_some());
        assert!(market
            .fx_curve(&CurrencyPair::new(Currency::EUR, Currency::USD))
            .is_some());
        assert!(market
            .fx_curve(&CurrencyPair::new(Currency::USD, Currency::EUR))
            .is_none());
    }

    #[test]
    fn test_required_lookups_fail_with_label() {
        let market = market();
        let err = market
            .funding_curve_required(&FundingLabel(Currency::EUR))
            .err()
            .unwrap();
        assert_eq!(err, CurveError::curve_not_found("funding", "FUNDING/EUR"));
        assert!(market.credit_curve_required(&CreditLabel::new("OTHER")).is_err());
    }

    #[test]
    fn test_clone_shares_curves() {
        let market = market();
        let scenario = market.clone();
        let df1 = market.funding_curve_for(Currency::USD).unwrap().df(today().add_days(365)).unwrap();
        let df2 = scenario.funding_curve_for(Currency::USD).unwrap().df(today().add_days(365)).unwrap();
        assert_eq!(df1, df2);
    }

    #[test]
    fn test_fixings_mut() {
        let mut market = market();
        let label = ForwardLabel::new(Currency::USD, "SOFR", "3M");
        market.fixings_mut().add_fixing(&label, today(), 0.053).unwrap();
        assert_eq!(market.fixings().get_fixing(&label, today()), Some(0.053));
    }
}
