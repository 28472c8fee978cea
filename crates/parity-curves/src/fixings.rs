//! Historical fixings keyed by label and date.

use std::collections::BTreeMap;
use std::fmt::Display;

use parity_core::Date;
use serde::{Deserialize, Serialize};

use crate::error::{finite, CurveError, CurveResult};

/// Storage for observed fixings (rate indices and FX pairs).
///
/// Fixings are keyed by the label's display string, so a
/// [`ForwardLabel`](crate::ForwardLabel) and a
/// [`CurrencyPair`](crate::CurrencyPair) share one store.
///
/// ```rust
/// use parity_core::{Currency, Date};
/// use parity_curves::{FixingStore, ForwardLabel};
///
/// let sofr = ForwardLabel::new(Currency::USD, "SOFR", "3M");
/// let date = Date::from_ymd(2024, 1, 11).unwrap();
///
/// let mut store = FixingStore::new();
/// store.add_fixing(&sofr, date, 0.0531).unwrap();
/// assert_eq!(store.get_fixing(&sofr, date), Some(0.0531));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixingStore {
    fixings: BTreeMap<String, BTreeMap<Date, f64>>,
}

impl FixingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fixing, replacing any existing value for the same date.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not finite.
    pub fn add_fixing(&mut self, label: &impl Display, date: Date, value: f64) -> CurveResult<()> {
        let value = finite("fixing", value)?;
        self.fixings
            .entry(label.to_string())
            .or_default()
            .insert(date, value);
        Ok(())
    }

    /// Returns the fixing for a label on a date.
    #[must_use]
    pub fn get_fixing(&self, label: &impl Display, date: Date) -> Option<f64> {
        self.fixings
            .get(&label.to_string())
            .and_then(|series| series.get(&date))
            .copied()
    }

    /// Returns the fixing for a label on a date, or an error if absent.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::MissingFixing` if no value is stored.
    pub fn fixing_required(&self, label: &impl Display, date: Date) -> CurveResult<f64> {
        self.get_fixing(label, date)
            .ok_or_else(|| CurveError::missing_fixing(label.to_string(), date))
    }

    /// Returns the most recent fixing on or before `date`.
    #[must_use]
    pub fn last_fixing_on_or_before(&self, label: &impl Display, date: Date) -> Option<(Date, f64)> {
        self.fixings
            .get(&label.to_string())
            .and_then(|series| series.range(..=date).next_back())
            .map(|(d, v)| (*d, *v))
    }

    /// Returns the number of fixings stored for a label.
    #[must_use]
    pub fn count(&self, label: &impl Display) -> usize {
        self.fixings.get(&label.to_string()).map_or(0, BTreeMap::len)
    }

    /// Returns the total number of fixings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fixings.values().map(BTreeMap::len).sum()
    }

    /// Returns true if the store holds no fixings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::{CurrencyPair, ForwardLabel};
    use parity_core::Currency;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_add_and_get() {
        let sofr = ForwardLabel::new(Currency::USD, "SOFR", "3M");
        let eurusd = CurrencyPair::new(Currency::EUR, Currency::USD);
        let mut store = FixingStore::new();
        store.add_fixing(&sofr, d(2024, 1, 11), 0.0531).unwrap();
        store.add_fixing(&eurusd, d(2024, 1, 11), 1.09).unwrap();

        assert_eq!(store.get_fixing(&sofr, d(2024, 1, 11)), Some(0.0531));
        assert_eq!(store.get_fixing(&eurusd, d(2024, 1, 11)), Some(1.09));
        assert_eq!(store.get_fixing(&sofr, d(2024, 1, 12)), None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_fixing_required() {
        let sofr = ForwardLabel::new(Currency::USD, "SOFR", "3M");
        let store = FixingStore::new();
        let err = store.fixing_required(&sofr, d(2024, 1, 11)).unwrap_err();
        assert!(matches!(err, CurveError::MissingFixing { .. }));
    }

    #[test]
    fn test_last_fixing_on_or_before() {
        let sofr = ForwardLabel::new(Currency::USD, "SOFR", "ON");
        let mut store = FixingStore::new();
        store.add_fixing(&sofr, d(2024, 1, 10), 0.053).unwrap();
        store.add_fixing(&sofr, d(2024, 1, 12), 0.054).unwrap();
        assert_eq!(
            store.last_fixing_on_or_before(&sofr, d(2024, 1, 11)),
            Some((d(2024, 1, 10), 0.053))
        );
        assert_eq!(store.last_fixing_on_or_before(&sofr, d(2024, 1, 9)), None);
        assert_eq!(store.count(&sofr), 2);
    }

    #[test]
    fn test_rejects_non_finite() {
        let sofr = ForwardLabel::new(Currency::USD, "SOFR", "3M");
        let mut store = FixingStore::new();
        assert!(store.add_fixing(&sofr, d(2024, 1, 11), f64::NAN).is_err());
        assert!(store.is_empty());
    }
}
