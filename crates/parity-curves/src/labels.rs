//! Labels identifying which market curve applies to a period.
//!
//! Labels are small value types. Their `Display` output is stable and is
//! used as the fixing store key.

use std::fmt;

use parity_core::Currency;
use serde::{Deserialize, Serialize};

/// Identifies the discounting curve for cash flows paid in a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FundingLabel(pub Currency);

impl FundingLabel {
    /// Returns the currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.0
    }
}

impl fmt::Display for FundingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FUNDING/{}", self.0)
    }
}

/// Identifies the collateral curve for a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollateralLabel(pub Currency);

impl CollateralLabel {
    /// Returns the currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.0
    }
}

impl fmt::Display for CollateralLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "COLLATERAL/{}", self.0)
    }
}

/// Identifies a reference entity's credit curve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreditLabel(pub String);

impl CreditLabel {
    /// Creates a credit label.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for CreditLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a floating rate index, e.g. `USD-SOFR-3M`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForwardLabel {
    /// Currency of the index.
    pub currency: Currency,
    /// Index name (SOFR, EURIBOR, ...).
    pub index: String,
    /// Index tenor (3M, 6M, ON, ...).
    pub tenor: String,
}

impl ForwardLabel {
    /// Creates a forward label.
    pub fn new(currency: Currency, index: impl Into<String>, tenor: impl Into<String>) -> Self {
        Self {
            currency,
            index: index.into(),
            tenor: tenor.into(),
        }
    }
}

impl fmt::Display for ForwardLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.currency, self.index, self.tenor)
    }
}

/// A currency pair quoted as units of `quote` per unit of `base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Base currency.
    pub base: Currency,
    /// Quote currency.
    pub quote: Currency,
}

impl CurrencyPair {
    /// Creates a currency pair.
    #[must_use]
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// Returns the inverted pair.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            base: self.quote,
            quote: self.base,
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_display() {
        assert_eq!(FundingLabel(Currency::USD).to_string(), "FUNDING/USD");
        assert_eq!(CollateralLabel(Currency::EUR).to_string(), "COLLATERAL/EUR");
        assert_eq!(CreditLabel::new("ACME").to_string(), "ACME");
        assert_eq!(
            ForwardLabel::new(Currency::USD, "SOFR", "3M").to_string(),
            "USD-SOFR-3M"
        );
        assert_eq!(CurrencyPair::new(Currency::EUR, Currency::USD).to_string(), "EURUSD");
    }

    #[test]
    fn test_pair_inverse() {
        let pair = CurrencyPair::new(Currency::EUR, Currency::USD);
        assert_eq!(pair.inverse().inverse(), pair);
        assert_eq!(pair.inverse().to_string(), "USDEUR");
    }
}
