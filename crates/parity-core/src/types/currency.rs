//! ISO 4217 currency codes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ParityError;

/// Currencies a period can pay or reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum Currency {
    /// United States Dollar
    #[default]
    USD,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// Japanese Yen
    JPY,
    /// Swiss Franc
    CHF,
    /// Canadian Dollar
    CAD,
    /// Australian Dollar
    AUD,
    /// Swedish Krona
    SEK,
    /// Brazilian Real
    BRL,
}

impl Currency {
    /// Returns the ISO 4217 3-letter code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::SEK => "SEK",
            Currency::BRL => "BRL",
        }
    }

    /// Returns the calendar name conventionally used for this currency.
    #[must_use]
    pub fn default_calendar(&self) -> &'static str {
        match self {
            Currency::USD => "US",
            _ => "WEEKEND",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = ParityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            "CHF" => Ok(Currency::CHF),
            "CAD" => Ok(Currency::CAD),
            "AUD" => Ok(Currency::AUD),
            "SEK" => Ok(Currency::SEK),
            "BRL" => Ok(Currency::BRL),
            _ => Err(ParityError::unknown_convention("currency", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for ccy in [Currency::USD, Currency::EUR, Currency::GBP, Currency::BRL] {
            assert_eq!(ccy.code().parse::<Currency>().unwrap(), ccy);
        }
        assert!("XYZ".parse::<Currency>().is_err());
    }
}
