//! Day count conventions.
//!
//! Each convention is a small type implementing [`DayCount`] with exact
//! `Decimal` arithmetic. Period code does not call them directly: it goes
//! through the [`DayCountOracle`] seam, which selects the convention at
//! runtime, applies the end-of-month flag and ACT/ACT reference period,
//! and returns an `f64` fraction.
//!
//! # Supported Conventions
//!
//! - ACT family: [`Act360`], [`Act365Fixed`], [`Act365Leap`],
//!   [`ActActIsda`], [`ActActIcma`], [`ActActAfb`]
//! - 30/360 family: [`Thirty360US`], [`Thirty360E`], [`Thirty360EIsda`],
//!   [`Thirty360German`]
//! - Business days: [`Bus252`]
//!
//! ```rust
//! use parity_core::daycounts::{DayCountConvention, DayCountOracle, StandardDayCounts};
//! use parity_core::types::Date;
//!
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2025, 4, 1).unwrap();
//! let yf = StandardDayCounts
//!     .year_fraction(start, end, DayCountConvention::Act360, false, None, None)
//!     .unwrap();
//! assert!((yf - 0.25).abs() < 1e-12);
//! ```

mod actual;
mod business252;
mod oracle;
mod thirty360;

pub use actual::{Act360, Act365Fixed, Act365Leap, ActActAfb, ActActIcma, ActActIsda};
pub use business252::Bus252;
pub use oracle::{DayCountOracle, StandardDayCounts};
pub use thirty360::{Thirty360E, Thirty360EIsda, Thirty360German, Thirty360US};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ParityError;
use crate::types::{Date, Frequency};

/// Trait for a single day count convention.
pub trait DayCount {
    /// Returns the market name of the convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Negative when `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Calculates the day count between two dates under the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Reference period information for ACT/ACT style conventions.
///
/// ACT/ACT conventions are not linear in elapsed days: the fraction for a
/// sub-interval depends on the regular coupon period it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActActParams {
    /// Coupon frequency of the instrument.
    pub frequency: Frequency,
    /// Start of the regular (possibly notional) coupon period.
    pub reference_start: Date,
    /// End of the regular (possibly notional) coupon period.
    pub reference_end: Date,
}

impl ActActParams {
    /// Creates reference period parameters.
    #[must_use]
    pub fn new(frequency: Frequency, reference_start: Date, reference_end: Date) -> Self {
        Self {
            frequency,
            reference_start,
            reference_end,
        }
    }
}

/// Runtime selector over all supported conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DayCountConvention {
    /// Actual/360
    #[default]
    Act360,
    /// Actual/365 Fixed
    Act365Fixed,
    /// Actual/365 Leap (ISMA year)
    Act365Leap,
    /// Actual/Actual ISDA
    ActActIsda,
    /// Actual/Actual ICMA (needs a reference period)
    ActActIcma,
    /// Actual/Actual AFB
    ActActAfb,
    /// 30/360 US bond basis
    Thirty360US,
    /// 30E/360 Eurobond basis
    Thirty360E,
    /// 30E/360 ISDA
    Thirty360EIsda,
    /// 30/360 German
    Thirty360German,
    /// Business days / 252 (needs a calendar)
    Bus252,
}

impl DayCountConvention {
    /// Returns the canonical market name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::Act365Leap => "ACT/365L",
            DayCountConvention::ActActIsda => "ACT/ACT ISDA",
            DayCountConvention::ActActIcma => "ACT/ACT ICMA",
            DayCountConvention::ActActAfb => "ACT/ACT AFB",
            DayCountConvention::Thirty360US => "30/360 US",
            DayCountConvention::Thirty360E => "30E/360",
            DayCountConvention::Thirty360EIsda => "30E/360 ISDA",
            DayCountConvention::Thirty360German => "30/360 German",
            DayCountConvention::Bus252 => "BUS/252",
        }
    }

    /// Returns all conventions.
    #[must_use]
    pub const fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act360,
            DayCountConvention::Act365Fixed,
            DayCountConvention::Act365Leap,
            DayCountConvention::ActActIsda,
            DayCountConvention::ActActIcma,
            DayCountConvention::ActActAfb,
            DayCountConvention::Thirty360US,
            DayCountConvention::Thirty360E,
            DayCountConvention::Thirty360EIsda,
            DayCountConvention::Thirty360German,
            DayCountConvention::Bus252,
        ]
    }

    /// True for the ACT/ACT family, whose fractions are not linear in days.
    #[must_use]
    pub const fn is_act_act(&self) -> bool {
        matches!(
            self,
            DayCountConvention::ActActIsda
                | DayCountConvention::ActActIcma
                | DayCountConvention::ActActAfb
        )
    }

    /// True if the convention counts business days and needs a calendar.
    #[must_use]
    pub const fn requires_calendar(&self) -> bool {
        matches!(self, DayCountConvention::Bus252)
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = ParityError;

    /// Accepts canonical names and the common aliases ("ACTUAL/360",
    /// "BOND", "EUROBOND", "ISMA", ...), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        match normalized.as_str() {
            "ACT/360" | "ACTUAL/360" | "A360" | "ACT360" => Ok(DayCountConvention::Act360),
            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "A365F" | "ACT365" => {
                Ok(DayCountConvention::Act365Fixed)
            }
            "ACT/365L" | "ACT/365 LEAP" | "ISMA-YEAR" => Ok(DayCountConvention::Act365Leap),
            "ACT/ACT" | "ACT/ACT ISDA" | "ACTUAL/ACTUAL" | "ACTUAL/ACTUAL ISDA" => {
                Ok(DayCountConvention::ActActIsda)
            }
            "ACT/ACT ICMA" | "ACTUAL/ACTUAL ICMA" | "ACT/ACT ISMA" | "ISMA" => {
                Ok(DayCountConvention::ActActIcma)
            }
            "ACT/ACT AFB" | "ACTUAL/ACTUAL AFB" | "AFB" => Ok(DayCountConvention::ActActAfb),
            "30/360" | "30/360 US" | "30U/360" | "BOND" => Ok(DayCountConvention::Thirty360US),
            "30E/360" | "30/360 ICMA" | "EUROBOND" => Ok(DayCountConvention::Thirty360E),
            "30E/360 ISDA" => Ok(DayCountConvention::Thirty360EIsda),
            "30/360 GERMAN" | "30E/360 GERMAN" | "GERMAN" => {
                Ok(DayCountConvention::Thirty360German)
            }
            "BUS/252" | "BUS252" | "BU/252" => Ok(DayCountConvention::Bus252),
            _ => Err(ParityError::unknown_convention("day count", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for convention in DayCountConvention::all() {
            let parsed: DayCountConvention = convention.name().parse().unwrap();
            assert_eq!(*convention, parsed);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("bond".parse::<DayCountConvention>().unwrap(), DayCountConvention::Thirty360US);
        assert_eq!("Actual/360".parse::<DayCountConvention>().unwrap(), DayCountConvention::Act360);
        assert_eq!("ISMA".parse::<DayCountConvention>().unwrap(), DayCountConvention::ActActIcma);
    }

    #[test]
    fn test_unknown_convention() {
        let err = "ACT/999".parse::<DayCountConvention>().unwrap_err();
        assert!(err.to_string().contains("day count"));
    }

    #[test]
    fn test_classification() {
        assert!(DayCountConvention::ActActIcma.is_act_act());
        assert!(!DayCountConvention::Act360.is_act_act());
        assert!(DayCountConvention::Bus252.requires_calendar());
    }
}
