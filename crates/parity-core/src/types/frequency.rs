//! Coupon and reset frequency.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ParityError, ParityResult};

/// Payment or reset frequency.
///
/// A regular period spans `12 / periods_per_year` months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// One period per year
    Annual,
    /// Two periods per year
    #[default]
    SemiAnnual,
    /// Three periods per year
    EveryFourMonths,
    /// Four periods per year
    Quarterly,
    /// Six periods per year
    BiMonthly,
    /// Twelve periods per year
    Monthly,
    /// A single period spanning the whole instrument
    Zero,
}

impl Frequency {
    /// Returns the number of periods per year (0 for `Zero`).
    #[must_use]
    pub const fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::EveryFourMonths => 3,
            Frequency::Quarterly => 4,
            Frequency::BiMonthly => 6,
            Frequency::Monthly => 12,
            Frequency::Zero => 0,
        }
    }

    /// Returns the regular tenor in months (0 for `Zero`).
    #[must_use]
    pub const fn months_per_period(&self) -> u32 {
        match self.periods_per_year() {
            0 => 0,
            n => 12 / n,
        }
    }

    /// Returns true for a single-period (zero coupon) schedule.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        matches!(self, Frequency::Zero)
    }

    /// Builds a frequency from a periods-per-year count.
    ///
    /// # Errors
    ///
    /// Returns `ParityError::UnknownConvention` unless `n` divides 12 (or is 0).
    pub fn from_periods_per_year(n: u32) -> ParityResult<Self> {
        match n {
            0 => Ok(Frequency::Zero),
            1 => Ok(Frequency::Annual),
            2 => Ok(Frequency::SemiAnnual),
            3 => Ok(Frequency::EveryFourMonths),
            4 => Ok(Frequency::Quarterly),
            6 => Ok(Frequency::BiMonthly),
            12 => Ok(Frequency::Monthly),
            _ => Err(ParityError::unknown_convention("frequency", n.to_string())),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::EveryFourMonths => "Every Four Months",
            Frequency::Quarterly => "Quarterly",
            Frequency::BiMonthly => "Bi-Monthly",
            Frequency::Monthly => "Monthly",
            Frequency::Zero => "Zero",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for Frequency {
    type Err = ParityError;

    /// Accepts names ("Quarterly", "SEMI-ANNUAL"), tenor codes ("3M", "1Y"),
    /// and periods-per-year counts ("4").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        match normalized.as_str() {
            "ANNUAL" | "1Y" | "12M" => Ok(Frequency::Annual),
            "SEMI-ANNUAL" | "SEMIANNUAL" | "6M" => Ok(Frequency::SemiAnnual),
            "EVERY FOUR MONTHS" | "4M" => Ok(Frequency::EveryFourMonths),
            "QUARTERLY" | "3M" => Ok(Frequency::Quarterly),
            "BI-MONTHLY" | "BIMONTHLY" | "2M" => Ok(Frequency::BiMonthly),
            "MONTHLY" | "1M" => Ok(Frequency::Monthly),
            "ZERO" | "ONCE" | "Z" => Ok(Frequency::Zero),
            other => other
                .parse::<u32>()
                .map_err(|_| ParityError::unknown_convention("frequency", s))
                .and_then(Self::from_periods_per_year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_per_period() {
        assert_eq!(Frequency::Annual.months_per_period(), 12);
        assert_eq!(Frequency::SemiAnnual.months_per_period(), 6);
        assert_eq!(Frequency::EveryFourMonths.months_per_period(), 4);
        assert_eq!(Frequency::Quarterly.months_per_period(), 3);
        assert_eq!(Frequency::Monthly.months_per_period(), 1);
        assert_eq!(Frequency::Zero.months_per_period(), 0);
    }

    #[test]
    fn test_from_periods_per_year() {
        assert_eq!(Frequency::from_periods_per_year(4).unwrap(), Frequency::Quarterly);
        assert!(Frequency::from_periods_per_year(5).is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!("3M".parse::<Frequency>().unwrap(), Frequency::Quarterly);
        assert_eq!("semi-annual".parse::<Frequency>().unwrap(), Frequency::SemiAnnual);
        assert_eq!("12".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert!("weekly".parse::<Frequency>().is_err());
    }
}
