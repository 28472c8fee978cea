//! Reset sub-periods for floating rate compounding.

use std::fmt;
use std::str::FromStr;

use parity_core::Date;
use serde::{Deserialize, Serialize};

use crate::error::{PeriodError, PeriodResult};

/// Where a date falls relative to a reset sub-period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeLocation {
    /// `date < start`: the sub-period is entirely in the future.
    Left,
    /// `start <= date <= end`.
    Inside,
    /// `date > end`: the sub-period is entirely in the past.
    Right,
}

/// One observation interval of a floating coupon.
///
/// The fixing date may precede, coincide with, or follow the interval
/// (in advance or in arrears fixing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetSubPeriod {
    start: Date,
    end: Date,
    fixing: Date,
}

impl ResetSubPeriod {
    /// Creates a reset sub-period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidPeriod` if `start > end`.
    pub fn new(start: Date, end: Date, fixing: Date) -> PeriodResult<Self> {
        if start > end {
            return Err(PeriodError::invalid_period(format!(
                "reset sub-period start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end, fixing })
    }

    /// Returns the start date.
    #[must_use]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Returns the end date.
    #[must_use]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Returns the fixing date.
    #[must_use]
    pub fn fixing(&self) -> Date {
        self.fixing
    }

    /// Classifies `date` relative to this sub-period.
    #[must_use]
    pub fn node_location(&self, date: Date) -> NodeLocation {
        if date < self.start {
            NodeLocation::Left
        } else if date > self.end {
            NodeLocation::Right
        } else {
            NodeLocation::Inside
        }
    }
}

/// How sub-period rates combine into the period rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccrualCompounding {
    /// DCF-weighted average of the sub-period rates.
    #[default]
    Arithmetic,
    /// Sub-period growth factors multiply.
    Geometric,
}

impl AccrualCompounding {
    /// Returns the integer code used by serialized schedules.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            AccrualCompounding::Arithmetic => 0,
            AccrualCompounding::Geometric => 1,
        }
    }
}

impl TryFrom<i32> for AccrualCompounding {
    type Error = PeriodError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(AccrualCompounding::Arithmetic),
            1 => Ok(AccrualCompounding::Geometric),
            other => Err(PeriodError::contract_violation(format!(
                "accrual compounding code {other} is neither arithmetic (0) nor geometric (1)"
            ))),
        }
    }
}

impl FromStr for AccrualCompounding {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ARITHMETIC" | "AVERAGE" | "SIMPLE" => Ok(AccrualCompounding::Arithmetic),
            "GEOMETRIC" | "COMPOUND" | "COMPOUNDED" => Ok(AccrualCompounding::Geometric),
            _ => Err(PeriodError::contract_violation(format!(
                "unknown accrual compounding '{s}'"
            ))),
        }
    }
}

impl fmt::Display for AccrualCompounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccrualCompounding::Arithmetic => write!(f, "Arithmetic"),
            AccrualCompounding::Geometric => write!(f, "Geometric"),
        }
    }
}

/// The reset sub-periods of one floating coupon and their compounding rule.
///
/// Sub-periods are kept in insertion order, which callers supply
/// chronologically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetSubPeriodSet {
    accrual_compounding: AccrualCompounding,
    sub_periods: Vec<ResetSubPeriod>,
}

impl ResetSubPeriodSet {
    /// Creates a set.
    #[must_use]
    pub fn new(accrual_compounding: AccrualCompounding, sub_periods: Vec<ResetSubPeriod>) -> Self {
        Self {
            accrual_compounding,
            sub_periods,
        }
    }

    /// Creates a set from a serialized compounding code.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::ContractViolation` for a code other than 0 or 1.
    pub fn from_code(code: i32, sub_periods: Vec<ResetSubPeriod>) -> PeriodResult<Self> {
        Ok(Self::new(AccrualCompounding::try_from(code)?, sub_periods))
    }

    /// Creates a set holding one sub-period.
    #[must_use]
    pub fn single(sub_period: ResetSubPeriod) -> Self {
        Self::new(AccrualCompounding::Arithmetic, vec![sub_period])
    }

    /// Returns the compounding rule.
    #[must_use]
    pub fn accrual_compounding(&self) -> AccrualCompounding {
        self.accrual_compounding
    }

    /// Returns the sub-periods.
    #[must_use]
    pub fn sub_periods(&self) -> &[ResetSubPeriod] {
        &self.sub_periods
    }

    /// Returns an iterator over the sub-periods.
    pub fn iter(&self) -> std::slice::Iter<'_, ResetSubPeriod> {
        self.sub_periods.iter()
    }

    /// Returns the number of sub-periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sub_periods.len()
    }

    /// Returns true if there are no sub-periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sub_periods.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResetSubPeriodSet {
    type Item = &'a ResetSubPeriod;
    type IntoIter = std::slice::Iter<'a, ResetSubPeriod>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_node_location() {
        let sub = ResetSubPeriod::new(d(2024, 1, 15), d(2024, 4, 15), d(2024, 1, 11)).unwrap();
        assert_eq!(sub.node_location(d(2024, 1, 14)), NodeLocation::Left);
        assert_eq!(sub.node_location(d(2024, 1, 15)), NodeLocation::Inside);
        assert_eq!(sub.node_location(d(2024, 4, 15)), NodeLocation::Inside);
        assert_eq!(sub.node_location(d(2024, 4, 16)), NodeLocation::Right);
    }

    #[test]
    fn test_fixing_may_lag() {
        let arrears = ResetSubPeriod::new(d(2024, 1, 15), d(2024, 4, 15), d(2024, 4, 15));
        assert!(arrears.is_ok());
        assert!(ResetSubPeriod::new(d(2024, 4, 15), d(2024, 1, 15), d(2024, 1, 11)).is_err());
    }

    #[test]
    fn test_compounding_codes() {
        assert_eq!(AccrualCompounding::try_from(0).unwrap(), AccrualCompounding::Arithmetic);
        assert_eq!(AccrualCompounding::try_from(1).unwrap(), AccrualCompounding::Geometric);
        assert!(AccrualCompounding::try_from(2).is_err());
        assert!(AccrualCompounding::try_from(-1).is_err());
        assert_eq!("geometric".parse::<AccrualCompounding>().unwrap(), AccrualCompounding::Geometric);
        assert!("harmonic".parse::<AccrualCompounding>().is_err());
    }

    #[test]
    fn test_set_echoes_rule() {
        let sub = ResetSubPeriod::new(d(2024, 1, 15), d(2024, 4, 15), d(2024, 1, 11)).unwrap();
        for rule in [AccrualCompounding::Arithmetic, AccrualCompounding::Geometric] {
            let set = ResetSubPeriodSet::from_code(rule.code(), vec![sub]).unwrap();
            assert_eq!(set.accrual_compounding(), rule);
            assert_eq!(set.len(), 1);
        }
        assert!(ResetSubPeriodSet::from_code(7, vec![sub]).is_err());
    }
}
