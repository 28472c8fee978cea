//! 30/360 day count conventions.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

#[inline]
fn is_last_day_of_february(date: Date) -> bool {
    date.month() == 2 && date.is_end_of_month()
}

#[inline]
fn thirty_360_days(start: Date, end: Date, d1: i64, d2: i64) -> i64 {
    let y1 = i64::from(start.year());
    let y2 = i64::from(end.year());
    let m1 = i64::from(start.month());
    let m2 = i64::from(end.month());
    360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
}

/// 30/360 US day count convention (Bond Basis).
///
/// # Rules
///
/// 1. If `eom` is set and D1 is the last day of February, change D1 to 30
/// 2. If D1 is 31, change D1 to 30
/// 3. If `eom` is set and both D1 and D2 are the last day of February,
///    change D2 to 30
/// 4. If D2 is 31 and D1 is now >= 30, change D2 to 30
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360US {
    eom: bool,
}

impl Thirty360US {
    /// Creates the convention, with or without the February month-end rules.
    #[must_use]
    pub fn new(eom: bool) -> Self {
        Self { eom }
    }
}

impl DayCount for Thirty360US {
    fn name(&self) -> &'static str {
        "30/360 US"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = i64::from(start.day());
        let mut d2 = i64::from(end.day());

        let d1_feb_eom = self.eom && is_last_day_of_february(start);
        if d1_feb_eom || d1 == 31 {
            d1 = 30;
        }

        if d1_feb_eom && is_last_day_of_february(end) {
            d2 = 30;
        } else if d2 == 31 && d1 >= 30 {
            d2 = 30;
        }

        thirty_360_days(start, end, d1, d2)
    }
}

/// 30E/360 day count convention (Eurobond Basis).
///
/// Any 31st, on either side, counts as the 30th.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = i64::from(start.day().min(30));
        let d2 = i64::from(end.day().min(30));
        thirty_360_days(start, end, d1, d2)
    }
}

/// 30E/360 ISDA day count convention.
///
/// Month-end dates count as the 30th. An end date on the last day of
/// February is only moved when `adjust_february_end` is set, which
/// callers clear when the end date is the instrument maturity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thirty360EIsda {
    adjust_february_end: bool,
}

impl Thirty360EIsda {
    /// Creates the convention.
    #[must_use]
    pub fn new(adjust_february_end: bool) -> Self {
        Self {
            adjust_february_end,
        }
    }
}

impl Default for Thirty360EIsda {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DayCount for Thirty360EIsda {
    fn name(&self) -> &'static str {
        "30E/360 ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = if start.is_end_of_month() {
            30
        } else {
            i64::from(start.day())
        };
        let d2 = if end.is_end_of_month()
            && (end.month() != 2 || self.adjust_february_end)
        {
            30
        } else {
            i64::from(end.day())
        };
        thirty_360_days(start, end, d1, d2)
    }
}

/// 30/360 German day count convention.
///
/// Every month-end date, February included, counts as the 30th.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360German;

impl DayCount for Thirty360German {
    fn name(&self) -> &'static str {
        "30/360 German"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = if start.is_end_of_month() {
            30
        } else {
            i64::from(start.day())
        };
        let d2 = if end.is_end_of_month() {
            30
        } else {
            i64::from(end.day())
        };
        thirty_360_days(start, end, d1, d2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_thirty360_us_regular() {
        let dc = Thirty360US::new(true);
        assert_eq!(dc.day_count(d(2025, 1, 15), d(2025, 7, 15)), 180);
        assert_eq!(dc.year_fraction(d(2025, 1, 15), d(2025, 7, 15)), dec!(0.5));
        assert_eq!(dc.day_count(d(2025, 1, 31), d(2025, 3, 31)), 60);
    }

    #[test]
    fn test_thirty360_us_february_rules_follow_eom_flag() {
        let start = d(2024, 2, 29);
        let end = d(2024, 8, 31);
        assert_eq!(Thirty360US::new(true).day_count(start, end), 180);
        // Without the February rule D1 stays 29 and D2 stays 31.
        assert_eq!(Thirty360US::new(false).day_count(start, end), 182);

        let feb_to_feb = (d(2023, 2, 28), d(2024, 2, 29));
        assert_eq!(Thirty360US::new(true).day_count(feb_to_feb.0, feb_to_feb.1), 360);
        assert_eq!(Thirty360US::new(false).day_count(feb_to_feb.0, feb_to_feb.1), 361);
    }

    #[test]
    fn test_thirty360_e() {
        assert_eq!(Thirty360E.day_count(d(2025, 1, 31), d(2025, 3, 31)), 60);
        assert_eq!(Thirty360E.day_count(d(2025, 1, 30), d(2025, 2, 28)), 28);
    }

    #[test]
    fn test_thirty360_e_isda() {
        let adjusted = Thirty360EIsda::default();
        assert_eq!(adjusted.day_count(d(2025, 1, 30), d(2025, 2, 28)), 30);
        let maturity = Thirty360EIsda::new(false);
        assert_eq!(maturity.day_count(d(2025, 1, 30), d(2025, 2, 28)), 28);
        assert_eq!(adjusted.day_count(d(2024, 2, 29), d(2024, 8, 31)), 180);
    }

    #[test]
    fn test_thirty360_german() {
        assert_eq!(Thirty360German.day_count(d(2025, 2, 28), d(2025, 3, 31)), 30);
        assert_eq!(Thirty360German.day_count(d(2025, 1, 15), d(2025, 2, 28)), 45);
    }
}
