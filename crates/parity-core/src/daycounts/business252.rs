//! Business/252 day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::calendars::Calendar;
use crate::types::Date;

/// Business days / 252, as used in the Brazilian market.
///
/// Counts business days in `(start, end]` under the given calendar.
#[derive(Clone, Copy)]
pub struct Bus252<'a> {
    calendar: &'a dyn Calendar,
}

impl<'a> Bus252<'a> {
    /// Creates the convention over a calendar.
    #[must_use]
    pub fn new(calendar: &'a dyn Calendar) -> Self {
        Self { calendar }
    }
}

impl std::fmt::Debug for Bus252<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus252")
            .field("calendar", &self.calendar.name())
            .finish()
    }
}

impl DayCount for Bus252<'_> {
    fn name(&self) -> &'static str {
        "BUS/252"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(252)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        self.calendar.business_days_between(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{HolidayCalendar, WeekendCalendar};
    use rust_decimal_macros::dec;

    #[test]
    fn test_bus252_counts_business_days() {
        let cal = WeekendCalendar;
        let dc = Bus252::new(&cal);
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        let next_monday = Date::from_ymd(2025, 1, 13).unwrap();
        assert_eq!(dc.day_count(monday, next_monday), 5);
        assert_eq!(dc.year_fraction(monday, next_monday), Decimal::from(5) / dec!(252));
    }

    #[test]
    fn test_bus252_skips_holidays() {
        let holiday = Date::from_ymd(2025, 1, 8).unwrap();
        let cal = HolidayCalendar::new("BR", [holiday]);
        let dc = Bus252::new(&cal);
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        let friday = Date::from_ymd(2025, 1, 10).unwrap();
        assert_eq!(dc.day_count(monday, friday), 3);
    }
}
