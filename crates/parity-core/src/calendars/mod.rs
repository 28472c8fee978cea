//! Business day calendars and adjustment conventions.
//!
//! Periods carry their holiday calendar as a name (for example `"US"`),
//! resolved on demand through [`calendar_by_name`].

use std::collections::BTreeSet;

mod conventions;
mod us_calendar;

pub use conventions::{adjust, BusinessDayConvention};
pub use us_calendar::UsCalendar;

use crate::error::{ParityError, ParityResult};
use crate::types::Date;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday or weekend.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Moves a date by a number of business days.
    ///
    /// Zero returns the date unchanged, even if it is not a business day.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let direction: i64 = if days >= 0 { 1 } else { -1 };
        let mut remaining = days.unsigned_abs();
        let mut result = date;

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Counts business days in `(start, end]`, negative when `end < start`.
    fn business_days_between(&self, start: Date, end: Date) -> i64 {
        if end < start {
            -count_forward(self, end, start)
        } else {
            count_forward(self, start, end)
        }
    }
}

fn count_forward<C: Calendar + ?Sized>(calendar: &C, start: Date, end: Date) -> i64 {
    let mut count = 0;
    let mut current = start.add_days(1);
    while current <= end {
        if calendar.is_business_day(current) {
            count += 1;
        }
        current = current.add_days(1);
    }
    count
}

/// A weekend-only calendar with no holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "WEEKEND"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// A weekend calendar with an explicit set of holidays.
///
/// ```rust
/// use parity_core::calendars::{Calendar, HolidayCalendar};
/// use parity_core::types::Date;
///
/// let xmas = Date::from_ymd(2025, 12, 25).unwrap();
/// let cal = HolidayCalendar::new("DESK", [xmas]);
/// assert!(!cal.is_business_day(xmas));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    name: String,
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates a calendar from a name and a list of holidays.
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Adds a holiday.
    pub fn add_holiday(&mut self, date: Date) {
        self.holidays.insert(date);
    }

    /// Returns the number of explicit holidays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true if no explicit holidays are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}

/// Resolves a calendar from its name.
///
/// Recognized names: `WEEKEND` / `NONE` / empty, and `US` / `USD` /
/// `US-GOV` / `NYC`.
///
/// # Errors
///
/// Returns `ParityError::CalendarError` for an unknown name.
pub fn calendar_by_name(name: &str) -> ParityResult<Box<dyn Calendar>> {
    match name.trim().to_uppercase().as_str() {
        "" | "WEEKEND" | "NONE" => Ok(Box::new(WeekendCalendar)),
        "US" | "USD" | "US-GOV" | "NYC" => Ok(Box::new(UsCalendar)),
        other => Err(ParityError::calendar(format!("unknown calendar '{other}'"))),
    }
}

/// Resolves an optional calendar name, defaulting to weekends only.
///
/// # Errors
///
/// Returns `ParityError::CalendarError` for an unknown name.
pub fn resolve_calendar(name: Option<&str>) -> ParityResult<Box<dyn Calendar>> {
    calendar_by_name(name.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;
        assert!(cal.is_business_day(Date::from_ymd(2025, 1, 6).unwrap()));
        assert!(!cal.is_business_day(Date::from_ymd(2025, 1, 4).unwrap()));
        assert!(!cal.is_business_day(Date::from_ymd(2025, 1, 5).unwrap()));
    }

    #[test]
    fn test_add_business_days_both_directions() {
        let cal = WeekendCalendar;
        let friday = Date::from_ymd(2025, 1, 3).unwrap();
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        assert_eq!(cal.add_business_days(friday, 1), monday);
        assert_eq!(cal.add_business_days(monday, -1), friday);
        assert_eq!(cal.add_business_days(monday, 0), monday);
    }

    #[test]
    fn test_business_days_between() {
        let cal = WeekendCalendar;
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        let friday = Date::from_ymd(2025, 1, 10).unwrap();
        assert_eq!(cal.business_days_between(monday, friday), 4);
        assert_eq!(cal.business_days_between(friday, monday), -4);
    }

    #[test]
    fn test_holiday_calendar() {
        let holiday = Date::from_ymd(2025, 1, 7).unwrap();
        let cal = HolidayCalendar::new("TEST", [holiday]);
        assert!(!cal.is_business_day(holiday));
        assert_eq!(
            cal.add_business_days(Date::from_ymd(2025, 1, 6).unwrap(), 1),
            Date::from_ymd(2025, 1, 8).unwrap()
        );
    }

    #[test]
    fn test_calendar_by_name() {
        assert_eq!(calendar_by_name("us").unwrap().name(), "US");
        assert_eq!(resolve_calendar(None).unwrap().name(), "WEEKEND");
        assert!(calendar_by_name("MARS").is_err());
    }
}
