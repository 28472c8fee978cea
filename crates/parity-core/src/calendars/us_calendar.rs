//! US federal holiday calendar.

use chrono::Weekday;

use super::Calendar;
use crate::types::Date;

/// US federal holidays as observed by the government bond market.
///
/// Fixed-date holidays falling on a weekend are observed on the adjacent
/// Friday or Monday.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsCalendar;

impl UsCalendar {
    fn is_federal_holiday(date: Date) -> bool {
        let (year, month, day, weekday) = (date.year(), date.month(), date.day(), date.weekday());

        let fixed = |m: u32, d: u32| -> bool {
            (month == m && day == d)
                || (weekday == Weekday::Fri && date.add_days(1).month() == m && date.add_days(1).day() == d)
                || (weekday == Weekday::Mon && date.add_days(-1).month() == m && date.add_days(-1).day() == d)
        };

        if fixed(1, 1) || fixed(7, 4) || fixed(11, 11) || fixed(12, 25) {
            return true;
        }
        if year >= 2021 && fixed(6, 19) {
            return true;
        }

        match month {
            1 => nth_weekday(date, Weekday::Mon, 3),
            2 => nth_weekday(date, Weekday::Mon, 3),
            5 => weekday == Weekday::Mon && day + 7 > date.days_in_month(),
            9 => nth_weekday(date, Weekday::Mon, 1),
            10 => nth_weekday(date, Weekday::Mon, 2),
            11 => nth_weekday(date, Weekday::Thu, 4),
            _ => false,
        }
    }
}

impl Calendar for UsCalendar {
    fn name(&self) -> &str {
        "US"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !Self::is_federal_holiday(date)
    }
}

fn nth_weekday(date: Date, weekday: Weekday, n: u32) -> bool {
    date.weekday() == weekday && (date.day() - 1) / 7 + 1 == n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_fixed_holidays() {
        let cal = UsCalendar;
        assert!(!cal.is_business_day(d(2024, 1, 1)));
        assert!(!cal.is_business_day(d(2024, 7, 4)));
        assert!(!cal.is_business_day(d(2024, 12, 25)));
        assert!(!cal.is_business_day(d(2024, 6, 19)));
    }

    #[test]
    fn test_observed_holidays() {
        let cal = UsCalendar;
        // July 4 2026 is a Saturday, observed Friday July 3
        assert!(!cal.is_business_day(d(2026, 7, 3)));
        // Christmas 2022 was a Sunday, observed Monday Dec 26
        assert!(!cal.is_business_day(d(2022, 12, 26)));
    }

    #[test]
    fn test_floating_holidays() {
        let cal = UsCalendar;
        assert!(!cal.is_business_day(d(2024, 1, 15))); // MLK
        assert!(!cal.is_business_day(d(2024, 5, 27))); // Memorial Day
        assert!(!cal.is_business_day(d(2024, 9, 2))); // Labor Day
        assert!(!cal.is_business_day(d(2024, 11, 28))); // Thanksgiving
        assert!(cal.is_business_day(d(2024, 11, 29)));
    }
}
