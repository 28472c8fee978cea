//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};

use super::Calendar;
use crate::error::ParityError;
use crate::types::Date;

/// How a date that falls on a non-business day is rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// Keep the date as-is.
    Unadjusted,
    /// Roll to the next business day.
    Following,
    /// Roll forward unless that crosses into the next month, else roll back.
    #[default]
    ModifiedFollowing,
    /// Roll to the previous business day.
    Preceding,
    /// Roll back unless that crosses into the previous month, else roll forward.
    ModifiedPreceding,
    /// Roll to the closest business day, preferring the following one on ties.
    Nearest,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Nearest => "Nearest",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for BusinessDayConvention {
    type Err = ParityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_uppercase();
        match normalized.as_str() {
            "UNADJUSTED" | "NONE" => Ok(BusinessDayConvention::Unadjusted),
            "FOLLOWING" | "F" => Ok(BusinessDayConvention::Following),
            "MODIFIEDFOLLOWING" | "MF" => Ok(BusinessDayConvention::ModifiedFollowing),
            "PRECEDING" | "P" => Ok(BusinessDayConvention::Preceding),
            "MODIFIEDPRECEDING" | "MP" => Ok(BusinessDayConvention::ModifiedPreceding),
            "NEAREST" => Ok(BusinessDayConvention::Nearest),
            _ => Err(ParityError::unknown_convention("business day convention", s)),
        }
    }
}

/// Adjusts a date according to the given business day convention.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    if calendar.is_business_day(date) {
        return date;
    }

    match convention {
        BusinessDayConvention::Unadjusted => date,
        BusinessDayConvention::Following => following(date, calendar),
        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                preceding(date, calendar)
            }
        }
        BusinessDayConvention::Preceding => preceding(date, calendar),
        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = preceding(date, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                following(date, calendar)
            }
        }
        BusinessDayConvention::Nearest => {
            let fwd = following(date, calendar);
            let back = preceding(date, calendar);
            if fwd - date <= date - back {
                fwd
            } else {
                back
            }
        }
    }
}

fn following<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(1);
    }
    date
}

fn preceding<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(-1);
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::WeekendCalendar;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_following_and_preceding() {
        let cal = WeekendCalendar;
        let saturday = d(2025, 1, 4);
        assert_eq!(adjust(saturday, BusinessDayConvention::Following, &cal), d(2025, 1, 6));
        assert_eq!(adjust(saturday, BusinessDayConvention::Preceding, &cal), d(2025, 1, 3));
        assert_eq!(adjust(saturday, BusinessDayConvention::Unadjusted, &cal), saturday);
    }

    #[test]
    fn test_modified_following_month_end() {
        let cal = WeekendCalendar;
        // Saturday May 31 2025 would roll into June, so it rolls back to Friday May 30
        let saturday = d(2025, 5, 31);
        assert_eq!(
            adjust(saturday, BusinessDayConvention::ModifiedFollowing, &cal),
            d(2025, 5, 30)
        );
    }

    #[test]
    fn test_modified_preceding_month_start() {
        let cal = WeekendCalendar;
        // Saturday Feb 1 2025 would roll into January, so it rolls forward
        assert_eq!(
            adjust(d(2025, 2, 1), BusinessDayConvention::ModifiedPreceding, &cal),
            d(2025, 2, 3)
        );
    }

    #[test]
    fn test_nearest() {
        let cal = WeekendCalendar;
        assert_eq!(adjust(d(2025, 1, 4), BusinessDayConvention::Nearest, &cal), d(2025, 1, 3));
        assert_eq!(adjust(d(2025, 1, 5), BusinessDayConvention::Nearest, &cal), d(2025, 1, 6));
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "Modified Following".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert_eq!("mf".parse::<BusinessDayConvention>().unwrap(), BusinessDayConvention::ModifiedFollowing);
        assert!("sideways".parse::<BusinessDayConvention>().is_err());
    }
}
