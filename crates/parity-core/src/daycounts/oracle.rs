//! Runtime day count selection.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::{
    Act360, Act365Fixed, Act365Leap, ActActAfb, ActActIcma, ActActIsda, ActActParams, Bus252,
    DayCount, DayCountConvention, Thirty360E, Thirty360EIsda, Thirty360German, Thirty360US,
};
use crate::calendars::calendar_by_name;
use crate::error::{ParityError, ParityResult};
use crate::types::{Date, Frequency};

/// Computes year fractions for a convention chosen at runtime.
///
/// Periods hold their conventions as data and call through this trait,
/// so a caller can substitute its own day count service.
pub trait DayCountOracle: Send + Sync {
    /// Returns the year fraction from `start` to `end`.
    ///
    /// * `apply_eom` - end-of-month rule for the 30/360 family
    /// * `act_act` - reference period, required by ACT/ACT ICMA
    /// * `calendar` - calendar name, required by BUS/252
    ///
    /// # Errors
    ///
    /// Returns `ParityError::DayCountError` when a required argument is
    /// missing, or a calendar error for an unknown calendar name.
    fn year_fraction(
        &self,
        start: Date,
        end: Date,
        convention: DayCountConvention,
        apply_eom: bool,
        act_act: Option<&ActActParams>,
        calendar: Option<&str>,
    ) -> ParityResult<f64>;
}

/// The built-in conventions of this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDayCounts;

impl StandardDayCounts {
    fn decimal_fraction(
        start: Date,
        end: Date,
        convention: DayCountConvention,
        apply_eom: bool,
        act_act: Option<&ActActParams>,
        calendar: Option<&str>,
    ) -> ParityResult<Decimal> {
        let yf = match convention {
            DayCountConvention::Act360 => Act360.year_fraction(start, end),
            DayCountConvention::Act365Fixed => Act365Fixed.year_fraction(start, end),
            DayCountConvention::Act365Leap => {
                let frequency = act_act.map_or(Frequency::SemiAnnual, |p| p.frequency);
                Act365Leap::new(frequency).year_fraction(start, end)
            }
            DayCountConvention::ActActIsda => ActActIsda.year_fraction(start, end),
            DayCountConvention::ActActAfb => ActActAfb.year_fraction(start, end),
            DayCountConvention::ActActIcma => {
                let params = act_act.ok_or_else(|| {
                    ParityError::day_count("ACT/ACT ICMA requires a reference period")
                })?;
                ActActIcma::new(*params)?.try_year_fraction(start, end)?
            }
            DayCountConvention::Thirty360US => Thirty360US::new(apply_eom).year_fraction(start, end),
            DayCountConvention::Thirty360E => Thirty360E.year_fraction(start, end),
            DayCountConvention::Thirty360EIsda => {
                Thirty360EIsda::new(apply_eom).year_fraction(start, end)
            }
            DayCountConvention::Thirty360German => Thirty360German.year_fraction(start, end),
            DayCountConvention::Bus252 => {
                let name = calendar
                    .ok_or_else(|| ParityError::day_count("BUS/252 requires a calendar"))?;
                let calendar = calendar_by_name(name)?;
                Bus252::new(calendar.as_ref()).year_fraction(start, end)
            }
        };
        Ok(yf)
    }
}

impl DayCountOracle for StandardDayCounts {
    fn year_fraction(
        &self,
        start: Date,
        end: Date,
        convention: DayCountConvention,
        apply_eom: bool,
        act_act: Option<&ActActParams>,
        calendar: Option<&str>,
    ) -> ParityResult<f64> {
        let yf = Self::decimal_fraction(start, end, convention, apply_eom, act_act, calendar)?;
        yf.to_f64().ok_or_else(|| {
            ParityError::day_count(format!("{convention} fraction {yf} is not representable"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_every_convention_one_regular_period() {
        let start = d(2025, 1, 15);
        let end = d(2025, 7, 15);
        let params = ActActParams::new(Frequency::SemiAnnual, start, end);
        for convention in DayCountConvention::all() {
            let yf = StandardDayCounts
                .year_fraction(start, end, *convention, true, Some(&params), Some("US"))
                .unwrap();
            assert!(yf > 0.45 && yf < 0.52, "{convention}: {yf}");
        }
    }

    #[test]
    fn test_icma_requires_reference_period() {
        let err = StandardDayCounts
            .year_fraction(
                d(2025, 1, 15),
                d(2025, 7, 15),
                DayCountConvention::ActActIcma,
                false,
                None,
                None,
            )
            .unwrap_err();
        assert!(matches!(err, ParityError::DayCountError { .. }));
    }

    #[test]
    fn test_bus252_requires_calendar() {
        let result = StandardDayCounts.year_fraction(
            d(2025, 1, 6),
            d(2025, 1, 13),
            DayCountConvention::Bus252,
            false,
            None,
            None,
        );
        assert!(result.is_err());

        let yf = StandardDayCounts
            .year_fraction(
                d(2025, 1, 6),
                d(2025, 1, 13),
                DayCountConvention::Bus252,
                false,
                None,
                Some("WEEKEND"),
            )
            .unwrap();
        assert_relative_eq!(yf, 5.0 / 252.0, epsilon = 1e-12);
    }

    #[test]
    fn test_eom_flag_reaches_thirty360() {
        let start = d(2024, 2, 29);
        let end = d(2024, 8, 31);
        let with_eom = StandardDayCounts
            .year_fraction(start, end, DayCountConvention::Thirty360US, true, None, None)
            .unwrap();
        let without = StandardDayCounts
            .year_fraction(start, end, DayCountConvention::Thirty360US, false, None, None)
            .unwrap();
        assert_relative_eq!(with_eom, 0.5, epsilon = 1e-12);
        assert_relative_eq!(without, 182.0 / 360.0, epsilon = 1e-12);
    }
}
