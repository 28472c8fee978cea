//! Actual day count conventions.

use rust_decimal::Decimal;

use super::{ActActParams, DayCount};
use crate::error::{ParityError, ParityResult};
use crate::types::{is_leap_year, Date, Frequency};

/// Actual/360 day count convention.
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{360}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/365 Fixed day count convention.
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{365}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(365)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/365 Leap day count convention (ISMA year).
///
/// For annual coupons the denominator is 366 if February 29 falls in
/// `(start, end]`. For other frequencies it is 366 if `end` falls in a
/// leap year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Leap {
    annual: bool,
}

impl Act365Leap {
    /// Creates the convention for the given coupon frequency.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self {
            annual: frequency == Frequency::Annual,
        }
    }

    fn denominator(&self, start: Date, end: Date) -> i64 {
        let leap = if self.annual {
            contains_feb29(start, end)
        } else {
            end.is_leap_year()
        };
        if leap {
            366
        } else {
            365
        }
    }
}

impl DayCount for Act365Leap {
    fn name(&self) -> &'static str {
        "ACT/365L"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        if end < start {
            return -self.year_fraction(end, start);
        }
        Decimal::from(self.day_count(start, end)) / Decimal::from(self.denominator(start, end))
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/Actual ISDA day count convention.
///
/// Days falling in leap years are divided by 366, the rest by 365.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        if end < start {
            return -self.year_fraction(end, start);
        }

        let mut total = Decimal::ZERO;
        let mut current = start;

        while current.year() < end.year() {
            let remaining_in_year = i64::from(current.days_in_year() - current.ordinal() + 1);
            total += Decimal::from(remaining_in_year) / Decimal::from(current.days_in_year());
            current = current.add_days(remaining_in_year);
        }

        if current < end {
            total += Decimal::from(current.days_between(&end))
                / Decimal::from(current.days_in_year());
        }

        total
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/Actual AFB day count convention.
///
/// Whole years are counted back from the end date; the remaining stub is
/// divided by 366 if it contains February 29, otherwise by 365.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActAfb;

impl DayCount for ActActAfb {
    fn name(&self) -> &'static str {
        "ACT/ACT AFB"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        if end < start {
            return -self.year_fraction(end, start);
        }

        let mut years = 0i64;
        let mut stub_end = end;
        while let Ok(previous) = stub_end.add_months(-12) {
            if previous < start {
                break;
            }
            years += 1;
            stub_end = previous;
        }

        let basis = if contains_feb29(start, stub_end) { 366 } else { 365 };
        Decimal::from(years) + Decimal::from(start.days_between(&stub_end)) / Decimal::from(basis)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/Actual ICMA day count convention.
///
/// The fraction of a regular coupon period is `days / (f * period_days)`.
/// Intervals reaching outside the reference period (long stubs) are split
/// across notional periods rolled from the reference dates.
///
/// ```rust
/// use parity_core::daycounts::{ActActIcma, ActActParams, DayCount};
/// use parity_core::types::{Date, Frequency};
/// use rust_decimal_macros::dec;
///
/// let start = Date::from_ymd(2025, 1, 15).unwrap();
/// let end = Date::from_ymd(2025, 7, 15).unwrap();
/// let icma = ActActIcma::new(ActActParams::new(Frequency::SemiAnnual, start, end)).unwrap();
/// assert_eq!(icma.year_fraction(start, end), dec!(0.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActActIcma {
    frequency: u32,
    months: i32,
    reference_start: Date,
    reference_end: Date,
}

impl ActActIcma {
    /// Creates the convention from a reference period.
    ///
    /// # Errors
    ///
    /// Returns `ParityError::DayCountError` for a zero frequency or an
    /// empty reference period.
    pub fn new(params: ActActParams) -> ParityResult<Self> {
        if params.frequency.is_zero() {
            return Err(ParityError::day_count(
                "ACT/ACT ICMA requires a non-zero coupon frequency",
            ));
        }
        if params.reference_end <= params.reference_start {
            return Err(ParityError::day_count(format!(
                "ACT/ACT ICMA reference period {} to {} is empty",
                params.reference_start, params.reference_end
            )));
        }
        Ok(Self {
            frequency: params.frequency.periods_per_year(),
            months: params.frequency.months_per_period() as i32,
            reference_start: params.reference_start,
            reference_end: params.reference_end,
        })
    }

    /// Year fraction of `[start, end]`, propagating date range failures
    /// while rolling notional periods.
    ///
    /// # Errors
    ///
    /// Returns `ParityError::InvalidDate` if a notional period falls
    /// outside the supported date range.
    pub fn try_year_fraction(&self, start: Date, end: Date) -> ParityResult<Decimal> {
        if end < start {
            return self.try_year_fraction(end, start).map(|yf| -yf);
        }
        self.fraction(start, end, self.reference_start, self.reference_end)
    }

    fn fraction(
        &self,
        start: Date,
        end: Date,
        ref_start: Date,
        ref_end: Date,
    ) -> ParityResult<Decimal> {
        if start >= end {
            return Ok(Decimal::ZERO);
        }

        if start < ref_start {
            let previous = ref_start.add_months(-self.months)?;
            let before = self.fraction(start, end.min(ref_start), previous, ref_start)?;
            let inside = self.fraction(ref_start, end, ref_start, ref_end)?;
            return Ok(before + inside);
        }

        if end > ref_end {
            let next = ref_end.add_months(self.months)?;
            let inside = self.fraction(start, ref_end, ref_start, ref_end)?;
            let after = self.fraction(start.max(ref_end), end, ref_end, next)?;
            return Ok(inside + after);
        }

        let period_days = ref_start.days_between(&ref_end);
        if period_days == 0 {
            return Ok(Decimal::ZERO);
        }
        Ok(Decimal::from(start.days_between(&end))
            / (Decimal::from(self.frequency) * Decimal::from(period_days)))
    }
}

impl DayCount for ActActIcma {
    fn name(&self) -> &'static str {
        "ACT/ACT ICMA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        self.try_year_fraction(start, end).unwrap_or_else(|_| {
            let period_days = self.reference_start.days_between(&self.reference_end);
            Decimal::from(start.days_between(&end))
                / (Decimal::from(self.frequency) * Decimal::from(period_days))
        })
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// True if February 29 falls in `(start, end]`.
fn contains_feb29(start: Date, end: Date) -> bool {
    (start.year()..=end.year())
        .filter(|&year| is_leap_year(year))
        .filter_map(|year| Date::from_ymd(year, 2, 29).ok())
        .any(|feb29| start < feb29 && feb29 <= end)
}
