//! Pillar-based curves.

use parity_core::daycounts::DayCountConvention;
use parity_core::Date;

use crate::error::{finite, CurveError, CurveResult};
use crate::traits::{time_from, DiscountCurve, FxCurve};

fn check_increasing(dates: &[Date]) -> CurveResult<()> {
    for (index, pair) in dates.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(CurveError::NonMonotonicDates {
                index: index + 1,
                prev: pair[0],
                current: pair[1],
            });
        }
    }
    Ok(())
}

/// Linear interpolation over `(x, y)` nodes, flat outside the range.
fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }
    let i = xs.partition_point(|&node| node <= x) - 1;
    let w = (x - xs[i]) / (xs[i + 1] - xs[i]);
    ys[i] + w * (ys[i + 1] - ys[i])
}

/// A funding curve interpolated log-linearly on discount factors.
///
/// The reference date is an implicit pillar with factor 1.0. Beyond the
/// last pillar the last segment's forward rate is held constant.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteDiscountCurve {
    reference_date: Date,
    dates: Vec<Date>,
    times: Vec<f64>,
    log_dfs: Vec<f64>,
    day_count: DayCountConvention,
}

impl DiscreteDiscountCurve {
    /// Creates a curve from `(date, discount factor)` pillars.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no pillars, pillar dates or their
    /// times under the day count are not strictly increasing after the
    /// reference date, or a factor is not finite and positive.
    pub fn new(reference_date: Date, pillars: Vec<(Date, f64)>) -> CurveResult<Self> {
        Self::with_day_count(reference_date, pillars, DayCountConvention::Act365Fixed)
    }

    /// Creates a curve measuring time with the given day count.
    ///
    /// # Errors
    ///
    /// Same conditions as [`DiscreteDiscountCurve::new`].
    pub fn with_day_count(
        reference_date: Date,
        pillars: Vec<(Date, f64)>,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        if pillars.is_empty() {
            return Err(CurveError::insufficient_points(1, 0));
        }

        let mut dates = Vec::with_capacity(pillars.len() + 1);
        let mut times = Vec::with_capacity(pillars.len() + 1);
        let mut log_dfs = Vec::with_capacity(pillars.len() + 1);
        dates.push(reference_date);
        times.push(0.0);
        log_dfs.push(0.0);

        for (date, df) in pillars {
            let df = finite("df", df)?;
            if df <= 0.0 {
                return Err(CurveError::invalid_parameter(
                    "df",
                    format!("{df} at {date} is not positive"),
                ));
            }
            dates.push(date);
            times.push(time_from(reference_date, date, day_count)?);
            log_dfs.push(df.ln());
        }
        check_increasing(&dates)?;
        for (pair, date) in times.windows(2).zip(&dates[1..]) {
            if pair[1] <= pair[0] {
                return Err(CurveError::invalid_parameter(
                    "pillar time",
                    format!("{date} is not after the previous pillar under {day_count}"),
                ));
            }
        }

        Ok(Self {
            reference_date,
            dates,
            times,
            log_dfs,
            day_count,
        })
    }

    /// Returns the pillar dates, excluding the reference date.
    #[must_use]
    pub fn pillar_dates(&self) -> &[Date] {
        &self.dates[1..]
    }
}

impl DiscountCurve for DiscreteDiscountCurve {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn df(&self, date: Date) -> CurveResult<f64> {
        let t = time_from(self.reference_date, date, self.day_count)?;
        let last = self.times.len() - 1;
        let log_df = if t > self.times[last] {
            let slope = (self.log_dfs[last] - self.log_dfs[last - 1])
                / (self.times[last] - self.times[last - 1]);
            self.log_dfs[last] + slope * (t - self.times[last])
        } else {
            interpolate(&self.times, &self.log_dfs, t)
        };
        Ok(log_df.exp())
    }
}

/// An FX curve interpolated linearly between dated forwards.
///
/// Flat before the first and after the last point.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteFxCurve {
    dates: Vec<Date>,
    days: Vec<f64>,
    values: Vec<f64>,
}

impl DiscreteFxCurve {
    /// Creates a curve from `(date, forward)` points.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no points, dates are not strictly
    /// increasing, or a forward is not finite and positive.
    pub fn new(points: Vec<(Date, f64)>) -> CurveResult<Self> {
        if points.is_empty() {
            return Err(CurveError::insufficient_points(1, 0));
        }
        let (dates, values): (Vec<Date>, Vec<f64>) = points.into_iter().unzip();
        check_increasing(&dates)?;
        for value in &values {
            let value = finite("fx", *value)?;
            if value <= 0.0 {
                return Err(CurveError::invalid_parameter("fx", format!("{value} is not positive")));
            }
        }
        let origin = dates[0];
        let days = dates.iter().map(|d| (*d - origin) as f64).collect();
        Ok(Self { dates, days, values })
    }
}

impl FxCurve for DiscreteFxCurve {
    fn fx(&self, date: Date) -> CurveResult<f64> {
        let x = (date - self.dates[0]) as f64;
        Ok(interpolate(&self.days, &self.values, x))
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
    fn test_discrete_df_hits_pillars() {
        let reference = d(2025, 1, 1);
        let curve = DiscreteDiscountCurve::new(
            reference,
            vec![(d(2026, 1, 1), 0.96), (d(2027, 1, 1), 0.92)],
        )
        .unwrap();
        assert_relative_eq!(curve.df(reference).unwrap(), 1.0, epsilon = 1e-15);
        assert_relative_eq!(curve.df(d(2026, 1, 1)).unwrap(), 0.96, epsilon = 1e-14);
        assert_relative_eq!(curve.df(d(2027, 1, 1)).unwrap(), 0.92, epsilon = 1e-14);
    }

    #[test]
    fn test_discrete_df_log_linear_between_pillars() {
        let reference = d(2025, 1, 1);
        let curve = DiscreteDiscountCurve::new(reference, vec![(d(2027, 1, 1), 0.90)]).unwrap();
        let mid = d(2026, 1, 1);
        let t_mid = 365.0 / 365.0;
        let t_end = 730.0 / 365.0;
        let expected = (0.90f64.ln() * t_mid / t_end).exp();
        assert_relative_eq!(curve.df(mid).unwrap(), expected, epsilon = 1e-14);
    }

    #[test]
    fn test_discrete_df_extrapolates_last_forward() {
        let reference = d(2025, 1, 1);
        let curve = DiscreteDiscountCurve::new(reference, vec![(d(2026, 1, 1), 0.95)]).unwrap();
        let df2 = curve.df(d(2027, 1, 1)).unwrap();
        assert_relative_eq!(df2, 0.95 * 0.95, epsilon = 1e-12);
    }

    #[test]
    fn test_discrete_df_validation() {
        let reference = d(2025, 1, 1);
        assert!(DiscreteDiscountCurve::new(reference, vec![]).is_err());
        assert!(DiscreteDiscountCurve::new(reference, vec![(d(2026, 1, 1), -0.5)]).is_err());
        let err = DiscreteDiscountCurve::new(
            reference,
            vec![(d(2027, 1, 1), 0.9), (d(2026, 1, 1), 0.95)],
        )
        .unwrap_err();
        assert!(matches!(err, CurveError::NonMonotonicDates { .. }));
    }

    #[test]
    fn test_discrete_df_rejects_coincident_times() {
        // Under 30E/360 the 30th and 31st of a month are the same time.
        let err = DiscreteDiscountCurve::with_day_count(
            d(2025, 1, 1),
            vec![(d(2026, 3, 30), 0.96), (d(2026, 3, 31), 0.95)],
            DayCountConvention::Thirty360E,
        )
        .unwrap_err();
        assert!(matches!(err, CurveError::InvalidParameter { .. }));

        let at_reference = DiscreteDiscountCurve::with_day_count(
            d(2025, 1, 30),
            vec![(d(2025, 1, 31), 0.99)],
            DayCountConvention::Thirty360E,
        );
        assert!(at_reference.is_err());

        let curve = DiscreteDiscountCurve::with_day_count(
            d(2025, 1, 1),
            vec![(d(2026, 3, 30), 0.96), (d(2026, 4, 30), 0.95)],
            DayCountConvention::Thirty360E,
        )
        .unwrap();
        assert!(curve.df(d(2026, 4, 15)).unwrap().is_finite());
    }

    #[test]
    fn test_discrete_fx_linear() {
        let curve = DiscreteFxCurve::new(vec![(d(2025, 1, 1), 1.10), (d(2025, 1, 11), 1.20)]).unwrap();
        assert_relative_eq!(curve.fx(d(2025, 1, 6)).unwrap(), 1.15, epsilon = 1e-12);
        assert_relative_eq!(curve.fx(d(2024, 12, 1)).unwrap(), 1.10, epsilon = 1e-12);
        assert_relative_eq!(curve.fx(d(2026, 1, 1)).unwrap(), 1.20, epsilon = 1e-12);
    }
}
