//! Property tests for the standard day count oracle.

use approx::assert_relative_eq;
use parity_core::prelude::*;
use proptest::prelude::*;

fn date_strategy() -> impl Strategy<Value = Date> {
    (2000i32..2040, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| Date::from_ymd(y, m, d).unwrap())
}

fn linear_conventions() -> impl Strategy<Value = DayCountConvention> {
    prop_oneof![
        Just(DayCountConvention::Act360),
        Just(DayCountConvention::Act365Fixed),
        Just(DayCountConvention::ActActIsda),
        Just(DayCountConvention::Thirty360US),
        Just(DayCountConvention::Thirty360E),
    ]
}

proptest! {
    #[test]
    fn fraction_is_additive_over_split_points(
        start in date_strategy(),
        mid_days in 0i64..400,
        tail_days in 0i64..400,
        convention in prop_oneof![
            Just(DayCountConvention::Act360),
            Just(DayCountConvention::Act365Fixed),
            Just(DayCountConvention::ActActIsda),
        ],
    ) {
        let mid = start.add_days(mid_days);
        let end = mid.add_days(tail_days);
        let oracle = StandardDayCounts;
        let whole = oracle.year_fraction(start, end, convention, false, None, None).unwrap();
        let left = oracle.year_fraction(start, mid, convention, false, None, None).unwrap();
        let right = oracle.year_fraction(mid, end, convention, false, None, None).unwrap();
        prop_assert!((whole - (left + right)).abs() < 1e-12);
    }

    #[test]
    fn fraction_is_antisymmetric(
        a in date_strategy(),
        b in date_strategy(),
        convention in linear_conventions(),
    ) {
        let oracle = StandardDayCounts;
        let forward = oracle.year_fraction(a, b, convention, false, None, None).unwrap();
        let backward = oracle.year_fraction(b, a, convention, false, None, None).unwrap();
        prop_assert!((forward + backward).abs() < 1e-12);
    }

    #[test]
    fn icma_regular_period_is_one_over_frequency(
        start in date_strategy(),
        months in prop_oneof![Just(1i32), Just(3), Just(6), Just(12)],
    ) {
        let frequency = Frequency::from_periods_per_year((12 / months) as u32).unwrap();
        let end = start.add_months(months).unwrap();
        let params = ActActParams::new(frequency, start, end);
        let yf = StandardDayCounts
            .year_fraction(start, end, DayCountConvention::ActActIcma, false, Some(&params), None)
            .unwrap();
        prop_assert!((yf - 1.0 / f64::from(frequency.periods_per_year())).abs() < 1e-12);
    }
}

#[test]
fn half_year_act365f_matches_serial_days() {
    let start = Date::from_ymd(2024, 1, 15).unwrap();
    let end = Date::from_ymd(2024, 7, 15).unwrap();
    let yf = StandardDayCounts
        .year_fraction(start, end, DayCountConvention::Act365Fixed, false, None, None)
        .unwrap();
    assert_relative_eq!(yf, 182.0 / 365.0, epsilon = 1e-14);
}

#[test]
fn conventions_parse_from_config_strings() {
    for name in ["ACT/360", "30/360", "ACT/ACT ICMA", "BUS/252", "30E/360 ISDA"] {
        let convention: DayCountConvention = name.parse().unwrap();
        assert!(!convention.name().is_empty());
    }
}
