//! Property tests for the reference curves.

use approx::assert_relative_eq;
use parity_core::Date;
use parity_curves::prelude::*;
use proptest::prelude::*;

fn reference() -> Date {
    Date::from_ymd(2024, 1, 15).unwrap()
}

proptest! {
    #[test]
    fn flat_df_is_decreasing_for_positive_rates(
        rate in 0.0001f64..0.2,
        d1 in 1i64..3650,
        gap in 1i64..3650,
    ) {
        let curve = FlatDiscountCurve::new(reference(), rate).unwrap();
        let near = curve.df(reference().add_days(d1)).unwrap();
        let far = curve.df(reference().add_days(d1 + gap)).unwrap();
        prop_assert!(far < near);
        prop_assert!(near <= 1.0);
    }

    #[test]
    fn forward_reprices_flat_curve(
        rate in 0.0001f64..0.2,
        start in 0i64..3650,
        len in 30i64..400,
    ) {
        let curve = FlatDiscountCurve::new(reference(), rate).unwrap();
        let d1 = reference().add_days(start);
        let d2 = d1.add_days(len);
        let dcf = len as f64 / 365.0;
        let fwd = curve.forward(d1, d2, dcf).unwrap();
        // Simple forward on a continuously compounded curve.
        let expected = ((rate * dcf).exp() - 1.0) / dcf;
        prop_assert!((fwd - expected).abs() < 1e-10);
    }

    #[test]
    fn discrete_curve_is_bounded_by_pillars(
        df1 in 0.90f64..0.99,
        decay in 0.90f64..0.99,
        offset in 0i64..365,
    ) {
        let p1 = Date::from_ymd(2025, 1, 15).unwrap();
        let p2 = Date::from_ymd(2026, 1, 15).unwrap();
        let curve = DiscreteDiscountCurve::new(reference(), vec![(p1, df1), (p2, df1 * decay)]).unwrap();
        let df = curve.df(p1.add_days(offset)).unwrap();
        prop_assert!(df <= df1 + 1e-12);
        prop_assert!(df >= df1 * decay - 1e-12);
    }
}

#[test]
fn hazard_survival_matches_closed_form() {
    let curve = FlatHazardCurve::new(reference(), 0.03, 0.4).unwrap();
    let date = Date::from_ymd(2026, 1, 15).unwrap();
    let t = (date - reference()) as f64 / 365.0;
    assert_relative_eq!(curve.survival(date).unwrap(), (-0.03 * t).exp(), epsilon = 1e-14);
}
