//! Property tests for periods, reset sets, notionals, and schedule generation.

use parity_core::prelude::*;
use parity_periods::generate_edges;
use parity_periods::prelude::*;
use proptest::prelude::*;

fn date_strategy() -> impl Strategy<Value = Date> {
    (2000i32..2040, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| Date::from_ymd(y, m, d).unwrap())
}

fn frequency_strategy() -> impl Strategy<Value = Frequency> {
    prop_oneof![
        Just(Frequency::Annual),
        Just(Frequency::SemiAnnual),
        Just(Frequency::Quarterly),
        Just(Frequency::Monthly),
    ]
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Forward), Just(Direction::Backward)]
}

fn policy_strategy() -> impl Strategy<Value = StubPolicy> {
    prop_oneof![Just(StubPolicy::ShortStub), Just(StubPolicy::MergeIntoAdjacent)]
}

fn adjustment_strategy() -> impl Strategy<Value = BusinessDayConvention> {
    prop_oneof![
        Just(BusinessDayConvention::Unadjusted),
        Just(BusinessDayConvention::Following),
        Just(BusinessDayConvention::ModifiedFollowing),
        Just(BusinessDayConvention::Preceding),
    ]
}

proptest! {
    #[test]
    fn accrual_fraction_apportions_whole_period(
        start in date_strategy(),
        length in 1i64..800,
        dcf in 0.0f64..3.0,
        a in 0i64..800,
        b in 0i64..800,
    ) {
        let end = start.add_days(length);
        let period = Period::simple(start, end, end, dcf).unwrap();

        prop_assert_eq!(period.accrual_dcf(start).unwrap(), 0.0);
        prop_assert!((period.accrual_dcf(end).unwrap() - dcf).abs() < 1e-12);

        let (lo, hi) = (a.min(b) % (length + 1), a.max(b) % (length + 1));
        let (lo, hi) = (lo.min(hi), lo.max(hi));
        let early = period.accrual_dcf(start.add_days(lo)).unwrap();
        let late = period.accrual_dcf(start.add_days(hi)).unwrap();
        prop_assert!(early <= late + 1e-15);
    }

    #[test]
    fn containment_is_inclusive(start in date_strategy(), length in 0i64..800) {
        let end = start.add_days(length);
        let period = Period::simple(start, end, end, 0.5).unwrap();
        prop_assert!(period.contains(start));
        prop_assert!(period.contains(end));
        prop_assert!(!period.contains(start.add_days(-1)));
        prop_assert!(!period.contains(end.add_days(1)));
    }

    #[test]
    fn builder_output_is_contiguous(
        effective in date_strategy(),
        span in 20i64..3000,
        frequency in frequency_strategy(),
        direction in direction_strategy(),
        policy in policy_strategy(),
        adjustment in adjustment_strategy(),
    ) {
        let maturity = effective.add_days(span);
        let periods = PeriodSequenceBuilder::new(effective, maturity, frequency)
            .with_direction(direction)
            .with_stub_policy(policy)
            .with_end_of_month(false)
            .with_calendar("US")
            .with_accrual_adjustment(adjustment)
            .build(&LegTerms::Fixed { coupon: 0.05 })
            .unwrap();

        prop_assert_eq!(periods[0].period().start(), effective);
        prop_assert_eq!(periods[periods.len() - 1].period().end(), maturity);
        for coupon in &periods {
            prop_assert!(coupon.period().accrual_start() < coupon.period().accrual_end());
        }
        for pair in periods.windows(2) {
            prop_assert_eq!(pair[0].period().end(), pair[1].period().start());
            prop_assert_eq!(pair[0].period().accrual_end(), pair[1].period().accrual_start());
            prop_assert!(pair[0].period().start() < pair[1].period().start());
        }
    }

    #[test]
    fn stub_moves_with_direction(
        effective in date_strategy(),
        maturity in date_strategy(),
        frequency in frequency_strategy(),
    ) {
        prop_assume!(maturity > effective);
        let edges = |direction| {
            generate_edges(effective, maturity, frequency, direction, StubPolicy::ShortStub, false).unwrap()
        };
        let forward = edges(Direction::Forward);
        let backward = edges(Direction::Backward);

        prop_assert_eq!(forward.num_periods(), backward.num_periods());
        prop_assert_eq!(forward.dates()[0], backward.dates()[0]);
        prop_assert_eq!(forward.dates().last(), backward.dates().last());

        match (forward.stub(), backward.stub()) {
            (None, None) => prop_assert_eq!(forward.dates(), backward.dates()),
            (Some(StubPosition::Back), Some(StubPosition::Front)) => {
                let n = forward.num_periods();
                let forward_stub = forward.dates()[n] - forward.dates()[n - 1];
                let backward_stub = backward.dates()[1] - backward.dates()[0];
                prop_assert!(forward_stub > 0 && backward_stub > 0);
            }
            other => prop_assert!(false, "unexpected stub placement {:?}", other),
        }
    }

    #[test]
    fn compounding_code_closure(code in -5i32..10) {
        let sub = ResetSubPeriod::new(
            Date::from_ymd(2024, 1, 15).unwrap(),
            Date::from_ymd(2024, 4, 15).unwrap(),
            Date::from_ymd(2024, 1, 11).unwrap(),
        )
        .unwrap();
        match ResetSubPeriodSet::from_code(code, vec![sub]) {
            Ok(set) => {
                prop_assert!(code == 0 || code == 1);
                prop_assert_eq!(set.accrual_compounding().code(), code);
            }
            Err(_) => prop_assert!(code != 0 && code != 1),
        }
    }

    #[test]
    fn notional_is_consistent(
        offset in 0i64..182,
        step in 1i64..181,
        factor in 0.0f64..1.0,
    ) {
        let start = Date::from_ymd(2024, 1, 15).unwrap();
        let end = Date::from_ymd(2024, 7, 15).unwrap();
        let period = Period::simple(start, end, end, 0.5).unwrap();
        let date = start.add_days(offset);

        let bullet = CouponPeriod::new(
            CashflowPeriod::new(period, Frequency::SemiAnnual),
            RateTerms::fixed(0.05, Currency::USD),
            1_000_000.0,
        )
        .unwrap();
        prop_assert_eq!(bullet.notional(date).unwrap(), 1_000_000.0);

        let amortizing = bullet
            .clone()
            .with_notional_schedule(NotionalSchedule::amortizing(vec![(start.add_days(step), factor)]).unwrap());
        prop_assert_eq!(
            amortizing.notional_between(date, date).unwrap(),
            amortizing.notional(date).unwrap()
        );
    }
}
