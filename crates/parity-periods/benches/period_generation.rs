//! Benchmarks for schedule generation and period valuation.
//!
//! Run with: cargo bench -p parity-periods

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use parity_core::{Currency, DayCountConvention, Date, Frequency};
use parity_curves::{FlatDiscountCurve, FlatForwardCurve, ForwardLabel, FundingLabel, MarketParams};
use parity_periods::{
    AccrualCompounding, Direction, LegTerms, PeriodSequenceBuilder, StubPolicy, ValuationContext,
};

// =============================================================================
// SCHEDULE GENERATION
// =============================================================================

fn bench_edge_generation(c: &mut Criterion) {
    let effective = Date::from_ymd(2024, 3, 7).unwrap();
    let mut group = c.benchmark_group("edge_dates");

    for years in [2, 10, 30] {
        let maturity = Date::from_ymd(2024 + years, 1, 15).unwrap();
        group.bench_with_input(BenchmarkId::new("quarterly_backward", years), &maturity, |b, &maturity| {
            let builder = PeriodSequenceBuilder::new(effective, maturity, Frequency::Quarterly)
                .with_direction(Direction::Backward)
                .with_stub_policy(StubPolicy::ShortStub);
            b.iter(|| black_box(builder.edge_dates().unwrap()));
        });
    }

    group.finish();
}

fn bench_build_legs(c: &mut Criterion) {
    let effective = Date::from_ymd(2024, 1, 15).unwrap();
    let maturity = Date::from_ymd(2034, 1, 15).unwrap();
    let sofr = ForwardLabel::new(Currency::USD, "SOFR", "1M");
    let mut group = c.benchmark_group("build");

    group.bench_function("fixed_semiannual_icma", |b| {
        let builder = PeriodSequenceBuilder::new(effective, maturity, Frequency::SemiAnnual)
            .with_coupon_day_count(DayCountConvention::ActActIcma, false);
        b.iter(|| black_box(builder.build(&LegTerms::Fixed { coupon: 0.05 }).unwrap()));
    });

    group.bench_function("floating_quarterly_monthly_resets", |b| {
        let builder = PeriodSequenceBuilder::new(effective, maturity, Frequency::Quarterly)
            .with_calendar("US")
            .with_reset_frequency(Frequency::Monthly, AccrualCompounding::Geometric)
            .with_fixing_lag(2);
        let terms = LegTerms::Floating {
            forward_label: sofr.clone(),
            spread: 0.001,
        };
        b.iter(|| black_box(builder.build(&terms).unwrap()));
    });

    group.finish();
}

// =============================================================================
// VALUATION
// =============================================================================

fn bench_base_metrics(c: &mut Criterion) {
    let effective = Date::from_ymd(2024, 1, 15).unwrap();
    let maturity = Date::from_ymd(2034, 1, 15).unwrap();
    let sofr = ForwardLabel::new(Currency::USD, "SOFR", "1M");

    let periods = PeriodSequenceBuilder::new(effective, maturity, Frequency::Quarterly)
        .with_reset_frequency(Frequency::Monthly, AccrualCompounding::Arithmetic)
        .with_base_notional(1_000_000.0)
        .build(&LegTerms::Floating {
            forward_label: sofr.clone(),
            spread: 0.001,
        })
        .unwrap();
    let market = MarketParams::new()
        .with_forward_curve(sofr, FlatForwardCurve::new(0.045).unwrap())
        .with_funding_curve(FundingLabel(Currency::USD), FlatDiscountCurve::new(effective, 0.045).unwrap());
    let ctx = ValuationContext::new(effective, &market);

    let mut group = c.benchmark_group("valuation");
    group.throughput(Throughput::Elements(periods.len() as u64));
    group.bench_function("leg_present_value", |b| {
        b.iter(|| {
            let pv: f64 = periods
                .iter()
                .map(|p| p.base_metrics(&ctx).unwrap().present_value())
                .sum();
            black_box(pv)
        });
    });
    group.finish();
}

criterion_group!(schedule, bench_edge_generation, bench_build_legs);
criterion_group!(valuation, bench_base_metrics);

criterion_main!(schedule, valuation);
