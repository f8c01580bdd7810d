use chainvol::chain::{AtmQuote, ChainContext, PricingMode, StrikeQuote};
use chainvol::core::OptionType;
use chainvol::pricing::PricingModel;
use chainvol::time::{DayCount, TradingCalendar, ValuationClock};
use chainvol::vol::implied_vol;
use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

// Performance goals (guideline, measured on target hardware):
// - Black-76 price: < 100 ns
// - implied vol solve: < 5 us
// - 100-strike chain evaluation: < 1 ms

fn benchmark_context() -> ChainContext {
    let valuation = NaiveDate::from_ymd_opt(2026, 8, 20)
        .expect("valid date")
        .and_hms_opt(15, 30, 0)
        .expect("valid time");
    ChainContext::builder()
        .spot(25_000.0)
        .atm(AtmQuote::new(25_000.0, 150.0, 145.0))
        .expiry(NaiveDate::from_ymd_opt(2026, 8, 27).expect("valid date"))
        .day_count(DayCount::CalendarDays)
        .calendar(TradingCalendar::nse())
        .mode(PricingMode::ZeroRate)
        .clock(ValuationClock::Fixed(valuation))
        .build()
        .expect("benchmark context should be valid")
}

fn strike_ladder(n: u32) -> Vec<StrikeQuote> {
    (0..n)
        .map(|i| {
            let strike = 24_000.0 + 20.0 * f64::from(i);
            StrikeQuote::both(strike, 110.0, 205.0)
        })
        .collect()
}

fn bench_black76_price(c: &mut Criterion) {
    c.bench_function("black76_call_price", |b| {
        b.iter(|| {
            let px = PricingModel::Black76.price(
                OptionType::Call,
                black_box(25_005.0),
                black_box(25_100.0),
                0.0,
                black_box(0.11),
                7.0 / 365.0,
            );
            black_box(px)
        })
    });
}

fn bench_implied_vol_solve(c: &mut Criterion) {
    let t = 7.0 / 365.0;
    let premium = PricingModel::Black76.price(OptionType::Call, 25_005.0, 25_100.0, 0.0, 0.11, t);

    c.bench_function("implied_vol_solve", |b| {
        b.iter(|| {
            let iv = implied_vol(black_box(premium), |s| {
                PricingModel::Black76.price(OptionType::Call, 25_005.0, 25_100.0, 0.0, s, t)
            });
            black_box(iv)
        })
    });
}

fn bench_single_strike_evaluation(c: &mut Criterion) {
    let ctx = benchmark_context();
    let quote = StrikeQuote::both(25_100.0, 110.0, 205.0);

    c.bench_function("chain_single_strike", |b| {
        b.iter(|| {
            let row = ctx
                .evaluate(black_box(&quote))
                .expect("chain should be live");
            black_box(row)
        })
    });
}

fn bench_chain_sizes(c: &mut Criterion) {
    let ctx = benchmark_context();
    let mut group = c.benchmark_group("chain_evaluation");

    for strikes in [20_u32, 100, 400] {
        let ladder = strike_ladder(strikes);
        group.bench_with_input(BenchmarkId::from_parameter(strikes), &strikes, |b, _| {
            b.iter(|| {
                let rows = ctx
                    .evaluate_chain(black_box(&ladder))
                    .expect("chain should be live");
                black_box(rows)
            })
        });
    }

    group.finish();
}

#[cfg(feature = "parallel")]
fn bench_parallel_chain(c: &mut Criterion) {
    let ctx = benchmark_context();
    let ladder = strike_ladder(400);

    c.bench_function("chain_evaluation_parallel_400", |b| {
        b.iter(|| {
            let rows = ctx
                .par_evaluate_chain(black_box(&ladder))
                .expect("chain should be live");
            black_box(rows)
        })
    });
}

fn bench_day_count(c: &mut Criterion) {
    use chainvol::time::time_to_expiry;

    let cal = TradingCalendar::nse();
    let valuation = NaiveDate::from_ymd_opt(2025, 10, 20)
        .expect("valid date")
        .and_hms_opt(12, 0, 0)
        .expect("valid time");
    let expiry = NaiveDate::from_ymd_opt(2025, 10, 24).expect("valid date");

    c.bench_function("trading_day_tte", |b| {
        b.iter(|| {
            let t = time_to_expiry(
                black_box(valuation),
                black_box(expiry),
                DayCount::TradingDays,
                &cal,
            );
            black_box(t)
        })
    });
}

#[cfg(not(feature = "parallel"))]
criterion_group!(
    chain_benches,
    bench_black76_price,
    bench_implied_vol_solve,
    bench_single_strike_evaluation,
    bench_chain_sizes,
    bench_day_count
);

#[cfg(feature = "parallel")]
criterion_group!(
    chain_benches,
    bench_black76_price,
    bench_implied_vol_solve,
    bench_single_strike_evaluation,
    bench_chain_sizes,
    bench_parallel_chain,
    bench_day_count
);

criterion_main!(chain_benches);
