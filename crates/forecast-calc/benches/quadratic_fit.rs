//! 二次趨勢配適基準測試

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use forecast_calc::QuadraticTrend;
use forecast_core::DailySeries;
use rust_decimal::Decimal;

fn bench_quadratic(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let values: Vec<Decimal> = (0..365).map(|i| Decimal::from(5 + (i % 7))).collect();
    let series = DailySeries::new(start, values);

    c.bench_function("quadratic_fit_365d", |b| {
        b.iter(|| QuadraticTrend::fit(black_box(&series)))
    });

    c.bench_function("quadratic_project_360d", |b| {
        let trend = QuadraticTrend::fit(&series);
        b.iter(|| trend.project(black_box(&series)))
    });
}

criterion_group!(benches, bench_quadratic);
criterion_main!(benches);
