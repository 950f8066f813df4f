use criterion::{Criterion, black_box, criterion_group, criterion_main};
use volreport::{RawSeries, Reading, ReportBuilder};

fn sample_series(days: u32) -> RawSeries {
    (1..=days)
        .map(|day| {
            let reading = if day % 17 == 0 {
                Reading::Missing
            } else {
                let base = f64::from(day) * 24.5;
                Reading::Present {
                    v1: 1_500.0 + base,
                    v2: 1_480.0 + base * 0.97,
                }
            };
            // sparse keys exercise predecessor lookup across gaps
            (day * 3, reading)
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let builder = ReportBuilder::new();
    let month = sample_series(31);
    let year = sample_series(365);

    c.bench_function("build_month", |b| {
        b.iter(|| builder.build(black_box(&month)));
    });
    c.bench_function("build_year", |b| {
        b.iter(|| builder.build(black_box(&year)));
    });
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
