//! Normalizer throughput benchmarks.
//!
//! Measures how fast a whole sheet goes from CSV text to tickets. The
//! normalizer runs on every refresh, so its cost bounds how short the refresh
//! interval can sensibly be.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `normalize` | Full documents of 100, 1 000 and 10 000 rows |
//! | `dates` | Aging computation for each accepted date form |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench normalization_bench
//! open target/criterion/report/index.html
//! ```

use chrono::{TimeZone, Utc};
use cowdash_core::normalizer::{aging_days, Normalizer};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

fn sheet(rows: usize) -> String {
    let mut csv = String::from("Ticket ID,COW Site,Issue Type,Open Date,Status\n");
    for i in 0..rows {
        csv.push_str(&format!(
            "TKT-{i},COW Site {},Power,2024-{:02}-{:02},{}\n",
            i % 7 + 1,
            i % 12 + 1,
            i % 28 + 1,
            ["Open", "Pending", "Resolved", "Closed"][i % 4],
        ));
    }
    csv
}

// ---------------------------------------------------------------------------
// Whole documents
// ---------------------------------------------------------------------------

fn normalize_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let normalizer = Normalizer::default();
    let now = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();

    for rows in [100usize, 1_000, 10_000] {
        let csv = sheet(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &csv, |b, csv| {
            b.iter(|| black_box(normalizer.normalize(black_box(csv), now)))
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Date parsing
// ---------------------------------------------------------------------------

fn dates_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("dates");
    let now = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();

    let forms = [
        ("iso_date", "2024-03-01"),
        ("rfc3339", "2024-03-01T08:30:00Z"),
        ("us_date", "3/1/2024"),
        ("day_month", "1 Mar 2024"),
        ("unparseable", "last tuesday"),
    ];

    group.throughput(Throughput::Elements(1));
    for (name, value) in forms {
        group.bench_with_input(BenchmarkId::from_parameter(name), value, |b, value| {
            b.iter(|| black_box(aging_days(black_box(value), now)))
        });
    }

    group.finish();
}

criterion_group!(benches, normalize_bench, dates_bench);
criterion_main!(benches);
