//! Resampling and serialization throughput.
//!
//! Run with: `cargo bench --package candlefold-bench`

use candlefold_bench::{SeriesConfig, minute_series};
use candlefold_lib::prelude::*;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::io::BufWriter;

fn resample_benchmark(c: &mut Criterion) {
    let candles = minute_series(&SeriesConfig {
        gap_every: 375,
        missing_volume_every: 50,
        ..SeriesConfig::default()
    });

    let mut group = c.benchmark_group("resample");
    group.throughput(Throughput::Elements(candles.len() as u64));

    for minutes in [5_i64, 15, 60, 1440] {
        group.bench_with_input(BenchmarkId::new("first-candle", minutes), &minutes, |b, &minutes| {
            b.iter(|| resample(black_box(&candles), minutes));
        });
    }

    let grid = ResampleOptions::new().with_anchor(Anchor::session_open());
    let timeframe = Timeframe::from_minutes(15).unwrap();
    group.bench_function("session-grid/15", |b| {
        b.iter(|| resample_with(black_box(&candles), timeframe, grid));
    });

    group.finish();
}

fn format_benchmark(c: &mut Criterion) {
    let candles = minute_series(&SeriesConfig::default());
    let five_minute = resample(&candles, 5).unwrap();

    let mut group = c.benchmark_group("write");
    group.throughput(Throughput::Elements(five_minute.len() as u64));

    group.bench_function("csv", |b| {
        b.iter(|| {
            let mut buffer = Vec::new();
            CsvFormatter::new().write_candles(&five_minute, &mut buffer).unwrap();
            buffer
        });
    });

    group.bench_function("json", |b| {
        b.iter(|| {
            let mut buffer = Vec::new();
            JsonFormatter::new().write_candles(&five_minute, &mut buffer).unwrap();
            buffer
        });
    });

    group.bench_function("csv-file-roundtrip", |b| {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candles.csv");
        b.iter(|| {
            let file = std::fs::File::create(&path).unwrap();
            CsvFormatter::new()
                .write_candles(&five_minute, BufWriter::new(file))
                .unwrap();
            CandleReader::new(InputFormat::Csv).read_path(&path).unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, resample_benchmark, format_benchmark);
criterion_main!(benches);
