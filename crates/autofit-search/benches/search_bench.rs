//! Benchmarks for the font size search.
//!
//! Run with: cargo bench -p autofit-search

use autofit_core::Extent;
use autofit_search::{FitVerdict, LineLimit, SizingContext, find_best_size, fit_text};
use autofit_text::{CachedMeasurer, CellMeasurer};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::num::NonZeroU32;

// =============================================================================
// Test Data
// =============================================================================

fn prose(len: usize) -> String {
    "The quick brown fox jumps over the lazy dog. "
        .chars()
        .cycle()
        .take(len)
        .collect()
}

fn mixed(len: usize) -> String {
    "Total \u{4E2D}\u{6587} 12,345.00 well-known "
        .chars()
        .cycle()
        .take(len)
        .collect()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_search_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("search/threshold");

    for span in [16u32, 256, 65_536] {
        group.bench_with_input(BenchmarkId::from_parameter(span), &span, |b, &span| {
            b.iter(|| {
                find_best_size(0, black_box(span), |size| {
                    if size <= span / 3 {
                        FitVerdict::TooSmall
                    } else {
                        FitVerdict::TooLarge
                    }
                })
            })
        });
    }

    group.finish();
}

fn bench_single_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit/single_line");
    let measurer = CellMeasurer::default();

    for len in [8, 64, 512] {
        let ctx = SizingContext::new(prose(len), Extent::new(320.0, 48.0)).single_line(true);
        group.throughput(Throughput::Bytes(ctx.text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &ctx, |b, ctx| {
            b.iter(|| black_box(fit_text(measurer, 7, 99, ctx)))
        });
    }

    group.finish();
}

fn bench_multi_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit/multi_line");
    let measurer = CellMeasurer::default();
    let limit = LineLimit::Lines(NonZeroU32::new(4).unwrap_or(NonZeroU32::MIN));

    for len in [64, 512, 4096] {
        let ctx = SizingContext::new(mixed(len), Extent::new(480.0, 320.0)).max_lines(limit);
        group.throughput(Throughput::Bytes(ctx.text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &ctx, |b, ctx| {
            b.iter(|| black_box(fit_text(measurer, 7, 99, ctx)))
        });
    }

    group.finish();
}

fn bench_cached_multi_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit/multi_line_cached");
    let measurer = CachedMeasurer::with_default_capacity(CellMeasurer::default());

    for len in [64, 512, 4096] {
        let ctx = SizingContext::new(mixed(len), Extent::new(480.0, 320.0));
        group.throughput(Throughput::Bytes(ctx.text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &ctx, |b, ctx| {
            b.iter(|| black_box(fit_text(&measurer, 7, 99, ctx)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_search_only,
    bench_single_line,
    bench_multi_line,
    bench_cached_multi_line
);
criterion_main!(benches);
