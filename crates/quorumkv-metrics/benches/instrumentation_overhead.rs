// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Benchmark instrumentation overhead
//!
//! Compares the metrics-backed facade against the no-op facade on a
//! representative mix of select and insert events.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use quorumkv_metrics::{Instrumentation, MetricRegistry, MetricsInstrumentation, NoopInstrumentation};
use std::hint::black_box;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// One simulated select followed by one simulated insert
fn record_mix(instr: &dyn Instrumentation, i: u64) {
    instr.select_call();
    instr.select_keys(black_box(4));
    instr.select_send_to(2);
    instr.select_first_response_duration(Duration::from_nanos(black_box(i % 5_000_000)));
    instr.select_duration(Duration::from_nanos(black_box(i % 9_000_000)));
    instr.select_returned(4);

    instr.insert_call();
    instr.insert_record_count(1);
    instr.insert_call_duration(Duration::from_nanos(black_box(i % 2_000_000)));
}

fn bench_single_thread(c: &mut Criterion) {
    let registry = MetricRegistry::new();
    let metrics = MetricsInstrumentation::new(&registry, "bench_").expect("register bench metrics");
    let mut group = c.benchmark_group("instrumentation_overhead");

    for iterations in [1_000u64, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("noop", iterations),
            &iterations,
            |b, &iterations| {
                b.iter(|| (0..iterations).for_each(|i| record_mix(&NoopInstrumentation, i)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("metrics", iterations),
            &iterations,
            |b, &iterations| {
                b.iter(|| (0..iterations).for_each(|i| record_mix(&metrics, i)));
            },
        );
    }

    group.finish();
}

fn bench_contended(c: &mut Criterion) {
    let registry = MetricRegistry::new();
    let metrics: Arc<dyn Instrumentation> = Arc::new(
        MetricsInstrumentation::new(&registry, "bench_").expect("register bench metrics"),
    );
    let mut group = c.benchmark_group("instrumentation_contended");

    for threads in [2usize, 4, 8] {
        group.bench_with_input(BenchmarkId::new("metrics", threads), &threads, |b, &threads| {
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let instr = Arc::clone(&metrics);
                        thread::spawn(move || {
                            for i in 0..10_000 {
                                record_mix(instr.as_ref(), i);
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().expect("bench worker panicked");
                }
            });
        });
    }

    group.finish();
}

/// Cost of one scrape of a fully populated facade
fn bench_render(c: &mut Criterion) {
    let registry = MetricRegistry::new();
    let metrics = MetricsInstrumentation::new(&registry, "bench_").expect("register bench metrics");
    for i in 0..10_000 {
        record_mix(&metrics, i);
    }

    c.bench_function("render_exposition", |b| {
        b.iter(|| black_box(registry.render().expect("render")));
    });
}

criterion_group!(benches, bench_single_thread, bench_contended, bench_render);
criterion_main!(benches);
