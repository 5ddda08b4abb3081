// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Primitive throughput benchmarks.
//
// Run with:
//   cargo bench --bench primitives
//
// Groups:
//   rw_lock        - uncontended read and write acquire/release cycles
//   bounded_buffer - put/take through buffers of several capacities
//   spsc           - one producer thread feeding one consumer

use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use confsync::{BoundedBuffer, RwCell, WriterPriorityRwLock};

const CAPACITIES: &[usize] = &[1, 8, 64];

// ---------------------------------------------------------------------------
// Reader-writer lock
// ---------------------------------------------------------------------------

fn bench_rw_lock(c: &mut Criterion) {
    let mut group = c.benchmark_group("rw_lock");
    group.throughput(Throughput::Elements(1));

    let lock = WriterPriorityRwLock::new().expect("rw lock");
    group.bench_function("read_cycle", |b| {
        b.iter(|| {
            lock.acquire_read();
            lock.release_read();
        });
    });
    group.bench_function("write_cycle", |b| {
        b.iter(|| {
            lock.acquire_write();
            lock.release_write();
        });
    });

    let cell = RwCell::new(0u64).expect("rw cell");
    group.bench_function("cell_read", |b| b.iter(|| black_box(*cell.read())));
    group.bench_function("cell_write", |b| b.iter(|| *cell.write() += 1));

    group.finish();
}

// ---------------------------------------------------------------------------
// Bounded buffer, single thread
// ---------------------------------------------------------------------------

fn bench_put_take(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_buffer");
    group.throughput(Throughput::Elements(1));

    for &cap in CAPACITIES {
        let buf = BoundedBuffer::new(cap).expect("buffer");
        group.bench_with_input(BenchmarkId::from_parameter(cap), &buf, |b, buf| {
            b.iter(|| {
                buf.put(black_box(7u64));
                black_box(buf.take())
            });
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Bounded buffer, producer thread -> consumer thread
// ---------------------------------------------------------------------------

fn bench_spsc(c: &mut Criterion) {
    const BATCH: u64 = 1024;

    let mut group = c.benchmark_group("spsc");
    group.throughput(Throughput::Elements(BATCH));

    for &cap in CAPACITIES {
        group.bench_with_input(BenchmarkId::from_parameter(cap), &cap, |b, &cap| {
            let buf = Arc::new(BoundedBuffer::new(cap).expect("buffer"));
            b.iter(|| {
                let producer = {
                    let buf = Arc::clone(&buf);
                    thread::spawn(move || {
                        for i in 0..BATCH {
                            buf.put(i);
                        }
                    })
                };
                let mut sum = 0u64;
                for _ in 0..BATCH {
                    sum += buf.take();
                }
                producer.join().expect("producer");
                black_box(sum)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rw_lock, bench_put_take, bench_spsc);
criterion_main!(benches);
