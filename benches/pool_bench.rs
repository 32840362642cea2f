use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use drainpool::{NaiveThreadPool, SharedQueueThreadPool, ThreadPool};
use rand::prelude::*;

const TASKS: usize = 200;

/// Spins for a random number of iterations so tasks finish out of order.
fn run_tasks<P: ThreadPool>(pool: &P, work: &[u64]) {
    let sink = Arc::new(AtomicU64::new(0));
    for &n in work {
        let sink = Arc::clone(&sink);
        pool.spawn(move || {
            let mut acc = 0u64;
            for i in 0..n {
                acc = acc.wrapping_add(i * i);
            }
            sink.fetch_add(acc, Ordering::Relaxed);
        })
        .unwrap();
    }
    pool.wait();
}

fn spawn_wait_bench(c: &mut Criterion) {
    let mut rng = thread_rng();
    let work: Vec<u64> = (0..TASKS).map(|_| rng.gen_range(1_000..10_000)).collect();

    let mut group = c.benchmark_group("spawn_wait");

    for threads in [1u32, 2, 4, 8] {
        let pool = SharedQueueThreadPool::new(threads).unwrap();
        group.bench_with_input(
            BenchmarkId::new("shared_queue", threads),
            &work,
            |b, work| b.iter(|| run_tasks(&pool, work)),
        );
    }

    let pool = NaiveThreadPool::new(0).unwrap();
    group.bench_with_input(BenchmarkId::new("naive", "-"), &work, |b, work| {
        b.iter(|| run_tasks(&pool, work))
    });

    group.finish();
}

criterion_group!(benches, spawn_wait_bench);
criterion_main!(benches);
