//! Compares the cost of the different ways of running a batch of small jobs: on one thread,
//! across threads with per-thread result slots and across threads with a shared accumulator.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::thread;

use criterion::{Criterion, criterion_group, criterion_main};
use job_lab::{
    AtomicAccumulator, BatchPlan, Job, LockedAccumulator, ThreadShares, run_parallel,
    run_sequential, run_shared,
};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

const JOB: Job = Job::with_size(10_000);
const JOB_COUNT: u64 = 32;

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("job_lab_runners");

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(run_sequential(JOB, JOB_COUNT)));
    });

    let threads = thread::available_parallelism()
        .map_or(1, |count| count.get())
        .min(4);

    // A thread count that does not divide the job count falls back to one thread.
    let plan = BatchPlan::new(JOB_COUNT, threads)
        .or_else(|_| BatchPlan::new(JOB_COUNT, 1))
        .expect("any job count can be split across one thread");
    let shares = ThreadShares::from(plan);

    group.bench_function("parallel", |b| {
        b.iter(|| black_box(run_parallel(JOB, &plan)));
    });

    group.bench_function("shared_locked", |b| {
        b.iter(|| black_box(run_shared::<LockedAccumulator>(JOB, &shares)));
    });

    group.bench_function("shared_atomic", |b| {
        b.iter(|| black_box(run_shared::<AtomicAccumulator>(JOB, &shares)));
    });

    group.finish();
}
