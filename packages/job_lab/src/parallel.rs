use std::num::NonZero;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::{BatchPlan, Job, Summary, run_sequential};

/// Splits the jobs of a [`BatchPlan`] across that many worker threads and waits for all of them.
///
/// Every worker runs [`run_sequential()`] on its share of the jobs and stores the resulting
/// [`Summary`] in its own result slot. The slots are disjoint, so workers never contend on them.
/// The calling thread blocks until every worker has finished; there is no timeout.
///
/// The per-thread summaries are merged with [`Summary::combine()`].
///
/// # Panics
///
/// If a worker thread panics, the panic is propagated to the caller.
///
/// # Examples
///
/// ```
/// use job_lab::{BatchPlan, Job, run_parallel};
///
/// let plan = BatchPlan::new(32, 4).unwrap();
/// let report = run_parallel(Job::with_size(1_000), &plan);
///
/// assert_eq!(report.per_thread().len(), 4);
/// assert_eq!(report.combined().jobs_completed(), 32);
/// ```
pub fn run_parallel(job: Job, plan: &BatchPlan) -> ParallelRunReport {
    let jobs_per_thread = plan.jobs_per_thread();

    let mut slots: Vec<Option<Summary>> = vec![None; plan.threads().get()];

    let start = Instant::now();

    thread::scope(|scope| {
        for (thread_index, slot) in slots.iter_mut().enumerate() {
            scope.spawn(move || {
                debug!(thread_index, jobs = jobs_per_thread, "worker started");

                *slot = Some(run_sequential(job, jobs_per_thread));

                debug!(thread_index, "worker finished");
            });
        }
    });

    let wall_time = start.elapsed();

    let per_thread = slots
        .into_iter()
        .map(|slot| slot.expect("every worker fills its slot before the scope ends"))
        .collect::<Box<[_]>>();

    let report = ParallelRunReport {
        combined: Summary::combine(per_thread.iter()),
        per_thread,
        threads: plan.threads(),
        wall_time,
    };

    info!(
        threads = plan.threads().get(),
        jobs = plan.jobs(),
        wall_time_ms = wall_time.as_secs_f64() * 1000.0,
        wall_clock_throughput = report.wall_clock_throughput(),
        "parallel run finished"
    );

    report
}

/// The outcome of [`run_parallel()`].
///
/// Besides the combined summary, this keeps the per-thread summaries and the wall-clock time of
/// the whole parallel section.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct ParallelRunReport {
    combined: Summary,
    per_thread: Box<[Summary]>,
    threads: NonZero<usize>,
    wall_time: Duration,
}

impl ParallelRunReport {
    /// The per-thread summaries merged via [`Summary::combine()`].
    ///
    /// Its throughput is the sum of the per-thread throughputs, which only approximates the real
    /// throughput when all threads ran concurrently for about the same time. See
    /// [`wall_clock_throughput()`][Self::wall_clock_throughput] for the measured figure.
    pub fn combined(&self) -> Summary {
        self.combined
    }

    /// The summary of each worker thread, indexed by thread.
    #[must_use]
    pub fn per_thread(&self) -> &[Summary] {
        &self.per_thread
    }

    /// The number of worker threads that took part in the run.
    #[must_use]
    pub fn threads(&self) -> NonZero<usize> {
        self.threads
    }

    /// The wall-clock time from spawning the first worker until the last one was joined.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Real timing logic in tests is not desirable.
    pub fn wall_time(&self) -> Duration {
        self.wall_time
    }

    /// Jobs completed per second of wall-clock time, derived from the total job count and
    /// [`wall_time()`][Self::wall_time] rather than summed across threads.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "job counts large enough to lose precision are not realistic"
    )]
    pub fn wall_clock_throughput(&self) -> f64 {
        self.combined.jobs_completed() as f64 / self.wall_time.as_secs_f64()
    }
}
