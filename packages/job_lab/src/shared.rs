use std::fmt;
use std::panic;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::time::significant;
use crate::{Job, ThreadShares};

/// A total of job time that many worker threads add to concurrently.
///
/// Every worker records the elapsed time of each job it completes, so the accumulator is
/// touched once per job by whichever thread finished it.
pub trait JobTimeAccumulator: Default + Sync {
    /// Adds the elapsed time of one completed job to the total.
    fn record(&self, elapsed: Duration);

    /// The sum of everything recorded so far.
    fn total(&self) -> Duration;
}

/// Accumulates job time behind a mutex that is acquired once per recorded job.
///
/// Workers serialize on the lock every time they finish a job.
#[derive(Debug, Default)]
pub struct LockedAccumulator {
    total: Mutex<Duration>,
}

impl JobTimeAccumulator for LockedAccumulator {
    fn record(&self, elapsed: Duration) {
        let mut total = self
            .total
            .lock()
            .expect("the lock is never held while code that can panic is running");

        *total = total.saturating_add(elapsed);
    }

    fn total(&self) -> Duration {
        *self
            .total
            .lock()
            .expect("the lock is never held while code that can panic is running")
    }
}

/// Accumulates job time as a lock-free atomic count of nanoseconds.
#[derive(Debug, Default)]
pub struct AtomicAccumulator {
    nanos: AtomicU64,
}

impl JobTimeAccumulator for AtomicAccumulator {
    fn record(&self, elapsed: Duration) {
        // 2^64 nanoseconds is centuries, far beyond any single job.
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);

        // Only the final total is ever read, after all workers have been joined.
        self.nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    fn total(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Relaxed))
    }
}

/// Hands the jobs of a [`ThreadShares`] split to that many worker threads, with every worker
/// adding the time of each completed job to one shared accumulator of type `A`.
///
/// Every worker executes the floor share. Leftover jobs are not executed and a split with no
/// threads executes nothing; both are logged as warnings. The report counts only the jobs that
/// actually ran.
///
/// The wall-clock time is measured from before the first worker is spawned until after the last
/// one is joined. The calling thread blocks until every worker has finished; there is no timeout.
///
/// # Panics
///
/// If a worker thread panics, the panic is propagated to the caller.
///
/// # Examples
///
/// ```
/// use job_lab::{Job, LockedAccumulator, ThreadShares, run_shared};
///
/// let shares = ThreadShares::from_requested(32, 3).unwrap();
/// let report = run_shared::<LockedAccumulator>(Job::with_size(1_000), &shares);
///
/// assert_eq!(report.jobs_completed(), 30);
/// println!("{report}");
/// ```
pub fn run_shared<A>(job: Job, shares: &ThreadShares) -> SharedRunReport
where
    A: JobTimeAccumulator,
{
    if shares.threads() == 0 {
        warn!(
            requested_jobs = shares.requested_jobs(),
            "no worker threads requested, no jobs will run"
        );
    } else if shares.leftover_jobs() != 0 {
        warn!(
            requested_jobs = shares.requested_jobs(),
            threads = shares.threads(),
            leftover_jobs = shares.leftover_jobs(),
            "jobs do not divide evenly across threads, leftover jobs will not run"
        );
    }

    let accumulator = A::default();
    let jobs_per_thread = shares.jobs_per_thread();

    let start = Instant::now();

    let jobs_completed = thread::scope(|scope| {
        let handles = (0..shares.threads())
            .map(|thread_index| {
                let accumulator = &accumulator;

                scope.spawn(move || {
                    debug!(thread_index, jobs = jobs_per_thread, "worker started");

                    let completed = execute_batch(job, jobs_per_thread, accumulator);

                    debug!(thread_index, "worker finished");

                    completed
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| panic::resume_unwind(payload))
            })
            .fold(0_u64, |total, completed| {
                total
                    .checked_add(completed)
                    .expect("never more than the requested jobs, which fit in u64")
            })
    });

    let wall_time = start.elapsed();

    let report = SharedRunReport {
        threads: shares.threads(),
        jobs_completed,
        total_job_time: accumulator.total(),
        wall_time,
    };

    info!(
        threads = shares.threads(),
        jobs = jobs_completed,
        throughput = report.throughput(),
        "shared accumulator run finished"
    );

    report
}

fn execute_batch(job: Job, count: u64, accumulator: &impl JobTimeAccumulator) -> u64 {
    for _ in 0..count {
        let elapsed = job.timed();

        trace!(?elapsed, "job finished");

        accumulator.record(elapsed);
    }

    count
}

/// The outcome of [`run_shared()`].
///
/// The display format is the one printed by the `job_threads` program, with figures rounded to
/// six significant digits:
///
/// ```text
/// Results for 4 threads:
/// throughput = 123.4
/// average response time = 0.0123
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[must_use]
pub struct SharedRunReport {
    threads: usize,
    jobs_completed: u64,
    total_job_time: Duration,
    wall_time: Duration,
}

impl SharedRunReport {
    /// The number of worker threads that took part in the run. May be zero.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// How many jobs were completed across all threads.
    #[must_use]
    pub fn jobs_completed(&self) -> u64 {
        self.jobs_completed
    }

    /// The sum of the individually measured durations of all jobs.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Real timing logic in tests is not desirable.
    pub fn total_job_time(&self) -> Duration {
        self.total_job_time
    }

    /// The wall-clock time from spawning the first worker until the last one was joined.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Real timing logic in tests is not desirable.
    pub fn wall_time(&self) -> Duration {
        self.wall_time
    }

    /// Jobs completed per second of wall-clock time.
    ///
    /// Zero if no jobs were completed, unless the wall-clock time was zero as well, which makes it
    /// undefined (NaN).
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "job counts large enough to lose precision are not realistic"
    )]
    pub fn throughput(&self) -> f64 {
        self.jobs_completed as f64 / self.wall_time.as_secs_f64()
    }

    /// The mean duration of a single job, in seconds.
    ///
    /// Undefined (NaN) if no jobs were completed.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "job counts large enough to lose precision are not realistic"
    )]
    pub fn average_response_time_secs(&self) -> f64 {
        self.total_job_time.as_secs_f64() / self.jobs_completed as f64
    }
}

impl fmt::Display for SharedRunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Results for {} threads:", self.threads)?;
        writeln!(f, "throughput = {}", significant(self.throughput()))?;
        write!(
            f,
            "average response time = {}",
            significant(self.average_response_time_secs())
        )
    }
}
