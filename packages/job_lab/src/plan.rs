use std::num::NonZero;

use num_integer::Integer;
use thiserror::Error;

/// Errors that can occur when splitting a number of jobs across a number of threads.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum PlanError {
    /// More threads were requested than there are jobs to give them.
    #[error("Too many threads - more than the number of jobs!")]
    TooManyThreads {
        /// The requested thread count.
        threads: u64,

        /// The job count the threads were supposed to share.
        jobs: u64,
    },

    /// Too few threads were requested: a negative count for any split, or zero for an even one.
    #[error("Not enough threads.")]
    NotEnoughThreads {
        /// The requested thread count.
        requested: i64,
    },

    /// The job count cannot be split evenly across the threads.
    #[error("{jobs} jobs cannot be divided evenly across {threads} threads.")]
    Indivisible {
        /// The job count the threads were supposed to share.
        jobs: u64,

        /// The requested thread count.
        threads: u64,
    },
}

/// A validated split of a number of jobs evenly across a number of worker threads.
///
/// Every thread executes exactly [`jobs_per_thread()`][Self::jobs_per_thread] jobs. Uneven
/// distribution is not supported, so the thread count must divide the job count.
///
/// # Examples
///
/// ```
/// use job_lab::BatchPlan;
///
/// let plan = BatchPlan::new(32, 4).unwrap();
/// assert_eq!(plan.jobs_per_thread(), 8);
///
/// assert!(BatchPlan::new(32, 40).is_err());
/// assert!(BatchPlan::new(32, 3).is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BatchPlan {
    jobs: u64,
    threads: NonZero<usize>,
    jobs_per_thread: u64,
}

impl BatchPlan {
    /// Splits `jobs` jobs evenly across `threads` threads.
    ///
    /// # Errors
    ///
    /// Returns an error if there are more threads than jobs, if there are no threads or if the
    /// thread count does not divide the job count.
    pub fn new(jobs: u64, threads: usize) -> Result<Self, PlanError> {
        // A thread count that does not fit in u64 is certainly more than the job count.
        let threads_u64 = u64::try_from(threads).unwrap_or(u64::MAX);

        if threads_u64 > jobs {
            return Err(PlanError::TooManyThreads {
                threads: threads_u64,
                jobs,
            });
        }

        let Some(threads) = NonZero::new(threads) else {
            return Err(PlanError::NotEnoughThreads { requested: 0 });
        };

        let (jobs_per_thread, remainder) = jobs.div_rem(&threads_u64);

        if remainder != 0 {
            return Err(PlanError::Indivisible {
                jobs,
                threads: threads_u64,
            });
        }

        Ok(Self {
            jobs,
            threads,
            jobs_per_thread,
        })
    }

    /// The total number of jobs.
    #[must_use]
    pub fn jobs(&self) -> u64 {
        self.jobs
    }

    /// The number of worker threads.
    #[must_use]
    pub fn threads(&self) -> NonZero<usize> {
        self.threads
    }

    /// The number of jobs every worker thread executes.
    #[must_use]
    pub fn jobs_per_thread(&self) -> u64 {
        self.jobs_per_thread
    }
}

/// A split of a number of jobs across a number of worker threads that tolerates uneven counts.
///
/// Every thread executes the floor share of the requested jobs. Jobs that do not fit evenly are
/// left over and never executed, and a thread count of zero executes nothing at all. Only thread
/// counts above the job count and negative thread counts are rejected.
///
/// # Examples
///
/// ```
/// use job_lab::ThreadShares;
///
/// let shares = ThreadShares::from_requested(32, 3).unwrap();
/// assert_eq!(shares.jobs_per_thread(), 10);
/// assert_eq!(shares.jobs(), 30);
/// assert_eq!(shares.leftover_jobs(), 2);
///
/// assert!(ThreadShares::from_requested(32, -1).is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ThreadShares {
    requested_jobs: u64,
    threads: usize,
    jobs_per_thread: u64,
}

impl ThreadShares {
    /// Gives each of `threads` threads an equal share of `jobs` jobs, rounding down.
    ///
    /// # Errors
    ///
    /// Returns an error if there are more threads than jobs.
    pub fn new(jobs: u64, threads: usize) -> Result<Self, PlanError> {
        let threads_u64 = u64::try_from(threads).unwrap_or(u64::MAX);

        if threads_u64 > jobs {
            return Err(PlanError::TooManyThreads {
                threads: threads_u64,
                jobs,
            });
        }

        // No threads means no shares to hand out.
        let jobs_per_thread = jobs.checked_div(threads_u64).unwrap_or(0);

        Ok(Self {
            requested_jobs: jobs,
            threads,
            jobs_per_thread,
        })
    }

    /// Splits `jobs` jobs across a thread count that came from user input and may therefore be
    /// negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested thread count is negative or larger than the job count.
    /// The job count is checked first.
    pub fn from_requested(jobs: u64, requested_threads: i64) -> Result<Self, PlanError> {
        if u64::try_from(requested_threads).is_ok_and(|threads| threads > jobs) {
            return Err(PlanError::TooManyThreads {
                threads: requested_threads.unsigned_abs(),
                jobs,
            });
        }

        let Ok(threads) = usize::try_from(requested_threads) else {
            return Err(PlanError::NotEnoughThreads {
                requested: requested_threads,
            });
        };

        Self::new(jobs, threads)
    }

    /// The number of jobs that was asked for, including any that are left over.
    #[must_use]
    pub fn requested_jobs(&self) -> u64 {
        self.requested_jobs
    }

    /// The number of worker threads. May be zero.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// The number of jobs every worker thread executes.
    #[must_use]
    pub fn jobs_per_thread(&self) -> u64 {
        self.jobs_per_thread
    }

    /// The number of jobs that will actually be executed across all threads.
    #[must_use]
    pub fn jobs(&self) -> u64 {
        let threads = u64::try_from(self.threads).expect("thread count was checked to fit in u64");

        self.jobs_per_thread
            .checked_mul(threads)
            .expect("the floor share times the thread count never exceeds the requested jobs")
    }

    /// The number of requested jobs that do not fit the floor share and are never executed.
    #[must_use]
    pub fn leftover_jobs(&self) -> u64 {
        self.requested_jobs
            .checked_sub(self.jobs())
            .expect("the floor share times the thread count never exceeds the requested jobs")
    }
}

impl From<BatchPlan> for ThreadShares {
    fn from(plan: BatchPlan) -> Self {
        Self {
            requested_jobs: plan.jobs(),
            threads: plan.threads().get(),
            jobs_per_thread: plan.jobs_per_thread(),
        }
    }
}
