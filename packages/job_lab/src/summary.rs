use std::fmt;

use crate::Millis;
use crate::time::significant;

/// Runtime statistics about one or more executed jobs.
///
/// A summary is produced for every batch of jobs executed by a runner. Summaries of batches that
/// ran in parallel can be merged with [`Summary::combine()`].
///
/// # Examples
///
/// ```
/// use job_lab::{Millis, Summary};
///
/// let first = Summary::new(8, Millis::new(10.0), 100.0);
/// let second = Summary::new(8, Millis::new(20.0), 50.0);
///
/// let combined = Summary::combine([&first, &second]);
///
/// assert_eq!(combined.jobs_completed(), 16);
/// assert_eq!(combined.average_response_time(), Millis::new(15.0));
/// assert_eq!(combined.throughput(), 150.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[must_use]
pub struct Summary {
    jobs_completed: u64,
    average_response_time: Millis,

    /// Jobs completed per second.
    throughput: f64,
}

impl Summary {
    /// Creates a summary from already calculated statistics.
    pub fn new(jobs_completed: u64, average_response_time: Millis, throughput: f64) -> Self {
        Self {
            jobs_completed,
            average_response_time,
            throughput,
        }
    }

    /// Creates a summary of `jobs_completed` jobs that took `runtime` in total.
    ///
    /// A batch of zero jobs has an undefined (NaN) average response time and zero throughput.
    #[expect(
        clippy::cast_precision_loss,
        reason = "job counts large enough to lose precision are not realistic"
    )]
    pub fn from_batch(jobs_completed: u64, runtime: Millis) -> Self {
        if jobs_completed == 0 {
            // Averaging over no jobs is undefined no matter how long the empty batch took.
            return Self::new(0, Millis::new(f64::NAN), 0.0);
        }

        let throughput = jobs_completed as f64 / runtime.as_secs_f64();

        Self::new(jobs_completed, runtime.divided_by(jobs_completed), throughput)
    }

    /// Constructs an aggregate of several summaries that are assumed to have been produced
    /// by batches running in parallel.
    ///
    /// * `jobs_completed` and `throughput` are combined additively.
    /// * `average_response_time` is the mean of the average response times of the inputs.
    ///
    /// Combining zero summaries yields zero jobs with an undefined (NaN) average response time.
    ///
    /// # Panics
    ///
    /// Panics if the total job count overflows `u64`.
    pub fn combine<'a>(summaries: impl IntoIterator<Item = &'a Self>) -> Self {
        let mut summary_count: u64 = 0;
        let mut jobs_completed: u64 = 0;
        let mut response_time_total = Millis::ZERO;
        let mut throughput = 0.0;

        for summary in summaries {
            summary_count = summary_count
                .checked_add(1)
                .expect("more summaries than fit in u64 is unrealistic");
            jobs_completed = jobs_completed
                .checked_add(summary.jobs_completed)
                .expect("total job count overflowing u64 is unrealistic");
            response_time_total += summary.average_response_time;
            throughput += summary.throughput;
        }

        Self::new(
            jobs_completed,
            response_time_total.divided_by(summary_count),
            throughput,
        )
    }

    /// How many jobs were completed.
    #[must_use]
    pub fn jobs_completed(&self) -> u64 {
        self.jobs_completed
    }

    /// The mean wall-clock duration per completed job.
    #[must_use]
    pub fn average_response_time(&self) -> Millis {
        self.average_response_time
    }

    /// Completed jobs per second of wall-clock time.
    #[must_use]
    pub fn throughput(&self) -> f64 {
        self.throughput
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average response time: {}", self.average_response_time)?;
        write!(f, "Throughput:            {}", significant(self.throughput))
    }
}
