use std::time::Instant;

use tracing::debug;

use crate::{Job, Summary, ms_between};

/// Runs `count` jobs one after another on the current thread, timing the whole batch.
///
/// The resulting summary reports `count` completed jobs, the total runtime divided by `count`
/// as the average response time and `count` divided by the runtime in seconds as throughput.
///
/// A batch of zero jobs is allowed and produces an undefined (NaN) average response time.
///
/// # Examples
///
/// ```
/// use job_lab::{Job, run_sequential};
///
/// let summary = run_sequential(Job::with_size(1_000), 5);
/// assert_eq!(summary.jobs_completed(), 5);
/// ```
pub fn run_sequential(job: Job, count: u64) -> Summary {
    debug!(count, job_size = job.size(), "running consecutive jobs");

    let start = Instant::now();

    for _ in 0..count {
        job.run();
    }

    let end = Instant::now();

    Summary::from_batch(count, ms_between(start, end))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const TINY: Job = Job::with_size(10);

    #[test]
    fn completes_requested_count() {
        for count in 0..20 {
            assert_eq!(run_sequential(TINY, count).jobs_completed(), count);
        }
    }

    #[test]
    fn single_job() {
        let summary = run_sequential(TINY, 1);

        assert_eq!(summary.jobs_completed(), 1);
        assert!(summary.average_response_time().get() >= 0.0);
    }

    #[test]
    fn zero_jobs_does_not_panic() {
        let summary = run_sequential(TINY, 0);

        assert_eq!(summary.jobs_completed(), 0);
        assert!(summary.average_response_time().get().is_nan());
    }

    #[test]
    fn measurable_work_has_finite_statistics() {
        let summary = run_sequential(Job::with_size(100_000), 4);

        assert!(summary.average_response_time().get() > 0.0);
        assert!(summary.throughput().is_finite());
        assert!(summary.throughput() > 0.0);
    }
}
