use std::fmt;

use tracing::info;

use crate::{BatchPlan, Job, Summary, run_parallel, run_sequential};

/// How many jobs the multi-job lab scenarios execute.
pub const LAB_JOB_COUNT: u64 = 32;

/// How many worker threads the parallel lab scenario uses.
pub const LAB_THREAD_COUNT: usize = 4;

/// One of the fixed measurements performed by the `job_scenarios` program.
///
/// The [`Display`][fmt::Display] implementation renders the banner announcing the scenario.
///
/// # Examples
///
/// ```
/// use job_lab::{Job, Scenario};
///
/// for scenario in Scenario::lab() {
///     println!("{scenario}");
///     let summary = scenario.run(Job::with_size(1_000));
///     println!("{summary}");
/// }
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Scenario {
    /// Part A: a single job.
    SingleJob,

    /// Part B: a number of jobs executed one after another on the current thread.
    Consecutive {
        /// How many jobs to execute.
        jobs: u64,
    },

    /// Part C: a number of jobs split evenly across worker threads.
    Parallel {
        /// How the jobs are split across threads.
        plan: BatchPlan,
    },
}

impl Scenario {
    /// The three lab scenarios, in the order they are executed: one job, 32 consecutive jobs
    /// and 32 jobs split across 4 threads.
    #[must_use]
    pub fn lab() -> [Self; 3] {
        let plan = BatchPlan::new(LAB_JOB_COUNT, LAB_THREAD_COUNT)
            .expect("lab job count is a multiple of the lab thread count");

        [
            Self::SingleJob,
            Self::Consecutive {
                jobs: LAB_JOB_COUNT,
            },
            Self::Parallel { plan },
        ]
    }

    /// Executes the scenario with the given job, returning the (combined) summary.
    pub fn run(&self, job: Job) -> Summary {
        match self {
            Self::SingleJob => run_sequential(job, 1),
            Self::Consecutive { jobs } => run_sequential(job, *jobs),
            Self::Parallel { plan } => {
                let report = run_parallel(job, plan);

                info!(
                    summed_throughput = report.combined().throughput(),
                    wall_clock_throughput = report.wall_clock_throughput(),
                    "throughput of parallel scenario"
                );

                report.combined()
            }
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleJob => write!(f, "Running part A."),
            Self::Consecutive { jobs } => {
                write!(f, "Running part B with {jobs} consecutive jobs.")
            }
            Self::Parallel { plan } => write!(
                f,
                "Running part C with {} jobs and {} threads.",
                plan.jobs(),
                plan.threads()
            ),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const TINY: Job = Job::with_size(10);

    #[test]
    fn lab_scenarios_in_order() {
        let [a, b, c] = Scenario::lab();

        assert_eq!(a, Scenario::SingleJob);
        assert_eq!(b, Scenario::Consecutive { jobs: 32 });
        assert_eq!(
            c,
            Scenario::Parallel {
                plan: BatchPlan::new(32, 4).unwrap()
            }
        );
    }

    #[test]
    fn banners() {
        let banners = Scenario::lab().map(|scenario| scenario.to_string());

        assert_eq!(
            banners,
            [
                "Running part A.",
                "Running part B with 32 consecutive jobs.",
                "Running part C with 32 jobs and 4 threads.",
            ]
        );
    }

    #[test]
    fn job_counts() {
        let completed = Scenario::lab().map(|scenario| scenario.run(TINY).jobs_completed());

        assert_eq!(completed, [1, 32, 32]);
    }
}
