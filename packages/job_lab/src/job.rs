use std::hint::black_box;
use std::time::{Duration, Instant};

/// A fixed amount of synthetic CPU work: summing the integers in `0..size`.
///
/// A job has no inputs and no observable outputs. Its only purpose is to consume a roughly
/// constant amount of wall-clock time on a given machine, which the runners then measure.
///
/// # Examples
///
/// ```
/// use job_lab::Job;
///
/// let elapsed = Job::with_size(1_000).timed();
/// println!("One small job took {elapsed:?}");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Job {
    size: u64,
}

impl Job {
    /// The job used by the fixed lab scenarios: sums `0..100_000_000`.
    pub const LAB: Self = Self::with_size(100_000_000);

    /// The job used by the shared-accumulator program: sums `0..1_000_000`.
    pub const BATCH: Self = Self::with_size(1_000_000);

    /// Creates a job that sums the integers in `0..size`.
    ///
    /// Mostly useful for tests and benchmarks that need a cheaper job than the fixed ones.
    #[must_use]
    pub const fn with_size(size: u64) -> Self {
        Self { size }
    }

    /// The exclusive upper bound of the summed range.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Performs the work. Cannot fail and cannot be interrupted.
    pub fn run(&self) {
        black_box(self.sum());
    }

    /// Performs the work and returns how long it took.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Real timing logic in tests is not desirable.
    pub fn timed(&self) -> Duration {
        let start = Instant::now();
        self.run();
        start.elapsed()
    }

    fn sum(&self) -> u64 {
        let mut sum: u64 = 0;

        // Each term goes through `black_box` so the loop is not folded into a closed form.
        for i in 0..black_box(self.size) {
            sum = sum.wrapping_add(black_box(i));
        }

        sum
    }
}
