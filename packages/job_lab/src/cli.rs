//! Command-line plumbing shared by the `job_scenarios` and `job_threads` binaries.
//!
//! Everything here is free of process-global dependencies like `std::env::args()` so it can be
//! exercised directly from tests.

use std::io;
use std::process::ExitCode;

use argh::FromArgs;
use tracing_subscriber::EnvFilter;

use crate::{PlanError, Scenario, Summary, ThreadShares};

/// The job count used by `job_threads` when none is given.
pub const DEFAULT_JOB_COUNT: u64 = 32;

/// The thread count used by `job_threads` when none is given.
pub const DEFAULT_THREAD_COUNT: i64 = 1;

/// Runs the three fixed lab scenarios (one job, 32 consecutive jobs, 32 jobs over 4 threads)
/// and prints the average response time and throughput of each.
#[derive(Debug, FromArgs)]
#[allow(
    clippy::exhaustive_structs,
    reason = "This is a hidden struct for binary/test use only"
)]
pub struct LabArgs {}

/// Runs a batch of jobs split across worker threads, adding the time of every job to one
/// shared total, and prints the throughput and average response time.
#[derive(Debug, FromArgs)]
#[allow(
    clippy::exhaustive_structs,
    reason = "This is a hidden struct for binary/test use only"
)]
pub struct ThreadsArgs {
    /// total number of jobs to run (default 32)
    #[argh(option, default = "DEFAULT_JOB_COUNT")]
    pub jobs: u64,

    /// number of worker threads, at most the job count; leftover jobs of an uneven split are
    /// not run (default 1)
    #[argh(positional, default = "DEFAULT_THREAD_COUNT")]
    pub threads: i64,
}

impl ThreadsArgs {
    /// Validates the requested counts and gives every thread its share of the jobs.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread count is larger than the job count or negative.
    pub fn shares(&self) -> Result<ThreadShares, PlanError> {
        ThreadShares::from_requested(self.jobs, self.threads)
    }
}

/// Writes the console output of one lab scenario: its banner before the scenario starts, then
/// the summary that `run` produces for it. No blank line follows the summary.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn report_scenario(
    out: &mut impl io::Write,
    scenario: &Scenario,
    run: impl FnOnce(&Scenario) -> Summary,
) -> io::Result<()> {
    writeln!(out, "{scenario}")?;
    out.flush()?;

    let summary = run(scenario);

    writeln!(out, "{summary}")
}

/// Parses the arguments of a binary, with `env_args` being the full argument list including the
/// program name.
///
/// Negative numbers are accepted as positional arguments instead of being mistaken for unknown
/// flags, so that they can be rejected with a meaningful message during validation.
///
/// # Errors
///
/// If parsing ends early (help was requested or the arguments are invalid), the output is printed
/// and the exit code the process should terminate with is returned.
pub fn parse_args<T: FromArgs>(env_args: &[String]) -> Result<T, ExitCode> {
    let str_args: Vec<&str> = env_args.iter().map(String::as_str).collect();

    let program_name = str_args.first().copied().unwrap_or(env!("CARGO_PKG_NAME"));

    let args = move_negative_numbers_to_positionals(str_args.get(1..).unwrap_or(&[]));

    T::from_args(&[program_name], &args).map_err(|early_exit| match early_exit.status {
        Ok(()) => {
            println!("{}", early_exit.output);
            ExitCode::SUCCESS
        }
        Err(()) => {
            eprintln!("{}", early_exit.output);
            ExitCode::FAILURE
        }
    })
}

/// Moves arguments that are negative numbers behind a `--` separator, which makes argh treat
/// them as positional arguments. Arguments already behind a separator are left alone.
fn move_negative_numbers_to_positionals<'a>(args: &[&'a str]) -> Vec<&'a str> {
    if args.contains(&"--") {
        return args.to_vec();
    }

    let (negative_numbers, mut result): (Vec<&str>, Vec<&str>) = args
        .iter()
        .copied()
        .partition(|arg| is_negative_number(arg));

    if !negative_numbers.is_empty() {
        result.push("--");
        result.extend(negative_numbers);
    }

    result
}

fn is_negative_number(arg: &str) -> bool {
    arg.starts_with('-') && arg.parse::<i64>().is_ok()
}

/// Installs the global `tracing` subscriber for a binary.
///
/// Log output goes to stderr so stdout carries only results. The filter is taken from the
/// `RUST_LOG` environment variable and defaults to warnings only.
#[cfg_attr(test, mutants::skip)] // Installing a global subscriber is not something tests can undo.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
