#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

//! Runs a batch of jobs across a requested number of threads, accumulating the time of every
//! job into one lock-guarded total, and prints throughput and average response time.
//!
//! This module is excluded from mutation testing because testing process entry/exit behavior
//! requires spawning subprocesses, which the integration tests do instead.

use std::env;
use std::process::ExitCode;

use job_lab::cli::{self, ThreadsArgs};
use job_lab::{Job, LockedAccumulator, run_shared};

#[cfg_attr(test, mutants::skip)]
fn main() -> ExitCode {
    let env_args: Vec<String> = env::args().collect();

    let args: ThreadsArgs = match cli::parse_args(&env_args) {
        Ok(args) => args,
        Err(exit_code) => return exit_code,
    };

    cli::init_logging();

    let shares = match args.shares() {
        Ok(shares) => shares,
        Err(e) => {
            eprintln!("Error! {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = run_shared::<LockedAccumulator>(Job::BATCH, &shares);

    println!("{report}");
    println!();

    ExitCode::SUCCESS
}
