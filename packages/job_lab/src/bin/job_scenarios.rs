#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

//! Runs the three fixed lab scenarios and prints the summary of each.
//!
//! This module is excluded from mutation testing because it is a thin process entry point
//! around logic that is tested in the library.

use std::env;
use std::io;
use std::process::ExitCode;

use job_lab::cli::{self, LabArgs};
use job_lab::{Job, Scenario};

#[cfg_attr(test, mutants::skip)]
fn main() -> ExitCode {
    let env_args: Vec<String> = env::args().collect();

    let _args: LabArgs = match cli::parse_args(&env_args) {
        Ok(args) => args,
        Err(exit_code) => return exit_code,
    };

    cli::init_logging();

    let mut stdout = io::stdout().lock();

    for scenario in Scenario::lab() {
        if let Err(e) = cli::report_scenario(&mut stdout, &scenario, |scenario| {
            scenario.run(Job::LAB)
        }) {
            eprintln!("Error! {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
