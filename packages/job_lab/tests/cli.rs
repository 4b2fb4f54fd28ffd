//! Integration tests for the `job_threads` and `job_scenarios` binaries.
//!
//! These spawn the real binaries to verify exit codes and console output. The fixed lab
//! scenarios take far too long for a test run, so `job_scenarios` is only checked for its
//! argument handling.

#![cfg(not(miri))]

use std::process::{Command, Output};

fn run_threads(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_job_threads"))
        .args(args)
        .output()
        .expect("job_threads binary must be runnable")
}

fn run_scenarios(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_job_scenarios"))
        .args(args)
        .output()
        .expect("job_scenarios binary must be runnable")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn too_many_threads_fails_without_timing() {
    let output = run_threads(&["40"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("Error! Too many threads - more than the number of jobs!"),
        "unexpected stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).is_empty());
}

#[test]
fn negative_threads_fails() {
    let output = run_threads(&["-1"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("Error! Not enough threads."),
        "unexpected stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).is_empty());
}

#[test]
fn zero_threads_runs_nothing() {
    let output = run_threads(&["0"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("Results for 0 threads:\n"));
    assert!(stdout(&output).contains("average response time = NaN\n"));
    assert!(stderr(&output).contains("no worker threads requested"));
}

#[test]
fn uneven_thread_count_runs_floor_share() {
    for threads in ["3", "5", "31"] {
        let output = run_threads(&[threads]);

        assert_eq!(
            output.status.code(),
            Some(0),
            "stderr for {threads} threads: {}",
            stderr(&output)
        );
        assert!(
            stdout(&output).starts_with(&format!("Results for {threads} threads:\n")),
            "unexpected stdout: {}",
            stdout(&output)
        );
        assert!(
            stderr(&output).contains("leftover jobs will not run"),
            "unexpected stderr: {}",
            stderr(&output)
        );
    }
}

#[test]
fn every_thread_count_up_to_job_count_succeeds() {
    for threads in 0..=8 {
        let output = run_threads(&["--jobs", "8", &threads.to_string()]);

        assert_eq!(
            output.status.code(),
            Some(0),
            "stderr for {threads} threads: {}",
            stderr(&output)
        );
    }
}

#[test]
fn non_numeric_thread_count_fails() {
    let output = run_threads(&["lots"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
}

#[test]
fn threads_help_succeeds() {
    let output = run_threads(&["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("--jobs"));
}

#[test]
fn threads_reports_results() {
    let output = run_threads(&["--jobs", "4", "2"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let stdout = stdout(&output);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 4, "unexpected stdout: {stdout}");
    assert_eq!(lines.first(), Some(&"Results for 2 threads:"));
    assert!(lines.get(1).is_some_and(|line| line.starts_with("throughput = ")));
    assert!(
        lines
            .get(2)
            .is_some_and(|line| line.starts_with("average response time = "))
    );
    assert_eq!(lines.get(3), Some(&""));
}

#[test]
fn threads_defaults_to_one_thread() {
    let output = run_threads(&["--jobs", "2"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("Results for 1 threads:"));
}

#[test]
fn scenarios_help_succeeds() {
    let output = run_scenarios(&["--help"]);

    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn scenarios_rejects_arguments() {
    let output = run_scenarios(&["4"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
}
