#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Measures the wall-clock throughput and average response time of a fixed synthetic
//! CPU-bound [`Job`], executed either sequentially or split evenly across worker threads.
//!
//! The core functionality includes:
//! - [`Job`] - the unit of work being measured
//! - [`run_sequential()`] - executes a number of jobs one after another, producing a [`Summary`]
//! - [`run_parallel()`] - splits jobs across threads according to a [`BatchPlan`], giving every
//!   thread its own result slot and combining the per-thread summaries afterwards
//! - [`run_shared()`] - hands each thread its [`ThreadShares`] share of the jobs, with every
//!   thread adding the time of each completed job to one shared [`JobTimeAccumulator`]
//! - [`Scenario`] - the fixed measurements performed by the `job_scenarios` program
//!
//! This package is a teaching tool for reasoning about throughput and response time, not a
//! general purpose benchmark framework. There is no dynamic work distribution, no load
//! balancing and no cancellation.
//!
//! # Aggregating parallel results
//!
//! When per-thread summaries are combined, job counts and throughputs are added up while
//! average response times are averaged. Summing throughput is only a good approximation when all
//! threads run concurrently for about the same time, so [`ParallelRunReport`] also offers a
//! throughput derived from the wall-clock time of the whole run.
//!
//! # Example
//!
//! ```
//! use job_lab::{BatchPlan, Job, run_parallel, run_sequential};
//!
//! let job = Job::with_size(10_000);
//!
//! let sequential = run_sequential(job, 8);
//! println!("{sequential}");
//!
//! let plan = BatchPlan::new(8, 4).unwrap();
//! let parallel = run_parallel(job, &plan);
//! println!("{}", parallel.combined());
//!
//! assert_eq!(
//!     sequential.jobs_completed(),
//!     parallel.combined().jobs_completed()
//! );
//! ```

mod job;
mod parallel;
mod plan;
mod scenario;
mod sequential;
mod shared;
mod summary;
mod time;

// Only the binaries need this, so it is kept out of the main API documentation.
#[doc(hidden)]
pub mod cli;

pub use job::*;
pub use parallel::*;
pub use plan::*;
pub use scenario::*;
pub use sequential::*;
pub use shared::*;
pub use summary::*;
pub use time::*;
