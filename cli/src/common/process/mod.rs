//! # tfstrap Process Execution (`common::process`)
//!
//! File: cli/src/common/process/mod.rs
//!
//! ## Overview
//!
//! This module runs external programs (terraform) and streams their output to
//! the console while it is being produced, instead of dumping it after the
//! process exits. It also keeps a copy of everything the child wrote so a
//! failure can be explained with the child's own diagnostics.
//!
//! ## Architecture
//!
//! - **`invocation`**: `CommandInvocation`, the immutable description of one run
//!   (program, arguments, optional working directory).
//! - **`capture`**: the drain loop. Reads a stream in fixed-size chunks, echoes
//!   each chunk onward and accumulates it, until end-of-stream.
//! - **`runner`**: `ProcessRunner`, which spawns the child, drains stdout on a
//!   separate task while draining stderr on the calling task, joins the drain
//!   task, waits for the child, and classifies the outcome into a `RunResult`.
//!   The `CommandRunner` trait is the seam the deploy driver depends on.
//!
//! Both pipes must be drained concurrently. A child blocked on a full stderr
//! pipe never closes stdout, so reading the streams one after the other can
//! deadlock. `wait()` is only called once both drains have reached
//! end-of-stream (or failed), so no buffered pipe data is lost.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process::{CommandInvocation, ProcessRunner, RunnerOptions};
//!
//! # async fn run_example() -> anyhow::Result<()> {
//! let runner = ProcessRunner::new(RunnerOptions::default());
//! let invocation = CommandInvocation::new("terraform").args(["init", "-input=false"]);
//! let output = runner.run(&invocation).await?;
//! println!("terraform exited with {}", output.status);
//! # Ok(())
//! # }
//! ```
//!

pub mod capture;
pub mod invocation;
pub mod runner;

pub use invocation::CommandInvocation;
pub use runner::{CommandRunner, ProcessRunner, RunOutput, RunResult, RunnerOptions, StderrMode};
