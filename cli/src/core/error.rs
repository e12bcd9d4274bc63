//! # tfstrap Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout tfstrap. It provides a
//! consistent approach to error management with detailed error information and
//! context.
//!
//! ## Architecture
//!
//! The error system consists of three parts:
//! - `TfstrapError`: application errors (configuration, provisioning, failed steps)
//! - `ProcessError`: the outcome taxonomy of a single external command run
//! - `Result<T>`: a type alias for `anyhow::Result<T>` for flexible propagation
//!
//! `ProcessError` is a structured value rather than a chain of strings: every
//! variant maps to a `ProcessErrorKind` tag and keeps its underlying cause
//! (`std::io::Error`, `ExitStatus`) as a typed field, so callers can classify a
//! failure without parsing messages.
//!
//! ## Examples
//!
//! ```rust
//! match runner.run(&invocation).await {
//!     Ok(output) => println!("stderr was: {}", output.stderr_text()),
//!     Err(e) if e.kind() == ProcessErrorKind::StartFailure => {
//!         eprintln!("terraform could not be launched: {}", e);
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
use std::fmt;
use std::process::ExitStatus;
use thiserror::Error;

/// Custom error type for the tfstrap application.
#[derive(Error, Debug)]
pub enum TfstrapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Unsupported platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("Download of '{url}' failed with HTTP status {status}")]
    Download { url: String, status: u16 },

    #[error("Archive error: {0}")]
    Archive(String),

    /// A terraform step (`init`, `apply`, `destroy`) did not succeed.
    /// The cause is kept as the error source so `{:#}` prints the whole chain.
    #[error("Failed to terraform {step}")]
    StepFailed {
        step: String,
        #[source]
        source: ProcessError,
    },
}

/// Which output stream of a child process an error relates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamName {
    Stdout,
    Stderr,
}

impl fmt::Display for StreamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamName::Stdout => f.write_str("stdout"),
            StreamName::Stderr => f.write_str("stderr"),
        }
    }
}

/// Classification tag for a failed command run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessErrorKind {
    /// The executable could not be launched; no process exists.
    StartFailure,
    /// Reading from a child pipe or writing to an echo sink failed.
    StreamError,
    /// The runner lost track of a drain task, a pipe, or the exit status.
    CaptureFailure,
    /// The process ran to completion with a failure status.
    NonZeroExit,
}

/// Failure of a single external command run.
///
/// Every variant except `Start` carries whatever stderr was captured before
/// the failure was detected.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to start '{command}'")]
    Start {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to stream {stream} of '{command}'{}", cause_suffix(.stderr))]
    Stream {
        command: String,
        stream: StreamName,
        stderr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to capture output of '{command}': {reason}{}", cause_suffix(.stderr))]
    Capture {
        command: String,
        reason: String,
        stderr: String,
    },

    #[error("'{command}' failed ({status}){}", cause_suffix(.stderr))]
    NonZeroExit {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Captured stderr is the human-readable cause when there is any.
fn cause_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

impl ProcessError {
    pub fn kind(&self) -> ProcessErrorKind {
        match self {
            ProcessError::Start { .. } => ProcessErrorKind::StartFailure,
            ProcessError::Stream { .. } => ProcessErrorKind::StreamError,
            ProcessError::Capture { .. } => ProcessErrorKind::CaptureFailure,
            ProcessError::NonZeroExit { .. } => ProcessErrorKind::NonZeroExit,
        }
    }

    /// Stderr captured before the failure. Empty for start failures.
    pub fn stderr(&self) -> &str {
        match self {
            ProcessError::Start { .. } => "",
            ProcessError::Stream { stderr, .. }
            | ProcessError::Capture { stderr, .. }
            | ProcessError::NonZeroExit { stderr, .. } => stderr,
        }
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
