//! # Process Runner (`common::process::runner`)
//!
//! File: cli/src/common/process/runner.rs
//!
//! ## Overview
//!
//! `ProcessRunner` executes one external command per call, echoes its stdout
//! live, captures both output streams, and reduces everything to a single
//! `RunResult`.
//!
//! ## Lifecycle of a run
//!
//! 1. **Start**: spawn the child with both output pipes captured. A spawn error
//!    is a `StartFailure` and nothing else happens.
//! 2. **Drain**: stdout is drained on a spawned task, stderr on the calling task.
//!    The spawned task is joined once stderr reaches end-of-stream.
//! 3. **Wait**: only after both drains are finished is `wait()` called, so the
//!    child is always reaped and no unread pipe data is lost.
//! 4. **Classify**, first match wins:
//!    - the stdout drain task itself failed (panicked, cancelled) → `CaptureFailure`
//!    - a drain read/write error → `StreamError` (stdout checked before stderr)
//!    - a missing pipe or a failed `wait()` → `CaptureFailure`
//!    - an unsuccessful exit status → `NonZeroExit` (captured stderr is the cause)
//!    - otherwise success; captured stderr is still returned in `RunOutput`.
//!
//! ## Stderr policy
//!
//! `StderrMode::Buffered` (default) never echoes stderr; it is only surfaced
//! through `RunOutput::stderr` and failure messages. `StderrMode::Live` echoes
//! stderr as it arrives and captures it as well. The mode applies to every
//! run made by a given runner, including `run_with`.
//!
use super::capture::{capture, DEFAULT_CHUNK_SIZE};
use super::invocation::CommandInvocation;
use crate::core::error::{ProcessError, StreamName};
use serde::Deserialize;
use std::future::Future;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::process::Command;
use tracing::{debug, info};

/// What the runner does with a child's stderr.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StderrMode {
    /// Capture only; surfaced through the result.
    #[default]
    Buffered,
    /// Echo to the caller's stderr as it arrives, and capture.
    Live,
}

/// Tunables for a `ProcessRunner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerOptions {
    pub stderr_mode: StderrMode,
    /// Read size for draining pipes. Must be greater than zero.
    pub chunk_size: usize,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            stderr_mode: StderrMode::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Everything a successful run produced.
#[derive(Debug)]
pub struct RunOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl RunOutput {
    #[cfg(test)]
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Outcome of one command run. `Ok` means started, fully drained, and exited 0.
pub type RunResult = std::result::Result<RunOutput, ProcessError>;

/// Something that can execute a `CommandInvocation`.
///
/// The deploy driver is written against this trait so the sequencing of
/// terraform steps can be exercised without spawning real processes.
pub trait CommandRunner {
    fn run(&self, invocation: &CommandInvocation) -> impl Future<Output = RunResult> + Send;
}

/// Runs external commands with live output streaming.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    options: RunnerOptions,
}

/// How a single drain ended.
enum DrainOutcome {
    Complete,
    Failed(std::io::Error),
    MissingPipe,
}

struct Drain {
    bytes: Vec<u8>,
    outcome: DrainOutcome,
}

async fn drain<R, W>(pipe: Option<R>, sink: &mut W, chunk_size: usize) -> Drain
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut bytes = Vec::new();
    let outcome = match pipe {
        Some(pipe) => match capture(pipe, sink, &mut bytes, chunk_size).await {
            Ok(_) => DrainOutcome::Complete,
            Err(e) => DrainOutcome::Failed(e),
        },
        None => DrainOutcome::MissingPipe,
    };
    Drain { bytes, outcome }
}

impl ProcessRunner {
    pub fn new(options: RunnerOptions) -> Self {
        Self { options }
    }

    /// Runs `invocation`, echoing stdout into `stdout_sink` and, in
    /// `StderrMode::Live`, stderr into `stderr_sink`.
    ///
    /// In `StderrMode::Buffered` the `stderr_sink` is never written to.
    pub async fn run_with<O, E>(
        &self,
        invocation: &CommandInvocation,
        mut stdout_sink: O,
        stderr_sink: E,
    ) -> RunResult
    where
        O: AsyncWrite + Unpin + Send + 'static,
        E: AsyncWrite + Unpin + Send + 'static,
    {
        let command_line = invocation.to_string();
        let chunk_size = self.options.chunk_size;

        let mut command = Command::new(invocation.program());
        command
            .args(invocation.get_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = invocation.get_current_dir() {
            command.current_dir(dir);
        }

        debug!("Starting '{}'", command_line);
        let mut child = command.spawn().map_err(|source| ProcessError::Start {
            command: command_line.clone(),
            source,
        })?;
        debug!("Started '{}' with pid {:?}", command_line, child.id());

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();

        let stdout_task = tokio::spawn(async move {
            let drained = drain(stdout_pipe, &mut stdout_sink, chunk_size).await;
            debug!("stdout drained ({} bytes)", drained.bytes.len());
            drained
        });

        let mut stderr_echo: Box<dyn AsyncWrite + Unpin + Send> = match self.options.stderr_mode
        {
            StderrMode::Live => Box::new(stderr_sink),
            StderrMode::Buffered => Box::new(tokio::io::sink()),
        };
        let stderr_drain = drain(stderr_pipe, &mut stderr_echo, chunk_size).await;
        debug!("stderr drained ({} bytes)", stderr_drain.bytes.len());

        let stdout_drain = stdout_task.await;
        let wait = child.wait().await;

        let stderr = String::from_utf8_lossy(&stderr_drain.bytes).into_owned();
        let stdout_drain = match stdout_drain {
            Ok(drained) => drained,
            Err(join_err) => {
                return Err(self.fail(ProcessError::Capture {
                    command: command_line,
                    reason: format!("stdout drain task failed: {}", join_err),
                    stderr,
                }))
            }
        };

        for (stream, outcome) in [
            (StreamName::Stdout, stdout_drain.outcome),
            (StreamName::Stderr, stderr_drain.outcome),
        ] {
            match outcome {
                DrainOutcome::Complete => {}
                DrainOutcome::Failed(source) => {
                    return Err(self.fail(ProcessError::Stream {
                        command: command_line,
                        stream,
                        stderr,
                        source,
                    }))
                }
                DrainOutcome::MissingPipe => {
                    return Err(self.fail(ProcessError::Capture {
                        command: command_line,
                        reason: format!("{} pipe was not captured", stream),
                        stderr,
                    }))
                }
            }
        }

        let status = match wait {
            Ok(status) => status,
            Err(e) => {
                return Err(self.fail(ProcessError::Capture {
                    command: command_line,
                    reason: format!("failed to wait for process: {}", e),
                    stderr,
                }))
            }
        };

        if !status.success() {
            return Err(self.fail(ProcessError::NonZeroExit {
                command: command_line,
                status,
                stderr,
            }));
        }

        debug!("'{}' completed successfully", command_line);
        Ok(RunOutput {
            status,
            stdout: stdout_drain.bytes,
            stderr: stderr_drain.bytes,
        })
    }

    fn fail(&self, error: ProcessError) -> ProcessError {
        info!("{} ({:?})", error, error.kind());
        if !error.stderr().is_empty() {
            debug!("Captured stderr:\n{}", error.stderr());
        }
        error
    }
}

impl CommandRunner for ProcessRunner {
    /// Runs `invocation` with stdout echoed to this process's stdout, and
    /// stderr echoed to this process's stderr in `StderrMode::Live`.
    async fn run(&self, invocation: &CommandInvocation) -> RunResult {
        self.run_with(invocation, tokio::io::stdout(), tokio::io::stderr())
            .await
    }
}
