//! # Command Invocation (`common::process::invocation`)
//!
//! File: cli/src/common/process/invocation.rs
//!
//! Describes a single external command to run. An invocation is built once,
//! handed to a runner, and never modified afterwards.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

/// An executable, its ordered arguments, and the directory to run it in.
///
/// `current_dir` of `None` runs the command in the caller's current directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    program: OsString,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl CommandInvocation {
    /// Creates an invocation for `program` with no arguments.
    ///
    /// `program` is either a bare name looked up on `PATH` or a path to an
    /// executable (e.g. the binary returned by the provisioner).
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Appends arguments in order.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }
}

/// Renders as a shell-like command line, e.g. `terraform init -input=false`.
/// Only the file name of the program is shown.
impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let program = Path::new(&self.program)
            .file_name()
            .unwrap_or(&self.program)
            .to_string_lossy();
        f.write_str(&program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
