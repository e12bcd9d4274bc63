//! # tfstrap Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! This module is the organizational entry point for the shared utility
//! modules used by tfstrap. It keeps cross-cutting mechanics (process
//! execution, downloads, archives, filesystem and host inspection) apart from
//! command handling (`commands::`) and core infrastructure (`core::`).
//!
//! ## Architecture
//!
//! - **`process`**: runs external commands, streaming their output live while
//!   capturing it, and classifies the outcome.
//! - **`archive`**: extracts the terraform executable from a release zip.
//! - **`fs`**: directory creation, file reading, and permission helpers.
//! - **`network`**: HTTP download of release archives.
//! - **`system`**: platform detection and `PATH` lookup.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::{process, system};
//!
//! # async fn run_example() -> anyhow::Result<()> {
//! use process::CommandRunner;
//! let platform = system::platform::Platform::current()?;
//! let runner = process::ProcessRunner::default();
//! let invocation = process::CommandInvocation::new(platform.executable_name("terraform"))
//!     .arg("version");
//! runner.run(&invocation).await?;
//! # Ok(())
//! # }
//! ```
//!

/// Zip extraction of release archives.
pub mod archive;
/// Filesystem helpers (directories, reads, permissions).
pub mod fs;
/// HTTP downloads.
pub mod network;
/// External process execution with live output streaming.
pub mod process;
/// Platform detection and executable lookup.
pub mod system;
