//! # tfstrap Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers shared by configuration loading and provisioning.
//!
//! - **`io`**: ensuring directories exist (`ensure_dir_exists`), reading files
//!   with context (`read_file_to_string`), and marking installed binaries as
//!   executable (`set_executable`).
//!
//! ```rust
//! use crate::common::fs::io;
//! use std::path::Path;
//!
//! # fn run_example() -> anyhow::Result<()> {
//! io::ensure_dir_exists(Path::new("./bin"))?;
//! io::set_executable(Path::new("./bin/terraform"), None)?;
//! # Ok(())
//! # }
//! ```
//!

/// Basic file I/O operations (`ensure_dir_exists`, `read_file_to_string`, `set_executable`).
pub mod io;
