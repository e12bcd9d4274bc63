//! # tfstrap Archive Utilities Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! Archive handling for provisioning. terraform is published as a `.zip` that
//! holds a single executable.
//!
//! ## Architecture
//!
//! - **`unzip`**: opens a zip archive with the `zip` crate, picks the executable
//!   entry, writes it into a destination directory (created if missing), and
//!   sets its executable permission bits.
//!
//! ```rust
//! use crate::common::archive::unzip;
//! use std::path::Path;
//!
//! # fn run_example() -> anyhow::Result<()> {
//! let binary = unzip::extract_executable(
//!     Path::new("/tmp/terraform_0.12.24_linux_amd64.zip"),
//!     Path::new("/home/me/.local/bin"),
//!     "terraform",
//! )?;
//! println!("Installed {}", binary.display());
//! # Ok(())
//! # }
//! ```
//!

pub mod unzip;
