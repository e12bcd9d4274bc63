//! # tfstrap System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! Host inspection needed to decide whether terraform must be provisioned and
//! which release archive fits this machine.
//!
//! ## Architecture
//!
//! - **`platform`**: maps the running OS/architecture to the naming used by
//!   terraform release archives (`linux_amd64`, `darwin_arm64`, ...).
//! - **`tools`**: locates executables on the `PATH` and checks executable bits.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::system::{platform::Platform, tools};
//!
//! # fn run_example() -> anyhow::Result<()> {
//! let platform = Platform::current()?;
//! let binary = platform.executable_name("terraform");
//! if let Some(path) = tools::find_on_path(&binary) {
//!     println!("Using {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!

pub mod platform;
pub mod tools;
