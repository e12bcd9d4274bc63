//! # Platform Detection (`common::system::platform`)
//!
//! File: cli/src/common/system/platform.rs
//!
//! Translates Rust's `std::env::consts::{OS, ARCH}` into the operating system
//! and architecture names used in terraform release file names.
//!
use crate::core::error::{Result, TfstrapError};
use std::fmt;

/// Release-style platform identifier, e.g. `linux`/`amd64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Result<Self> {
        Self::from_rust_names(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Maps Rust target names to release names.
    ///
    /// # Errors
    ///
    /// Returns `TfstrapError::UnsupportedPlatform` for any OS or architecture
    /// that has no published terraform build.
    pub fn from_rust_names(os: &str, arch: &str) -> Result<Self> {
        let release_os = match os {
            "linux" => "linux",
            "macos" => "darwin",
            "windows" => "windows",
            "freebsd" => "freebsd",
            "openbsd" => "openbsd",
            "solaris" => "solaris",
            _ => return Err(unsupported(os, arch)),
        };
        let release_arch = match arch {
            "x86_64" => "amd64",
            "x86" => "386",
            "aarch64" => "arm64",
            "arm" => "arm",
            _ => return Err(unsupported(os, arch)),
        };
        Ok(Self {
            os: release_os.to_string(),
            arch: release_arch.to_string(),
        })
    }

    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }

    /// File name of an executable called `base` on this platform.
    pub fn executable_name(&self, base: &str) -> String {
        if self.is_windows() {
            format!("{}.exe", base)
        } else {
            base.to_string()
        }
    }
}

fn unsupported(os: &str, arch: &str) -> anyhow::Error {
    TfstrapError::UnsupportedPlatform {
        os: os.to_string(),
        arch: arch.to_string(),
    }
    .into()
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.os, self.arch)
    }
}
