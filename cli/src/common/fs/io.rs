//! # tfstrap Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` that attach the failing path to every error.
//!
//! - **`ensure_dir_exists`**: creates a directory and its parents if needed, and
//!   rejects paths that exist but are not directories. The provisioner calls it
//!   before extracting terraform, so a missing install directory is always
//!   created rather than failing the download.
//! - **`read_file_to_string`**: `fs::read_to_string` with context.
//! - **`set_executable`**: applies permission bits to an extracted binary.
//!
use crate::core::error::{Result, TfstrapError};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Mode applied to extracted binaries when the archive carries none.
pub const DEFAULT_EXECUTABLE_MODE: u32 = 0o755;

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, this function creates the directory,
/// including any necessary parent directories (similar to `mkdir -p`).
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory (`TfstrapError::FileSystem`).
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(TfstrapError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Makes `path` executable.
///
/// `mode` is the permission mode recorded for the file (e.g. in a zip entry).
/// When it is `None` or grants no execute bit, `DEFAULT_EXECUTABLE_MODE` is
/// used. A no-op on platforms without permission bits.
#[cfg(unix)]
pub fn set_executable(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = match mode.map(|m| m & 0o7777) {
        Some(m) if m & 0o111 != 0 => m,
        _ => DEFAULT_EXECUTABLE_MODE,
    };
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("Failed to set permissions {:o} on {:?}", mode, path))?;
    debug!("Set mode {:o} on {:?}", mode, path);
    Ok(())
}

#[cfg(not(unix))]
pub fn set_executable(_path: &Path, _mode: Option<u32>) -> Result<()> {
    Ok(())
}
