//! # Zip Extraction (`common::archive::unzip`)
//!
//! File: cli/src/common/archive/unzip.rs
//!
//! ## Overview
//!
//! Extracts one executable from a zip archive.
//!
//! Entry selection:
//! 1. the file entry whose name matches the requested binary name;
//! 2. otherwise, if the archive holds exactly one file, that file.
//!
//! Entries whose path would escape the destination (absolute paths, `..`) are
//! ignored. The selected entry is always written directly into the destination
//! directory, which is created recursively beforehand.
//!
//! This is blocking I/O; async callers should run it on `spawn_blocking`.
//!
use crate::common::fs::io::{ensure_dir_exists, set_executable};
use crate::core::error::{Result, TfstrapError};
use anyhow::Context;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::ZipArchive;

/// Extracts the executable named `binary_name` from `archive_path` into `dest_dir`.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns an `Err` if the archive cannot be opened or read, has no suitable
/// entry (`TfstrapError::Archive`), or the destination cannot be written.
pub fn extract_executable(archive_path: &Path, dest_dir: &Path, binary_name: &str) -> Result<PathBuf> {
    info!("Unzipping {:?} to {:?}", archive_path, dest_dir);

    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open archive {:?}", archive_path))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("Failed to read zip archive {:?}", archive_path))?;

    let (index, entry_path) = select_entry(&mut archive, binary_name)?;
    let file_name = entry_path.file_name().ok_or_else(|| {
        TfstrapError::Archive(format!("Entry {:?} has no file name", entry_path))
    })?;

    ensure_dir_exists(dest_dir)?;
    let out_path = dest_dir.join(file_name);

    let mut entry = archive
        .by_index(index)
        .with_context(|| format!("Failed to open entry {:?}", entry_path))?;
    let mode = entry.unix_mode();
    let mut out = File::create(&out_path)
        .with_context(|| format!("Failed to create {:?}", out_path))?;
    let written = std::io::copy(&mut entry, &mut out)
        .with_context(|| format!("Failed to extract {:?} to {:?}", entry_path, out_path))?;
    drop(out);

    set_executable(&out_path, mode)?;
    debug!("Extracted {} bytes to {:?}", written, out_path);
    Ok(out_path)
}

/// Picks the archive entry to extract. Returns its index and enclosed path.
fn select_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    binary_name: &str,
) -> Result<(usize, PathBuf)> {
    let mut files = Vec::new();
    for index in 0..archive.len() {
        let entry = archive
            .by_index(index)
            .with_context(|| format!("Failed to read zip entry #{}", index))?;
        if entry.is_dir() {
            continue;
        }
        match entry.enclosed_name().map(|p| p.to_path_buf()) {
            Some(path) => files.push((index, path)),
            None => debug!("Skipping unsafe zip entry {:?}", entry.name()),
        }
    }

    if let Some(found) = files
        .iter()
        .find(|(_, path)| path.file_name() == Some(OsStr::new(binary_name)))
    {
        return Ok(found.clone());
    }

    match files.len() {
        1 => Ok(files.remove(0)),
        0 => anyhow::bail!(TfstrapError::Archive("Archive contains no files".to_string())),
        n => anyhow::bail!(TfstrapError::Archive(format!(
            "Archive holds {} files and none is named '{}'",
            n, binary_name
        ))),
    }
}
