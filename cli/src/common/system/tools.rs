//! # Tool Lookup (`common::system::tools`)
//!
//! File: cli/src/common/system/tools.rs
//!
//! ## Overview
//!
//! Finds executables on `PATH` (via the `which` crate) and checks whether a
//! specific file can be executed.
//!
use std::path::{Path, PathBuf};
use tracing::debug;

/// Looks `name` up on the current process's `PATH`.
pub fn find_on_path(name: &str) -> Option<PathBuf> {
    match which::which(name) {
        Ok(path) => {
            debug!("Found '{}' at {}", name, path.display());
            Some(path)
        }
        Err(e) => {
            debug!("'{}' not found on PATH: {}", name, e);
            None
        }
    }
}

/// True if `path` is a regular file with at least one executable bit set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

/// True if `path` is a regular file. Windows has no executable bit.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

// --- Unit Tests ---
#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    fn write_file(path: &Path, mode: u32) {
        fs::write(path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn test_is_executable_checks_mode_bits() {
        let dir = tempdir().unwrap();
        let exec = dir.path().join("tool");
        let plain = dir.path().join("notes.txt");
        write_file(&exec, 0o755);
        write_file(&plain, 0o644);

        assert!(is_executable(&exec));
        assert!(!is_executable(&plain));
        assert!(!is_executable(dir.path()));
        assert!(!is_executable(&dir.path().join("missing")));
    }

    #[test]
    fn test_find_on_path_locates_sh() {
        let sh = find_on_path("sh").expect("sh is on PATH");
        assert!(sh.is_absolute());
        assert!(is_executable(&sh));
    }

    #[test]
    fn test_find_on_path_misses_unknown_tool() {
        assert!(find_on_path("tfstrap-no-such-binary-8c1f").is_none());
    }
}
