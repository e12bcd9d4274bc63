//! # tfstrap CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each `.rs` file
//! there (other than this module) is compiled as its own test crate that runs
//! the compiled `tfstrap` binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// Returns an `assert_cmd::Command` for the compiled `tfstrap` binary.
pub fn tfstrap_cmd() -> Command {
    Command::cargo_bin("tfstrap").expect("Failed to find tfstrap binary for testing")
}

/// Returns a `tfstrap` command isolated from the invoking user's configuration.
///
/// `home` stands in for the user's home and config directories, and the
/// command runs inside `workdir`.
pub fn isolated_cmd(home: &Path, workdir: &Path) -> Command {
    let mut cmd = tfstrap_cmd();
    cmd.current_dir(workdir)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local/share"))
        .env_remove("TFSTRAP_TF_PATH")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes an executable fake `terraform` into `dir`.
///
/// The script appends each subcommand to `calls.log` in `dir`, prints a line
/// per subcommand on stdout, and fails `init` with `oops` on stderr when
/// `FAIL_INIT` is set.
#[cfg(unix)]
pub fn write_fake_terraform(dir: &Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = format!(
        "#!/bin/sh\n\
         echo \"$1\" >> '{log}'\n\
         case \"$1\" in\n\
           init)\n\
             if [ -n \"$FAIL_INIT\" ]; then echo oops >&2; exit 1; fi\n\
             echo 'Terraform has been successfully initialized!' ;;\n\
           *)\n\
             echo \"fake $1 complete\"\n\
             echo \"args: $*\" ;;\n\
         esac\n",
        log = dir.join("calls.log").display()
    );
    let path = dir.join("terraform");
    std::fs::write(&path, script).expect("write fake terraform");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod fake terraform");
    path
}

/// Reads the subcommands recorded by the fake terraform in `dir`.
pub fn recorded_calls(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("calls.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
