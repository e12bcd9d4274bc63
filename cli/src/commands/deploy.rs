//! # tfstrap Deploy Handler
//!
//! File: cli/src/commands/deploy.rs
//!
//! ## Overview
//!
//! This module implements the default (and only) tfstrap action: make sure a
//! terraform binary is available, then run two terraform commands in order,
//! streaming their output live:
//!
//! 1. `terraform init -input=false`
//! 2. `terraform apply -input=false -auto-approve`
//!    (or `destroy` with `--destroy`)
//!
//! The second command is never started if `init` fails. Any failure is fatal
//! for the whole run and names the step that failed together with its cause.
//!
//! ## Usage
//!
//! ```bash
//! # Apply the configuration in the current directory
//! tfstrap
//!
//! # Tear it down, using (or installing) terraform under ./bin
//! tfstrap --destroy --tf-path ./bin
//!
//! # Run against another directory, showing terraform's stderr as it happens
//! tfstrap -C stacks/network --live-stderr
//! ```
//!
use crate::common::process::{
    CommandInvocation, CommandRunner, ProcessRunner, RunOutput, StderrMode,
};
use crate::common::system::platform::Platform;
use crate::core::{
    config,
    error::{Result, TfstrapError},
    provisioner::Provisioner,
};
use anyhow::Context;
use clap::Parser;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Arguments for a tfstrap run.
#[derive(Parser, Debug)]
pub struct DeployArgs {
    /// Run `terraform destroy` instead of `terraform apply`.
    #[arg(long)]
    pub destroy: bool,

    /// Directory holding the terraform binary. It is downloaded there if missing.
    #[arg(long = "tf-path", alias = "tfPath", env = "TFSTRAP_TF_PATH", value_name = "DIR")]
    pub tf_path: Option<PathBuf>,

    /// Directory containing the terraform configuration (defaults to the current directory).
    #[arg(long, short = 'C', value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Echo terraform's stderr as it is written instead of only reporting it on failure.
    #[arg(long)]
    pub live_stderr: bool,
}

/// The terraform command run after `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Apply,
    Destroy,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Apply => "apply",
            Action::Destroy => "destroy",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Action::Apply => "Changes applied successfully",
            Action::Destroy => "Changes destroyed successfully",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handler for a tfstrap run: load config, provision, then init + action.
pub async fn handle_deploy(args: DeployArgs) -> Result<()> {
    info!("Handling deploy command...");
    debug!("Deploy args: {:?}", args);

    let mut cfg = config::load_config()?;
    if args.live_stderr {
        cfg.runner.stderr = StderrMode::Live;
    }

    if let Some(dir) = &args.workdir {
        if !dir.is_dir() {
            anyhow::bail!(TfstrapError::FileSystem(format!(
                "Working directory {:?} does not exist or is not a directory",
                dir
            )));
        }
    }

    let provisioner = Provisioner::new(cfg.terraform, Platform::current()?, args.tf_path)?;
    let terraform = provisioner.ensure_installed().await?;
    // The child may run in another directory, so a relative binary path would break.
    let terraform = terraform
        .canonicalize()
        .with_context(|| format!("Failed to resolve terraform path {:?}", terraform))?;

    let action = if args.destroy {
        Action::Destroy
    } else {
        Action::Apply
    };
    let runner = ProcessRunner::new(cfg.runner.options());
    run_deployment(&runner, &terraform, action, args.workdir.as_deref()).await?;

    eprintln!("{}", action.success_message());
    Ok(())
}

/// Runs `init` and then `action` with `terraform`, stopping at the first failure.
///
/// # Errors
///
/// Returns `TfstrapError::StepFailed` naming `init` or the action, with the
/// `ProcessError` of that step as its source.
pub async fn run_deployment<R: CommandRunner>(
    runner: &R,
    terraform: &Path,
    action: Action,
    workdir: Option<&Path>,
) -> Result<()> {
    let init = terraform_command(terraform, workdir).args(["init", "-input=false"]);
    info!("Running {}", init);
    let output = runner
        .run(&init)
        .await
        .map_err(|source| TfstrapError::StepFailed {
            step: "init".to_string(),
            source,
        })?;
    log_stderr("init", &output);

    let change = terraform_command(terraform, workdir).args([
        action.as_str(),
        "-input=false",
        "-auto-approve",
    ]);
    info!("Running {}", change);
    let output = runner
        .run(&change)
        .await
        .map_err(|source| TfstrapError::StepFailed {
            step: action.as_str().to_string(),
            source,
        })?;
    log_stderr(action.as_str(), &output);

    Ok(())
}

/// Successful steps can still leave warnings on stderr.
fn log_stderr(step: &str, output: &RunOutput) {
    let stderr = output.stderr_text();
    if !stderr.trim().is_empty() {
        info!("terraform {} stderr:\n{}", step, stderr.trim_end());
    }
}

fn terraform_command(terraform: &Path, workdir: Option<&Path>) -> CommandInvocation {
    let invocation = CommandInvocation::new(terraform);
    match workdir {
        Some(dir) => invocation.current_dir(dir),
        None => invocation,
    }
}
