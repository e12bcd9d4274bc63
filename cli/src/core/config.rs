//! # tfstrap Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements the configuration system for tfstrap, handling
//! loading, merging, validation, and access to configuration data. The loaded
//! `Config` is passed explicitly to the provisioner and the process runner;
//! nothing reads configuration from global state.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (applied by the command handler)
//! 2. Project-specific `.tfstrap.toml` in the current directory or an ancestor
//!    (the search stops at a directory containing `.git`)
//! 3. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/tfstrap/config.toml`)
//! 4. Default values defined in the code
//!
//! ```toml
//! [terraform]
//! version = "0.12.24"
//! download_base_url = "https://releases.hashicorp.com/terraform"
//! install_dir = "~/.local/bin"
//!
//! [runner]
//! stderr = "live"      # or "buffered" (default)
//! chunk_size = 1024
//! ```
//!
//! ## Examples
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let url = cfg.terraform.release_url(&platform);
//! let runner = ProcessRunner::new(cfg.runner.options());
//! ```
//!
use crate::common::fs::io::read_file_to_string;
use crate::common::process::{RunnerOptions, StderrMode};
use crate::common::system::platform::Platform;
use crate::core::error::{Result, TfstrapError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Fully resolved configuration: defaults overlaid by each file layer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub terraform: TerraformConfig,
    pub runner: RunnerConfig,
}

/// Which terraform to use and where to get it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerraformConfig {
    /// Release version to download when terraform is not already installed.
    pub version: String,
    /// Base URL of the release index; `{version}/{file}` is appended.
    pub download_base_url: String,
    /// Directory holding (or receiving) the terraform binary (can use ~).
    pub install_dir: Option<String>,
}

/// Settings for the process runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// `buffered`: stderr is only shown on failure. `live`: stderr is echoed too.
    pub stderr: StderrMode,
    /// Pipe read size in bytes.
    pub chunk_size: usize,
}

/// One configuration file as written. Only keys present in the file are `Some`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
struct ConfigLayer {
    #[serde(default)]
    terraform: TerraformLayer,
    #[serde(default)]
    runner: RunnerLayer,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct TerraformLayer {
    version: Option<String>,
    download_base_url: Option<String>,
    install_dir: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct RunnerLayer {
    stderr: Option<StderrMode>,
    chunk_size: Option<usize>,
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            version: default_terraform_version(),
            download_base_url: default_download_base_url(),
            install_dir: None,
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            stderr: StderrMode::default(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl Config {
    /// Overwrites every value the layer sets, including values equal to the defaults.
    fn apply(&mut self, layer: ConfigLayer) {
        let ConfigLayer { terraform, runner } = layer;
        if let Some(version) = terraform.version {
            self.terraform.version = version;
        }
        if let Some(url) = terraform.download_base_url {
            self.terraform.download_base_url = url;
        }
        if let Some(dir) = terraform.install_dir {
            self.terraform.install_dir = Some(dir);
        }
        if let Some(stderr) = runner.stderr {
            self.runner.stderr = stderr;
        }
        if let Some(chunk_size) = runner.chunk_size {
            self.runner.chunk_size = chunk_size;
        }
    }
}

impl TerraformConfig {
    /// Archive file name, e.g. `terraform_0.12.24_linux_amd64.zip`.
    pub fn archive_name(&self, platform: &Platform) -> String {
        format!(
            "terraform_{}_{}_{}.zip",
            self.version, platform.os, platform.arch
        )
    }

    /// Full download URL of the release archive for `platform`.
    pub fn release_url(&self, platform: &Platform) -> String {
        format!(
            "{}/{}/{}",
            self.download_base_url.trim_end_matches('/'),
            self.version,
            self.archive_name(platform)
        )
    }
}

impl RunnerConfig {
    pub fn options(&self) -> RunnerOptions {
        RunnerOptions {
            stderr_mode: self.stderr,
            chunk_size: self.chunk_size,
        }
    }
}

fn default_terraform_version() -> String {
    "0.12.24".to_string()
}
fn default_download_base_url() -> String {
    "https://releases.hashicorp.com/terraform".to_string()
}
fn default_chunk_size() -> usize {
    crate::common::process::capture::DEFAULT_CHUNK_SIZE
}

const PROJECT_CONFIG_FILENAME: &str = ".tfstrap.toml";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "tfstrap", "tfstrap")
}

/// Default directory terraform is installed into when none is configured.
pub fn default_install_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join("bin"))
}

/// Loads, merges, expands, and validates configuration for the current directory.
pub fn load_config() -> Result<Config> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let user_config = load_user_config()?;
    let project_config = load_project_config(&current_dir)?;
    let mut merged_config = merge_configs(user_config, project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<ConfigLayer>> {
    if let Some(proj_dirs) = project_dirs() {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<ConfigLayer>> {
    if let Some(project_config_path) = find_project_config_path(start) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.tfstrap.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigLayer> {
    let content = read_file_to_string(path)?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Layers are applied over the defaults in order: user, then project.
fn merge_configs(user: Option<ConfigLayer>, project: Option<ConfigLayer>) -> Config {
    let mut merged = Config::default();
    for layer in [user, project].into_iter().flatten() {
        merged.apply(layer);
    }
    merged
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    if let Some(dir) = &config.terraform.install_dir {
        let expanded = shellexpand::tilde(dir).into_owned();
        debug!("Expanded install directory: {}", expanded);
        config.terraform.install_dir = Some(expanded);
    }
    Ok(())
}

pub(crate) fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    if config.terraform.version.trim().is_empty() {
        return Err(anyhow!(TfstrapError::Config(
            "terraform.version cannot be empty.".to_string()
        )));
    }
    let url = &config.terraform.download_base_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(anyhow!(TfstrapError::Config(format!(
            "Invalid download_base_url '{}'. Expected an http:// or https:// URL.",
            url
        ))));
    }
    if config.runner.chunk_size == 0 {
        return Err(anyhow!(TfstrapError::Config(
            "runner.chunk_size must be greater than zero.".to_string()
        )));
    }
    if let Some(dir) = &config.terraform.install_dir {
        let dir = PathBuf::from(dir);
        if dir.exists() && !dir.is_dir() {
            return Err(anyhow!(TfstrapError::Config(format!(
                "Configured install_dir '{}' exists but is not a directory.",
                dir.display()
            ))));
        }
    }
    debug!("Configuration validation successful.");
    Ok(())
}
