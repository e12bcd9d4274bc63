//! # tfstrap Provisioner
//!
//! File: cli/src/core/provisioner.rs
//!
//! ## Overview
//!
//! Makes sure a terraform executable is available and returns its path. The
//! process runner only ever receives that path; it never calls back into
//! provisioning.
//!
//! ## Resolution
//!
//! 1. An explicit install directory was given (`--tf-path` or `terraform.install_dir`)
//!    and it already holds an executable `terraform` → use it.
//! 2. No explicit install directory, and `terraform` resolves on `PATH` → use it.
//! 3. Otherwise download the pinned release for this platform and extract it into
//!    the install directory (the explicit one, or the default data directory).
//!    The directory is created recursively if it does not exist.
//!
//! An existing binary is assumed to be a compatible version.
//!
//! ## Usage
//!
//! ```rust
//! let provisioner = Provisioner::new(cfg.terraform.clone(), Platform::current()?, args.tf_path)?;
//! let terraform = provisioner.ensure_installed().await?;
//! ```
//!
use crate::common::archive::unzip;
use crate::common::network::download;
use crate::common::system::{platform::Platform, tools};
use crate::core::config::{default_install_dir, TerraformConfig};
use crate::core::error::{Result, TfstrapError};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where the terraform binary will come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Already present in the explicit install directory.
    Installed(PathBuf),
    /// Found on `PATH`.
    OnPath(PathBuf),
    /// Must be downloaded into this directory.
    Download(PathBuf),
}

/// Ensures terraform is present locally.
pub struct Provisioner {
    terraform: TerraformConfig,
    platform: Platform,
    explicit_dir: Option<PathBuf>,
    client: reqwest::Client,
}

impl Provisioner {
    /// `explicit_dir` overrides `terraform.install_dir` from configuration.
    pub fn new(
        terraform: TerraformConfig,
        platform: Platform,
        explicit_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let explicit_dir = explicit_dir.or_else(|| terraform.install_dir.as_ref().map(PathBuf::from));
        Ok(Self {
            terraform,
            platform,
            explicit_dir,
            client: download::http_client()?,
        })
    }

    /// Replaces the HTTP client used for downloads.
    #[cfg(test)]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// File name of the terraform executable on this platform.
    pub fn binary_name(&self) -> String {
        self.platform.executable_name("terraform")
    }

    /// Decides where terraform comes from without touching the network.
    ///
    /// `lookup` resolves a bare executable name on the search path.
    pub fn resolve<F>(&self, lookup: F) -> Result<Resolution>
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        let binary = self.binary_name();
        match &self.explicit_dir {
            Some(dir) => {
                let candidate = dir.join(&binary);
                if tools::is_executable(&candidate) {
                    Ok(Resolution::Installed(candidate))
                } else {
                    Ok(Resolution::Download(dir.clone()))
                }
            }
            None => match lookup(&binary) {
                Some(path) => Ok(Resolution::OnPath(path)),
                None => {
                    let dir = default_install_dir().ok_or_else(|| {
                        TfstrapError::FileSystem(
                            "Could not determine a default install directory; pass --tf-path"
                                .to_string(),
                        )
                    })?;
                    Ok(Resolution::Download(dir))
                }
            },
        }
    }

    /// Returns the path of a usable terraform binary, downloading it if needed.
    pub async fn ensure_installed(&self) -> Result<PathBuf> {
        match self.resolve(tools::find_on_path)? {
            Resolution::Installed(path) | Resolution::OnPath(path) => {
                info!("Using existing terraform at {}", path.display());
                Ok(path)
            }
            Resolution::Download(dir) => {
                eprintln!(
                    "Installing terraform {} into {}",
                    self.terraform.version,
                    dir.display()
                );
                self.install(&dir)
                    .await
                    .context("Unable to install terraform")
            }
        }
    }

    /// Downloads the release archive to a scratch directory and extracts it into `dir`.
    pub async fn install(&self, dir: &Path) -> Result<PathBuf> {
        let url = self.terraform.release_url(&self.platform);
        let scratch = tempfile::tempdir().context("Failed to create download directory")?;
        let archive = scratch.path().join(self.terraform.archive_name(&self.platform));

        download::download_to_file(&self.client, &url, &archive)
            .await
            .context("Unable to download zip")?;

        let dest = dir.to_path_buf();
        let binary = self.binary_name();
        let extracted = tokio::task::spawn_blocking(move || {
            unzip::extract_executable(&archive, &dest, &binary)
        })
        .await
        .context("Extraction task failed")?
        .context("Unable to unzip binary")?;

        debug!("terraform installed at {}", extracted.display());
        Ok(extracted)
    }
}
