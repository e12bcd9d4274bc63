//! # tfstrap Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//!
//! ## Overview
//!
//! HTTP access used by the provisioner to fetch terraform release archives.
//!
//! - **`download`**: builds the shared `reqwest::Client` and streams a URL to a
//!   file on disk chunk by chunk.
//!
//! ```rust
//! use crate::common::network::download;
//! use std::path::Path;
//!
//! # async fn run_example() -> anyhow::Result<()> {
//! let client = download::http_client()?;
//! let bytes = download::download_to_file(
//!     &client,
//!     "https://releases.hashicorp.com/terraform/0.12.24/terraform_0.12.24_linux_amd64.zip",
//!     Path::new("/tmp/terraform.zip"),
//! )
//! .await?;
//! println!("Fetched {} bytes", bytes);
//! # Ok(())
//! # }
//! ```
//!

pub mod download;
