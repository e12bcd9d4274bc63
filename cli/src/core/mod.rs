//! # tfstrap Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure components of tfstrap.
//!
//! ## Architecture
//!
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types, including the process-run failure taxonomy
//! - `provisioner`: Ensures a terraform binary exists and yields its path
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{TfstrapError, Result}; // For error handling
//! use crate::core::provisioner::Provisioner; // For locating or installing terraform
//! ```
//!
pub mod config;
pub mod error;
pub mod provisioner;
