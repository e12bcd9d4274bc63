//! # tfstrap Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Command handlers invoked from `main.rs`. Each module defines its clap
//! arguments struct and an async `handle_*` function.
//!
//! ## Command Groups
//!
//! - `deploy`: ensures terraform is installed, then runs `terraform init`
//!   followed by `terraform apply` (or `destroy`).
//!

/// Provision terraform and run init + apply/destroy.
pub mod deploy;
