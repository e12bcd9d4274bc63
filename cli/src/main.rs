//! # tfstrap Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the tfstrap CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Handing off to the deploy handler
//!
//! ## Architecture
//!
//! tfstrap has a single action, so there are no subcommands: the deploy
//! arguments are flattened into the top-level parser. All errors are propagated
//! to this level, printed with their full cause chain, and turned into exit
//! status 1.
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! tfstrap --help
//!
//! # Apply with debug logging
//! tfstrap -vv
//!
//! # Destroy
//! tfstrap --destroy
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Provision terraform, then run init + apply/destroy
//! 4. Format and display any errors that occur
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Deploy handler
mod common; // Shared utilities (process, fs, network, archive, system)
mod core; // Core infrastructure (errors, config, provisioning)

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "tfstrap",
    about = "Bootstraps terraform and runs init + apply (or destroy)",
    long_about = "Ensures a terraform binary is available, downloading a pinned release if needed,\n\
                  then runs `terraform init` followed by `terraform apply` or `terraform destroy`\n\
                  non-interactively, streaming terraform's output as it runs.",
    version
)]
struct Cli {
    #[command(flatten)]
    deploy: commands::deploy::DeployArgs,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = commands::deploy::handle_deploy(cli.deploy).await {
        tracing::error!("Deploy failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
