//! aeroreg — aerodrome registry maintenance CLI.
//!
//! # Usage
//!
//! ```text
//! aeroreg sync                          rebuild the staging registry from sources
//! aeroreg release [--force]             promote staging to production
//! aeroreg rollback [--select N] [--yes] restore production from a backup
//! aeroreg compare                       review staging vs production changes
//! aeroreg validate [file]               strict-validate a registry document
//! ```
//!
//! All commands operate on the current working directory as the registry
//! root.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    compare::CompareArgs, release::ReleaseArgs, rollback::RollbackArgs, sync::SyncArgs,
    validate::ValidateArgs,
};

#[derive(Parser, Debug)]
#[command(
    name = "aeroreg",
    version,
    about = "Maintain the versioned aerodrome registry",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch both source feeds and rebuild the staging registry.
    Sync(SyncArgs),

    /// Promote the staging registry to production (validates, backs up).
    Release(ReleaseArgs),

    /// Restore production from a previous backup.
    Rollback(RollbackArgs),

    /// Show changes between production and staging.
    Compare(CompareArgs),

    /// Validate a registry document; exits non-zero on failure.
    Validate(ValidateArgs),
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Release(args) => args.run(),
        Commands::Rollback(args) => args.run(),
        Commands::Compare(args) => args.run(),
        Commands::Validate(args) => args.run(),
    }
}
