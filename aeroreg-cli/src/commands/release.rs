//! `aeroreg release` — promote the staging registry to production.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use aeroreg_core::store;
use aeroreg_core::validator::IssueList;
use aeroreg_release::{promote, ReleaseError};

/// Arguments for `aeroreg release`.
#[derive(Args, Debug)]
pub struct ReleaseArgs {
    /// Skip the interactive confirmation.
    #[arg(long)]
    pub force: bool,
}

impl ReleaseArgs {
    pub fn run(self) -> Result<()> {
        let root = super::registry_root()?;

        println!("Starting release process...");
        println!("  staging:    {}", store::staging_path(&root).display());
        println!("  production: {}", store::production_path(&root).display());

        if !self.force {
            println!("This will replace the current production registry.");
            println!("Downstream consumers pick up the new data on their next sync.");
        }

        let mut confirm = super::stdin_confirm;
        match promote(&root, self.force, &mut confirm) {
            Ok(released) => {
                if let Some(backup) = &released.backup {
                    println!("Production backup created: {}", backup.display());
                }
                println!("{} Release completed successfully!", "✓".green().bold());
                println!(
                    "  released {} aerodromes to production",
                    released.document.total_count
                );
                if let Some(stamp) = &released.document.released_at {
                    println!("  release timestamp: {stamp}");
                }
                Ok(())
            }
            Err(ReleaseError::ValidationFailed(issues)) => {
                eprintln!("{} Staging validation failed:", "✗".red().bold());
                eprintln!("{}", IssueList(&issues));
                anyhow::bail!("staging validation failed");
            }
            Err(ReleaseError::Cancelled) => {
                println!("{} Release cancelled by user", "✗".red());
                anyhow::bail!("release cancelled");
            }
            Err(e) => Err(e.into()),
        }
    }
}
