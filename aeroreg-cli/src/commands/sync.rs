//! `aeroreg sync` — rebuild the staging registry from both source feeds.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use aeroreg_sync::{fetch, pipeline};

/// Arguments for `aeroreg sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let root = super::registry_root()?;

        println!("Starting aerodrome registry sync...");
        let sources = fetch::fetch_sources().context("failed to download source data")?;

        let report = pipeline::run(&root, &sources).context("sync failed")?;

        println!("{} Sync completed successfully!", "✓".green().bold());
        println!("  airports with ICAO codes:        {}", report.primary_count);
        println!("  airports with timezone data:     {}", report.secondary_count);
        println!("  total aerodromes:                {}", report.total_count);
        println!("  timezone matched from secondary: {}", report.stats.matched);
        println!("  timezone from country fallback:  {}", report.stats.fallback);
        println!("  existing aerodromes overridden:  {}", report.stats.overridden);
        println!("  new aerodromes from overrides:   {}", report.stats.overrides);
        println!("  registry saved to: {}", report.staging_path.display());
        Ok(())
    }
}
