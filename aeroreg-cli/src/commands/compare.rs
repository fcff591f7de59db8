//! `aeroreg compare` — review staging vs production before a release.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use aeroreg_core::{store, RegistryDocument, RegistryError};
use aeroreg_release::{diff, DiffReport, DiffThresholds};

/// How many records of each category to print before eliding.
const DISPLAY_LIMIT: usize = 10;

/// Arguments for `aeroreg compare`.
#[derive(Args, Debug)]
pub struct CompareArgs {}

impl CompareArgs {
    pub fn run(self) -> Result<()> {
        let root = super::registry_root()?;
        let staging_path = store::staging_path(&root);
        let production_path = store::production_path(&root);

        println!("Comparing aerodrome registry versions...");
        println!("  production: {}", production_path.display());
        println!("  staging:    {}", staging_path.display());

        let staging = match store::load_document(&staging_path) {
            Ok(doc) => doc,
            Err(RegistryError::DocumentNotFound { .. }) => {
                eprintln!("{} No staging data found. Run sync first.", "✗".red().bold());
                anyhow::bail!("no staging data");
            }
            Err(e) => return Err(e.into()),
        };
        // First-ever compare: treat missing production as an empty registry.
        let production = match store::load_document(&production_path) {
            Ok(doc) => doc,
            Err(RegistryError::DocumentNotFound { .. }) => RegistryDocument::new(
                String::new(),
                String::new(),
                Vec::new(),
            ),
            Err(e) => return Err(e.into()),
        };

        let report = diff(&production, &staging, &DiffThresholds::default());

        println!("Summary:");
        println!("  production aerodromes: {}", production.aerodromes.len());
        println!("  staging aerodromes:    {}", staging.aerodromes.len());
        println!(
            "  net change:            {:+}",
            staging.aerodromes.len() as i64 - production.aerodromes.len() as i64
        );

        print_report(&report, &production, &staging);

        if !staging.last_updated.is_empty() {
            println!("Staging last updated:    {}", staging.last_updated);
        }
        if !production.last_updated.is_empty() {
            println!("Production last updated: {}", production.last_updated);
        }

        if report.is_empty() {
            println!("{} No changes detected - staging matches production", "✓".green());
        } else {
            println!("Total changes: {}", report.total_changes());
            println!("To release these changes, run: aeroreg release");
        }
        for warning in &report.warnings {
            println!("{} WARNING: {warning}", "!".yellow().bold());
        }
        Ok(())
    }
}

fn find<'a>(doc: &'a RegistryDocument, icao: &aeroreg_core::Icao) -> Option<&'a aeroreg_core::AerodromeRecord> {
    doc.aerodromes.iter().find(|r| &r.icao == icao)
}

fn print_report(report: &DiffReport, production: &RegistryDocument, staging: &RegistryDocument) {
    if !report.added.is_empty() {
        println!("{} ({}):", "NEW AERODROMES".green().bold(), report.added.len());
        for icao in report.added.iter().take(DISPLAY_LIMIT) {
            if let Some(record) = find(staging, icao) {
                println!("  + {icao}: {} ({})", record.name, record.country);
            }
        }
        elide(report.added.len());
    }

    if !report.removed.is_empty() {
        println!("{} ({}):", "REMOVED AERODROMES".red().bold(), report.removed.len());
        for icao in report.removed.iter().take(DISPLAY_LIMIT) {
            if let Some(record) = find(production, icao) {
                println!("  - {icao}: {} ({})", record.name, record.country);
            }
        }
        elide(report.removed.len());
    }

    if !report.changed.is_empty() {
        println!("{} ({}):", "CHANGED AERODROMES".yellow().bold(), report.changed.len());
        for change in report.changed.iter().take(DISPLAY_LIMIT) {
            println!("  ~ {}: {}", change.icao, change.name);
            for field in &change.fields {
                println!(
                    "    {}: '{}' -> '{}'",
                    field.field, field.before, field.after
                );
            }
        }
        elide(report.changed.len());
    }
}

fn elide(total: usize) {
    if total > DISPLAY_LIMIT {
        println!("  ... and {} more", total - DISPLAY_LIMIT);
    }
}
