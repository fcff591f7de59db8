//! `aeroreg validate` — strict document validation with a process exit
//! status for CI use.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use aeroreg_core::validator::IssueList;
use aeroreg_core::{store, validate, RegistryError, ValidationMode};

/// Arguments for `aeroreg validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Document to validate (defaults to the production artifact).
    pub file: Option<PathBuf>,
}

impl ValidateArgs {
    pub fn run(self) -> Result<()> {
        let root = super::registry_root()?;
        let path = self
            .file
            .unwrap_or_else(|| store::production_path(&root));

        let value = match store::load_value(&path) {
            Ok(value) => value,
            Err(RegistryError::DocumentNotFound { path }) => {
                eprintln!("{} File not found: {}", "✗".red().bold(), path.display());
                anyhow::bail!("document not found");
            }
            Err(RegistryError::Parse { path, source }) => {
                eprintln!("{} Invalid JSON in {}: {source}", "✗".red().bold(), path.display());
                anyhow::bail!("invalid JSON");
            }
            Err(e) => return Err(e.into()),
        };

        match validate(&value, ValidationMode::Strict) {
            Ok(()) => {
                println!("{} Validation successful!", "✓".green().bold());
                if let Some(count) = value.get("total_count") {
                    println!("  registry contains {count} aerodromes");
                }
                if let Some(updated) = value.get("last_updated").and_then(|v| v.as_str()) {
                    println!("  last updated: {updated}");
                }
                if let Some(version) = value.get("version").and_then(|v| v.as_str()) {
                    println!("  version: {version}");
                }
                Ok(())
            }
            Err(issues) => {
                eprintln!(
                    "{} Validation failed for {}:",
                    "✗".red().bold(),
                    path.display()
                );
                eprintln!("{}", IssueList(&issues));
                anyhow::bail!("validation failed with {} issue(s)", issues.len());
            }
        }
    }
}
