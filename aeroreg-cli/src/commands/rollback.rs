//! `aeroreg rollback` — restore production from a previous backup.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use aeroreg_release::{rollback, rollback_candidates, RollbackError};

/// Arguments for `aeroreg rollback`.
#[derive(Args, Debug)]
pub struct RollbackArgs {
    /// Backup to restore, 1-based as listed (newest first). Prompted for
    /// when omitted.
    #[arg(long)]
    pub select: Option<usize>,

    /// Skip the interactive confirmation.
    #[arg(long)]
    pub yes: bool,
}

impl RollbackArgs {
    pub fn run(self) -> Result<()> {
        let root = super::registry_root()?;

        let candidates = match rollback_candidates(&root) {
            Ok(candidates) => candidates,
            Err(RollbackError::NoBackupsFound) => {
                eprintln!("{} No backup files found", "✗".red().bold());
                anyhow::bail!("no backups found");
            }
            Err(e) => return Err(e.into()),
        };

        println!("Available backups:");
        for (i, backup) in candidates.iter().enumerate() {
            let name = backup
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!("  {}. {name}", i + 1);
        }

        let selection = match self.select {
            Some(n) => Selection::Pick(n),
            None => prompt_selection(candidates.len()),
        };
        let index = match selection {
            Selection::Cancel => {
                println!("{} Rollback cancelled", "✗".red());
                anyhow::bail!("rollback cancelled");
            }
            // 1-based on the surface; out-of-range (including 0 and
            // non-numeric input) becomes InvalidSelection below.
            Selection::Pick(n) => n.checked_sub(1).unwrap_or(usize::MAX),
            Selection::Invalid => usize::MAX,
        };

        let mut confirm = |prompt: &str| self.yes || super::stdin_confirm(prompt);
        match rollback(&root, index, &mut confirm) {
            Ok(restored) => {
                let name = restored
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                println!("{} Rolled back to {name}", "✓".green().bold());
                Ok(())
            }
            Err(RollbackError::InvalidSelection(_)) => {
                eprintln!("{} Invalid selection", "✗".red().bold());
                anyhow::bail!("invalid selection");
            }
            Err(RollbackError::Cancelled) => {
                println!("{} Rollback cancelled", "✗".red());
                anyhow::bail!("rollback cancelled");
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Selection {
    Pick(usize),
    Invalid,
    Cancel,
}

/// Read a 1-based selection from stdin. Non-numeric input is an invalid
/// selection, not a cancellation; only an explicit 'cancel' (or unreadable
/// stdin) cancels.
fn prompt_selection(count: usize) -> Selection {
    use std::io::Write;

    print!("Select backup to restore (1-{count}, or 'cancel'): ");
    if std::io::stdout().flush().is_err() {
        return Selection::Cancel;
    }
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return Selection::Cancel;
    }
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("cancel") {
        return Selection::Cancel;
    }
    match trimmed.parse() {
        Ok(n) => Selection::Pick(n),
        Err(_) => Selection::Invalid,
    }
}
