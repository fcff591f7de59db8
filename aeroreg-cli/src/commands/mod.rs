pub mod compare;
pub mod release;
pub mod rollback;
pub mod sync;
pub mod validate;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Registry root for every command: the current working directory.
pub fn registry_root() -> Result<PathBuf> {
    std::env::current_dir().context("could not determine current directory")
}

/// Interactive yes/no prompt on stdin, for the release controller's
/// confirmation capability.
pub fn stdin_confirm(prompt: &str) -> bool {
    print!("{prompt} (yes/no): ");
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_lowercase().as_str(), "yes" | "y")
}
