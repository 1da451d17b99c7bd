//! `paths`: list the search paths.

use crate::cli::handlers::commons;
use anyhow::{Result, anyhow};
use colored::Colorize;

/// Main entry point for the 'paths' command.
/// Prints the effective search paths in priority order.
pub fn handle(args: Vec<String>) -> Result<()> {
    if let Some(extra) = args.first() {
        return Err(anyhow!("'paths' takes no arguments, got '{}'.", extra));
    }
    let (executioner, _config) = commons::load_executioner()?;

    for dir in executioner.search_paths().iter() {
        if dir.is_dir() {
            println!("{}", dir.display());
        } else {
            println!("{} {}", dir.display(), "(missing)".dimmed());
        }
    }
    Ok(())
}
