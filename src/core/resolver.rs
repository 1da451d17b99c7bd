// src/core/resolver.rs

//! Deterministic executable discovery over an ordered list of directories.

use crate::models::SearchPaths;
use std::path::{Path, PathBuf};

/// Finds the first occurrence of `name` in `search_paths`.
///
/// * `advance_from` - only directories strictly after this one are scanned.
///   A directory that is not part of `search_paths` makes the lookup fail.
/// * `select` - candidates that exist but are rejected by the predicate are
///   skipped and scanning continues with the next directory.
///
/// Only existence checks are performed.
pub fn find_executable(
    name: &str,
    search_paths: &SearchPaths,
    advance_from: Option<&Path>,
    select: Option<&dyn Fn(&Path) -> bool>,
) -> Option<PathBuf> {
    find_executable_with(name, search_paths, advance_from, select, |p| p.exists())
}

/// [`find_executable`] with a custom existence probe.
pub fn find_executable_with<F>(
    name: &str,
    search_paths: &SearchPaths,
    advance_from: Option<&Path>,
    select: Option<&dyn Fn(&Path) -> bool>,
    mut exists: F,
) -> Option<PathBuf>
where
    F: FnMut(&Path) -> bool,
{
    let start = match advance_from {
        Some(dir) => match search_paths.position(dir) {
            Some(index) => index + 1,
            None => {
                log::debug!(
                    "Cannot advance from '{}': not one of the search paths.",
                    dir.display()
                );
                return None;
            }
        },
        None => 0,
    };

    for dir in search_paths.iter().skip(start) {
        let candidate = dir.join(name);
        if !exists(&candidate) {
            continue;
        }
        match select {
            Some(accept) if !accept(&candidate) => {
                log::debug!("Skipping rejected candidate '{}'.", candidate.display());
            }
            _ => {
                log::debug!("Resolved '{}' to '{}'.", name, candidate.display());
                return Some(candidate);
            }
        }
    }

    log::debug!("Executable '{}' not found in: {}", name, search_paths);
    None
}
