// src/core/paths.rs

//! Search path defaults and the configuration file location.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILENAME, CONFIG_PATH_ENV, HOME_BIN_DIR, SYSTEM_SEARCH_DIRS,
};
use crate::models::SearchPaths;
use lazy_static::lazy_static;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

lazy_static! {
    static ref CONFIG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

/// Why a path could not be determined.
#[derive(Error, Debug)]
pub enum PathError {
    /// The platform has no config directory for this user.
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    /// A `~` or `$VAR` reference could not be expanded.
    #[error("Failed to expand search path '{template}': {reason}")]
    Expansion {
        /// The search path as written.
        template: String,
        /// The expansion failure.
        reason: String,
    },
}

/// Builds the default search path list: `~/bin` first (when a home directory
/// is known), followed by the fixed system directories.
pub fn default_search_paths() -> SearchPaths {
    search_paths_for_home(dirs::home_dir().as_deref())
}

/// Same as [`default_search_paths`] for an explicit (possibly absent) home.
pub fn search_paths_for_home(home: Option<&Path>) -> SearchPaths {
    let home_bin = home.map(|h| h.join(HOME_BIN_DIR));
    if home_bin.is_none() {
        log::debug!("No home directory found, '~/{}' is not searched.", HOME_BIN_DIR);
    }
    SearchPaths::new(
        home_bin
            .into_iter()
            .chain(SYSTEM_SEARCH_DIRS.iter().map(PathBuf::from)),
    )
}

/// Expands a single search path template, resolving the home directory and
/// environment variables (`~/bin`, `$TOOLS/bin`).
pub fn expand_search_path(template: &str) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(template).map_err(|e| PathError::Expansion {
        template: template.to_string(),
        reason: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}

/// Expands configured search path templates in order.
/// Entries that cannot be expanded are skipped with a warning.
pub fn expand_search_paths(templates: &[String]) -> SearchPaths {
    SearchPaths::new(templates.iter().filter_map(|template| {
        match expand_search_path(template) {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        }
    }))
}

/// Returns the path to the executioner configuration directory
/// (`~/.config/executioner` on Linux).
///
/// Memoized: the first call computes and caches the path. The directory is
/// not created.
pub fn get_config_dir() -> Result<PathBuf, PathError> {
    let mut cached = CONFIG_DIR.lock().unwrap_or_else(|e| e.into_inner());

    if let Some(path) = &*cached {
        return Ok(path.clone());
    }

    let config_path = dirs::config_dir()
        .ok_or(PathError::ConfigDirNotFound)?
        .join(CONFIG_DIR_NAME);

    *cached = Some(config_path.clone());
    Ok(config_path)
}

/// Returns the configuration file path. `$EXECUTIONER_CONFIG` takes precedence.
pub fn get_config_file_path() -> Result<PathBuf, PathError> {
    if let Some(explicit) = std::env::var_os(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(explicit));
    }
    get_config_dir().map(|dir| dir.join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_bin_comes_first() {
        let paths = search_paths_for_home(Some(Path::new("/home/alice")));
        assert_eq!(paths.as_slice()[0], PathBuf::from("/home/alice/bin"));
        assert_eq!(paths.as_slice()[1], PathBuf::from("/bin"));
        assert_eq!(paths.len(), SYSTEM_SEARCH_DIRS.len() + 1);
    }

    #[test]
    fn test_no_home_directory_skips_home_bin() {
        let paths = search_paths_for_home(None);
        assert_eq!(paths.len(), SYSTEM_SEARCH_DIRS.len());
        assert_eq!(
            paths.to_string(),
            "/bin, /usr/bin, /usr/local/bin, /opt/homebrew/bin, /opt/local/bin"
        );
    }

    #[test]
    fn test_expand_plain_path_is_unchanged() {
        assert_eq!(
            expand_search_path("/usr/local/bin").unwrap(),
            PathBuf::from("/usr/local/bin")
        );
    }

    #[test]
    fn test_expand_unknown_variable_is_skipped() {
        let templates = vec![
            "/bin".to_string(),
            "$EXECUTIONER_TEST_SURELY_UNSET_VAR/bin".to_string(),
            "/usr/bin".to_string(),
        ];
        let paths = expand_search_paths(&templates);
        assert_eq!(paths, SearchPaths::new(["/bin", "/usr/bin"]));
    }

    #[test]
    fn test_expand_home_directory() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_search_path("~/bin").unwrap(), home.join("bin"));
        }
    }
}
