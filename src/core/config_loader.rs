//! # Config Loader
//!
//! Loads the optional `config.toml` that declares search paths and default
//! executable bindings. A missing file is not an error: the defaults apply.
use crate::core::paths::{self, PathError};
use crate::models::ExecutionerConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why the configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file location could not be determined.
    #[error(transparent)]
    Path(#[from] PathError),
    /// The file exists but could not be read.
    #[error("Could not read config file '{path}': {source}")]
    Read {
        /// The config file.
        path: PathBuf,
        /// The I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`ExecutionerConfig`].
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        /// The config file.
        path: PathBuf,
        /// The TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Loads the configuration from its standard location
/// (`$EXECUTIONER_CONFIG`, else `<config dir>/executioner/config.toml`).
pub fn load_config() -> Result<ExecutionerConfig, ConfigError> {
    let path = paths::get_config_file_path()?;
    load_config_from(&path)
}

/// Loads the configuration from `path`, falling back to the defaults when
/// the file does not exist.
pub fn load_config_from(path: &Path) -> Result<ExecutionerConfig, ConfigError> {
    if !path.exists() {
        log::debug!(
            "No config file at '{}', using defaults.",
            path.display()
        );
        return Ok(ExecutionerConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: ExecutionerConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    log::debug!(
        "Loaded config from '{}' with {} executable(s).",
        path.display(),
        config.executables.len()
    );
    Ok(config)
}
