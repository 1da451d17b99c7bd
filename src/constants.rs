// src/constants.rs

//! Fixed names and directories.

/// Directories searched for executables, in priority order.
/// A `~/bin` entry is prepended at runtime when a home directory is known.
pub const SYSTEM_SEARCH_DIRS: &[&str] = &[
    "/bin",
    "/usr/bin",
    "/usr/local/bin",
    "/opt/homebrew/bin",
    "/opt/local/bin",
];

/// The user-local directory that takes precedence over the system ones.
pub const HOME_BIN_DIR: &str = "bin";

/// The name of the configuration directory (inside the system config dir).
pub const CONFIG_DIR_NAME: &str = "executioner";

/// The name of the configuration file (inside the configuration directory).
pub const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable that points to an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "EXECUTIONER_CONFIG";

/// The operator used to chain queued commands.
pub const CHAIN_OPERATOR: &str = " && ";
