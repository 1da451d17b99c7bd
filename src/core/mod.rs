//! # Core
//!
//! - **`paths`**: the ordered search path list and the config file location.
//! - **`resolver`**: finds an executable on the search paths.
//! - **`queue`**: pending commands flattened into one `&&` chain.
//! - **`registry`**: `Executioner`, binding logical names to resolved paths.
//! - **`config_loader`**: reads `config.toml`.
//! - **`commons`**: argument formatting helpers.

pub mod commons;
pub mod config_loader;
pub mod paths;
pub mod queue;
pub mod registry;
pub mod resolver;
