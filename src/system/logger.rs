// src/system/logger.rs

//! The hook that sees every command line before it is spawned.

use lazy_static::lazy_static;
use std::sync::{Arc, RwLock};

/// Receives one debug line per command before it is spawned.
pub trait CommandLogger: Send + Sync {
    /// Records one line.
    fn debug(&self, line: &str);
}

/// Forwards command lines to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCrateLogger;

impl CommandLogger for LogCrateLogger {
    fn debug(&self, line: &str) {
        log::debug!("{}", line);
    }
}

lazy_static! {
    static ref INSTALLED: RwLock<Option<Arc<dyn CommandLogger>>> = RwLock::new(None);
}

/// Installs the process-wide command logger. `None` uninstalls it.
///
/// Meant to be called once at start-up and once at tear-down, from a single
/// thread. Runners with an injected logger ignore this slot.
pub fn install(logger: Option<Arc<dyn CommandLogger>>) {
    let mut slot = INSTALLED.write().unwrap_or_else(|e| e.into_inner());
    *slot = logger;
}

/// The process-wide command logger, if one is installed.
pub fn installed() -> Option<Arc<dyn CommandLogger>> {
    INSTALLED
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}
