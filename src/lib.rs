//! Declarative wrappers for external executables.
//!
//! Executables are resolved once against an ordered list of search paths,
//! then invoked through the platform shell with their captured output
//! returned as a string. Calls can also be queued and run later as a single
//! `&&` chain.

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;

pub use crate::core::registry::{Executioner, Invocation, RegisterOptions};
pub use crate::models::{EnvVars, ExecOptions};
pub use crate::system::executor::{ExecutionError, ProcessRunner};
