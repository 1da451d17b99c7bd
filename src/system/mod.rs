//! # System Interaction Layer
//!
//! The boundary between the registry and the operating system.
//!
//! ## Modules
//!
//! - **`executor`**: `ProcessRunner`, which runs one command through the shell,
//!   captures its primary output stream and classifies failures.
//! - **`shell`**: the `Shell` trait, the single "run through a shell" primitive,
//!   and its platform implementation (`sh -c` / `cmd /C`).
//! - **`logger`**: the command logger hook that sees every command before it
//!   is spawned.

pub mod executor;
pub mod logger;
pub mod shell;
