//! Command line front end of the `executioner` binary.

use clap::Parser;

pub mod args;
pub mod handlers;

/// executioner: run external executables found on a fixed list of search paths.
///
/// Usage:
/// - `executioner <action> [args...]` (e.g., `executioner which sh`)
/// - `executioner <name> [args...]` -> shortcut for `executioner run <name> [args...]`
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// `which`, `run`, `chain`, `paths`, or the name of an executable.
    pub action: Option<String>,

    /// All remaining arguments, passed to the action untouched.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
