// src/cli/args.rs

//! Argument structs for each action, parsed from the arguments that follow
//! the action name.

use clap::Parser;
use std::path::PathBuf;

/// Arguments of `which`.
#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)] // Handlers receive their arguments without the action name.
pub struct WhichArgs {
    /// The executable to look for.
    pub name: String,

    /// Only search the directories after this one.
    #[arg(long)]
    pub after: Option<PathBuf>,

    /// Skip candidates that are symbolic links.
    #[arg(long)]
    pub not_symlink: bool,

    /// Only accept candidates under this prefix.
    #[arg(long)]
    pub prefix: Option<PathBuf>,
}

/// Arguments of `run`.
#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct RunArgs {
    /// The executable to run.
    pub name: String,

    /// Environment variable to prepend (e.g., "KEY=VALUE"). Repeat for more.
    #[arg(long)]
    pub env: Vec<String>,

    /// Capture stderr instead of stdout.
    #[arg(long)]
    pub switch_streams: bool,

    /// Use this path instead of searching for the executable.
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Arguments for the executable.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments of `chain`.
#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct ChainArgs {
    /// Commands to chain, each as "<name> [args...]".
    #[arg(required = true)]
    pub commands: Vec<String>,

    /// Environment variable to prepend to the whole chain (e.g., "KEY=VALUE").
    /// Repeat for more.
    #[arg(long)]
    pub env: Vec<String>,

    /// Capture stderr instead of stdout.
    #[arg(long)]
    pub switch_streams: bool,
}
