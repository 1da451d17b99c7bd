// src/bin/executioner.rs

//! The `executioner` command line tool.

use anyhow::Result;
use clap::Parser;
use colored::*;
use executioner::{
    cli::{Cli, handlers},
    system::{executor::ExecutionError, logger},
};
use std::sync::Arc;

// --- Command Definition and Registry ---

/// Defines a system command, its aliases, and its handler function.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    summary: &'static str,
    handler: fn(Vec<String>) -> Result<()>,
}

/// Every action the CLI understands. Anything else is treated as the name of
/// an executable and handed to `run`.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "chain",
        aliases: &["queue"],
        summary: "Run several commands as one `&&` chain",
        handler: handlers::chain::handle,
    },
    CommandDefinition {
        name: "paths",
        aliases: &[],
        summary: "List the search paths in priority order",
        handler: handlers::paths::handle,
    },
    CommandDefinition {
        name: "run",
        aliases: &["exec"],
        summary: "Run an executable and print its captured output",
        handler: handlers::run::handle,
    },
    CommandDefinition {
        name: "which",
        aliases: &[],
        summary: "Show which file an executable name resolves to",
        handler: handlers::which::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Sets up logging, parses arguments, dispatches to the correct handler and
/// performs centralized error handling.
fn main() {
    env_logger::init();
    logger::install(Some(Arc::new(logger::LogCrateLogger)));

    let result = run_cli(Cli::parse());
    logger::install(None);

    if let Err(e) = result {
        // Argument errors from a handler's own parser (including `--help`)
        // are printed by clap with its usual exit codes.
        if let Some(clap_err) = e.downcast_ref::<clap::Error>() {
            clap_err.exit();
        }

        if let Some(ExecutionError::Process { command, output }) =
            e.downcast_ref::<ExecutionError>()
        {
            eprintln!("\n{}: {}", "Command failed".red().bold(), command.yellow());
            eprintln!("{}", output);
            std::process::exit(1);
        }

        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let Some(action) = cli.action else {
        print_usage();
        return Ok(());
    };

    match find_command(&action) {
        Some(command) => (command.handler)(cli.args),
        None => {
            // `executioner <name> [args...]` is a shortcut for `run`.
            let mut run_args = vec![action];
            run_args.extend(cli.args);
            handlers::run::handle(run_args)
        }
    }
}

fn print_usage() {
    println!("{}", "Usage: executioner <action> [args...]".bold());
    println!();
    for command in COMMAND_REGISTRY {
        let aliases = if command.aliases.is_empty() {
            String::new()
        } else {
            format!(" ({})", command.aliases.join(", "))
        };
        println!(
            "  {:<8}{} {}",
            command.name.cyan(),
            aliases.dimmed(),
            command.summary
        );
    }
    println!();
    println!(
        "{}",
        "Any other first argument is run as an executable: `executioner <name> [args...]`."
            .dimmed()
    );
}
