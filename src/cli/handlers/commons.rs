// src/cli/handlers/commons.rs

//! Helpers shared by the action handlers.

use crate::{
    core::{
        config_loader,
        registry::{Executioner, RegisterOptions},
    },
    models::{EnvVars, ExecOptions, ExecutionerConfig},
    system::executor::ProcessRunner,
};
use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;

/// Loads `config.toml` and builds an `Executioner` over the system shell
/// with every configured binding registered.
pub fn load_executioner() -> Result<(Executioner, ExecutionerConfig)> {
    let config = config_loader::load_config().context("Failed to load configuration")?;
    let executioner = Executioner::from_config(&config, ProcessRunner::default());
    log::debug!("Search paths: {}", executioner.search_paths());
    Ok((executioner, config))
}

/// Registers `name` for a CLI call, starting from its config entry (if any).
pub fn register_for_cli(
    executioner: &mut Executioner,
    config: &ExecutionerConfig,
    name: &str,
    path: Option<PathBuf>,
    force_queue: bool,
) {
    let mut options = config
        .executables
        .get(name)
        .map(RegisterOptions::from)
        .unwrap_or_default();
    if let Some(path) = path {
        options = options.with_path(path);
    }
    if force_queue {
        options = options.queued(true);
    }
    executioner.register(name, options);
}

/// Turns `KEY=VALUE` flags and the stream switch into call options.
/// Flags that were not given leave the registration defaults in place.
pub fn cli_options(env: &[String], switch_streams: bool) -> Result<ExecOptions> {
    let mut options = ExecOptions::default();
    if !env.is_empty() {
        let mut vars = EnvVars::new();
        for raw in env {
            let (key, value) = EnvVars::parse_assignment(raw)
                .ok_or_else(|| anyhow!("Invalid environment variable '{}', expected KEY=VALUE.", raw))?;
            vars.set(key, value);
        }
        options = options.with_env(vars);
    }
    if switch_streams {
        options = options.switched(true);
    }
    Ok(options)
}

/// Re-joins split arguments so the shell sees the same words again.
pub fn join_args(args: &[String]) -> Result<String> {
    shlex::try_join(args.iter().map(String::as_str))
        .map_err(|e| anyhow!("Cannot quote arguments {:?}: {}", args, e))
}

/// Splits "<name> [args...]" into the name and the re-quoted argument text.
pub fn split_command(raw: &str) -> Result<(String, String)> {
    let mut parts = shlex::split(raw)
        .filter(|parts| !parts.is_empty())
        .ok_or_else(|| anyhow!("Command could not be parsed: '{}'", raw))?;
    let name = parts.remove(0);
    Ok((name, join_args(&parts)?))
}

/// Prints captured output, ending it with a newline when missing.
pub fn print_output(output: &str) {
    print!("{}", output);
    if !output.is_empty() && !output.ends_with('\n') {
        println!();
    }
}
