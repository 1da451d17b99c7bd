//! `which`: show where a name resolves.

use crate::{
    cli::{args::WhichArgs, handlers::commons},
    core::resolver,
    models::{ExecutionerConfig, SearchPaths, SelectRule},
    system::executor::ExecutionError,
};
use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Main entry point for the 'which' command.
/// Prints the path `run <name>` would use.
pub fn handle(args: Vec<String>) -> Result<()> {
    let which_args = WhichArgs::try_parse_from(&args)?;
    let (executioner, config) = commons::load_executioner()?;

    match resolve(executioner.search_paths(), &config, &which_args) {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => Err(ExecutionError::ExecutableNotFound {
            name: which_args.name,
            search_paths: executioner.search_paths().clone(),
        }
        .into()),
    }
}

/// Resolves `args.name` the way registration does. A configured `path` wins
/// unless `--after` asks for a search. The configured `select` rule and the
/// flag filters must all accept a candidate.
fn resolve(
    search_paths: &SearchPaths,
    config: &ExecutionerConfig,
    args: &WhichArgs,
) -> Option<PathBuf> {
    let entry = config.executables.get(&args.name);
    if args.after.is_none() {
        if let Some(path) = entry.and_then(|e| e.path.clone()) {
            log::debug!("'{}' is configured at '{}'.", args.name, path.display());
            return Some(path);
        }
    }

    let mut rules: Vec<SelectRule> = entry.and_then(|e| e.select.clone()).into_iter().collect();
    if args.not_symlink {
        rules.push(SelectRule::NotSymlink);
    }
    if let Some(prefix) = &args.prefix {
        rules.push(SelectRule::PathPrefix(prefix.clone()));
    }
    let select: &dyn Fn(&Path) -> bool =
        &|candidate: &Path| rules.iter().all(|rule| rule.accepts(candidate));

    resolver::find_executable(
        &args.name,
        search_paths,
        args.after.as_deref(),
        (!rules.is_empty()).then_some(select),
    )
}
