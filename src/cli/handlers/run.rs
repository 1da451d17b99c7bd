//! `run`: call one executable and print its output.

use crate::{
    cli::{args::RunArgs, handlers::commons},
    core::registry::Invocation,
};
use anyhow::Result;
use clap::Parser;

/// Main entry point for the 'run' command.
/// Registers the executable (merged with its config entry), calls it once and
/// prints what it captured.
pub fn handle(args: Vec<String>) -> Result<()> {
    let run_args = RunArgs::try_parse_from(&args)?;
    let (mut executioner, config) = commons::load_executioner()?;

    commons::register_for_cli(
        &mut executioner,
        &config,
        &run_args.name,
        run_args.path.clone(),
        false,
    );
    let overrides = commons::cli_options(&run_args.env, run_args.switch_streams)?;
    let arg_text = commons::join_args(&run_args.args)?;

    let output = match executioner.invoke(&run_args.name, &arg_text, &overrides)? {
        Invocation::Executed(output) => output,
        // A binding configured with `use_queue` is flushed right away.
        Invocation::Queued => executioner.execute_queued(&overrides)?,
    };
    commons::print_output(&output);
    Ok(())
}
