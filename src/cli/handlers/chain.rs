//! `chain`: run several commands as one `&&` chain.

use crate::cli::{args::ChainArgs, handlers::commons};
use anyhow::Result;
use clap::Parser;

/// Main entry point for the 'chain' command.
/// Every command is resolved and queued first; nothing runs unless all of
/// them resolve. The queue then runs as one `&&` chain.
pub fn handle(args: Vec<String>) -> Result<()> {
    let chain_args = ChainArgs::try_parse_from(&args)?;
    let (mut executioner, config) = commons::load_executioner()?;
    let overrides = commons::cli_options(&chain_args.env, chain_args.switch_streams)?;

    for raw in &chain_args.commands {
        let (name, arg_text) = commons::split_command(raw)?;
        commons::register_for_cli(&mut executioner, &config, &name, None, true);
        executioner.invoke(&name, &arg_text, &Default::default())?;
    }

    log::debug!("Queued chain: {}", executioner.queued_commands());
    let output = executioner.execute_queued(&overrides)?;
    commons::print_output(&output);
    Ok(())
}
