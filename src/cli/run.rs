//! Dispatches to the appropriate command handler based on the parsed arguments.
//!
//! # Returns
//! - `Ok(CommandResult)` with error/warning counts and exit behavior
//! - `Err` if the command fails (e.g., canonical file not found, invalid config)

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult,
        check::check,
        init::init,
        show::show,
        sync::{propagate, prune},
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Propagate(cmd)) => propagate(cmd),
        Some(Command::Prune(cmd)) => prune(cmd),
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Show(cmd)) => show(cmd),
        Some(Command::Init) => init(),
        Some(Command::Serve) => {
            // Serve command is handled in main.rs before calling run()
            anyhow::bail!("Serve command should be handled before run()")
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
