//! Command handlers.

pub mod alerts;
pub mod daily;
pub mod dashboard;
pub mod monthly;
pub mod records;

use std::io::{self, BufRead, Write};

use wattly_core::EnergyStore;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(
    command: Command,
    store: &EnergyStore,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Dashboard => dashboard::handle(store, global).await,
        Command::Records(args) => records::handle(store, args, global).await,
        Command::Daily(args) => daily::handle(store, args, global).await,
        Command::Monthly(args) => monthly::handle(store, args, global).await,
        Command::Alerts(args) => alerts::handle(store, args, global).await,
    }
}

/// Ask the user to confirm a destructive action, unless `--yes` was given.
pub(crate) fn confirm(message: &str, assume_yes: bool) -> Result<bool, CliError> {
    if assume_yes {
        return Ok(true);
    }
    eprint!("{message} [y/N] ");
    io::stderr()
        .flush()
        .map_err(|e| CliError::Other(e.to_string()))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CliError::Other(e.to_string()))?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
