mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wattly_core::{ClientConfig, EnergyStore};

use crate::cli::{Cli, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let client_config = build_client_config(&cli.global)?;
    let store = EnergyStore::new(&client_config)?;

    tracing::debug!(command = ?cli.command, "dispatching command");
    commands::dispatch(cli.command, &store, &cli.global).await
}

/// Build a `ClientConfig` from the config file, environment, and CLI
/// flag overrides (highest precedence).
fn build_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let mut config = match global.config {
        Some(ref path) => wattly_config::load_from(path)?,
        None => wattly_config::load()?,
    };

    if let Some(ref base_url) = global.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout_ms) = global.timeout_ms {
        config.timeout_ms = timeout_ms;
    }

    Ok(wattly_config::resolve(&config)?)
}
