//! Concord CLI - Score, reconcile and summarize batches of documents.

use clap::Parser;
use concord_cli::commands;
use concord_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns `false` when a job or submission did not succeed.
async fn run() -> concord_cli::Result<bool> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Run(args) => commands::execute_run(args, &config, &formatter).await,
        Command::Validate(args) => commands::execute_validate(args, &config, &formatter),
        Command::Config(args) => {
            commands::execute_config(args, &config, cli.config.as_deref(), &formatter)?;
            Ok(true)
        }
        Command::Types => {
            commands::execute_types(&formatter)?;
            Ok(true)
        }
    }
}

// Logs go to stderr so that stdout carries only command output.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
