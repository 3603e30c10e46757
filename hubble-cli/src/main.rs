//! hubble-filter -- command-line front end for the Hubble flow filter engine

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use colored::Colorize;

use hubble_core::config::HubbleConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            e.exit_code()
        }
    };

    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = HubbleConfig::load_or_default(&cli.config).await?;
    if let Some(level) = cli.log_level {
        config.general.log_level = level;
        config.validate()?;
    }

    logging::init_tracing(&config.general)?;
    tracing::debug!(config = %cli.config.display(), "configuration loaded");

    let writer = OutputWriter::new(cli.output);
    match cli.command {
        Commands::Filter(args) => commands::filter::execute(args, &config, &writer).await,
        Commands::Validate(args) => commands::validate::execute(args, &writer).await,
        Commands::Version => commands::version::execute(&writer),
    }
}
