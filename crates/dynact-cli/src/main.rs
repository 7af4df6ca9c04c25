//! Dynact CLI main entry point

use clap::Parser;
use dynact_cli::{
    cli::{Cli, Commands},
    commands::{EnrichCommand, ServeCommand, ValidateCommand},
    error::CliResult,
    utils::{init_tracing, ColoredOutput},
};
use tracing::debug;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", ColoredOutput::error("Error:"), e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    debug!("Dynact CLI v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { addr } => ServeCommand::run(&cli.config, &addr).await,

        Commands::Enrich { connection, action, values, values_file, pretty } => {
            EnrichCommand::run(&cli.config, &connection, &action, values, values_file, pretty).await
        }

        Commands::Validate => ValidateCommand::run(&cli.config).await,
    }
}
