use anyhow::Result;
use clap::Parser;
use log::{debug, info};

use form_cli::cli::commands::{check_command, inspect_command, run_command};
use form_cli::cli::{Cli, Commands};
use form_cli::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run) so the TUI stays clean
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("form-cli.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting form-cli");

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    debug!("Settings: {:?}", config.settings);

    match cli.command {
        None => run_command(Default::default(), &config).await,
        Some(Commands::Run(args)) => run_command(args, &config).await,
        Some(Commands::Inspect(args)) => inspect_command(args, &config).await,
        Some(Commands::Check(args)) => check_command(args, &config).await,
    }
}
