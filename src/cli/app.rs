use super::commands::{CheckCommands, InspectCommands, RunCommands};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "form-cli")]
#[command(about = "Render JSON form descriptors as interactive terminal forms")]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fill in a form interactively (default)
    Run(RunCommands),
    /// Show which widget and constraints each field gets
    Inspect(InspectCommands),
    /// Apply values without a terminal UI and submit the form
    Check(CheckCommands),
}
