mod cli;
mod error;
mod file_copier;
mod file_scanner;
mod gateway;
mod job_stack;
mod logging;
mod session;
mod tui;
mod workflow;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli_args = cli::Cli::parse();

    // Delegate the main application logic to the workflow module
    workflow::run_gut(cli_args)
}
