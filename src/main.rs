mod browser;
mod cli;
mod file_scanner;
mod logging;
mod toolbar;
mod workflow;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli_args = cli::Cli::parse();

    logging::init(cli_args.log_file.as_deref(), !cli_args.headless)?;

    // Delegate the main application logic to the workflow module
    workflow::run_filebar(cli_args)
}
