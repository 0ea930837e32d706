use std::path::Path;

use argbind::{cli::input::CliArgs, utils::logger::config_logger, worker::run_argbind};
use clap::Parser;
use color_eyre::Result;
use env_logger::Target;

/// The entry point for the binary generated
/// for the program
fn main() -> Result<()> {
    color_eyre::install()?;
    let cli_args = CliArgs::parse();
    config_logger(cli_args.verbose, Target::Stderr)?;
    log::info!("Launching a new argbind program");

    if let Some(output) = run_argbind(&cli_args, Path::new("."))? {
        println!("{output}");
    }
    log::info!("Tasks successfully finished");

    Ok(())
}
