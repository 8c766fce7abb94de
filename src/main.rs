//! kdenclip CLI
//!
//! Command-line entry point for extracting clips from Kdenlive projects.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::error;

use kdenclip::cli::commands;
use kdenclip::cli::Cli;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logger; RUST_LOG still wins over the verbosity flags
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level().as_str()))
        .format_timestamp(None)
        .try_init()
        .context("Failed to initialize logger")?;

    let result = commands::run(&cli);
    if let Err(e) = &result {
        error!("{} [{}]", e, e.error_code());
    }

    Ok(ExitCode::from(commands::exit_status(&result)))
}
