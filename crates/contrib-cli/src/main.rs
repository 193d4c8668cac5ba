//! contrib-sync
//!
//! Compiles contributions.json into the `contributes` section of
//! package.json, or extracts it back.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = logging::init() {
        eprintln!("{}: could not start logging: {}", "warning".yellow().bold(), e);
    }

    if let Err(e) = run() {
        eprintln!("{} {}", "ERROR".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;

    if cli.extract {
        commands::run_extract(&cwd)
    } else {
        commands::run_generate(&cwd, cli.validate)
    }
}
