//! Default mode: contributions.json to package.json

use std::path::Path;

use colored::Colorize;
use contrib_core::{SyncEngine, SyncOptions};

use super::load_config;
use crate::error::{CliError, Result};

/// Regenerates the manifest's contributions, optionally refusing to write
/// when existing entries would drift.
pub fn run_generate(path: &Path, validate: bool) -> Result<()> {
    let config = load_config(path)?;
    if !config.schema_path().is_file() {
        return Err(CliError::user(format!(
            "no {} in {}; run with --extract to create it",
            config.schema_file,
            config.root.display()
        )));
    }

    let engine = SyncEngine::new(config);
    let report = engine.generate(&SyncOptions { validate })?;

    let status = if report.written {
        "OK".green().bold()
    } else {
        "SKIPPED".yellow().bold()
    };
    if let Some((outcome, steps)) = report.actions.split_last() {
        for step in steps {
            println!("{} {}", "OK".green().bold(), step);
        }
        println!("{status} {outcome}");
    }
    Ok(())
}
