//! `--extract`: package.json to contributions.json

use std::path::Path;

use colored::Colorize;
use contrib_core::SyncEngine;

use super::load_config;
use crate::error::Result;

pub fn run_extract(path: &Path) -> Result<()> {
    let engine = SyncEngine::new(load_config(path)?);
    let report = engine.extract()?;

    for action in &report.actions {
        println!("{} {}", "OK".green().bold(), action);
    }
    Ok(())
}
