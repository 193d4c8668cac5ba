//! Command implementations for contrib-cli

pub mod extract;
pub mod generate;

use std::path::Path;

use contrib_core::{MANIFEST_FILE, SyncConfig};

use crate::error::{CliError, Result};

pub use extract::run_extract;
pub use generate::run_generate;

/// Resolves the project root, which must hold a manifest.
fn load_config(path: &Path) -> Result<SyncConfig> {
    let config = SyncConfig::discover(path)?;
    if !config.manifest_path().is_file() {
        return Err(CliError::user(format!(
            "no {} in {}",
            MANIFEST_FILE,
            config.root.display()
        )));
    }
    Ok(config)
}
