//! CLI argument parsing using clap derive

use clap::Parser;

/// Keep contributions.json and package.json in sync
///
/// Runs in the current directory. Without flags, regenerates the
/// `contributes` section of package.json from contributions.json.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "contrib-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Rebuild contributions.json from package.json instead
    #[arg(long, conflicts_with = "validate")]
    pub extract: bool,

    /// Refuse to write if existing contributions would be lost or changed
    #[arg(long)]
    pub validate: bool,
}
