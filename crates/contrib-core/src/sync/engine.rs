//! SyncEngine implementation
//!
//! The SyncEngine reads the two documents from the project root, runs the
//! [`Compiler`] over them and writes the result back.

use contrib_fs::{JsonDocument, WriteOutcome};
use contrib_meta::{ContributionSchema, Contributes, manifest_category};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::check::DriftReport;
use super::compiler::Compiler;
use crate::Result;
use crate::config::SyncConfig;

/// Report from a generate or extract run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// Whether the destination file was (re)written
    pub written: bool,
    /// Actions taken during the operation
    pub actions: Vec<String>,
}

impl SyncReport {
    pub fn new() -> Self {
        Self {
            written: false,
            actions: Vec::new(),
        }
    }

    /// Add an action to the report
    pub fn with_action(mut self, action: String) -> Self {
        self.actions.push(action);
        self
    }
}

impl Default for SyncReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Options for generate runs
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Refuse to write if the manifest would lose or alter existing entries
    pub validate: bool,
}

/// Engine for keeping `contributions.json` and `package.json` in sync
///
/// - **generate**: schema to manifest, written only when it changes
/// - **extract**: manifest to schema, always written
/// - **check**: drift between the manifest and what generate would write
pub struct SyncEngine {
    config: SyncConfig,
}

impl SyncEngine {
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Regenerates the manifest's contributions from the schema.
    ///
    /// Only the six owned collections of `contributes` are replaced; the
    /// rest of the manifest, its key order and its indentation are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if either document cannot be read, generation
    /// fails, or `options.validate` is set and the manifest would drift.
    pub fn generate(&self, options: &SyncOptions) -> Result<SyncReport> {
        let schema = self.load_schema()?;
        let manifest_doc = JsonDocument::open(self.config.manifest_path())?;
        let mut manifest: Value = manifest_doc.load_value()?;

        let mut compiler = self.compiler(&manifest);
        let generated = compiler.generate(&schema)?;
        let mut report = SyncReport::new();

        if options.validate {
            let existing = Contributes::from_manifest(&manifest)?;
            compiler.validate(&existing, &generated)?;
            report = report.with_action("Validated existing contributions".to_string());
        }

        generated.splice_into(&mut manifest)?;
        let outcome = manifest_doc.save_if_changed(&manifest)?;
        report.written = outcome.is_written();
        let file = &self.config.manifest_file;
        report = report.with_action(match outcome {
            WriteOutcome::Created => format!("Created {file}"),
            WriteOutcome::Updated => format!("Updated {file}"),
            WriteOutcome::Unchanged => format!("{file} already up to date"),
        });

        info!(written = report.written, "generate finished");
        Ok(report)
    }

    /// Rebuilds the schema from the manifest's contributions.
    ///
    /// The schema file is always rewritten.
    pub fn extract(&self) -> Result<SyncReport> {
        let manifest_doc = JsonDocument::open(self.config.manifest_path())?;
        let manifest: Value = manifest_doc.load_value()?;
        let contributes = Contributes::from_manifest(&manifest)?;

        let schema = self.compiler(&manifest).extract(&contributes)?;

        let schema_doc = JsonDocument::open(self.config.schema_path())?;
        schema_doc.save(&schema)?;
        debug!(path = %schema_doc.path().display(), "wrote schema");

        let mut report = SyncReport::new();
        report.written = true;
        Ok(report.with_action(format!(
            "Extracted {} commands, {} submenus, {} views into {}",
            schema.commands.len(),
            schema.submenus.len(),
            schema.views.len(),
            self.config.schema_file
        )))
    }

    /// Compares the manifest against what generate would write, without
    /// writing anything.
    pub fn check(&self) -> Result<DriftReport> {
        let schema = self.load_schema()?;
        let manifest: Value = JsonDocument::open(self.config.manifest_path())?.load_value()?;

        let mut compiler = self.compiler(&manifest);
        let generated = compiler.generate(&schema)?;
        let existing = Contributes::from_manifest(&manifest)?;
        let report = compiler.check(&existing, &generated)?;
        info!(
            missing = report.missing().count(),
            changed = report.changed().count(),
            "drift check finished"
        );
        Ok(report)
    }

    fn load_schema(&self) -> Result<ContributionSchema> {
        let schema: ContributionSchema = JsonDocument::open(self.config.schema_path())?.load()?;
        schema.check_version()?;
        Ok(schema)
    }

    fn compiler(&self, manifest: &Value) -> Compiler {
        let category = self
            .config
            .category
            .clone()
            .or_else(|| manifest_category(manifest));
        Compiler::new(self.config.keys.clone()).with_category(category)
    }
}
