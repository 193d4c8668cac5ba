//! Where the two documents live and how they are compiled
//!
//! There is no configuration file: everything is derived from the project
//! root. The palette category comes from the manifest itself unless set
//! explicitly.

use std::path::{Path, PathBuf};

use crate::Result;
use crate::keys::SignificantKeyTable;

/// File name of the compact schema
pub const SCHEMA_FILE: &str = "contributions.json";

/// File name of the host manifest
pub const MANIFEST_FILE: &str = "package.json";

/// Settings for one sync run
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Project root containing both documents
    pub root: PathBuf,
    pub schema_file: String,
    pub manifest_file: String,
    /// Significant context keys per menu location
    pub keys: SignificantKeyTable,
    /// Palette category; `None` reads it from the manifest
    pub category: Option<String>,
}

impl SyncConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            schema_file: SCHEMA_FILE.to_string(),
            manifest_file: MANIFEST_FILE.to_string(),
            keys: SignificantKeyTable::builtin(),
            category: None,
        }
    }

    /// Builds a config for `root`, resolving it to a canonical path.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` does not exist.
    pub fn discover(root: impl AsRef<Path>) -> Result<Self> {
        let root = dunce::canonicalize(root.as_ref())?;
        Ok(Self::new(root))
    }

    pub fn with_keys(mut self, keys: SignificantKeyTable) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn schema_path(&self) -> PathBuf {
        self.root.join(&self.schema_file)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.manifest_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_join_root() {
        let config = SyncConfig::new("/project");
        assert_eq!(config.schema_path(), Path::new("/project/contributions.json"));
        assert_eq!(config.manifest_path(), Path::new("/project/package.json"));
    }

    #[test]
    fn test_discover_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = SyncConfig::discover(dir.path().join("nope"));
        assert!(result.is_err());
    }

    #[test]
    fn test_discover_canonicalizes() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a");
        std::fs::create_dir(&nested).unwrap();

        let config = SyncConfig::discover(nested.join("..").join("a")).unwrap();
        assert_eq!(config.root, dunce::canonicalize(&nested).unwrap());
        assert!(config.category.is_none());
    }
}
