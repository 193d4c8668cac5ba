//! Error types for contrib-core

use std::fmt;

use crate::sync::DriftReport;

/// Result type for contrib-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in contrib-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A when clause did not parse
    #[error("Invalid when clause for {owner} in {location}: {source}\n    {text}")]
    Parse {
        location: String,
        owner: String,
        text: String,
        #[source]
        source: contrib_expr::ParseError,
    },

    /// Entries referencing commands, submenus or views that do not exist
    #[error("{} unresolved reference(s):\n{}", .references.len(), render_references(.references))]
    UnresolvedReferences { references: Vec<UnresolvedReference> },

    /// Generation would drop or alter existing contributions
    #[error("Generated contributions drift from the existing manifest:\n{report}")]
    ValidationDrift { report: DriftReport },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from contrib-fs
    #[error(transparent)]
    Fs(#[from] contrib_fs::Error),

    /// Document model error from contrib-meta
    #[error(transparent)]
    Meta(#[from] contrib_meta::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// What kind of record a dangling id was expected to name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Command,
    Submenu,
    View,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReferenceKind::Command => "command",
            ReferenceKind::Submenu => "submenu",
            ReferenceKind::View => "view",
        })
    }
}

/// One id that names nothing in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    /// Where the reference was found, e.g. `menus[view/title]`
    pub origin: String,
    pub kind: ReferenceKind,
    pub id: String,
}

impl UnresolvedReference {
    pub fn new(origin: impl Into<String>, kind: ReferenceKind, id: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: unknown {} `{}`", self.origin, self.kind, self.id)
    }
}

fn render_references(references: &[UnresolvedReference]) -> String {
    references
        .iter()
        .map(|r| format!("  - {r}"))
        .collect::<Vec<_>>()
        .join("\n")
}
