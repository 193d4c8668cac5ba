//! Error types for contrib-meta

/// Result type for contrib-meta operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported contributions schema version {found} (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Invalid manifest: {message}")]
    InvalidManifest { message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
