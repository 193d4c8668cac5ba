//! Core of contrib-sync
//!
//! This crate sits above the Layer 0 crates and turns one contributions
//! document into the other:
//!
//! - **Rewriter**: moves the significant clauses of a `when` expression to
//!   the front so related entries sort next to each other
//! - **Sort engine**: the total order every generated menu location uses
//! - **Sync engine**: extract (manifest to schema), generate (schema to
//!   manifest) and drift validation between the two
//!
//! ```text
//!                 contrib-cli
//!                      |
//!                 contrib-core
//!                      |
//!     +----------------+-----------------+
//!     |                |                 |
//! contrib-expr    contrib-fs       contrib-meta
//! ```
//!
//! # Example
//!
//! ```
//! use contrib_core::{Rewriter, SignificantKeyTable};
//!
//! let rewriter = Rewriter::new(SignificantKeyTable::builtin().into());
//! let when = rewriter
//!     .rewrite_text("view/title", "gitlens.refresh", "gitlens:enabled && view == gitlens.views.commits")
//!     .unwrap();
//! assert_eq!(when, "view == gitlens.views.commits && gitlens:enabled");
//! ```

pub mod config;
pub mod error;
pub mod keys;
pub mod rewrite;
pub mod sort;
pub mod sync;

pub use config::{MANIFEST_FILE, SCHEMA_FILE, SyncConfig};
pub use error::{Error, ReferenceKind, Result, UnresolvedReference};
pub use keys::{SignificantKeyTable, SignificantKeys};
pub use rewrite::Rewriter;
pub use sort::{ExpandError, SortEngine, SortItem, Sortable, SortableExpression, expand};
pub use sync::{
    Compiler, DriftItem, DriftKind, DriftReport, FieldChange, SyncEngine, SyncOptions, SyncReport,
};
