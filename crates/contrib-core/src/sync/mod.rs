//! Bidirectional sync between the schema and the manifest
//!
//! This module provides:
//! - **compiler**: in-memory extract, generate and drift checks
//! - **engine**: the same operations over the files in a project root
//! - **diff**: field-level JSON differences used in drift reports

mod check;
mod compiler;
mod diff;
mod engine;
mod extract;
mod generate;

pub use check::{DriftItem, DriftKind, DriftReport};
pub use compiler::Compiler;
pub use diff::{FieldChange, diff_values, similarity};
pub use engine::{SyncEngine, SyncOptions, SyncReport};
