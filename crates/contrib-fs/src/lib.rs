//! Filesystem layer for contrib-sync
//!
//! Both documents are read whole, transformed in memory and written back
//! whole. This crate owns that boundary:
//!
//! - **io**: text reads, atomic locked writes, write-if-changed
//! - **json**: typed and untyped JSON loading, rendering with a detected indent

pub mod error;
pub mod io;
pub mod json;

pub use error::{Error, Result};
pub use io::WriteOutcome;
pub use json::{Indent, JsonDocument};
