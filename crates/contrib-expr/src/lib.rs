//! Context-key expressions for contrib-sync
//!
//! A context-key expression ("when clause") is a boolean formula over named
//! runtime flags that decides whether a contributed UI entry is active. This
//! crate provides:
//!
//! - **ast**: the [`Expr`] tree
//! - **parser**: [`parse`], a recursive-descent parser with positioned errors
//! - **serialize**: [`serialize`], the canonical text form of a tree
//!
//! `parse(serialize(e))` rebuilds a tree equal to `e`; the original spacing
//! and quoting of the source text are not preserved.
//!
//! # Example
//!
//! ```
//! use contrib_expr::{parse, serialize};
//!
//! let expr = parse("viewItem=~/^gitlens:branch$/&&!listMultiSelection")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(
//!     serialize(&expr),
//!     "viewItem =~ /^gitlens:branch$/ && !listMultiSelection"
//! );
//! ```

pub mod ast;
pub mod error;
pub mod parser;
pub mod serialize;

pub use ast::{Expr, RegexLiteral, Value};
pub use error::{ParseError, Result};
pub use parser::parse;
pub use serialize::serialize;
