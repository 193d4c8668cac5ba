//! Significant-first rewriting of `when` clauses
//!
//! A top-level conjunction is reordered so that clauses mentioning a
//! significant key of the location come first, keeping the relative order
//! within both halves. Nothing else about the expression changes.

use std::rc::Rc;

use contrib_expr::Expr;
use tracing::{debug, warn};

use crate::keys::{SignificantKeyTable, SignificantKeys};
use crate::{Error, Result};

/// Reorders `when` clauses by significance at each location
#[derive(Debug, Clone)]
pub struct Rewriter {
    keys: Rc<SignificantKeyTable>,
}

impl Rewriter {
    pub fn new(keys: Rc<SignificantKeyTable>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &SignificantKeyTable {
        &self.keys
    }

    /// Rewrites an optional `when` clause of `owner` at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the clause is malformed at a location
    /// with significant keys.
    pub fn rewrite(
        &self,
        location: &str,
        owner: &str,
        when: Option<&str>,
    ) -> Result<Option<String>> {
        when.map(|text| self.rewrite_text(location, owner, text))
            .transpose()
    }

    /// Rewrites one `when` clause.
    ///
    /// Locations without significant keys, empty clauses and clauses that
    /// are not a top-level `&&` come back unchanged.
    pub fn rewrite_text(&self, location: &str, owner: &str, when: &str) -> Result<String> {
        let Some(keys) = self.keys.get(location) else {
            return Ok(when.to_string());
        };

        let parsed = contrib_expr::parse(when).map_err(|source| Error::Parse {
            location: location.to_string(),
            owner: owner.to_string(),
            text: when.to_string(),
            source,
        })?;

        let Some(Expr::And(children)) = parsed else {
            return Ok(when.to_string());
        };

        let (mut ordered, rest): (Vec<Expr>, Vec<Expr>) = children
            .into_iter()
            .partition(|child| is_significant(child, keys));
        ordered.extend(rest);

        let rewritten = contrib_expr::serialize(&Expr::And(ordered));
        match contrib_expr::parse(&rewritten) {
            Ok(Some(_)) => {
                if rewritten != when {
                    debug!(location, owner, from = when, to = %rewritten, "rewrote when clause");
                }
                Ok(rewritten)
            }
            Ok(None) | Err(_) => {
                warn!(
                    location,
                    owner,
                    when,
                    rewritten = %rewritten,
                    "rewritten clause does not parse; keeping original"
                );
                Ok(when.to_string())
            }
        }
    }
}

fn is_significant(clause: &Expr, keys: &SignificantKeys) -> bool {
    clause.keys().into_iter().any(|key| keys.matches(key))
}
