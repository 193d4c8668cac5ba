//! Deterministic ordering of menu entries
//!
//! Every location picks one comparator:
//!
//! - `commandPalette`: by owner id
//! - locations with primary significant keys: by the value each `when`
//!   pins those keys to, then the default comparator
//! - everything else: by group, order and label
//!
//! Captured values are cached per key set and clause, so sorting a large
//! location parses each distinct clause once.

mod compare;
mod expand;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::rc::Rc;

use contrib_meta::COMMAND_PALETTE;
use regex::Regex;
use tracing::{debug, warn};

use crate::keys::SignificantKeyTable;

pub use compare::{SortItem, Sortable, compare_default, compare_owners};
pub use expand::{ExpandError, MAX_LITERAL_LEN, MAX_LITERALS, MAX_REPETITION, expand};

/// What a `when` clause says about the primary keys of a location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortableExpression {
    /// The compared value, or the regex body, as written
    pub captured: Option<String>,
    /// Every literal the captured value can stand for, sorted
    pub literals: Vec<String>,
}

impl SortableExpression {
    fn capture(regex: &Regex, when: &str) -> Self {
        let Some(caps) = regex.captures(when) else {
            return Self::default();
        };

        if let Some(body) = caps.name("pattern") {
            let body = body.as_str();
            let literals = expand(body).unwrap_or_else(|e| {
                debug!(pattern = body, error = %e, "pattern is not finite; sorting by its text");
                Vec::new()
            });
            return Self {
                captured: Some(body.to_string()),
                literals,
            };
        }

        match caps.name("value") {
            Some(value) => {
                let value = unquote(value.as_str());
                Self {
                    captured: Some(value.clone()),
                    literals: vec![value],
                }
            }
            None => Self::default(),
        }
    }

    /// The smallest literal, or the captured text when nothing expanded.
    pub fn representative(&self) -> Option<&str> {
        self.literals
            .first()
            .or(self.captured.as_ref())
            .map(String::as_str)
    }
}

/// Orders menu entries per location
#[derive(Debug)]
pub struct SortEngine {
    keys: Rc<SignificantKeyTable>,
    patterns: HashMap<String, Regex>,
    expressions: HashMap<String, HashMap<String, Rc<SortableExpression>>>,
    empty: Rc<SortableExpression>,
}

impl SortEngine {
    pub fn new(keys: Rc<SignificantKeyTable>) -> Self {
        Self {
            keys,
            patterns: HashMap::new(),
            expressions: HashMap::new(),
            empty: Rc::new(SortableExpression::default()),
        }
    }

    /// Sorts `items` in place for `location`. The sort is stable.
    pub fn sort<T: Sortable>(&mut self, location: &str, items: &mut [T]) {
        items.sort_by(|a, b| self.compare(location, &a.sort_item(), &b.sort_item()));
    }

    pub fn compare(&mut self, location: &str, a: &SortItem<'_>, b: &SortItem<'_>) -> Ordering {
        if location == COMMAND_PALETTE {
            return compare_owners(a, b);
        }

        let keys = Rc::clone(&self.keys);
        match keys.get(location) {
            Some(significant) if !significant.primary.is_empty() => {
                self.compare_by_keys(&significant.primary, a, b)
            }
            _ => compare_default(a, b),
        }
    }

    fn compare_by_keys(&mut self, keys: &[String], a: &SortItem<'_>, b: &SortItem<'_>) -> Ordering {
        let left = self.sortable(keys, a.when);
        let right = self.sortable(keys, b.when);

        match (&left.captured, &right.captured) {
            (None, None) => compare_default(a, b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(l), Some(r)) => left
                .representative()
                .cmp(&right.representative())
                .then_with(|| l.cmp(r))
                .then_with(|| compare_default(a, b)),
        }
    }

    /// What `when` pins `keys` to, computed once per distinct clause.
    pub fn sortable(&mut self, keys: &[String], when: Option<&str>) -> Rc<SortableExpression> {
        let Some(when) = when else {
            return Rc::clone(&self.empty);
        };

        let cache_key = keys.join("|");
        if let Some(hit) = self.expressions.get(&cache_key).and_then(|m| m.get(when)) {
            return Rc::clone(hit);
        }

        let regex = match self.patterns.entry(cache_key.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => match Regex::new(&key_pattern(keys)) {
                Ok(regex) => entry.insert(regex),
                Err(e) => {
                    warn!(keys = %cache_key, error = %e, "could not build key pattern");
                    return Rc::clone(&self.empty);
                }
            },
        };

        let sortable = Rc::new(SortableExpression::capture(regex, when));
        self.expressions
            .entry(cache_key)
            .or_default()
            .insert(when.to_string(), Rc::clone(&sortable));
        sortable
    }
}

/// Matches `key == value`, `key != value` or `key =~ /body/flags` for any of
/// `keys`, where the key is not the tail of a longer key.
fn key_pattern(keys: &[String]) -> String {
    let alternation = keys
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    format!(
        r#"(?:^|[^\w.:-])(?:{alternation})\s*(?:=~\s*/(?P<pattern>(?:\\.|[^/\\])*)/[a-z]*|(?:==|!=)\s*(?P<value>'(?:\\.|[^'\\])*'|"(?:\\.|[^"\\])*"|[^\s&|)]+))"#
    )
}

fn unquote(raw: &str) -> String {
    let quoted = raw.len() >= 2
        && ((raw.starts_with('\'') && raw.ends_with('\''))
            || (raw.starts_with('"') && raw.ends_with('"')));
    if !quoted {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw[1..raw.len() - 1].chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SortEngine {
        SortEngine::new(Rc::new(SignificantKeyTable::builtin()))
    }

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_captures_equality_value() {
        let sortable = engine().sortable(
            &keys(&["viewItem"]),
            Some("gitlens:enabled && viewItem == 'commit'"),
        );
        assert_eq!(sortable.captured.as_deref(), Some("commit"));
        assert_eq!(sortable.literals, vec!["commit"]);
    }

    #[test]
    fn test_captures_regex_literals() {
        let sortable = engine().sortable(
            &keys(&["viewItem"]),
            Some(r"viewItem =~ /^(remote|branch)(\+current)?$/"),
        );
        assert_eq!(sortable.captured.as_deref(), Some(r"^(remote|branch)(\+current)?$"));
        assert_eq!(sortable.representative(), Some("branch"));
    }

    #[test]
    fn test_captures_inequality_value() {
        let sortable = engine().sortable(&keys(&["viewItem"]), Some("viewItem != 'alpha'"));
        assert_eq!(sortable.captured.as_deref(), Some("alpha"));
        assert_eq!(sortable.literals, vec!["alpha"]);
    }

    #[test]
    fn test_longer_key_is_not_captured() {
        let sortable = engine().sortable(&keys(&["view"]), Some("viewItem == commit"));
        assert_eq!(sortable.captured, None);
        let sortable = engine().sortable(&keys(&["view"]), Some("myview == commit"));
        assert_eq!(sortable.captured, None);
    }

    #[test]
    fn test_unbounded_pattern_falls_back_to_text() {
        let sortable = engine().sortable(&keys(&["viewItem"]), Some("viewItem =~ /commit.*/"));
        assert_eq!(sortable.captured.as_deref(), Some("commit.*"));
        assert!(sortable.literals.is_empty());
        assert_eq!(sortable.representative(), Some("commit.*"));
    }

    #[test]
    fn test_results_are_cached() {
        let mut engine = engine();
        let first = engine.sortable(&keys(&["view"]), Some("view == a"));
        let second = engine.sortable(&keys(&["view"]), Some("view == a"));
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("'a\\'b'"), "a'b");
        assert_eq!(unquote("\"x\""), "x");
        assert_eq!(unquote("bare"), "bare");
    }
}
