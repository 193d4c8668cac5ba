//! Drift validation between an existing manifest and a generated one
//!
//! Every entry of the existing manifest must be reproduced by generation.
//! Entries are matched by identity:
//!
//! | collection   | identity                              |
//! |--------------|---------------------------------------|
//! | commands     | command id                            |
//! | menus        | location, target and rewritten `when` |
//! | submenus     | submenu id                            |
//! | keybindings  | command and key                       |
//! | views        | container and view id                 |
//! | viewsWelcome | view and contents                     |
//!
//! An identity with no generated counterpart is *missing*; one whose
//! counterparts all differ is *changed*. Entries only present in the
//! generated manifest are not drift.

use std::fmt;

use contrib_meta::{Contributes, MenuEntry};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::compiler::Compiler;
use super::diff::{FieldChange, diff_values, similarity};
use crate::{Error, Result};

/// How an existing entry failed to survive generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriftKind {
    /// Nothing with the same identity was generated
    Missing,
    /// Generated with the same identity but different fields
    Changed,
}

impl fmt::Display for DriftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DriftKind::Missing => "missing",
            DriftKind::Changed => "changed",
        })
    }
}

/// One existing entry that generation would lose or alter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftItem {
    /// e.g. `commands` or `menus[view/title]`
    pub collection: String,
    pub identity: String,
    pub kind: DriftKind,
    /// Field differences against the closest generated entry
    pub changes: Vec<FieldChange>,
    /// Similarity ratio (0.0 to 1.0) to the closest generated entry
    pub similarity: f64,
}

impl fmt::Display for DriftItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.collection, self.identity)
    }
}

/// Result of comparing an existing manifest against a generated one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub items: Vec<DriftItem>,
}

impl DriftReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if every existing entry is reproduced.
    pub fn is_clean(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn missing(&self) -> impl Iterator<Item = &DriftItem> {
        self.items.iter().filter(|i| i.kind == DriftKind::Missing)
    }

    pub fn changed(&self) -> impl Iterator<Item = &DriftItem> {
        self.items.iter().filter(|i| i.kind == DriftKind::Changed)
    }

    /// Compares one collection, matching entries by `identity`.
    ///
    /// `label` renders the identity for humans.
    pub fn compare<T: Serialize>(
        &mut self,
        collection: &str,
        existing: &[T],
        generated: &[T],
        identity: impl Fn(&T) -> String,
        label: impl Fn(&T) -> String,
    ) -> Result<()> {
        let candidates = generated
            .iter()
            .map(|entry| Ok((identity(entry), serde_json::to_value(entry)?)))
            .collect::<Result<Vec<(String, Value)>>>()?;

        for entry in existing {
            let id = identity(entry);
            let value = serde_json::to_value(entry)?;
            let matching: Vec<&Value> = candidates
                .iter()
                .filter(|(candidate, _)| *candidate == id)
                .map(|(_, v)| v)
                .collect();

            let Some(closest) = matching.first() else {
                self.items.push(DriftItem {
                    collection: collection.to_string(),
                    identity: label(entry),
                    kind: DriftKind::Missing,
                    changes: Vec::new(),
                    similarity: 0.0,
                });
                continue;
            };

            if matching.iter().any(|candidate| **candidate == value) {
                continue;
            }

            self.items.push(DriftItem {
                collection: collection.to_string(),
                identity: label(entry),
                kind: DriftKind::Changed,
                changes: diff_values(&value, closest),
                similarity: similarity(&value, closest),
            });
        }
        Ok(())
    }
}

impl fmt::Display for DriftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {item}")?;
            for change in &item.changes {
                write!(f, "\n      {change}")?;
            }
        }
        Ok(())
    }
}

impl Compiler {
    /// Lists the entries of `existing` that `generated` does not reproduce.
    ///
    /// Existing `when` clauses are rewritten first, so clause order alone
    /// is never drift.
    pub fn check(&self, existing: &Contributes, generated: &Contributes) -> Result<DriftReport> {
        let mut report = DriftReport::new();

        report.compare(
            "commands",
            &existing.commands,
            &generated.commands,
            |c| c.command.clone(),
            |c| c.command.clone(),
        )?;

        let no_entries = Vec::new();
        for (location, entries) in &existing.menus {
            let rewritten = entries
                .iter()
                .map(|entry| self.canonical_entry(location, entry))
                .collect::<Result<Vec<_>>>()?;
            let generated_entries = generated.menus.get(location).unwrap_or(&no_entries);
            report.compare(
                &format!("menus[{location}]"),
                &rewritten,
                generated_entries,
                menu_identity,
                menu_identity,
            )?;
        }

        report.compare(
            "submenus",
            &existing.submenus,
            &generated.submenus,
            |s| s.id.clone(),
            |s| s.id.clone(),
        )?;

        report.compare(
            "keybindings",
            &existing.keybindings,
            &generated.keybindings,
            |k| format!("{} [{}]", k.command, k.spec.key),
            |k| format!("{} [{}]", k.command, k.spec.key),
        )?;

        let no_views = Vec::new();
        for (container, views) in &existing.views {
            let generated_views = generated.views.get(container).unwrap_or(&no_views);
            report.compare(
                &format!("views[{container}]"),
                views,
                generated_views,
                |v| v.id.clone(),
                |v| v.id.clone(),
            )?;
        }

        report.compare(
            "viewsWelcome",
            &existing.views_welcome,
            &generated.views_welcome,
            |w| format!("{}\n{}", w.view, w.contents),
            |w| format!("{} ({})", w.view, abbreviate(&w.contents)),
        )?;

        Ok(report)
    }

    /// Fails with [`Error::ValidationDrift`] unless `generated` reproduces
    /// every entry of `existing`.
    pub fn validate(&self, existing: &Contributes, generated: &Contributes) -> Result<()> {
        let report = self.check(existing, generated)?;
        if report.is_clean() {
            Ok(())
        } else {
            Err(Error::ValidationDrift { report })
        }
    }

    fn canonical_entry(&self, location: &str, entry: &MenuEntry) -> Result<MenuEntry> {
        let mut entry = entry.clone();
        entry.when = self
            .rewriter()
            .rewrite(location, entry.target.id(), entry.when.as_deref())?;
        Ok(entry)
    }
}

fn menu_identity(entry: &MenuEntry) -> String {
    match &entry.when {
        Some(when) => format!("{} when {}", entry.target, when),
        None => entry.target.to_string(),
    }
}

fn abbreviate(text: &str) -> String {
    const LIMIT: usize = 40;
    let first_line = text.lines().next().unwrap_or_default();
    if first_line.chars().count() > LIMIT || first_line.len() < text.len() {
        let cut: String = first_line.chars().take(LIMIT).collect();
        format!("{cut}...")
    } else {
        first_line.to_string()
    }
}
