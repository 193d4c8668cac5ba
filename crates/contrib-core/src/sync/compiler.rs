//! In-memory conversion between the two documents

use std::rc::Rc;

use contrib_meta::{MenuEntry, MenuTarget, Placement};

use crate::keys::SignificantKeyTable;
use crate::rewrite::Rewriter;
use crate::sort::{SortEngine, SortItem, Sortable};

/// Converts between [`ContributionSchema`](contrib_meta::ContributionSchema)
/// and [`Contributes`](contrib_meta::Contributes).
///
/// Holds the sort engine's caches, so one compiler should be reused for a
/// whole run.
#[derive(Debug)]
pub struct Compiler {
    rewriter: Rewriter,
    sorter: SortEngine,
    category: Option<String>,
}

impl Compiler {
    pub fn new(keys: SignificantKeyTable) -> Self {
        let keys = Rc::new(keys);
        Self {
            rewriter: Rewriter::new(Rc::clone(&keys)),
            sorter: SortEngine::new(keys),
            category: None,
        }
    }

    /// Palette category written on every palette-visible command.
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn rewriter(&self) -> &Rewriter {
        &self.rewriter
    }

    pub(crate) fn sorter(&mut self) -> &mut SortEngine {
        &mut self.sorter
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(SignificantKeyTable::builtin())
    }
}

/// A placement together with the record that owns it
#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub target: MenuTarget,
    pub label: Option<String>,
    pub placement: Placement,
}

impl Slot {
    pub fn into_entry(self) -> MenuEntry {
        let group = self.placement.group_field();
        MenuEntry {
            target: self.target,
            alt: self.placement.alt,
            when: self.placement.when,
            group,
        }
    }
}

impl Sortable for Slot {
    fn sort_item(&self) -> SortItem<'_> {
        SortItem {
            owner: Some(self.target.id()),
            label: self.label.as_deref(),
            when: self.placement.when.as_deref(),
            group: self.placement.group.as_deref(),
            order: self.placement.order,
        }
    }
}
