//! Significant context keys per menu location
//!
//! A key is significant at a location when entries there are told apart by
//! it, e.g. `view` in `view/title`. The rewriter moves clauses on these keys
//! to the front; the sort engine orders by the primary keys.

use std::collections::BTreeMap;

/// Keys that distinguish entries at one location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignificantKeys {
    /// Keys the sort engine orders by
    pub primary: Vec<String>,
    /// Keys that only influence clause ordering
    pub secondary: Vec<String>,
}

impl SignificantKeys {
    pub fn new(primary: &[&str], secondary: &[&str]) -> Self {
        Self {
            primary: primary.iter().map(|k| k.to_string()).collect(),
            secondary: secondary.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Primary keys followed by secondary keys.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.primary
            .iter()
            .chain(self.secondary.iter())
            .map(String::as_str)
    }

    /// True if `key` names (or contains) one of these keys.
    pub fn matches(&self, key: &str) -> bool {
        self.all().any(|significant| key.contains(significant))
    }
}

/// Location to significant keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignificantKeyTable {
    locations: BTreeMap<String, SignificantKeys>,
}

impl SignificantKeyTable {
    /// A table with no locations; every expression passes through untouched.
    pub fn empty() -> Self {
        Self {
            locations: BTreeMap::new(),
        }
    }

    /// The locations the host's menus are known to key on.
    pub fn builtin() -> Self {
        Self::empty()
            .with("view/title", SignificantKeys::new(&["view"], &[]))
            .with(
                "view/item/context",
                SignificantKeys::new(&["viewItem"], &["view"]),
            )
            .with("view/title/context", SignificantKeys::new(&["view"], &[]))
            .with("scm/title", SignificantKeys::new(&["scmProvider"], &[]))
            .with(
                "scm/resourceGroup/context",
                SignificantKeys::new(&["scmResourceGroup"], &["scmProvider"]),
            )
            .with(
                "scm/resourceState/context",
                SignificantKeys::new(&["scmResourceGroup"], &["scmProvider"]),
            )
            .with(
                "webview/context",
                SignificantKeys::new(&["webviewItem", "webviewItemValue"], &["webview"]),
            )
            .with(
                "editor/title",
                SignificantKeys::new(&["resourceScheme"], &["resourceLangId"]),
            )
    }

    pub fn with(mut self, location: impl Into<String>, keys: SignificantKeys) -> Self {
        self.locations.insert(location.into(), keys);
        self
    }

    pub fn get(&self, location: &str) -> Option<&SignificantKeys> {
        self.locations.get(location)
    }
}

impl Default for SignificantKeyTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_view_item() {
        let table = SignificantKeyTable::builtin();
        let keys = table.get("view/item/context").unwrap();
        assert_eq!(keys.primary, vec!["viewItem"]);
        assert_eq!(keys.all().collect::<Vec<_>>(), vec!["viewItem", "view"]);
    }

    #[test]
    fn test_unknown_location() {
        assert!(SignificantKeyTable::builtin().get("commandPalette").is_none());
        assert!(SignificantKeyTable::empty().get("view/title").is_none());
    }

    #[test]
    fn test_matches_is_substring() {
        let keys = SignificantKeys::new(&["view"], &[]);
        assert!(keys.matches("view"));
        assert!(keys.matches("viewItem"));
        assert!(!keys.matches("focusedView"));
    }
}
