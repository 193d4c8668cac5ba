//! Compact contributions schema - loaded from `contributions.json`
//!
//! Commands, submenus and views are keyed by id; every menu placement and
//! keybinding is nested under the record that owns it.
//!
//! # Example JSON
//!
//! ```json
//! {
//!   "version": 1,
//!   "commands": {
//!     "gitlens.showGraph": {
//!       "label": "Show Commit Graph",
//!       "icon": "$(gitlens-graph)",
//!       "commandPalette": "gitlens:enabled",
//!       "menus": {
//!         "view/title": [{ "when": "view == gitlens.views.commits", "group": "navigation", "order": 1 }]
//!       }
//!     }
//!   },
//!   "submenus": {},
//!   "keybindings": [],
//!   "views": {}
//! }
//! ```

mod command;
mod keybinding;
mod placement;
mod submenu;
mod view;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub use command::{COMMAND_PALETTE, Command, CommandPalette};
pub use keybinding::{Keybinding, KeybindingSpec};
pub use placement::{Placement, format_group, parse_group};
pub use submenu::Submenu;
pub use view::{View, WelcomeEntry};

/// Schema version this crate reads and writes
pub const SCHEMA_VERSION: u32 = 1;

fn default_version() -> u32 {
    SCHEMA_VERSION
}

/// Root of the compact contributions document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionSchema {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub commands: BTreeMap<String, Command>,
    #[serde(default)]
    pub submenus: BTreeMap<String, Submenu>,
    /// Keybindings whose command is not described in `commands`
    #[serde(default)]
    pub keybindings: Vec<Keybinding>,
    #[serde(default)]
    pub views: BTreeMap<String, View>,
}

impl Default for ContributionSchema {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            commands: BTreeMap::new(),
            submenus: BTreeMap::new(),
            keybindings: Vec::new(),
            views: BTreeMap::new(),
        }
    }
}

impl ContributionSchema {
    /// Parse a schema from JSON text, rejecting unknown versions.
    pub fn parse(content: &str) -> Result<Self> {
        let schema: ContributionSchema = serde_json::from_str(content)?;
        schema.check_version()?;
        Ok(schema)
    }

    pub fn check_version(&self) -> Result<()> {
        if self.version != SCHEMA_VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                supported: SCHEMA_VERSION,
            });
        }
        Ok(())
    }

    /// Human label of a command or submenu id.
    pub fn label_of(&self, id: &str) -> Option<&str> {
        self.commands
            .get(id)
            .map(|c| c.label.as_str())
            .or_else(|| self.submenus.get(id).map(|s| s.label.as_str()))
    }
}

/// Icon reference: a codicon / path string or a light/dark pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Icon {
    Named(String),
    Themed { light: String, dark: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_has_current_version() {
        let schema = ContributionSchema::default();
        assert_eq!(schema.version, SCHEMA_VERSION);
        assert!(schema.check_version().is_ok());
    }

    #[test]
    fn test_parse_rejects_unknown_version() {
        let err = ContributionSchema::parse(r#"{ "version": 2 }"#).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedVersion {
                found: 2,
                supported: 1
            }
        ));
    }

    #[test]
    fn test_icon_forms() {
        let named: Icon = serde_json::from_str(r#""$(gear)""#).unwrap();
        assert_eq!(named, Icon::Named("$(gear)".into()));

        let themed: Icon =
            serde_json::from_str(r#"{ "light": "l.svg", "dark": "d.svg" }"#).unwrap();
        assert_eq!(
            themed,
            Icon::Themed {
                light: "l.svg".into(),
                dark: "d.svg".into()
            }
        );
    }
}
