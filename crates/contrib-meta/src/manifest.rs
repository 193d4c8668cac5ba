//! The `contributes` section of the host manifest (`package.json`)
//!
//! Only the six collections owned by the sync engine are modelled; every
//! other field of the manifest is carried through untouched as raw JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::schema::{Icon, Keybinding};
use crate::{Error, Result};

/// Flat, host-consumed contributions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributes {
    #[serde(default)]
    pub commands: Vec<ManifestCommand>,
    #[serde(default)]
    pub menus: BTreeMap<String, Vec<MenuEntry>>,
    #[serde(default)]
    pub submenus: Vec<ManifestSubmenu>,
    #[serde(default)]
    pub keybindings: Vec<Keybinding>,
    #[serde(default)]
    pub views: BTreeMap<String, Vec<ManifestView>>,
    #[serde(default)]
    pub views_welcome: Vec<ViewWelcome>,
}

/// Keys of `contributes` written by [`Contributes::splice_into`]
const OWNED_KEYS: [&str; 6] = [
    "commands",
    "menus",
    "submenus",
    "keybindings",
    "views",
    "viewsWelcome",
];

impl Contributes {
    /// Reads the `contributes` section of a full manifest document.
    ///
    /// A manifest without `contributes` yields empty collections.
    pub fn from_manifest(manifest: &Value) -> Result<Self> {
        match manifest.get("contributes") {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(contributes @ Value::Object(_)) => {
                Ok(serde_json::from_value(contributes.clone())?)
            }
            Some(_) => Err(Error::InvalidManifest {
                message: "`contributes` is not an object".to_string(),
            }),
        }
    }

    /// Writes these collections into `manifest.contributes`.
    ///
    /// Existing keys keep their position; other `contributes` entries and
    /// the rest of the manifest are left alone. An empty collection is only
    /// written when the manifest already has that key.
    pub fn splice_into(&self, manifest: &mut Value) -> Result<()> {
        let Value::Object(root) = manifest else {
            return Err(Error::InvalidManifest {
                message: "manifest root is not an object".to_string(),
            });
        };

        let contributes = root
            .entry("contributes")
            .or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(target) = contributes else {
            return Err(Error::InvalidManifest {
                message: "`contributes` is not an object".to_string(),
            });
        };

        let Value::Object(generated) = serde_json::to_value(self)? else {
            return Err(Error::InvalidManifest {
                message: "contributions did not serialize to an object".to_string(),
            });
        };

        for key in OWNED_KEYS {
            let Some(value) = generated.get(key) else {
                continue;
            };
            let is_empty = match value {
                Value::Array(items) => items.is_empty(),
                Value::Object(map) => map.is_empty(),
                _ => false,
            };
            if is_empty && !target.contains_key(key) {
                continue;
            }
            target.insert(key.to_string(), value.clone());
        }

        Ok(())
    }
}

/// Category shown before command titles in the palette, taken from the
/// manifest's `displayName` (or `name`).
pub fn manifest_category(manifest: &Value) -> Option<String> {
    manifest
        .get("displayName")
        .or_else(|| manifest.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestCommand {
    pub command: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enablement: Option<String>,
}

/// What a menu entry shows: a command or a submenu, decided once at parse
/// time from which key the entry carries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuTarget {
    Command(String),
    Submenu(String),
}

impl MenuTarget {
    pub fn id(&self) -> &str {
        match self {
            MenuTarget::Command(id) | MenuTarget::Submenu(id) => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MenuTarget::Command(_) => "command",
            MenuTarget::Submenu(_) => "submenu",
        }
    }
}

impl std::fmt::Display for MenuTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    #[serde(flatten)]
    pub target: MenuTarget,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl MenuEntry {
    pub fn command(id: impl Into<String>) -> Self {
        Self {
            target: MenuTarget::Command(id.into()),
            alt: None,
            when: None,
            group: None,
        }
    }

    pub fn submenu(id: impl Into<String>) -> Self {
        Self {
            target: MenuTarget::Submenu(id.into()),
            alt: None,
            when: None,
            group: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSubmenu {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestView {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contextual_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_size: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewWelcome {
    pub view: String,
    pub contents: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_menu_entry_target_is_tagged_by_key() {
        let command: MenuEntry =
            serde_json::from_value(json!({ "command": "a", "group": "inline@1" })).unwrap();
        assert_eq!(command.target, MenuTarget::Command("a".into()));

        let submenu: MenuEntry =
            serde_json::from_value(json!({ "submenu": "s", "when": "x" })).unwrap();
        assert_eq!(submenu.target, MenuTarget::Submenu("s".into()));
        assert_eq!(submenu.when.as_deref(), Some("x"));
    }

    #[test]
    fn test_menu_entry_serializes_target_first() {
        let mut entry = MenuEntry::command("gitlens.copy");
        entry.when = Some("view".into());
        entry.group = Some("1_a@2".into());

        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"command":"gitlens.copy","when":"view","group":"1_a@2"}"#);
    }

    #[test]
    fn test_manifest_category_prefers_display_name() {
        assert_eq!(
            manifest_category(&json!({ "name": "gitlens", "displayName": "GitLens" })),
            Some("GitLens".to_string())
        );
        assert_eq!(
            manifest_category(&json!({ "name": "gitlens" })),
            Some("gitlens".to_string())
        );
        assert_eq!(manifest_category(&json!({})), None);
    }
}
