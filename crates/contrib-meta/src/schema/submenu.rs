use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Icon, Placement};

/// A contributed submenu. Its id shares menu locations with commands but
/// lives in its own namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submenu {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub menus: BTreeMap<String, Vec<Placement>>,
}

impl Submenu {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            menus: BTreeMap::new(),
        }
    }
}
