use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A key chord and its platform overrides, without the command it invokes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeybindingSpec {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linux: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
}

impl KeybindingSpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            when: None,
            mac: None,
            linux: None,
            win: None,
            args: None,
        }
    }

    /// Attach the command this binding invokes.
    pub fn bind(self, command: impl Into<String>) -> Keybinding {
        Keybinding {
            command: command.into(),
            spec: self,
        }
    }
}

/// A keybinding with its command, as it appears in the manifest and in the
/// schema's free-standing list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keybinding {
    pub command: String,
    #[serde(flatten)]
    pub spec: KeybindingSpec,
}
