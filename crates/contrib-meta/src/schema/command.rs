use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Icon, KeybindingSpec, Placement};

/// Menu location of the host's command palette
pub const COMMAND_PALETTE: &str = "commandPalette";

/// A contributed command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enablement: Option<String>,
    #[serde(default, skip_serializing_if = "CommandPalette::is_always")]
    pub command_palette: CommandPalette,
    /// Placements keyed by menu location
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub menus: BTreeMap<String, Vec<Placement>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keybindings: Vec<KeybindingSpec>,
}

impl Command {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            enablement: None,
            command_palette: CommandPalette::Always,
            menus: BTreeMap::new(),
            keybindings: Vec::new(),
        }
    }
}

/// Visibility of a command in the command palette.
///
/// Serialized as `true` (or omitted) for always, `false` for never, and the
/// when clause text otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "PaletteRepr", into = "PaletteRepr")]
pub enum CommandPalette {
    #[default]
    Always,
    Never,
    When(String),
}

impl CommandPalette {
    pub fn is_always(&self) -> bool {
        matches!(self, CommandPalette::Always)
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, CommandPalette::Never)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PaletteRepr {
    Flag(bool),
    When(String),
}

impl From<PaletteRepr> for CommandPalette {
    fn from(repr: PaletteRepr) -> Self {
        match repr {
            PaletteRepr::Flag(true) => CommandPalette::Always,
            PaletteRepr::Flag(false) => CommandPalette::Never,
            PaletteRepr::When(when) => CommandPalette::When(when),
        }
    }
}

impl From<CommandPalette> for PaletteRepr {
    fn from(palette: CommandPalette) -> Self {
        match palette {
            CommandPalette::Always => PaletteRepr::Flag(true),
            CommandPalette::Never => PaletteRepr::Flag(false),
            CommandPalette::When(when) => PaletteRepr::When(when),
        }
    }
}
