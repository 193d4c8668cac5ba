//! Document model for contrib-sync.
//!
//! Two shapes of the same contributions live here:
//!
//! - **schema**: the compact, relational authoring document
//!   (`contributions.json`), keyed by command / submenu / view id
//! - **manifest**: the flat `contributes` section of the host manifest
//!   (`package.json`)
//!
//! These are plain data definitions; the sync engine in `contrib-core`
//! converts between them.

pub mod error;
pub mod manifest;
pub mod schema;

pub use error::{Error, Result};
pub use manifest::{
    Contributes, ManifestCommand, ManifestSubmenu, ManifestView, MenuEntry, MenuTarget,
    ViewWelcome, manifest_category,
};
pub use schema::{
    COMMAND_PALETTE, Command, CommandPalette, ContributionSchema, Icon, Keybinding,
    KeybindingSpec, Placement, SCHEMA_VERSION, Submenu, View, WelcomeEntry, format_group,
    parse_group,
};
