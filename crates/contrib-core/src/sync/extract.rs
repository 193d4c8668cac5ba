//! Manifest to schema

use std::collections::BTreeMap;

use contrib_meta::{
    COMMAND_PALETTE, Command, CommandPalette, ContributionSchema, Contributes, MenuEntry,
    MenuTarget, Placement, Submenu, View, WelcomeEntry,
};
use tracing::{debug, warn};

use super::compiler::{Compiler, Slot};
use crate::error::{ReferenceKind, UnresolvedReference};
use crate::{Error, Result};

/// `when` text that hides a command from the palette
const NEVER: &str = "false";

impl Compiler {
    /// Folds a flat manifest into the compact schema.
    ///
    /// Every menu entry and keybinding is attached to the command or
    /// submenu it names; keybindings for commands the manifest does not
    /// declare stay free-standing. Placements are sorted per location.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedReferences`] listing every menu entry,
    /// palette entry or welcome entry that names nothing, and
    /// [`Error::Parse`] for a malformed `when` clause.
    pub fn extract(&mut self, contributes: &Contributes) -> Result<ContributionSchema> {
        let mut schema = ContributionSchema::default();
        let mut unresolved = Vec::new();

        for command in &contributes.commands {
            let record = Command {
                icon: command.icon.clone(),
                enablement: command.enablement.clone(),
                ..Command::new(command.title.clone())
            };
            if schema.commands.insert(command.command.clone(), record).is_some() {
                warn!(command = %command.command, "duplicate command; keeping the last");
            }
        }

        for submenu in &contributes.submenus {
            let record = Submenu {
                icon: submenu.icon.clone(),
                ..Submenu::new(submenu.label.clone())
            };
            if schema.submenus.insert(submenu.id.clone(), record).is_some() {
                warn!(submenu = %submenu.id, "duplicate submenu; keeping the last");
            }
        }

        for keybinding in &contributes.keybindings {
            match schema.commands.get_mut(&keybinding.command) {
                Some(command) => command.keybindings.push(keybinding.spec.clone()),
                None => schema.keybindings.push(keybinding.clone()),
            }
        }

        for (location, entries) in &contributes.menus {
            for entry in entries {
                if location == COMMAND_PALETTE {
                    self.extract_palette(&mut schema, entry, &mut unresolved)?;
                } else {
                    self.extract_placement(&mut schema, location, entry, &mut unresolved)?;
                }
            }
        }

        for (container, views) in &contributes.views {
            for (order, view) in views.iter().enumerate() {
                let record = View {
                    kind: view.kind.clone(),
                    when: view.when.clone(),
                    contextual_title: view.contextual_title.clone(),
                    icon: view.icon.clone(),
                    initial_size: view.initial_size.clone(),
                    visibility: view.visibility.clone(),
                    ..View::new(container.clone(), order, view.name.clone())
                };
                if schema.views.insert(view.id.clone(), record).is_some() {
                    warn!(view = %view.id, "duplicate view; keeping the last");
                }
            }
        }

        for welcome in &contributes.views_welcome {
            match schema.views.get_mut(&welcome.view) {
                Some(view) => view.welcome_content.push(WelcomeEntry {
                    contents: welcome.contents.clone(),
                    when: welcome.when.clone(),
                }),
                None => unresolved.push(UnresolvedReference::new(
                    "viewsWelcome",
                    ReferenceKind::View,
                    welcome.view.clone(),
                )),
            }
        }

        if !unresolved.is_empty() {
            return Err(Error::UnresolvedReferences {
                references: unresolved,
            });
        }

        self.sort_schema(&mut schema);

        debug!(
            commands = schema.commands.len(),
            submenus = schema.submenus.len(),
            views = schema.views.len(),
            "extracted schema"
        );
        Ok(schema)
    }

    fn extract_palette(
        &self,
        schema: &mut ContributionSchema,
        entry: &MenuEntry,
        unresolved: &mut Vec<UnresolvedReference>,
    ) -> Result<()> {
        let origin = format!("menus[{COMMAND_PALETTE}]");
        let MenuTarget::Command(id) = &entry.target else {
            unresolved.push(UnresolvedReference::new(
                origin,
                ReferenceKind::Command,
                entry.target.id(),
            ));
            return Ok(());
        };
        let Some(command) = schema.commands.get_mut(id) else {
            unresolved.push(UnresolvedReference::new(origin, ReferenceKind::Command, id.clone()));
            return Ok(());
        };

        let visibility = match entry.when.as_deref() {
            None => CommandPalette::Always,
            Some(NEVER) => CommandPalette::Never,
            Some(when) => {
                CommandPalette::When(self.rewriter().rewrite_text(COMMAND_PALETTE, id, when)?)
            }
        };
        if !command.command_palette.is_always() {
            warn!(command = %id, "command listed in the palette twice; keeping the last");
        }
        command.command_palette = visibility;
        Ok(())
    }

    fn extract_placement(
        &self,
        schema: &mut ContributionSchema,
        location: &str,
        entry: &MenuEntry,
        unresolved: &mut Vec<UnresolvedReference>,
    ) -> Result<()> {
        let origin = format!("menus[{location}]");

        if let Some(alt) = &entry.alt
            && !schema.commands.contains_key(alt)
        {
            unresolved.push(UnresolvedReference::new(
                origin.clone(),
                ReferenceKind::Command,
                alt.clone(),
            ));
        }

        let owner = entry.target.id();
        let when = self.rewriter().rewrite(location, owner, entry.when.as_deref())?;
        let placement = Placement::from_group(when, entry.group.as_deref(), entry.alt.clone());

        let menus = match &entry.target {
            MenuTarget::Command(id) => schema.commands.get_mut(id).map(|c| &mut c.menus),
            MenuTarget::Submenu(id) => schema.submenus.get_mut(id).map(|s| &mut s.menus),
        };
        match menus {
            Some(menus) => menus.entry(location.to_string()).or_default().push(placement),
            None => unresolved.push(UnresolvedReference::new(
                origin,
                match entry.target {
                    MenuTarget::Command(_) => ReferenceKind::Command,
                    MenuTarget::Submenu(_) => ReferenceKind::Submenu,
                },
                owner,
            )),
        }
        Ok(())
    }

    /// Sorts each owner's placements per location.
    fn sort_schema(&mut self, schema: &mut ContributionSchema) {
        for (id, command) in schema.commands.iter_mut() {
            let target = MenuTarget::Command(id.clone());
            let label = command.label.clone();
            self.sort_menus(&target, &label, &mut command.menus);
        }
        for (id, submenu) in schema.submenus.iter_mut() {
            let target = MenuTarget::Submenu(id.clone());
            let label = submenu.label.clone();
            self.sort_menus(&target, &label, &mut submenu.menus);
        }
    }

    fn sort_menus(
        &mut self,
        target: &MenuTarget,
        label: &str,
        menus: &mut BTreeMap<String, Vec<Placement>>,
    ) {
        for (location, placements) in menus.iter_mut() {
            if placements.len() < 2 {
                continue;
            }
            let mut slots: Vec<Slot> = std::mem::take(placements)
                .into_iter()
                .map(|placement| Slot {
                    target: target.clone(),
                    label: Some(label.to_string()),
                    placement,
                })
                .collect();
            self.sorter().sort(location, &mut slots);
            *placements = slots.into_iter().map(|slot| slot.placement).collect();
        }
    }
}
