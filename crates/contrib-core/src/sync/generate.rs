//! Schema to manifest

use std::collections::BTreeMap;

use contrib_meta::{
    COMMAND_PALETTE, CommandPalette, ContributionSchema, Contributes, ManifestCommand,
    ManifestSubmenu, ManifestView, MenuTarget, Placement, View, ViewWelcome,
};
use tracing::debug;

use super::compiler::{Compiler, Slot};
use crate::error::{ReferenceKind, UnresolvedReference};
use crate::{Error, Result};

impl Compiler {
    /// Expands the compact schema into the six flat manifest collections.
    ///
    /// Output is deterministic: commands and submenus by id, menu locations
    /// by name with entries in sort-engine order, views by container and
    /// position, welcome content in view order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedReferences`] if a placement's `alt` names
    /// an unknown command, [`Error::Parse`] for a malformed `when` clause,
    /// and [`Error::Meta`] for an unsupported schema version.
    pub fn generate(&mut self, schema: &ContributionSchema) -> Result<Contributes> {
        schema.check_version()?;

        let mut contributes = Contributes::default();
        let mut unresolved = Vec::new();
        let mut slots: BTreeMap<String, Vec<Slot>> = BTreeMap::new();

        for (id, command) in &schema.commands {
            contributes.commands.push(ManifestCommand {
                command: id.clone(),
                title: command.label.clone(),
                category: if command.command_palette.is_visible() {
                    self.category().map(str::to_string)
                } else {
                    None
                },
                icon: command.icon.clone(),
                enablement: command.enablement.clone(),
            });

            let palette_when = match &command.command_palette {
                CommandPalette::Always => None,
                CommandPalette::Never => Some("false".to_string()),
                CommandPalette::When(when) => {
                    Some(self.rewriter().rewrite_text(COMMAND_PALETTE, id, when)?)
                }
            };
            if let Some(when) = palette_when {
                slots.entry(COMMAND_PALETTE.to_string()).or_default().push(Slot {
                    target: MenuTarget::Command(id.clone()),
                    label: Some(command.label.clone()),
                    placement: Placement {
                        when: Some(when),
                        ..Placement::default()
                    },
                });
            }

            let target = MenuTarget::Command(id.clone());
            self.collect_slots(
                schema,
                &target,
                &command.label,
                &command.menus,
                &mut slots,
                &mut unresolved,
            )?;
        }

        for (id, submenu) in &schema.submenus {
            contributes.submenus.push(ManifestSubmenu {
                id: id.clone(),
                label: submenu.label.clone(),
                icon: submenu.icon.clone(),
            });

            let target = MenuTarget::Submenu(id.clone());
            self.collect_slots(
                schema,
                &target,
                &submenu.label,
                &submenu.menus,
                &mut slots,
                &mut unresolved,
            )?;
        }

        if !unresolved.is_empty() {
            return Err(Error::UnresolvedReferences {
                references: unresolved,
            });
        }

        for (location, mut items) in slots {
            self.sorter().sort(&location, &mut items);
            contributes
                .menus
                .insert(location, items.into_iter().map(Slot::into_entry).collect());
        }

        contributes.keybindings = schema.keybindings.clone();
        for (id, command) in &schema.commands {
            contributes
                .keybindings
                .extend(command.keybindings.iter().map(|spec| spec.clone().bind(id.clone())));
        }
        contributes.keybindings.sort_by(|a, b| a.command.cmp(&b.command));

        let (views, welcome) = generate_views(schema);
        contributes.views = views;
        contributes.views_welcome = welcome;

        debug!(
            commands = contributes.commands.len(),
            locations = contributes.menus.len(),
            keybindings = contributes.keybindings.len(),
            "generated contributions"
        );
        Ok(contributes)
    }

    fn collect_slots(
        &self,
        schema: &ContributionSchema,
        target: &MenuTarget,
        label: &str,
        menus: &BTreeMap<String, Vec<Placement>>,
        slots: &mut BTreeMap<String, Vec<Slot>>,
        unresolved: &mut Vec<UnresolvedReference>,
    ) -> Result<()> {
        for (location, placements) in menus {
            for placement in placements {
                if let Some(alt) = &placement.alt
                    && !schema.commands.contains_key(alt)
                {
                    unresolved.push(UnresolvedReference::new(
                        format!("{target} in menus[{location}]"),
                        ReferenceKind::Command,
                        alt.clone(),
                    ));
                }

                let when = self
                    .rewriter()
                    .rewrite(location, target.id(), placement.when.as_deref())?;
                slots.entry(location.clone()).or_default().push(Slot {
                    target: target.clone(),
                    label: Some(label.to_string()),
                    placement: Placement {
                        when,
                        ..placement.clone()
                    },
                });
            }
        }
        Ok(())
    }
}

/// Views per container in position order, and the welcome content they
/// carry, folded out in the same order.
fn generate_views(
    schema: &ContributionSchema,
) -> (BTreeMap<String, Vec<ManifestView>>, Vec<ViewWelcome>) {
    let mut by_container: BTreeMap<&str, Vec<(&String, &View)>> = BTreeMap::new();
    for (id, view) in &schema.views {
        by_container.entry(view.container.as_str()).or_default().push((id, view));
    }

    let mut views = BTreeMap::new();
    let mut welcome = Vec::new();
    for (container, mut members) in by_container {
        members.sort_by(|(a_id, a), (b_id, b)| a.order.cmp(&b.order).then_with(|| a_id.cmp(b_id)));

        let mut list = Vec::with_capacity(members.len());
        for (id, view) in members {
            list.push(ManifestView {
                kind: view.kind.clone(),
                id: id.clone(),
                name: view.name.clone(),
                when: view.when.clone(),
                contextual_title: view.contextual_title.clone(),
                icon: view.icon.clone(),
                initial_size: view.initial_size.clone(),
                visibility: view.visibility.clone(),
            });
            welcome.extend(view.welcome_content.iter().map(|entry| ViewWelcome {
                view: id.clone(),
                contents: entry.contents.clone(),
                when: entry.when.clone(),
            }));
        }
        views.insert(container.to_string(), list);
    }
    (views, welcome)
}
