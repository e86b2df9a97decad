//! Native rendering of context menu models
//!
//! Items are given ids derived from the owning window and their position so
//! a later [`muda::MenuEvent`] can be mapped back to the action it stands for.

use muda::{Menu, MenuId, MenuItem, PredefinedMenuItem};
use std::collections::HashMap;
use tether_core::types::WindowId;
use tether_core::{TetherError, TetherResult};
use tether_shell::{ContextMenuModel, MenuAction, MenuEntry};

/// The context menu currently on screen, if any
pub struct PendingMenu {
    pub window: WindowId,
    pub actions: HashMap<MenuId, MenuAction>,
}

impl PendingMenu {
    pub fn take_action(&mut self, id: &MenuId) -> Option<(WindowId, MenuAction)> {
        self.actions.remove(id).map(|action| (self.window, action))
    }
}

pub fn item_id(window: WindowId, index: usize) -> MenuId {
    MenuId::new(format!("ctx-{}-{}", window, index))
}

/// Id of every actionable entry in `model`, keyed for event lookup
pub fn action_map(window: WindowId, model: &ContextMenuModel) -> HashMap<MenuId, MenuAction> {
    model
        .entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry {
            MenuEntry::Item(item) => Some((item_id(window, index), item.action.clone())),
            MenuEntry::Separator => None,
        })
        .collect()
}

/// Build the muda menu for `model` together with its pending action table
pub fn build_native_menu(window: WindowId, model: &ContextMenuModel) -> TetherResult<(Menu, PendingMenu)> {
    let menu = Menu::new();

    for (index, entry) in model.entries.iter().enumerate() {
        match entry {
            MenuEntry::Item(item) => {
                let native = MenuItem::with_id(
                    item_id(window, index),
                    item.label,
                    item.enabled,
                    item.accelerator.and_then(|a| a.parse().ok()),
                );
                menu.append(&native)
                    .map_err(|e| TetherError::menu(format!("{}: {}", item.label, e)))?;
            }
            MenuEntry::Separator => {
                menu.append(&PredefinedMenuItem::separator())
                    .map_err(|e| TetherError::menu(e.to_string()))?;
            }
        }
    }

    let pending = PendingMenu {
        window,
        actions: action_map(window, model),
    };
    Ok((menu, pending))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::types::{ContextMenuContext, HistoryState};
    use tether_shell::build_context_menu;
    use url::Url;

    #[test]
    fn test_item_ids_include_window() {
        let window = WindowId(7);
        assert_eq!(item_id(window, 3).0, "ctx-win-7-3");
        assert_ne!(item_id(WindowId(7), 0), item_id(WindowId(8), 0));
    }

    #[test]
    fn test_action_map_skips_separators() {
        let link = Url::parse("https://example.com/a").unwrap();
        let ctx = ContextMenuContext::new(Some(link.clone()), None);
        let model = build_context_menu(&ctx, HistoryState::default(), true);
        let map = action_map(WindowId(1), &model);

        assert_eq!(map.len(), model.items().count());
        for (index, entry) in model.entries.iter().enumerate() {
            let id = item_id(WindowId(1), index);
            match entry {
                MenuEntry::Item(item) => assert_eq!(map.get(&id), Some(&item.action)),
                MenuEntry::Separator => assert!(!map.contains_key(&id)),
            }
        }
        assert_eq!(
            map.get(&item_id(WindowId(1), 0)),
            Some(&MenuAction::OpenLinkInNewWindow(link))
        );
    }

    #[test]
    fn test_pending_menu_takes_each_action_once() {
        let model = build_context_menu(&ContextMenuContext::default(), HistoryState::default(), true);
        let mut pending = PendingMenu {
            window: WindowId(2),
            actions: action_map(WindowId(2), &model),
        };

        let id = item_id(WindowId(2), 0);
        assert_eq!(pending.take_action(&id), Some((WindowId(2), MenuAction::Reload)));
        assert_eq!(pending.take_action(&id), None);
        assert_eq!(pending.take_action(&MenuId::new("ctx-win-3-0")), None);
    }
}
