//! Context menu builder
//!
//! The toolkit's default context menu is suppressed for every managed
//! window. [`build_context_menu`] decides the entries from what was clicked
//! and the window's history; [`Shell::perform_menu_action`] carries out the
//! entry the user picked.

use crate::host::WindowHost;
use crate::window::{ShowPolicy, WindowOptions, WindowRole};
use crate::Shell;
use tether_core::types::{ContextMenuContext, HistoryState, WindowId};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    CopySelection(String),
    OpenLinkInNewWindow(Url),
    OpenLinkExternally(Url),
    CopyLink(Url),
    Reload,
    GoBack,
    GoForward,
    ToggleDevTools,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemSpec {
    pub label: &'static str,
    pub action: MenuAction,
    pub enabled: bool,
    /// Accelerator hint shown next to the label, in muda's string syntax
    pub accelerator: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item(MenuItemSpec),
    Separator,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextMenuModel {
    pub entries: Vec<MenuEntry>,
}

impl ContextMenuModel {
    pub fn items(&self) -> impl Iterator<Item = &MenuItemSpec> {
        self.entries.iter().filter_map(|entry| match entry {
            MenuEntry::Item(item) => Some(item),
            MenuEntry::Separator => None,
        })
    }

    #[cfg(test)]
    pub fn find(&self, pred: impl Fn(&MenuAction) -> bool) -> Option<&MenuItemSpec> {
        self.items().find(|item| pred(&item.action))
    }

    fn push(&mut self, label: &'static str, action: MenuAction, accelerator: Option<&'static str>) {
        self.push_enabled(label, action, true, accelerator);
    }

    fn push_enabled(
        &mut self,
        label: &'static str,
        action: MenuAction,
        enabled: bool,
        accelerator: Option<&'static str>,
    ) {
        self.entries.push(MenuEntry::Item(MenuItemSpec {
            label,
            action,
            enabled,
            accelerator,
        }));
    }
}

pub fn build_context_menu(
    ctx: &ContextMenuContext,
    history: HistoryState,
    devtools_enabled: bool,
) -> ContextMenuModel {
    let mut menu = ContextMenuModel::default();

    if let Some(text) = ctx.selection() {
        menu.push("Copy", MenuAction::CopySelection(text.to_string()), Some("CmdOrCtrl+C"));
    }

    if let Some(link) = &ctx.link_url {
        menu.push(
            "Open Link in New Window",
            MenuAction::OpenLinkInNewWindow(link.clone()),
            None,
        );
        menu.push(
            "Open Link in Browser",
            MenuAction::OpenLinkExternally(link.clone()),
            None,
        );
        menu.push("Copy Link", MenuAction::CopyLink(link.clone()), None);
    }

    if !menu.entries.is_empty() {
        menu.entries.push(MenuEntry::Separator);
    }

    menu.push("Reload", MenuAction::Reload, Some("CmdOrCtrl+R"));
    menu.push_enabled("Back", MenuAction::GoBack, history.can_go_back, Some("Alt+Left"));
    menu.push_enabled(
        "Forward",
        MenuAction::GoForward,
        history.can_go_forward,
        Some("Alt+Right"),
    );
    menu.entries.push(MenuEntry::Separator);
    menu.push_enabled(
        "Toggle Developer Tools",
        MenuAction::ToggleDevTools,
        devtools_enabled,
        Some("F12"),
    );

    menu
}

impl Shell {
    /// Build and present the custom menu. Returns the menu shown, if any.
    pub fn on_context_menu_requested(
        &mut self,
        host: &mut impl WindowHost,
        id: WindowId,
        ctx: ContextMenuContext,
    ) -> Option<ContextMenuModel> {
        let window = self.windows.get(&id)?;
        if !window.behaviors.context_menu {
            return None;
        }

        let menu = build_context_menu(&ctx, host.history(id), self.config.devtools_enabled);
        log::debug!("Context menu on {} ({:?})", id, ctx.target());
        if let Err(e) = host.popup_context_menu(id, &menu) {
            log::warn!("Failed to show context menu on {}: {}", id, e);
        }
        Some(menu)
    }

    pub fn perform_menu_action(&mut self, host: &mut impl WindowHost, id: WindowId, action: MenuAction) {
        if !self.windows.contains_key(&id) {
            log::debug!("Menu action {:?} for closed window {}", action, id);
            return;
        }

        match action {
            MenuAction::CopySelection(text) => {
                if let Err(e) = host.write_clipboard(&text) {
                    log::warn!("Copy failed: {}", e);
                }
            }
            MenuAction::OpenLinkInNewWindow(url) => {
                let options = WindowOptions {
                    url: url.clone(),
                    size: self.config.window_size,
                    role: WindowRole::Detached,
                    parent: None,
                    show: ShowPolicy::Immediately,
                };
                if let Err(e) = self.create_managed_window(host, options) {
                    log::error!("Failed to open {} in new window: {}", url, e);
                }
            }
            MenuAction::OpenLinkExternally(url) => {
                if let Err(e) = host.open_external(&url) {
                    log::warn!("Failed to open {} in system browser: {}", url, e);
                }
            }
            MenuAction::CopyLink(url) => {
                if let Err(e) = host.write_clipboard(url.as_str()) {
                    log::warn!("Copy link failed: {}", e);
                }
            }
            MenuAction::Reload => host.reload(id),
            MenuAction::GoBack => {
                if host.history(id).can_go_back {
                    host.go_back(id);
                }
            }
            MenuAction::GoForward => {
                if host.history(id).can_go_forward {
                    host.go_forward(id);
                }
            }
            MenuAction::ToggleDevTools => {
                if self.config.devtools_enabled {
                    host.toggle_devtools(id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{HostCall, RecordingHost};
    use tether_core::ShellConfig;

    fn link(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    fn labels(menu: &ContextMenuModel) -> Vec<&'static str> {
        menu.entries
            .iter()
            .map(|entry| match entry {
                MenuEntry::Item(item) => item.label,
                MenuEntry::Separator => "---",
            })
            .collect()
    }

    #[test]
    fn test_plain_page_menu() {
        let menu = build_context_menu(&ContextMenuContext::default(), HistoryState::default(), true);
        assert_eq!(
            labels(&menu),
            vec!["Reload", "Back", "Forward", "---", "Toggle Developer Tools"]
        );
        assert!(!menu.find(|a| *a == MenuAction::GoBack).unwrap().enabled);
        assert!(!menu.find(|a| *a == MenuAction::GoForward).unwrap().enabled);
        assert!(menu.find(|a| *a == MenuAction::Reload).unwrap().enabled);
    }

    #[test]
    fn test_history_enables_back_forward() {
        let ctx = ContextMenuContext::default();

        let menu = build_context_menu(&ctx, HistoryState::new(true, false), true);
        assert!(menu.find(|a| *a == MenuAction::GoBack).unwrap().enabled);
        assert!(!menu.find(|a| *a == MenuAction::GoForward).unwrap().enabled);

        let menu = build_context_menu(&ctx, HistoryState::new(false, true), true);
        assert!(!menu.find(|a| *a == MenuAction::GoBack).unwrap().enabled);
        assert!(menu.find(|a| *a == MenuAction::GoForward).unwrap().enabled);
    }

    #[test]
    fn test_selection_menu_has_copy_and_no_link_entries() {
        let ctx = ContextMenuContext::new(None, Some("selected words".into()));
        let menu = build_context_menu(&ctx, HistoryState::default(), true);

        assert_eq!(menu.entries[0], MenuEntry::Item(MenuItemSpec {
            label: "Copy",
            action: MenuAction::CopySelection("selected words".into()),
            enabled: true,
            accelerator: Some("CmdOrCtrl+C"),
        }));
        assert!(menu.find(|a| matches!(
            a,
            MenuAction::CopyLink(_) | MenuAction::OpenLinkExternally(_) | MenuAction::OpenLinkInNewWindow(_)
        ))
        .is_none());
    }

    #[test]
    fn test_link_menu_order() {
        let target = link("https://example.com/doc");
        let ctx = ContextMenuContext::new(Some(target.clone()), None);
        let menu = build_context_menu(&ctx, HistoryState::new(true, false), true);

        assert_eq!(
            labels(&menu),
            vec![
                "Open Link in New Window",
                "Open Link in Browser",
                "Copy Link",
                "---",
                "Reload",
                "Back",
                "Forward",
                "---",
                "Toggle Developer Tools",
            ]
        );
        let actions: Vec<_> = menu.items().take(3).map(|i| i.action.clone()).collect();
        assert_eq!(
            actions,
            vec![
                MenuAction::OpenLinkInNewWindow(target.clone()),
                MenuAction::OpenLinkExternally(target.clone()),
                MenuAction::CopyLink(target),
            ]
        );
    }

    #[test]
    fn test_selection_precedes_link_entries() {
        let ctx = ContextMenuContext::new(Some(link("https://example.com/doc")), Some("doc".into()));
        let menu = build_context_menu(&ctx, HistoryState::default(), true);
        assert_eq!(
            &labels(&menu)[..5],
            &["Copy", "Open Link in New Window", "Open Link in Browser", "Copy Link", "---"]
        );
    }

    #[test]
    fn test_devtools_entry_disabled_by_config() {
        let menu = build_context_menu(&ContextMenuContext::default(), HistoryState::default(), false);
        assert!(!menu.find(|a| *a == MenuAction::ToggleDevTools).unwrap().enabled);
    }

    #[test]
    fn test_request_pops_up_menu() {
        let mut shell = Shell::new(ShellConfig::default());
        let mut host = RecordingHost::new();
        let id = shell.create_initial_window(&mut host).unwrap();
        host.history.insert(id, HistoryState::new(true, true));

        let ctx = ContextMenuContext::new(Some(link("https://example.com/doc")), None);
        let menu = shell.on_context_menu_requested(&mut host, id, ctx).unwrap();
        assert!(menu.find(|a| *a == MenuAction::GoBack).unwrap().enabled);
        assert_eq!(host.calls.last(), Some(&HostCall::Popup(id, menu)));
    }

    #[test]
    fn test_request_for_unknown_window() {
        let mut shell = Shell::new(ShellConfig::default());
        let mut host = RecordingHost::new();
        assert!(shell
            .on_context_menu_requested(&mut host, WindowId(31337), ContextMenuContext::default())
            .is_none());
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_copy_actions_write_exact_text() {
        let mut shell = Shell::new(ShellConfig::default());
        let mut host = RecordingHost::new();
        let id = shell.create_initial_window(&mut host).unwrap();
        host.clear();

        shell.perform_menu_action(&mut host, id, MenuAction::CopySelection(" exact S ".into()));
        shell.perform_menu_action(
            &mut host,
            id,
            MenuAction::CopyLink(link("https://example.com/doc")),
        );
        assert_eq!(
            host.calls,
            vec![
                HostCall::Clipboard(" exact S ".into()),
                HostCall::Clipboard("https://example.com/doc".into()),
            ]
        );
    }

    #[test]
    fn test_open_link_actions() {
        let mut shell = Shell::new(ShellConfig::default());
        let mut host = RecordingHost::new();
        let id = shell.create_initial_window(&mut host).unwrap();
        host.clear();
        let target = link("https://example.com/doc");

        shell.perform_menu_action(&mut host, id, MenuAction::OpenLinkExternally(target.clone()));
        assert_eq!(host.calls, vec![HostCall::OpenExternal(target.clone())]);
        host.clear();

        shell.perform_menu_action(&mut host, id, MenuAction::OpenLinkInNewWindow(target.clone()));
        let spec = host.last_created().clone();
        assert_eq!(spec.url, target);
        assert_eq!(spec.parent, None);
        // shown without waiting for ready
        assert!(host.calls.contains(&HostCall::Show(spec.id)));
        assert_eq!(shell.window(spec.id).unwrap().role, WindowRole::Detached);
    }

    #[test]
    fn test_disabled_history_actions_are_noops() {
        let mut shell = Shell::new(ShellConfig::default());
        let mut host = RecordingHost::new();
        let id = shell.create_initial_window(&mut host).unwrap();
        host.clear();

        shell.perform_menu_action(&mut host, id, MenuAction::GoBack);
        shell.perform_menu_action(&mut host, id, MenuAction::GoForward);
        assert!(host.calls.is_empty());

        host.history.insert(id, HistoryState::new(true, true));
        shell.perform_menu_action(&mut host, id, MenuAction::GoBack);
        shell.perform_menu_action(&mut host, id, MenuAction::GoForward);
        shell.perform_menu_action(&mut host, id, MenuAction::Reload);
        shell.perform_menu_action(&mut host, id, MenuAction::ToggleDevTools);
        assert_eq!(
            host.calls,
            vec![
                HostCall::GoBack(id),
                HostCall::GoForward(id),
                HostCall::Reload(id),
                HostCall::ToggleDevTools(id),
            ]
        );
    }
}
