//! Window shell - window factory, popup interception, context menus,
//! shortcuts and application lifecycle
//!
//! The [`Shell`] owns the registry of managed windows and the lifecycle
//! state. Every handler takes the native side explicitly as a
//! [`WindowHost`], so the same policy runs against tao/wry in the app and
//! against a recorder in tests.

pub mod context_menu;
pub mod factory;
pub mod host;
pub mod interceptor;
pub mod lifecycle;
pub mod shortcuts;
pub mod window;

#[cfg(test)]
mod testing;

pub use context_menu::{build_context_menu, ContextMenuModel, MenuAction, MenuEntry, MenuItemSpec};
pub use host::{WindowHost, WindowSpec};
pub use interceptor::NewWindowDecision;
pub use lifecycle::LifecycleState;
pub use shortcuts::{InputDisposition, Shortcut};
pub use window::{Behaviors, ManagedWindow, ShowPolicy, WindowOptions, WindowRole};

use std::collections::BTreeMap;
use tether_core::types::WindowId;
use tether_core::ShellConfig;

pub struct Shell {
    config: ShellConfig,
    windows: BTreeMap<WindowId, ManagedWindow>,
    state: LifecycleState,
    devtools_shortcuts: bool,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Self {
        log::info!("Initializing window shell for {}", config.home_url);

        Self {
            config,
            windows: BTreeMap::new(),
            state: LifecycleState::Uninitialized,
            devtools_shortcuts: false,
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn window(&self, id: WindowId) -> Option<&ManagedWindow> {
        self.windows.get(&id)
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Direct children of `parent`
    pub fn children_of(&self, parent: WindowId) -> Vec<WindowId> {
        self.windows
            .values()
            .filter(|w| w.parent == Some(parent))
            .map(|w| w.id)
            .collect()
    }

    pub fn devtools_shortcuts_enabled(&self) -> bool {
        self.devtools_shortcuts
    }
}
