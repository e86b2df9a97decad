//! Managed window records and standard behavior composition

use tether_core::types::{WindowId, WindowSize};
use tether_core::{TetherError, TetherResult};
use url::Url;

/// How a window came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRole {
    /// Created by the lifecycle controller, loads the home URL
    TopLevel,
    /// Spawned by the navigation interceptor, parented to the requesting window
    Popup,
    /// Opened from the context menu's "open link in new window"
    Detached,
}

/// When a freshly created window becomes visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowPolicy {
    /// Hidden until the content signals ready, then shown and maximized
    OnReady,
    /// Shown and maximized right after creation
    Immediately,
}

/// Per-window behavior attachments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Behaviors {
    pub shortcuts: bool,
    pub context_menu: bool,
    pub navigation_interceptor: bool,
}

impl Behaviors {
    pub fn any(&self) -> bool {
        self.shortcuts || self.context_menu || self.navigation_interceptor
    }
}

/// Request to the window factory
#[derive(Debug, Clone, PartialEq)]
pub struct WindowOptions {
    pub url: Url,
    pub size: WindowSize,
    pub role: WindowRole,
    pub parent: Option<WindowId>,
    pub show: ShowPolicy,
}

/// Shell-side record of a native window
#[derive(Debug, Clone, PartialEq)]
pub struct ManagedWindow {
    pub id: WindowId,
    pub role: WindowRole,
    pub parent: Option<WindowId>,
    pub url: Url,
    pub size: WindowSize,
    pub show_policy: ShowPolicy,
    pub ready: bool,
    pub visible: bool,
    pub menu_bar: bool,
    pub behaviors: Behaviors,
}

impl ManagedWindow {
    pub fn new(id: WindowId, options: WindowOptions) -> Self {
        Self {
            id,
            role: options.role,
            parent: options.parent,
            url: options.url,
            size: options.size,
            show_policy: options.show,
            ready: false,
            visible: false,
            menu_bar: false,
            behaviors: Behaviors::default(),
        }
    }

    /// Wire the shortcut binder, the context menu builder and, depending on
    /// role, the navigation interceptor. Exactly once per window.
    pub fn attach_standard_behaviors(&mut self, nested_popups: bool) -> TetherResult<()> {
        if self.behaviors.any() {
            return Err(TetherError::BehaviorsAlreadyAttached(self.id));
        }

        self.behaviors = Behaviors {
            shortcuts: true,
            context_menu: true,
            navigation_interceptor: self.role == WindowRole::TopLevel || nested_popups,
        };
        Ok(())
    }
}
