//! Window factory
//!
//! Every managed window, whatever created it, goes through
//! [`Shell::create_managed_window`]: hidden menu bar, isolated content,
//! no privileged page scripts, standard behaviors attached exactly once.

use crate::host::{WindowHost, WindowSpec};
use crate::window::{ManagedWindow, ShowPolicy, WindowOptions, WindowRole};
use crate::Shell;
use tether_core::types::WindowId;
use tether_core::TetherResult;

impl Shell {
    pub fn create_managed_window(
        &mut self,
        host: &mut impl WindowHost,
        options: WindowOptions,
    ) -> TetherResult<WindowId> {
        let id = WindowId::new();
        let mut window = ManagedWindow::new(id, options);
        window.attach_standard_behaviors(self.config.nested_popups)?;

        let spec = WindowSpec {
            id,
            title: self.config.title.clone(),
            url: window.url.clone(),
            size: window.size,
            parent: window.parent,
            visible: false,
            menu_bar: window.menu_bar,
            content_isolation: true,
            privileged_scripts: false,
            devtools: self.config.devtools_enabled,
            behaviors: window.behaviors,
        };
        host.create_window(&spec)?;

        log::info!(
            "Created {:?} window {} ({}) parent={:?}",
            window.role,
            id,
            window.url,
            window.parent
        );

        if window.show_policy == ShowPolicy::Immediately {
            host.show_window(id);
            host.maximize_window(id);
            window.visible = true;
        }

        self.windows.insert(id, window);
        Ok(id)
    }

    /// A top-level window on the home URL, shown once ready
    pub fn create_initial_window(&mut self, host: &mut impl WindowHost) -> TetherResult<WindowId> {
        let options = WindowOptions {
            url: self.config.home_url.clone(),
            size: self.config.window_size,
            role: WindowRole::TopLevel,
            parent: None,
            show: ShowPolicy::OnReady,
        };
        self.create_managed_window(host, options)
    }

    /// The window's content finished its first load. One-shot per window.
    pub fn on_content_ready(&mut self, host: &mut impl WindowHost, id: WindowId) {
        let Some(window) = self.windows.get_mut(&id) else {
            log::debug!("Ready signal for unknown window {}", id);
            return;
        };
        if window.ready {
            return;
        }
        window.ready = true;

        if !window.visible {
            host.show_window(id);
            host.maximize_window(id);
            window.visible = true;
            log::info!("Window {} ready, shown", id);
        }
    }
}
