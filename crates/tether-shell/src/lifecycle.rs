//! Application lifecycle controller

use crate::host::WindowHost;
use crate::Shell;
use tether_core::types::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Ready,
    Terminated,
}

impl Shell {
    /// The desktop environment is ready to create windows
    pub fn on_app_ready(&mut self, host: &mut impl WindowHost) {
        if self.state != LifecycleState::Uninitialized {
            log::debug!("Ignoring app ready in state {:?}", self.state);
            return;
        }
        self.state = LifecycleState::Ready;

        if let Err(e) = host.set_app_id(&self.config.app_id) {
            log::warn!("Failed to set application id: {}", e);
        }
        self.devtools_shortcuts = true;

        if let Err(e) = self.create_initial_window(host) {
            log::error!("Failed to create initial window: {}", e);
            self.on_all_windows_closed(host);
        }
    }

    /// The user re-activated the application (dock click on macOS)
    pub fn on_activated(&mut self, host: &mut impl WindowHost) {
        if self.state != LifecycleState::Ready || !self.windows.is_empty() {
            return;
        }
        log::info!("Activated with no open windows, reopening home");
        if let Err(e) = self.create_initial_window(host) {
            log::error!("Failed to recreate initial window: {}", e);
            self.on_all_windows_closed(host);
        }
    }

    /// The user closed `id`. Its popups close with it.
    pub fn on_window_closed(&mut self, host: &mut impl WindowHost, id: WindowId) {
        if self.windows.remove(&id).is_none() {
            return;
        }
        host.close_window(id);
        log::info!("Window {} closed", id);

        let mut orphans = self.children_of(id);
        while let Some(child) = orphans.pop() {
            if self.windows.remove(&child).is_some() {
                orphans.extend(self.children_of(child));
                host.close_window(child);
                log::info!("Window {} closed with its parent", child);
            }
        }

        if self.windows.is_empty() {
            self.on_all_windows_closed(host);
        }
    }

    fn on_all_windows_closed(&mut self, host: &mut impl WindowHost) {
        if !self.windows.is_empty() {
            return;
        }
        if host.keeps_running_without_windows() {
            log::info!("All windows closed, staying alive until activated");
            return;
        }
        log::info!("All windows closed, shutting down");
        self.state = LifecycleState::Terminated;
        host.quit();
    }
}
