//! macOS platform implementation
//!
//! The native app menu is required for clipboard shortcuts (Cmd+C/V) to
//! work in WKWebView. Following platform convention the app keeps running
//! after its last window closes and reopens one when the dock icon is
//! clicked.

use super::{check_external_url, PlatformCapabilities, PlatformError, PlatformManager, PlatformResult};
use muda::{ContextMenu, Menu, PredefinedMenuItem, Submenu};
use std::process::Command;
use tao::platform::macos::WindowExtMacOS;
use tao::window::{Window, WindowBuilder};
use tracing::debug;

/// macOS platform manager
pub struct MacOSPlatform {
    capabilities: PlatformCapabilities,
}

impl MacOSPlatform {
    pub fn new() -> Self {
        Self {
            capabilities: PlatformCapabilities {
                native_menu_required_for_clipboard: true,
                keeps_running_without_windows: true,
                platform_name: "macOS",
            },
        }
    }

    /// Create the standard macOS application menu
    fn create_app_menu(&self, menu: &Menu) -> PlatformResult<()> {
        let app_menu = Submenu::new("Tether", true);

        app_menu
            .append_items(&[
                &PredefinedMenuItem::about(Some("About Tether"), None),
                &PredefinedMenuItem::separator(),
                &PredefinedMenuItem::hide(None),
                &PredefinedMenuItem::hide_others(None),
                &PredefinedMenuItem::show_all(None),
                &PredefinedMenuItem::separator(),
                &PredefinedMenuItem::quit(None),
            ])
            .map_err(|e| PlatformError::MenuInitFailed(format!("Failed to build app menu: {}", e)))?;

        menu.append(&app_menu)
            .map_err(|e| PlatformError::MenuInitFailed(format!("Failed to append app menu: {}", e)))?;

        Ok(())
    }

    /// Create the Edit menu with clipboard operations
    fn create_edit_menu(&self, menu: &Menu) -> PlatformResult<()> {
        let edit_menu = Submenu::new("Edit", true);

        edit_menu
            .append_items(&[
                &PredefinedMenuItem::undo(None),
                &PredefinedMenuItem::redo(None),
                &PredefinedMenuItem::separator(),
                &PredefinedMenuItem::cut(None),
                &PredefinedMenuItem::copy(None),
                &PredefinedMenuItem::paste(None),
                &PredefinedMenuItem::select_all(None),
            ])
            .map_err(|e| PlatformError::MenuInitFailed(format!("Failed to build edit menu: {}", e)))?;

        menu.append(&edit_menu)
            .map_err(|e| PlatformError::MenuInitFailed(format!("Failed to append edit menu: {}", e)))?;

        Ok(())
    }

    /// Create the Window menu so Cmd+W / Cmd+M behave natively
    fn create_window_menu(&self, menu: &Menu) -> PlatformResult<()> {
        let window_menu = Submenu::new("Window", true);

        window_menu
            .append_items(&[
                &PredefinedMenuItem::minimize(None),
                &PredefinedMenuItem::maximize(None),
                &PredefinedMenuItem::separator(),
                &PredefinedMenuItem::close_window(None),
            ])
            .map_err(|e| PlatformError::MenuInitFailed(format!("Failed to build window menu: {}", e)))?;

        menu.append(&window_menu)
            .map_err(|e| PlatformError::MenuInitFailed(format!("Failed to append window menu: {}", e)))?;

        Ok(())
    }
}

impl Default for MacOSPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformManager for MacOSPlatform {
    fn initialize_app_menu(&self, menu: &Menu) -> PlatformResult<()> {
        self.create_app_menu(menu)?;
        self.create_edit_menu(menu)?;
        self.create_window_menu(menu)?;

        menu.init_for_nsapp();

        debug!("macOS app menu initialized");
        Ok(())
    }

    fn open_external(&self, url: &str) -> PlatformResult<()> {
        check_external_url(url)?;
        debug!("Opening external URL: {}", url);

        Command::new("open")
            .arg(url)
            .spawn()
            .map_err(|e| PlatformError::OpenExternalFailed(format!("{}: {}", url, e)))?;

        Ok(())
    }

    fn set_app_id(&self, app_id: &str) -> PlatformResult<()> {
        // The bundle identifier comes from Info.plist and cannot change at runtime
        debug!("App id {} is taken from the bundle on macOS", app_id);
        Ok(())
    }

    fn show_context_menu(&self, window: &Window, menu: &Menu) -> PlatformResult<()> {
        let shown = unsafe {
            menu.show_context_menu_for_nsview(window.ns_view() as _, None::<muda::dpi::Position>)
        };
        if !shown {
            debug!("Context menu dismissed without a selection");
        }
        Ok(())
    }

    fn with_parent(&self, builder: WindowBuilder, _parent: &Window) -> WindowBuilder {
        // Child NSWindows move with their parent, which the hosted app does not
        // expect from popups; the relationship is tracked by the shell only.
        builder
    }

    fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }
}
