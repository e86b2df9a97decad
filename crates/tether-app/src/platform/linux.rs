//! Linux platform implementation
//!
//! GTK WebKit on Linux. The xdg-open command is used for external
//! operations. The process exits with its last window.

use super::{check_external_url, PlatformCapabilities, PlatformError, PlatformManager, PlatformResult};
use muda::{ContextMenu, Menu};
use std::process::Command;
use tao::window::{Window, WindowBuilder};
use tracing::debug;

/// Linux platform manager
pub struct LinuxPlatform {
    capabilities: PlatformCapabilities,
}

impl LinuxPlatform {
    pub fn new() -> Self {
        Self {
            capabilities: PlatformCapabilities {
                native_menu_required_for_clipboard: false,
                keeps_running_without_windows: false,
                platform_name: "Linux",
            },
        }
    }
}

impl Default for LinuxPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformManager for LinuxPlatform {
    fn initialize_app_menu(&self, _menu: &Menu) -> PlatformResult<()> {
        // No global menu bar on Linux; windows stay menu-less
        Ok(())
    }

    fn open_external(&self, url: &str) -> PlatformResult<()> {
        check_external_url(url)?;
        debug!("Opening external URL: {}", url);

        Command::new("xdg-open")
            .arg(url)
            .spawn()
            .map_err(|e| PlatformError::OpenExternalFailed(format!("{}: {}", url, e)))?;

        Ok(())
    }

    fn set_app_id(&self, app_id: &str) -> PlatformResult<()> {
        // Used by the desktop shell to match windows to the .desktop entry
        gtk::glib::set_prgname(Some(app_id));
        debug!("Set program name to {}", app_id);
        Ok(())
    }

    fn show_context_menu(&self, window: &Window, menu: &Menu) -> PlatformResult<()> {
        use gtk::prelude::Cast;
        use tao::platform::unix::WindowExtUnix;

        let gtk_window: &gtk::Window = window.gtk_window().upcast_ref();
        if menu.show_context_menu_for_gtk_window(gtk_window, None::<muda::dpi::Position>) {
            Ok(())
        } else {
            Err(PlatformError::ContextMenuFailed(
                "GTK refused to show the menu".to_string(),
            ))
        }
    }

    fn with_parent(&self, builder: WindowBuilder, parent: &Window) -> WindowBuilder {
        use tao::platform::unix::{WindowBuilderExtUnix, WindowExtUnix};

        builder.with_transient_for(parent.gtk_window())
    }

    fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }
}
