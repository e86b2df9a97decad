//! Windows platform implementation
//!
//! WebView2 on Windows. The AppUserModelID groups the app's windows on the
//! taskbar; the process exits with its last window.

use super::{check_external_url, PlatformCapabilities, PlatformError, PlatformManager, PlatformResult};
use muda::{ContextMenu, Menu};
use std::process::Command;
use tao::platform::windows::{WindowBuilderExtWindows, WindowExtWindows};
use tao::window::{Window, WindowBuilder};
use tracing::debug;

/// Windows platform manager
pub struct WindowsPlatform {
    capabilities: PlatformCapabilities,
}

impl WindowsPlatform {
    pub fn new() -> Self {
        Self {
            capabilities: PlatformCapabilities {
                native_menu_required_for_clipboard: false,
                keeps_running_without_windows: false,
                platform_name: "Windows",
            },
        }
    }
}

impl Default for WindowsPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformManager for WindowsPlatform {
    fn initialize_app_menu(&self, _menu: &Menu) -> PlatformResult<()> {
        // Menus are per-HWND on Windows; managed windows have none
        Ok(())
    }

    fn open_external(&self, url: &str) -> PlatformResult<()> {
        check_external_url(url)?;
        debug!("Opening external URL: {}", url);

        // The empty "" after start is the window title (required for URLs with special chars)
        Command::new("cmd")
            .args(["/C", "start", "", url])
            .spawn()
            .map_err(|e| PlatformError::OpenExternalFailed(format!("{}: {}", url, e)))?;

        Ok(())
    }

    fn set_app_id(&self, app_id: &str) -> PlatformResult<()> {
        use windows::core::HSTRING;
        use windows::Win32::UI::Shell::SetCurrentProcessExplicitAppUserModelID;

        unsafe { SetCurrentProcessExplicitAppUserModelID(&HSTRING::from(app_id)) }
            .map_err(|e| PlatformError::AppIdFailed(format!("{}: {}", app_id, e)))?;

        debug!("Set AppUserModelID to {}", app_id);
        Ok(())
    }

    fn show_context_menu(&self, window: &Window, menu: &Menu) -> PlatformResult<()> {
        let shown = unsafe {
            menu.show_context_menu_for_hwnd(window.hwnd() as isize, None::<muda::dpi::Position>)
        };
        if !shown {
            debug!("Context menu dismissed without a selection");
        }
        Ok(())
    }

    fn with_parent(&self, builder: WindowBuilder, parent: &Window) -> WindowBuilder {
        builder.with_owner_window(parent.hwnd() as _)
    }

    fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }
}
