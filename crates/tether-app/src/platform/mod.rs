//! Platform abstraction layer
//!
//! Operations that differ across macOS, Windows, and Linux: the application
//! identifier, the system browser, native context-menu popups, window
//! parenting and whether the process outlives its last window.

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "linux")]
mod linux;

use muda::Menu;
use tao::window::{Window, WindowBuilder};

/// Result type for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Platform-specific error types
#[derive(Debug, Clone)]
pub enum PlatformError {
    /// Menu initialization failed
    MenuInitFailed(String),
    /// Context menu could not be shown
    ContextMenuFailed(String),
    /// Failed to open external URL
    OpenExternalFailed(String),
    /// Failed to set the application identifier
    AppIdFailed(String),
    /// URL scheme the system browser should not receive
    UnsupportedScheme(String),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformError::MenuInitFailed(msg) => write!(f, "Menu initialization failed: {}", msg),
            PlatformError::ContextMenuFailed(msg) => write!(f, "Context menu failed: {}", msg),
            PlatformError::OpenExternalFailed(msg) => write!(f, "Failed to open external: {}", msg),
            PlatformError::AppIdFailed(msg) => write!(f, "Failed to set app id: {}", msg),
            PlatformError::UnsupportedScheme(url) => write!(f, "Unsupported URL scheme: {}", url),
        }
    }
}

impl std::error::Error for PlatformError {}

/// Platform-specific capabilities
#[derive(Debug, Clone)]
pub struct PlatformCapabilities {
    /// Whether a native menu is required for clipboard operations (macOS)
    pub native_menu_required_for_clipboard: bool,
    /// Whether the app stays alive after its last window closes (macOS)
    pub keeps_running_without_windows: bool,
    /// Platform name for logging/debugging
    pub platform_name: &'static str,
}

/// Trait for platform-specific operations
pub trait PlatformManager {
    /// Install the application-level menu. Managed windows never get a menu
    /// bar of their own; on macOS the app menu is still required for
    /// clipboard shortcuts (Cmd+C/V) to work.
    fn initialize_app_menu(&self, menu: &Menu) -> PlatformResult<()>;

    /// Open a URL in the system's default browser
    fn open_external(&self, url: &str) -> PlatformResult<()>;

    /// Set the identifier the OS groups the app's windows under
    fn set_app_id(&self, app_id: &str) -> PlatformResult<()>;

    /// Pop up `menu` at the cursor over `window`
    fn show_context_menu(&self, window: &Window, menu: &Menu) -> PlatformResult<()>;

    /// Make windows built from `builder` children of `parent`
    fn with_parent(&self, builder: WindowBuilder, parent: &Window) -> WindowBuilder;

    /// Get the platform's capabilities
    fn capabilities(&self) -> &PlatformCapabilities;

    /// Get the platform name for logging
    fn platform_name(&self) -> &'static str {
        self.capabilities().platform_name
    }
}

/// Get the platform manager for the current operating system
pub fn get_platform_manager() -> Box<dyn PlatformManager> {
    #[cfg(target_os = "macos")]
    {
        Box::new(macos::MacOSPlatform::new())
    }

    #[cfg(target_os = "windows")]
    {
        Box::new(windows::WindowsPlatform::new())
    }

    #[cfg(target_os = "linux")]
    {
        Box::new(linux::LinuxPlatform::new())
    }
}

/// Only web and mail links are handed to the system browser
pub fn check_external_url(url: &str) -> PlatformResult<()> {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("mailto:") {
        Ok(())
    } else {
        Err(PlatformError::UnsupportedScheme(url.to_string()))
    }
}
