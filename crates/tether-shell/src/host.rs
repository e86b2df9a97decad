//! The boundary between shell policy and the native desktop
//!
//! Everything the shell asks of the windowing toolkit, the webview, the
//! clipboard or the system browser goes through [`WindowHost`]. The app
//! crate implements it over tao/wry/muda; tests implement it with a recorder.

use crate::context_menu::ContextMenuModel;
use crate::window::Behaviors;
use tether_core::types::{HistoryState, WindowId, WindowSize};
use tether_core::TetherResult;
use url::Url;

/// Everything the host needs to build one native window and its content view
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub id: WindowId,
    pub title: String,
    /// Loaded as soon as the content view exists
    pub url: Url,
    pub size: WindowSize,
    pub parent: Option<WindowId>,
    /// Visible at creation; otherwise hidden until shown explicitly
    pub visible: bool,
    /// Hosts refuse to build a window whose menu bar, isolation or script
    /// privileges differ from what they provide; the factory always asks for
    /// no menu bar, isolated content and unprivileged page scripts.
    pub menu_bar: bool,
    /// Page scripts run isolated from the bridge script
    pub content_isolation: bool,
    /// Page scripts may reach privileged host APIs
    pub privileged_scripts: bool,
    pub devtools: bool,
    pub behaviors: Behaviors,
}

/// Native capabilities the shell drives
///
/// All methods are called on the event loop thread. Fire-and-forget
/// operations return nothing; the host logs its own failures.
pub trait WindowHost {
    /// Create a native window with its content view and start loading `spec.url`
    fn create_window(&mut self, spec: &WindowSpec) -> TetherResult<()>;

    fn show_window(&mut self, window: WindowId);

    fn maximize_window(&mut self, window: WindowId);

    /// Destroy the native window. Unknown ids are ignored.
    fn close_window(&mut self, window: WindowId);

    /// Last known back/forward availability of the window's content
    fn history(&self, window: WindowId) -> HistoryState;

    fn reload(&mut self, window: WindowId);

    fn go_back(&mut self, window: WindowId);

    fn go_forward(&mut self, window: WindowId);

    fn toggle_devtools(&mut self, window: WindowId);

    /// Show `menu` at the cursor in place of the toolkit's default menu
    fn popup_context_menu(&mut self, window: WindowId, menu: &ContextMenuModel) -> TetherResult<()>;

    fn write_clipboard(&mut self, text: &str) -> TetherResult<()>;

    /// Hand `url` to the system default browser
    fn open_external(&mut self, url: &Url) -> TetherResult<()>;

    fn set_app_id(&mut self, app_id: &str) -> TetherResult<()>;

    /// True where the platform convention keeps apps alive with no windows (macOS)
    fn keeps_running_without_windows(&self) -> bool;

    /// Terminate the process once the current event has been handled
    fn quit(&mut self);
}
