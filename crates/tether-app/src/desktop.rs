//! Native side of the shell
//!
//! [`Desktop`] owns every tao window and its wry content view. For the
//! duration of one event it is paired with the event loop target as a
//! [`DesktopHost`], which is what the shell drives through [`WindowHost`].

use crate::bridge::{self, IpcMessage};
use crate::clipboard::SystemClipboard;
use crate::menu::{self, PendingMenu};
use crate::platform::PlatformManager;
use crate::session::{SessionHistory, Traversal};
use crate::UserEvent;
use muda::{Menu, MenuId};
use std::collections::HashMap;
use tao::dpi::LogicalSize;
use tao::event_loop::{EventLoopProxy, EventLoopWindowTarget};
use tao::window::{Window, WindowBuilder};
use tether_core::types::{HistoryState, NavigationRequest, WindowId};
use tether_core::{TetherError, TetherResult};
use tether_shell::interceptor;
use tether_shell::{ContextMenuModel, MenuAction, WindowHost, WindowSpec};
use tracing::{debug, info, warn};
use url::Url;
use wry::{PageLoadEvent, WebView, WebViewBuilder};

/// One managed window on screen
struct NativeWindow {
    // Declared first so the content view is torn down before its window
    webview: WebView,
    window: Window,
    /// Last state from the page's Navigation API, where it has one
    reported: Option<HistoryState>,
    session: SessionHistory,
}

impl NativeWindow {
    fn history(&self) -> HistoryState {
        self.reported.unwrap_or_else(|| self.session.state())
    }
}

pub struct Desktop {
    proxy: EventLoopProxy<UserEvent>,
    platform: Box<dyn PlatformManager>,
    clipboard: SystemClipboard,
    windows: HashMap<WindowId, NativeWindow>,
    native_ids: HashMap<tao::window::WindowId, WindowId>,
    context_menu: Option<(Menu, PendingMenu)>,
    exit_requested: bool,
}

impl Desktop {
    pub fn new(proxy: EventLoopProxy<UserEvent>, platform: Box<dyn PlatformManager>) -> Self {
        Self {
            proxy,
            platform,
            clipboard: SystemClipboard::new(),
            windows: HashMap::new(),
            native_ids: HashMap::new(),
            context_menu: None,
            exit_requested: false,
        }
    }

    /// Borrow the desktop as a [`WindowHost`] for one event
    pub fn host<'a>(&'a mut self, target: &'a EventLoopWindowTarget<UserEvent>) -> DesktopHost<'a> {
        DesktopHost {
            desktop: self,
            target,
        }
    }

    /// Managed id of a native window
    pub fn managed_id(&self, native: tao::window::WindowId) -> Option<WindowId> {
        self.native_ids.get(&native).copied()
    }

    /// Remember the back/forward state a page reported
    pub fn record_history(&mut self, id: WindowId, history: HistoryState) {
        if let Some(native) = self.windows.get_mut(&id) {
            native.reported = Some(history);
        }
    }

    /// A main-frame load of `url` finished
    pub fn record_load(&mut self, id: WindowId, url: &str) {
        if let Some(native) = self.windows.get_mut(&id) {
            native.session.committed(url);
        }
    }

    /// Same-document navigation reported by the page bridge
    pub fn record_navigation(&mut self, id: WindowId, url: &str, replace: bool) {
        if let Some(native) = self.windows.get_mut(&id) {
            if replace {
                native.session.replaced(url);
            } else {
                native.session.committed(url);
            }
        }
    }

    /// Resolve a clicked menu item to its window and action
    pub fn take_menu_action(&mut self, id: &MenuId) -> Option<(WindowId, MenuAction)> {
        let (_, pending) = self.context_menu.as_mut()?;
        let picked = pending.take_action(id);
        if picked.is_some() {
            self.context_menu = None;
        }
        picked
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    fn webview(&self, id: WindowId) -> Option<&WebView> {
        self.windows.get(&id).map(|native| &native.webview)
    }

    fn run_script(&self, id: WindowId, script: &str) {
        match self.webview(id) {
            Some(webview) => {
                if let Err(e) = webview.evaluate_script(script) {
                    warn!("Script failed in {}: {}", id, e);
                }
            }
            None => debug!("No content view for {}", id),
        }
    }
}

pub struct DesktopHost<'a> {
    desktop: &'a mut Desktop,
    target: &'a EventLoopWindowTarget<UserEvent>,
}

impl WindowHost for DesktopHost<'_> {
    fn create_window(&mut self, spec: &WindowSpec) -> TetherResult<()> {
        check_content_policy(spec)?;

        let mut builder = WindowBuilder::new()
            .with_title(&spec.title)
            .with_inner_size(LogicalSize::new(spec.size.width, spec.size.height))
            .with_visible(spec.visible);

        if let Some(parent) = spec.parent.and_then(|p| self.desktop.windows.get(&p)) {
            builder = self.desktop.platform.with_parent(builder, &parent.window);
        }

        let window = builder
            .build(self.target)
            .map_err(|e| TetherError::window_creation(format!("{}: {}", spec.id, e)))?;
        let webview = build_webview(spec, &window, &self.desktop.proxy)?;

        debug!("Created {} for {}", spec.id, spec.url);

        self.desktop.native_ids.insert(window.id(), spec.id);
        self.desktop.windows.insert(
            spec.id,
            NativeWindow {
                webview,
                window,
                reported: None,
                session: SessionHistory::new(),
            },
        );
        Ok(())
    }

    fn show_window(&mut self, id: WindowId) {
        if let Some(native) = self.desktop.windows.get(&id) {
            native.window.set_visible(true);
            native.window.set_focus();
        }
    }

    fn maximize_window(&mut self, id: WindowId) {
        if let Some(native) = self.desktop.windows.get(&id) {
            native.window.set_maximized(true);
        }
    }

    fn close_window(&mut self, id: WindowId) {
        let Some(native) = self.desktop.windows.remove(&id) else {
            return;
        };
        self.desktop.native_ids.remove(&native.window.id());
        if matches!(&self.desktop.context_menu, Some((_, pending)) if pending.window == id) {
            self.desktop.context_menu = None;
        }
        debug!("Destroyed {}", id);
    }

    fn history(&self, id: WindowId) -> HistoryState {
        self.desktop
            .windows
            .get(&id)
            .map(NativeWindow::history)
            .unwrap_or_default()
    }

    fn reload(&mut self, id: WindowId) {
        self.desktop.run_script(id, "location.reload();");
    }

    fn go_back(&mut self, id: WindowId) {
        if let Some(native) = self.desktop.windows.get_mut(&id) {
            native.session.traversing(Traversal::Back);
        }
        self.desktop.run_script(id, "history.back();");
    }

    fn go_forward(&mut self, id: WindowId) {
        if let Some(native) = self.desktop.windows.get_mut(&id) {
            native.session.traversing(Traversal::Forward);
        }
        self.desktop.run_script(id, "history.forward();");
    }

    fn toggle_devtools(&mut self, id: WindowId) {
        if let Some(webview) = self.desktop.webview(id) {
            if webview.is_devtools_open() {
                webview.close_devtools();
            } else {
                webview.open_devtools();
            }
        }
    }

    fn popup_context_menu(&mut self, id: WindowId, model: &ContextMenuModel) -> TetherResult<()> {
        if !self.desktop.windows.contains_key(&id) {
            return Err(TetherError::UnknownWindow(id));
        }

        let (native_menu, pending) = menu::build_native_menu(id, model)?;
        // Item events may arrive while the popup below is still running
        // (it is modal on Windows and macOS), so the table goes in first.
        let shown = native_menu.clone();
        self.desktop.context_menu = Some((native_menu, pending));

        let native = &self.desktop.windows[&id];
        self.desktop
            .platform
            .show_context_menu(&native.window, &shown)
            .map_err(|e| TetherError::menu(e.to_string()))
    }

    fn write_clipboard(&mut self, text: &str) -> TetherResult<()> {
        self.desktop
            .clipboard
            .copy(text)
            .map_err(|e| TetherError::clipboard(e.to_string()))
    }

    fn open_external(&mut self, url: &Url) -> TetherResult<()> {
        info!("Opening {} in the system browser", url);
        self.desktop
            .platform
            .open_external(url.as_str())
            .map_err(|e| TetherError::platform(e.to_string()))
    }

    fn set_app_id(&mut self, app_id: &str) -> TetherResult<()> {
        self.desktop
            .platform
            .set_app_id(app_id)
            .map_err(|e| TetherError::platform(e.to_string()))
    }

    fn keeps_running_without_windows(&self) -> bool {
        self.desktop.platform.capabilities().keeps_running_without_windows
    }

    fn quit(&mut self) {
        info!("Exit requested");
        self.desktop.exit_requested = true;
    }
}

/// wry content views only ever run isolated, unprivileged and without a menu
/// bar; a spec asking for anything else cannot be honoured
fn check_content_policy(spec: &WindowSpec) -> TetherResult<()> {
    if !spec.content_isolation || spec.privileged_scripts {
        return Err(TetherError::webview(format!(
            "{}: page scripts always run isolated without host privileges",
            spec.id
        )));
    }
    if spec.menu_bar {
        return Err(TetherError::window_creation(format!(
            "{}: managed windows have no menu bar",
            spec.id
        )));
    }
    Ok(())
}

fn build_webview(
    spec: &WindowSpec,
    window: &Window,
    proxy: &EventLoopProxy<UserEvent>,
) -> TetherResult<WebView> {
    let id = spec.id;
    let ipc_proxy = proxy.clone();
    let load_proxy = proxy.clone();

    let mut builder = WebViewBuilder::new()
        .with_url(spec.url.as_str())
        .with_devtools(spec.devtools)
        .with_clipboard(true)
        .with_initialization_script(&bridge::bridge_script(&spec.behaviors))
        .with_ipc_handler(move |request| match IpcMessage::parse(request.body()) {
            Ok(msg) => {
                let _ = ipc_proxy.send_event(UserEvent::Ipc(id, msg));
            }
            Err(e) => warn!("Rejected IPC message from {}: {}", id, e),
        })
        .with_on_page_load_handler(move |event, url| {
            if let PageLoadEvent::Finished = event {
                let _ = load_proxy.send_event(UserEvent::PageLoaded(id, url));
            }
        });

    if spec.behaviors.navigation_interceptor {
        let popup_proxy = proxy.clone();
        builder = builder.with_new_window_req_handler(move |url| {
            let url = match Url::parse(&url) {
                Ok(url) => url,
                Err(e) => {
                    warn!("Denied new window for unparseable URL {:?}: {}", url, e);
                    return false;
                }
            };
            let request = NavigationRequest::new(url, Some(id));
            let decision = interceptor::decide(&request);
            let _ = popup_proxy.send_event(UserEvent::NewWindowRequested(request));
            decision.allows_default()
        });
    }

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;

        let vbox = window
            .default_vbox()
            .ok_or_else(|| TetherError::webview(format!("{} has no GTK container", id)))?;
        builder.build_gtk(vbox)
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(window);

    webview.map_err(|e| TetherError::webview(format!("{}: {}", id, e)))
}
