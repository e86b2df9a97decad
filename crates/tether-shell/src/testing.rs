//! Recording `WindowHost` for unit tests

use crate::context_menu::ContextMenuModel;
use crate::host::{WindowHost, WindowSpec};
use std::collections::HashMap;
use tether_core::types::{HistoryState, WindowId};
use tether_core::{TetherError, TetherResult};
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Create(WindowSpec),
    Show(WindowId),
    Maximize(WindowId),
    Close(WindowId),
    Reload(WindowId),
    GoBack(WindowId),
    GoForward(WindowId),
    ToggleDevTools(WindowId),
    Popup(WindowId, ContextMenuModel),
    Clipboard(String),
    OpenExternal(Url),
    SetAppId(String),
    Quit,
}

#[derive(Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
    pub history: HashMap<WindowId, HistoryState>,
    pub persistent: bool,
    pub fail_create: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn persistent() -> Self {
        Self {
            persistent: true,
            ..Self::default()
        }
    }

    pub fn created(&self) -> Vec<&WindowSpec> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Create(spec) => Some(spec),
                _ => None,
            })
            .collect()
    }

    pub fn last_created(&self) -> &WindowSpec {
        self.created().pop().expect("no window created")
    }

    pub fn count(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl WindowHost for RecordingHost {
    fn create_window(&mut self, spec: &WindowSpec) -> TetherResult<()> {
        if self.fail_create {
            return Err(TetherError::window_creation("refused by test host"));
        }
        self.calls.push(HostCall::Create(spec.clone()));
        Ok(())
    }

    fn show_window(&mut self, window: WindowId) {
        self.calls.push(HostCall::Show(window));
    }

    fn maximize_window(&mut self, window: WindowId) {
        self.calls.push(HostCall::Maximize(window));
    }

    fn close_window(&mut self, window: WindowId) {
        self.calls.push(HostCall::Close(window));
    }

    fn history(&self, window: WindowId) -> HistoryState {
        self.history.get(&window).copied().unwrap_or_default()
    }

    fn reload(&mut self, window: WindowId) {
        self.calls.push(HostCall::Reload(window));
    }

    fn go_back(&mut self, window: WindowId) {
        self.calls.push(HostCall::GoBack(window));
    }

    fn go_forward(&mut self, window: WindowId) {
        self.calls.push(HostCall::GoForward(window));
    }

    fn toggle_devtools(&mut self, window: WindowId) {
        self.calls.push(HostCall::ToggleDevTools(window));
    }

    fn popup_context_menu(&mut self, window: WindowId, menu: &ContextMenuModel) -> TetherResult<()> {
        self.calls.push(HostCall::Popup(window, menu.clone()));
        Ok(())
    }

    fn write_clipboard(&mut self, text: &str) -> TetherResult<()> {
        self.calls.push(HostCall::Clipboard(text.to_string()));
        Ok(())
    }

    fn open_external(&mut self, url: &Url) -> TetherResult<()> {
        self.calls.push(HostCall::OpenExternal(url.clone()));
        Ok(())
    }

    fn set_app_id(&mut self, app_id: &str) -> TetherResult<()> {
        self.calls.push(HostCall::SetAppId(app_id.to_string()));
        Ok(())
    }

    fn keeps_running_without_windows(&self) -> bool {
        self.persistent
    }

    fn quit(&mut self) {
        self.calls.push(HostCall::Quit);
    }
}
