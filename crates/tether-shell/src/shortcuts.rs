//! Shortcut binder
//!
//! Alt+Left / Alt+Right navigate the window's history and never reach the
//! page. F12 toggles developer tools once the lifecycle controller has
//! enabled developer-tool shortcuts.

use crate::host::WindowHost;
use crate::Shell;
use tether_core::types::{Key, KeyInput, Modifiers, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Back,
    Forward,
    ToggleDevTools,
}

/// Whether an input event continues to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDisposition {
    Consumed,
    Forward,
}

pub fn classify(input: &KeyInput, devtools_shortcuts: bool) -> Option<Shortcut> {
    match (&input.key, input.modifiers) {
        (Key::ArrowLeft, Modifiers::ALT) => Some(Shortcut::Back),
        (Key::ArrowRight, Modifiers::ALT) => Some(Shortcut::Forward),
        (Key::F12, m) if m.is_empty() && devtools_shortcuts => Some(Shortcut::ToggleDevTools),
        _ => None,
    }
}

impl Shell {
    pub fn on_key_input(
        &mut self,
        host: &mut impl WindowHost,
        id: WindowId,
        input: &KeyInput,
    ) -> InputDisposition {
        let Some(window) = self.windows.get(&id) else {
            return InputDisposition::Forward;
        };
        if !window.behaviors.shortcuts {
            return InputDisposition::Forward;
        }

        let devtools = self.devtools_shortcuts && self.config.devtools_enabled;
        let Some(shortcut) = classify(input, devtools) else {
            return InputDisposition::Forward;
        };

        let history = host.history(id);
        match shortcut {
            Shortcut::Back if history.can_go_back => host.go_back(id),
            Shortcut::Forward if history.can_go_forward => host.go_forward(id),
            Shortcut::ToggleDevTools => host.toggle_devtools(id),
            _ => log::debug!("{:?} on {} with no history", shortcut, id),
        }
        InputDisposition::Consumed
    }
}
