//! Common types used throughout Tether

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Unique identifier for a managed window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl WindowId {
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for WindowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "win-{}", self.0)
    }
}

/// Logical window size in device-independent pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: f64,
    pub height: f64,
}

impl WindowSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A single attempt by hosted content to open a new window or tab
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationRequest {
    pub url: Url,
    /// Window whose content issued the request
    pub origin: Option<WindowId>,
}

impl NavigationRequest {
    pub fn new(url: Url, origin: Option<WindowId>) -> Self {
        Self { url, origin }
    }
}

/// What the cursor was over when the context menu was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Plain page area
    Page,
    /// Non-empty text selection, no link
    Selection,
    /// A link, nothing selected
    Link,
    /// A link while text is selected
    LinkWithSelection,
}

/// Per-invocation record of a context menu request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextMenuContext {
    pub link_url: Option<Url>,
    pub selection_text: Option<String>,
}

impl ContextMenuContext {
    pub fn new(link_url: Option<Url>, selection_text: Option<String>) -> Self {
        Self {
            link_url,
            selection_text,
        }
    }

    /// Selected text, if any. Whitespace-only selections count as empty.
    pub fn selection(&self) -> Option<&str> {
        self.selection_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    pub fn target(&self) -> ClickTarget {
        match (self.link_url.is_some(), self.selection().is_some()) {
            (true, true) => ClickTarget::LinkWithSelection,
            (true, false) => ClickTarget::Link,
            (false, true) => ClickTarget::Selection,
            (false, false) => ClickTarget::Page,
        }
    }
}

/// Back/forward availability of a window's content view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryState {
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

impl HistoryState {
    pub const fn new(can_go_back: bool, can_go_forward: bool) -> Self {
        Self {
            can_go_back,
            can_go_forward,
        }
    }
}

/// Keys the shell cares about; everything else is passed through as `Other`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    F12,
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "F12" => Key::F12,
            other => Key::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const ALT: Modifiers = Modifiers {
        alt: true,
        ctrl: false,
        shift: false,
        meta: false,
    };

    pub fn is_empty(&self) -> bool {
        !(self.alt || self.ctrl || self.shift || self.meta)
    }
}

/// Raw keyboard input observed on a window's content view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}
