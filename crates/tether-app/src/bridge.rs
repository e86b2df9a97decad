//! Page bridge between hosted content and the shell
//!
//! wry exposes neither the click target of a context menu nor raw key
//! events, so every managed window gets an initialization script that
//! reports them over `window.ipc`. Back/forward availability is included
//! where the Navigation API can tell; same-document URL changes are reported
//! so the desktop can keep its own session history everywhere else.

use serde::Deserialize;
use tether_core::types::{ContextMenuContext, HistoryState, Key, KeyInput, Modifiers};
use tether_shell::Behaviors;
use tracing::debug;
use url::Url;

/// Back/forward availability as the page sees it; `None` without the Navigation API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportedHistory {
    pub can_go_back: Option<bool>,
    pub can_go_forward: Option<bool>,
}

impl ReportedHistory {
    pub fn known(&self) -> Option<HistoryState> {
        Some(HistoryState::new(self.can_go_back?, self.can_go_forward?))
    }
}

/// IPC message from the page bridge to Rust
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum IpcMessage {
    ContextMenu {
        link_url: Option<String>,
        selection_text: Option<String>,
        #[serde(flatten)]
        history: ReportedHistory,
    },
    KeyInput {
        key: String,
        #[serde(default)]
        alt: bool,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        meta: bool,
        #[serde(flatten)]
        history: ReportedHistory,
    },
    History {
        #[serde(flatten)]
        history: ReportedHistory,
    },
    /// Same-document navigation (`pushState`, `replaceState`, fragment, `popstate`)
    Navigated {
        url: String,
        #[serde(default)]
        replace: bool,
    },
}

impl IpcMessage {
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// History state reported by the page, when it could determine it
    pub fn history(&self) -> Option<HistoryState> {
        match self {
            IpcMessage::ContextMenu { history, .. }
            | IpcMessage::KeyInput { history, .. }
            | IpcMessage::History { history } => history.known(),
            IpcMessage::Navigated { .. } => None,
        }
    }

    pub fn context_menu_context(&self) -> Option<ContextMenuContext> {
        let IpcMessage::ContextMenu {
            link_url,
            selection_text,
            ..
        } = self
        else {
            return None;
        };

        let link = link_url.as_deref().and_then(parse_link);
        Some(ContextMenuContext::new(link, selection_text.clone()))
    }

    pub fn key_input(&self) -> Option<KeyInput> {
        let IpcMessage::KeyInput {
            key,
            alt,
            ctrl,
            shift,
            meta,
            ..
        } = self
        else {
            return None;
        };

        let modifiers = Modifiers {
            alt: *alt,
            ctrl: *ctrl,
            shift: *shift,
            meta: *meta,
        };
        Some(KeyInput::new(Key::from_dom(key), modifiers))
    }
}

/// Links the shell can act on; script and malformed hrefs are treated as no link
fn parse_link(href: &str) -> Option<Url> {
    match Url::parse(href) {
        Ok(url) if url.scheme() != "javascript" => Some(url),
        Ok(_) => None,
        Err(e) => {
            debug!("Ignoring unparseable link {:?}: {}", href, e);
            None
        }
    }
}

const BRIDGE_PRELUDE: &str = r#"
(function() {
    if (window.__tetherBridge) { return; }
    window.__tetherBridge = true;

    const post = (msg) => window.ipc.postMessage(JSON.stringify(msg));
    const historyState = () => {
        const nav = window.navigation;
        const known = nav && typeof nav.canGoBack === 'boolean';
        return {
            can_go_back: known ? nav.canGoBack : null,
            can_go_forward: known ? nav.canGoForward : null,
        };
    };
    const reportHistory = () => post(Object.assign({ cmd: 'history' }, historyState()));
    const reportUrl = (replace) => post({ cmd: 'navigated', url: String(location.href), replace: replace });

    ['pushState', 'replaceState'].forEach((name) => {
        const native = window.history[name];
        window.history[name] = function() {
            const result = native.apply(this, arguments);
            reportUrl(name === 'replaceState');
            reportHistory();
            return result;
        };
    });

    window.addEventListener('load', reportHistory);
    window.addEventListener('pageshow', reportHistory);
    window.addEventListener('popstate', () => {
        reportUrl(false);
        reportHistory();
    });
    if (window.navigation) {
        window.navigation.addEventListener('navigatesuccess', reportHistory);
    }
"#;

const CONTEXT_MENU_HOOK: &str = r#"
    document.addEventListener('contextmenu', (event) => {
        event.preventDefault();
        const anchor = event.target instanceof Element
            ? event.target.closest('a[href]')
            : null;
        const selection = window.getSelection ? String(window.getSelection()) : '';
        post(Object.assign({
            cmd: 'context_menu',
            link_url: anchor ? anchor.href : null,
            selection_text: selection || null,
        }, historyState()));
    }, true);
"#;

const SHORTCUT_HOOK: &str = r#"
    window.addEventListener('keydown', (event) => {
        const plainAlt = event.altKey && !event.ctrlKey && !event.metaKey && !event.shiftKey;
        const noMods = !event.altKey && !event.ctrlKey && !event.metaKey && !event.shiftKey;
        const navigation = plainAlt && (event.key === 'ArrowLeft' || event.key === 'ArrowRight');
        const devtools = noMods && event.key === 'F12';
        if (!navigation && !devtools) { return; }
        event.preventDefault();
        event.stopImmediatePropagation();
        post(Object.assign({
            cmd: 'key_input',
            key: event.key,
            alt: event.altKey,
            ctrl: event.ctrlKey,
            shift: event.shiftKey,
            meta: event.metaKey,
        }, historyState()));
    }, true);
"#;

const BRIDGE_EPILOGUE: &str = "})();\n";

/// Initialization script for a window with the given behaviors
pub fn bridge_script(behaviors: &Behaviors) -> String {
    let mut script = String::from(BRIDGE_PRELUDE);
    if behaviors.context_menu {
        script.push_str(CONTEXT_MENU_HOOK);
    }
    if behaviors.shortcuts {
        script.push_str(SHORTCUT_HOOK);
    }
    script.push_str(BRIDGE_EPILOGUE);
    script
}
