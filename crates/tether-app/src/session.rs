//! Per-window session history
//!
//! WebKitGTK and older WKWebView builds have no Navigation API, so the page
//! cannot say whether it can go forward. The desktop keeps its own stack of
//! committed URLs per window, fed by page loads, same-document navigations
//! reported by the bridge, and the traversals the shell itself starts.

use tether_core::types::HistoryState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    Back,
    Forward,
}

#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    entries: Vec<String>,
    index: usize,
    pending: Option<Traversal>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HistoryState {
        HistoryState::new(self.index > 0, self.index + 1 < self.entries.len())
    }

    /// The shell asked the content view to go back or forward
    pub fn traversing(&mut self, traversal: Traversal) {
        let possible = match traversal {
            Traversal::Back => self.index > 0,
            Traversal::Forward => self.index + 1 < self.entries.len(),
        };
        if possible {
            self.pending = Some(traversal);
        }
    }

    /// A navigation to `url` committed in the main frame
    pub fn committed(&mut self, url: &str) {
        if self.entries.is_empty() {
            self.entries.push(url.to_string());
            self.index = 0;
            return;
        }

        match self.pending.take() {
            Some(Traversal::Back) => self.index -= 1,
            Some(Traversal::Forward) => self.index += 1,
            None if self.entries[self.index] == url => return,
            // Traversals started by the page itself
            None if self.index > 0 && self.entries[self.index - 1] == url => self.index -= 1,
            None if self.entries.get(self.index + 1).map(String::as_str) == Some(url) => {
                self.index += 1
            }
            None => {
                self.entries.truncate(self.index + 1);
                self.entries.push(url.to_string());
                self.index += 1;
                return;
            }
        }
        // Redirects may land a traversal on a different URL than recorded
        self.entries[self.index] = url.to_string();
    }

    /// The current entry's URL changed without a new entry (`replaceState`)
    pub fn replaced(&mut self, url: &str) {
        match self.entries.get_mut(self.index) {
            Some(entry) => *entry = url.to_string(),
            None => self.committed(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(urls: &[&str]) -> SessionHistory {
        let mut session = SessionHistory::new();
        for url in urls {
            session.committed(url);
        }
        session
    }

    #[test]
    fn test_first_load_has_no_history() {
        let session = session(&["https://a/"]);
        assert_eq!(session.state(), HistoryState::new(false, false));
        assert_eq!(SessionHistory::new().state(), HistoryState::default());
    }

    #[test]
    fn test_forward_available_after_going_back() {
        let mut session = session(&["https://a/", "https://b/"]);
        assert_eq!(session.state(), HistoryState::new(true, false));

        session.traversing(Traversal::Back);
        session.committed("https://a/");
        assert_eq!(session.state(), HistoryState::new(false, true));

        session.traversing(Traversal::Forward);
        session.committed("https://b/");
        assert_eq!(session.state(), HistoryState::new(true, false));
    }

    #[test]
    fn test_new_navigation_drops_forward_entries() {
        let mut session = session(&["https://a/", "https://b/", "https://c/"]);
        session.traversing(Traversal::Back);
        session.committed("https://b/");
        session.traversing(Traversal::Back);
        session.committed("https://a/");
        assert_eq!(session.state(), HistoryState::new(false, true));

        session.committed("https://d/");
        assert_eq!(session.state(), HistoryState::new(true, false));
        session.committed("https://a/");
        assert_eq!(session.state(), HistoryState::new(false, true));
    }

    #[test]
    fn test_page_initiated_traversal_is_recognized() {
        let mut session = session(&["https://a/", "https://b/"]);
        session.committed("https://a/");
        assert_eq!(session.state(), HistoryState::new(false, true));
        session.committed("https://b/");
        assert_eq!(session.state(), HistoryState::new(true, false));
    }

    #[test]
    fn test_reload_and_replace_keep_position() {
        let mut session = session(&["https://a/", "https://b/"]);
        session.committed("https://b/");
        assert_eq!(session.state(), HistoryState::new(true, false));

        session.replaced("https://b/#top");
        session.committed("https://b/#top");
        assert_eq!(session.state(), HistoryState::new(true, false));
    }

    #[test]
    fn test_impossible_traversal_is_not_pending() {
        let mut session = session(&["https://a/"]);
        session.traversing(Traversal::Back);
        session.committed("https://b/");
        assert_eq!(session.state(), HistoryState::new(true, false));
    }

    #[test]
    fn test_redirected_traversal_updates_entry() {
        let mut session = session(&["https://a/", "https://b/"]);
        session.traversing(Traversal::Back);
        session.committed("https://a/login");
        assert_eq!(session.state(), HistoryState::new(false, true));
        session.committed("https://b/");
        assert_eq!(session.state(), HistoryState::new(true, false));
    }
}
