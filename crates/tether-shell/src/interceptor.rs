//! Navigation interceptor
//!
//! Hosted content never gets an uncontrolled toolkit window. Each popup
//! request is denied and replaced by a managed child window.

use crate::host::WindowHost;
use crate::window::{ShowPolicy, WindowOptions, WindowRole};
use crate::Shell;
use tether_core::types::NavigationRequest;

/// Answer given to the toolkit for a "new window requested" signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewWindowDecision {
    /// Suppress the toolkit's own popup
    Deny,
    /// Let the toolkit open the popup itself
    Allow,
}

impl NewWindowDecision {
    /// The boolean wry's new-window handler expects
    pub fn allows_default(self) -> bool {
        self == NewWindowDecision::Allow
    }
}

pub fn decide(_request: &NavigationRequest) -> NewWindowDecision {
    NewWindowDecision::Deny
}

impl Shell {
    pub fn on_new_window_requested(
        &mut self,
        host: &mut impl WindowHost,
        request: NavigationRequest,
    ) -> NewWindowDecision {
        let Some(origin) = request.origin.and_then(|id| self.windows.get(&id)) else {
            log::warn!(
                "New window request for {} from unknown window {:?}, denied",
                request.url,
                request.origin
            );
            return NewWindowDecision::Deny;
        };
        if !origin.behaviors.navigation_interceptor {
            return NewWindowDecision::Allow;
        }
        let origin_id = origin.id;

        let decision = decide(&request);
        if decision == NewWindowDecision::Deny {
            let options = WindowOptions {
                url: request.url.clone(),
                size: self.config.popup_size,
                role: WindowRole::Popup,
                parent: Some(origin_id),
                show: ShowPolicy::OnReady,
            };
            match self.create_managed_window(host, options) {
                Ok(child) => log::info!(
                    "New window request {} from {} -> managed window {}",
                    request.url,
                    origin_id,
                    child
                ),
                Err(e) => log::error!("Failed to open popup {}: {}", request.url, e),
            }
        }
        decision
    }
}
