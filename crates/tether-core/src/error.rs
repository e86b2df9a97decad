//! Error types for Tether

use crate::types::WindowId;
use thiserror::Error;

/// Result type alias for Tether operations
pub type TetherResult<T> = Result<T, TetherError>;

/// Main error type for Tether
#[derive(Error, Debug)]
pub enum TetherError {
    #[error("Window creation error: {0}")]
    WindowCreation(String),

    #[error("WebView error: {0}")]
    WebView(String),

    #[error("Menu error: {0}")]
    Menu(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Unknown window: {0}")]
    UnknownWindow(WindowId),

    #[error("Standard behaviors already attached to window {0}")]
    BehaviorsAlreadyAttached(WindowId),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TetherError {
    /// Create a new window creation error
    pub fn window_creation(msg: impl Into<String>) -> Self {
        Self::WindowCreation(msg.into())
    }

    /// Create a new WebView error
    pub fn webview(msg: impl Into<String>) -> Self {
        Self::WebView(msg.into())
    }

    /// Create a new menu error
    pub fn menu(msg: impl Into<String>) -> Self {
        Self::Menu(msg.into())
    }

    /// Create a new clipboard error
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }

    /// Create a new platform error
    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TetherError::window_creation("no display");
        assert_eq!(err.to_string(), "Window creation error: no display");

        let err = TetherError::BehaviorsAlreadyAttached(WindowId(7));
        assert_eq!(
            err.to_string(),
            "Standard behaviors already attached to window win-7"
        );
    }
}
