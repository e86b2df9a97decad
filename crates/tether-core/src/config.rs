//! Shell configuration

use crate::types::WindowSize;
use serde::{Deserialize, Serialize};
use url::Url;

/// The hosted application. Every top-level window loads this.
pub const HOME_URL: &str = "https://oauth.swiftmm.cn/home";

/// Shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Page loaded by every top-level window
    pub home_url: Url,

    /// Platform application identifier (AppUserModelID on Windows)
    pub app_id: String,

    /// Window title
    pub title: String,

    /// Initial size of top-level windows
    pub window_size: WindowSize,

    /// Initial size of windows spawned from popup requests
    pub popup_size: WindowSize,

    /// Allow the developer tools toggle (menu entry and F12)
    pub devtools_enabled: bool,

    /// Popup windows also intercept their own popup requests
    pub nested_popups: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            home_url: Url::parse(HOME_URL).expect("HOME_URL is a valid URL"),
            app_id: "cn.swiftmm.tether".to_string(),
            title: "Tether".to_string(),
            window_size: WindowSize::new(800.0, 600.0),
            popup_size: WindowSize::new(1000.0, 700.0),
            devtools_enabled: true,
            nested_popups: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShellConfig::default();
        assert_eq!(config.home_url.as_str(), HOME_URL);
        assert_eq!(config.window_size, WindowSize::new(800.0, 600.0));
        assert_eq!(config.popup_size, WindowSize::new(1000.0, 700.0));
        assert!(config.nested_popups);
    }

    #[test]
    fn test_config_serializes() {
        let json = serde_json::to_value(ShellConfig::default()).unwrap();
        assert_eq!(json["home_url"], HOME_URL);
        assert_eq!(json["popup_size"]["width"], 1000.0);
    }
}
