//! TOML file configuration structures.
//!
//! These structs directly map to the `paylink.toml` file format. Every
//! field has a default, so an empty or missing file is valid.

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// Payment gateway section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// API root, including the version prefix.
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse("https://backend.payglobal.co.in/api/v1").expect("valid default base url")
}

fn default_timeout_secs() -> u64 {
    30
}

/// How payment links are opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Launch the browser command on redirect instead of only printing.
    #[serde(default)]
    pub open: bool,
    /// Program invoked with the link as its only argument.
    #[serde(default = "default_browser_command")]
    pub command: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            open: false,
            command: default_browser_command(),
        }
    }
}

fn default_browser_command() -> String {
    "xdg-open".to_owned()
}
