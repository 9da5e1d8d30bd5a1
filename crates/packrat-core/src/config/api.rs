//! Inventory API endpoint configuration.

use serde::{Deserialize, Serialize};

/// Settings for reaching the inventory service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the inventory API, including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds. There is no automatic retry; a failed
    /// request is surfaced to the caller, who may retry.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("packrat/{}", env!("CARGO_PKG_VERSION"))
}
