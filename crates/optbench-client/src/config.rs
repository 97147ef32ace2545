//! Backend connection settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default backend address.
pub const DEFAULT_BACKEND_URL: &str = "https://localhost:7083";

/// Where the backend lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL, e.g. `https://localhost:7083`
    pub base_url: String,
    /// Accept self-signed TLS certificates (local development backends)
    pub accept_invalid_certs: bool,
    /// Per-request timeout; `None` waits as long as the transport allows
    pub timeout: Option<Duration>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            base_url: std::env::var("OPTBENCH_BACKEND_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string()),
            accept_invalid_certs: std::env::var("OPTBENCH_ACCEPT_INVALID_CERTS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            timeout: std::env::var("OPTBENCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}

impl GatewayConfig {
    /// Read settings from `OPTBENCH_*` environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Config for a specific backend, ignoring the environment
    pub fn new(base_url: &str) -> Self {
        GatewayConfig {
            base_url: base_url.to_string(),
            accept_invalid_certs: false,
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
