//! Runtime configuration
//!
//! Configuration is loaded from environment variables over built-in defaults.
//! Unparseable values are ignored and the default is kept.

use std::env;
use std::time::Duration;

/// Main configuration, shared by the service and the client binaries
#[derive(Debug, Clone)]
pub struct Config {
    /// Service bind address
    pub host: String,
    /// Service port
    pub port: u16,

    /// Client-side settings
    pub client: ClientConfig,
}

/// Client-related configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the counting service
    pub inference_url: String,
    /// Quiet period before a burst of edits triggers a request
    pub debounce: Duration,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            client: ClientConfig::default(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            inference_url: "http://127.0.0.1:8000".to_string(),
            debounce: Duration::from_millis(150),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Service config
        if let Ok(host) = env::var("HOST")
            && !host.is_empty()
        {
            config.host = host;
        }
        if let Ok(port) = env::var("PORT")
            && let Ok(p) = port.parse()
        {
            config.port = p;
        }

        // Client config
        if let Ok(url) = env::var("INFERENCE_URL")
            && !url.is_empty()
        {
            config.client.inference_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(val) = env::var("DEBOUNCE_MS")
            && let Ok(ms) = val.parse::<u64>()
        {
            config.client.debounce = Duration::from_millis(ms);
        }
        if let Ok(val) = env::var("REQUEST_TIMEOUT_SECS")
            && let Ok(secs) = val.parse::<u64>()
        {
            config.client.request_timeout = Duration::from_secs(secs);
        }

        config
    }
}
