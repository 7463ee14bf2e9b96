//! Server configuration, read once at startup from the environment (and a
//! `.env` file when present).

use super::error::{Error, Result};
use super::transport::TransportConfig;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Production endpoint of the Tazapay v3 API.
pub const DEFAULT_TAZAPAY_BASE_URL: &str = "https://service.tazapay.com/v3";

/// Default timeout applied to every backend request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub transport: TransportConfig,
    /// Tazapay API endpoint and credentials.
    pub tazapay: TazapayConfig,
}

/// Identity reported to MCP clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset, e.g. "info" or "debug".
    pub level: String,
    /// `MCP_LOG_TIMESTAMPS=false` drops timestamps from log lines.
    pub with_timestamps: bool,
}

/// Tazapay API configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct TazapayConfig {
    /// Base URL every request path is appended to.
    pub base_url: String,

    /// API key issued by Tazapay.
    pub api_key: Option<String>,

    /// API secret paired with `api_key`.
    pub api_secret: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

// Credentials never reach the logs.
impl std::fmt::Debug for TazapayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TazapayConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for TazapayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TAZAPAY_BASE_URL.to_string(),
            api_key: None,
            api_secret: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl TazapayConfig {
    /// Encode the key/secret pair into the token sent as `Authorization: Basic <token>`.
    pub fn auth_token(&self) -> Result<String> {
        match (self.api_key.as_deref(), self.api_secret.as_deref()) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
                Ok(STANDARD.encode(format!("{key}:{secret}")))
            }
            _ => Err(Error::config(
                "TAZAPAY_API_KEY or TAZAPAY_API_SECRET not set",
            )),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "tazapay-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            tazapay: TazapayConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Server settings are prefixed with `MCP_` (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, ...). Credentials use `TAZAPAY_API_KEY` and
    /// `TAZAPAY_API_SECRET`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        let var = |key: &str| std::env::var(key).ok();

        if let Some(name) = var("MCP_SERVER_NAME") {
            config.server.name = name;
        }
        if let Some(level) = var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(flag) = var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = !matches!(flag.as_str(), "false" | "0" | "no");
        }

        config.transport = TransportConfig::from_env();

        if let Some(base_url) = var("MCP_TAZAPAY_BASE_URL") {
            config.tazapay.base_url = base_url;
        }
        if let Some(timeout) = var("MCP_TAZAPAY_TIMEOUT_SECS") {
            config.tazapay.timeout_secs = timeout.parse().unwrap_or(DEFAULT_TIMEOUT_SECS);
        }

        // Missing credentials are reported when the client is built.
        config.tazapay.api_key = var("TAZAPAY_API_KEY");
        config.tazapay.api_secret = var("TAZAPAY_API_SECRET");

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests touching the process environment take this lock.
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_credentials_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("TAZAPAY_API_KEY", "ak_test");
            std::env::set_var("TAZAPAY_API_SECRET", "sk_test");
        }
        let config = Config::from_env();
        assert_eq!(config.tazapay.api_key.as_deref(), Some("ak_test"));
        assert_eq!(config.tazapay.api_secret.as_deref(), Some("sk_test"));
        unsafe {
            std::env::remove_var("TAZAPAY_API_KEY");
            std::env::remove_var("TAZAPAY_API_SECRET");
        }
    }

    #[test]
    fn test_base_url_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("MCP_TAZAPAY_BASE_URL");
        }
        let config = Config::from_env();
        assert_eq!(config.tazapay.base_url, DEFAULT_TAZAPAY_BASE_URL);
        assert_eq!(config.tazapay.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_auth_token_encoding() {
        let tazapay = TazapayConfig {
            api_key: Some("key".to_string()),
            api_secret: Some("secret".to_string()),
            ..Default::default()
        };
        // base64("key:secret")
        assert_eq!(tazapay.auth_token().unwrap(), "a2V5OnNlY3JldA==");
    }

    #[test]
    fn test_auth_token_requires_both_parts() {
        let tazapay = TazapayConfig {
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        let err = tazapay.auth_token().unwrap_err();
        assert!(err.to_string().contains("TAZAPAY_API_SECRET"));

        let empty = TazapayConfig {
            api_key: Some(String::new()),
            api_secret: Some("secret".to_string()),
            ..Default::default()
        };
        assert!(empty.auth_token().is_err());
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let tazapay = TazapayConfig {
            api_key: Some("super_secret_key".to_string()),
            api_secret: Some("super_secret_value".to_string()),
            ..Default::default()
        };
        let debug_str = format!("{:?}", tazapay);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
        assert!(!debug_str.contains("super_secret_value"));
    }
}
