//! Startup and infrastructure errors.
//!
//! Tool failures never surface here: they are rendered as tool results by the
//! tools domain. This type covers what can stop the server itself.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unusable configuration, e.g. absent Tazapay credentials.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The Tazapay HTTP client could not be built.
    #[error("API client error: {0}")]
    Client(#[from] crate::core::client::ApiError),

    #[error("Transport error: {0}")]
    Transport(#[from] crate::core::transport::TransportError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = Error::config("TAZAPAY_API_KEY or TAZAPAY_API_SECRET not set");
        assert_eq!(
            err.to_string(),
            "Configuration error: TAZAPAY_API_KEY or TAZAPAY_API_SECRET not set"
        );
    }
}
