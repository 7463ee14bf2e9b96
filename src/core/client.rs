//! Tazapay API client.
//!
//! Tools never talk to the network directly: they hand a method, a path and an
//! optional JSON body to an [`ApiClient`] and get back the decoded JSON object.
//! [`TazapayClient`] is the reqwest-backed implementation used by the server;
//! tests substitute their own implementation of the trait.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, header};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

use super::config::TazapayConfig;

/// A JSON object as exchanged with the Tazapay API.
pub type JsonObject = serde_json::Map<String, Value>;

/// Errors produced while talking to the Tazapay API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be built (bad URL, bad header value, ...).
    #[error("error creating request: {0}")]
    Build(#[source] reqwest::Error),

    /// The request was sent but failed in flight (connect, timeout, ...).
    #[error("error making request: {0}")]
    Send(#[source] reqwest::Error),

    /// The response body could not be read.
    #[error("error reading response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    /// The server answered outside the 2xx range.
    #[error("non-success status: {status}, body: {body}")]
    Status { status: StatusCode, body: String },

    /// The response body was not a JSON object.
    #[error("error decoding response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// The single seam between tool handlers and the payment provider.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Perform one request against `path` (relative to the API base URL).
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<JsonObject, ApiError>;
}

/// reqwest-backed client for the Tazapay v3 API.
#[derive(Clone)]
pub struct TazapayClient {
    client: Client,
    base_url: String,
    auth_token: String,
}

impl std::fmt::Debug for TazapayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TazapayClient")
            .field("base_url", &self.base_url)
            .field("auth_token", &"[REDACTED]")
            .finish()
    }
}

impl TazapayClient {
    /// Create a client for `base_url` authenticating with a pre-encoded Basic token.
    pub fn new(
        base_url: impl Into<String>,
        auth_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: auth_token.into(),
        })
    }

    /// Create a client from the server configuration.
    pub fn from_config(config: &TazapayConfig) -> crate::core::Result<Self> {
        let token = config.auth_token()?;
        let client = Self::new(
            config.base_url.clone(),
            token,
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(client)
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ApiClient for TazapayClient {
    #[instrument(skip(self, body), fields(method = %method, path = %path))]
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<JsonObject, ApiError> {
        let mut request = self
            .client
            .request(method, self.url(path))
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Basic {}", self.auth_token));

        match body {
            Some(body) => {
                debug!(payload = %body, "Sending request with body");
                request = request.json(&body);
            }
            None => debug!("Sending request with empty body"),
        }

        let response = request.send().await.map_err(|e| {
            error!("HTTP request failed: {}", e);
            if e.is_builder() {
                ApiError::Build(e)
            } else {
                ApiError::Send(e)
            }
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!("Failed to read response body: {}", e);
            ApiError::ReadBody(e)
        })?;

        if !status.is_success() {
            error!(status = %status, body = %text, "Non-success HTTP response");
            return Err(ApiError::Status { status, body: text });
        }

        let json = serde_json::from_str::<JsonObject>(&text).map_err(|e| {
            error!("Failed to decode response JSON: {}", e);
            ApiError::Decode(e)
        })?;

        info!(status = %status, "Request successful");
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header as header_eq, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TazapayClient {
        TazapayClient::new(server.uri(), "dG9rZW4=", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_get_sends_auth_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/balance"))
            .and(header_eq("authorization", "Basic dG9rZW4="))
            .and(header_eq("accept", "application/json"))
            .and(header_eq("content-type", "application/json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "object": "balance" } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .send(Method::GET, "/balance", None)
            .await
            .unwrap();
        assert_eq!(result["data"]["object"], "balance");
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/checkout"))
            .and(body_json(json!({ "amount": 1234 })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": { "id": "chk_1" } })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .send(Method::POST, "/checkout", Some(json!({ "amount": 1234 })))
            .await
            .unwrap();
        assert_eq!(result["data"]["id"], "chk_1");
    }

    #[tokio::test]
    async fn test_query_string_is_preserved() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fx/payout"))
            .and(query_param("initial_currency", "USD"))
            .and(query_param("amount", "1000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .send(
                Method::GET,
                "/fx/payout?initial_currency=USD&final_currency=INR&amount=1000",
                None,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/payout/pot_1"))
            .respond_with(ResponseTemplate::new(500).set_body_string(r#"{"error":"boom"}"#))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .send(Method::GET, "/payout/pot_1", None)
            .await
            .unwrap_err();

        match &err {
            ApiError::Status { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, r#"{"error":"boom"}"#);
            }
            other => panic!("expected status error, got {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains(r#"{"error":"boom"}"#));
    }

    #[tokio::test]
    async fn test_non_object_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/balance"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .send(Method::GET, "/balance", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            TazapayClient::new("https://example.test/v3/", "t", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "https://example.test/v3");
        assert_eq!(client.url("/payin/pay_1"), "https://example.test/v3/payin/pay_1");
    }

    #[test]
    fn test_token_redacted_in_debug() {
        let client =
            TazapayClient::new("https://example.test", "secret-token", Duration::from_secs(1))
                .unwrap();
        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("secret-token"));
    }
}
