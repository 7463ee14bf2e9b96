//! In-memory [`ApiClient`] for tool tests.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::core::client::{ApiClient, ApiError, JsonObject};

/// One captured request.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Records every request and answers with a canned response.
pub struct RecordingClient {
    response: Result<Value, (StatusCode, String)>,
    calls: Mutex<Vec<Recorded>>,
}

impl RecordingClient {
    pub fn responding(response: Value) -> Self {
        Self {
            response: Ok(response),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            response: Err((
                StatusCode::from_u16(status).unwrap(),
                body.to_string(),
            )),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    /// The only request made; panics unless exactly one was sent.
    pub fn single_call(&self) -> Recorded {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one request, got {calls:?}");
        calls.into_iter().next().unwrap()
    }
}

#[async_trait]
impl ApiClient for RecordingClient {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<JsonObject, ApiError> {
        self.calls.lock().unwrap().push(Recorded {
            method,
            path: path.to_string(),
            body,
        });
        match &self.response {
            Ok(Value::Object(map)) => Ok(map.clone()),
            Ok(other) => Err(ApiError::Decode(
                serde_json::from_value::<JsonObject>(other.clone()).unwrap_err(),
            )),
            Err((status, body)) => Err(ApiError::Status {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

/// Build an argument map from a `json!` literal.
pub fn args(value: Value) -> JsonObject {
    value.as_object().cloned().unwrap()
}
