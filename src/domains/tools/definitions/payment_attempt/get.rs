//! Get payment attempt tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::id_argument;
use crate::domains::tools::definitions::common::response::{convert_amount, pretty, unwrap_data};
use crate::domains::tools::definitions::common::validate::PAYMENT_ATTEMPT_PREFIX;
use crate::domains::tools::{PaymentTool, ToolError};

const PAYMENT_ATTEMPT_PATH: &str = "/payment_attempt";

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetPaymentAttemptParams {
    /// ID of the payment attempt (must start with pat_).
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct GetPaymentAttemptTool;

impl PaymentTool for GetPaymentAttemptTool {
    const NAME: &'static str = "get_payment_attempt_tool";
    const DESCRIPTION: &'static str = "Fetch a payment attempt by ID from Tazapay";
    type Params = GetPaymentAttemptParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let id = id_argument(args, Some(PAYMENT_ATTEMPT_PREFIX))?;
            let response = client
                .send(Method::GET, &format!("{PAYMENT_ATTEMPT_PATH}/{id}"), None)
                .await
                .map_err(|e| ToolError::api("get payment attempt request failed", e))?;
            let mut data = unwrap_data(response)?;
            convert_amount(&mut data);
            pretty(&data)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::testing::{RecordingClient, args};
    use serde_json::json;

    #[tokio::test]
    async fn test_get_payment_attempt() {
        let client = RecordingClient::responding(json!({
            "data": { "id": "pat_1", "amount": 250, "status": "succeeded" }
        }));
        let text = GetPaymentAttemptTool::handle(&client, &args(json!({ "id": "pat_1" })))
            .await
            .unwrap();

        let call = client.single_call();
        assert_eq!(call.method, Method::GET);
        assert_eq!(call.path, "/payment_attempt/pat_1");
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["amount"], json!(2.5));
    }

    #[tokio::test]
    async fn test_wrong_prefix() {
        let client = RecordingClient::responding(json!({}));
        let err = GetPaymentAttemptTool::handle(&client, &args(json!({ "id": "pay_1" })))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidIdFormat { prefix: "pat_", .. }));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_id_must_be_one_segment() {
        let client = RecordingClient::responding(json!({ "data": {} }));
        let err = GetPaymentAttemptTool::handle(&client, &args(json!({ "id": "pat_1/../../balance" })))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidIdCharacters(_)));
        assert!(client.calls().is_empty());
    }
}
