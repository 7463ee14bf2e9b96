//! Fetch checkout tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;
use schemars::JsonSchema;
use serde::Deserialize;

use super::payment_link::CHECKOUT_PATH;
use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::id_argument;
use crate::domains::tools::definitions::common::response::{convert_amount, pretty, unwrap_data};
use crate::domains::tools::{PaymentTool, ToolError};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CheckoutIdParams {
    /// ID of the checkout session.
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct FetchCheckoutTool;

impl PaymentTool for FetchCheckoutTool {
    const NAME: &'static str = "fetch_checkout_tool";
    const DESCRIPTION: &'static str = "Fetch the details of a checkout session by ID from Tazapay";
    type Params = CheckoutIdParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let id = id_argument(args, None)?;
            let response = client
                .send(Method::GET, &format!("{CHECKOUT_PATH}/{id}"), None)
                .await
                .map_err(|e| ToolError::api("fetch checkout request failed", e))?;
            let mut data = unwrap_data(response)?;
            convert_amount(&mut data);
            Ok(format!("Checkout session data: {}", pretty(&data)?))
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
    async fn test_fetch_checkout() {
        let client = RecordingClient::responding(json!({
            "data": { "id": "chk_1", "amount": 1999, "invoice_currency": "USD" }
        }));
        let text = FetchCheckoutTool::handle(&client, &args(json!({ "id": "chk_1" })))
            .await
            .unwrap();
        assert_eq!(client.single_call().path, "/checkout/chk_1");

        let json_part = text.strip_prefix("Checkout session data: ").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(json_part).unwrap();
        assert_eq!(parsed["amount"], json!(19.99));
        assert_eq!(parsed["amount_original"], json!(1999));
    }

    #[tokio::test]
    async fn test_empty_id_is_missing() {
        let client = RecordingClient::responding(json!({}));
        let err = FetchCheckoutTool::handle(&client, &args(json!({ "id": "" })))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required fields: id");
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_id_must_be_one_segment() {
        let client = RecordingClient::responding(json!({ "data": {} }));
        let err = FetchCheckoutTool::handle(&client, &args(json!({ "id": "../balance" })))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidIdCharacters(_)));
        assert!(client.calls().is_empty());
    }
}
