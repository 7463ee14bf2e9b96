//! Generate payment link tool: creates a hosted checkout session.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::money::major_to_minor;
use crate::domains::tools::definitions::common::response::{pretty, require_str, unwrap_data};
use crate::domains::tools::definitions::common::validate::{validate_country, validate_currency};
use crate::domains::tools::definitions::common::{ArgReader, FromArguments};
use crate::domains::tools::{PaymentTool, ToolError};

pub(crate) const CHECKOUT_PATH: &str = "/checkout";

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PaymentLinkParams {
    #[schemars(description = "Invoice currency, ISO 4217 in uppercase (USD, EUR, ...)")]
    pub invoice_currency: String,

    #[schemars(description = "Amount in major units, e.g. 12.34")]
    pub payment_amount: f64,

    pub customer_name: String,

    pub customer_email: String,

    #[schemars(description = "ISO 3166 alpha-2 code, e.g. SG, IN, US")]
    pub customer_country: String,

    /// Short description shown on the checkout page.
    pub transaction_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutCustomer {
    pub name: String,
    pub email: String,
    pub country: String,
}

/// Outgoing checkout request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentLinkRequest {
    pub amount: i64,
    pub invoice_currency: String,
    pub transaction_description: String,
    pub customer_details: CheckoutCustomer,
}

impl FromArguments for PaymentLinkRequest {
    fn from_arguments(args: &JsonObject) -> Result<Self, ToolError> {
        let mut reader = ArgReader::new(args);
        let invoice_currency = reader.required_str("invoice_currency");
        let payment_amount = reader.required_f64("payment_amount");
        let name = reader.required_str("customer_name");
        let email = reader.required_str("customer_email");
        let country = reader.required_str("customer_country");
        let transaction_description = reader.required_str("transaction_description");
        reader.finish()?;

        validate_currency(&invoice_currency)?;
        validate_country(&country)?;

        Ok(Self {
            amount: major_to_minor(payment_amount),
            invoice_currency,
            transaction_description,
            customer_details: CheckoutCustomer {
                name,
                email,
                country,
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct PaymentLinkTool;

impl PaymentTool for PaymentLinkTool {
    const NAME: &'static str = "generate_payment_link_tool";
    const DESCRIPTION: &'static str =
        "Generate a Tazapay payment link (hosted checkout) for a customer";
    type Params = PaymentLinkParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let request = PaymentLinkRequest::from_arguments(args)?;
            let body = serde_json::to_value(&request)
                .map_err(|e| ToolError::internal(format!("failed to encode checkout: {e}")))?;

            let response = client
                .send(Method::POST, CHECKOUT_PATH, Some(body))
                .await
                .map_err(|e| ToolError::api("payment link request failed", e))?;
            let data = unwrap_data(response)?;
            let url = require_str(&data, "url")?;
            let id = require_str(&data, "id")?;
            info!(checkout_id = %id, "Payment link generated");

            Ok(format!(
                "Payment Link URL: {url}\nPayment Link ID: {id}\nFull Data: {}",
                pretty(&data)?
            ))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::testing::{RecordingClient, args};
    use serde_json::json;

    fn scenario_args() -> serde_json::Value {
        json!({
            "invoice_currency": "USD",
            "payment_amount": 12.34,
            "customer_name": "A",
            "customer_email": "a@b.com",
            "customer_country": "US",
            "transaction_description": "test"
        })
    }

    #[tokio::test]
    async fn test_payment_link_end_to_end() {
        let client = RecordingClient::responding(json!({
            "status": "success",
            "data": { "url": "https://pay/x", "id": "chk_1" }
        }));
        let text = PaymentLinkTool::handle(&client, &args(scenario_args()))
            .await
            .unwrap();
        assert!(text.starts_with("Payment Link URL: https://pay/x\nPayment Link ID: chk_1\nFull Data: {"));

        let call = client.single_call();
        assert_eq!(call.method, Method::POST);
        assert_eq!(call.path, "/checkout");
        assert_eq!(
            call.body.unwrap(),
            json!({
                "amount": 1234,
                "invoice_currency": "USD",
                "transaction_description": "test",
                "customer_details": { "name": "A", "email": "a@b.com", "country": "US" }
            })
        );
    }

    #[tokio::test]
    async fn test_missing_url_in_response() {
        let client = RecordingClient::responding(json!({ "data": { "id": "chk_1" } }));
        let err = PaymentLinkTool::handle(&client, &args(scenario_args()))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::MissingResponseField("url")));
    }

    #[tokio::test]
    async fn test_local_validation() {
        let client = RecordingClient::responding(json!({}));

        let mut raw = scenario_args();
        raw["payment_amount"] = json!("12.34");
        let err = PaymentLinkTool::handle(&client, &args(raw)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid type for field 'payment_amount': expected number"
        );

        let mut raw = scenario_args();
        raw["customer_country"] = json!("us");
        let err = PaymentLinkTool::handle(&client, &args(raw)).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidCountryFormat(_)));
        assert!(client.calls().is_empty());
    }
}
