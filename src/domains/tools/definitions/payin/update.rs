//! Update payin tool. Fields other than `id` are forwarded unchanged.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use super::create::{ContactDetails, PAYIN_PATH};
use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::response::{require_str, unwrap_data};
use crate::domains::tools::definitions::common::validate::{PAYIN_PREFIX, validate_id_prefix};
use crate::domains::tools::definitions::common::{ArgReader, FromArguments};
use crate::domains::tools::{PaymentTool, ToolError};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdatePayinParams {
    /// ID of the payin (must start with pay_).
    pub id: String,
    pub customer_details: Option<JsonObject>,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
    pub shipping_details: Option<ContactDetails>,
    pub billing_details: Option<ContactDetails>,
    pub transaction_documents: Option<Value>,
    pub metadata: Option<JsonObject>,
    pub reference_id: Option<String>,
    pub statement_descriptor: Option<String>,
    pub payment_method_details: Option<JsonObject>,
}

/// Payin ID plus the body of a payin mutation.
#[derive(Debug, Clone)]
pub struct PayinMutation {
    pub id: String,
    pub body: JsonObject,
}

impl FromArguments for PayinMutation {
    fn from_arguments(args: &JsonObject) -> Result<Self, ToolError> {
        let mut reader = ArgReader::new(args);
        let id = reader.required_str("id");
        let body = reader.rest(&["id"]);
        reader.finish()?;
        validate_id_prefix(PAYIN_PREFIX, &id)?;
        Ok(Self { id, body })
    }
}

#[derive(Debug, Clone)]
pub struct UpdatePayinTool;

impl PaymentTool for UpdatePayinTool {
    const NAME: &'static str = "update_payin_tool";
    const DESCRIPTION: &'static str = "Update a payin on Tazapay without confirming it";
    type Params = UpdatePayinParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let update = PayinMutation::from_arguments(args)?;
            let response = client
                .send(
                    Method::PUT,
                    &format!("{PAYIN_PATH}/{}", update.id),
                    Some(Value::Object(update.body)),
                )
                .await
                .map_err(|e| ToolError::api("update payin request failed", e))?;
            let data = unwrap_data(response)?;
            Ok(format!("Payin updated. Status: {}", require_str(&data, "status")?))
        }
        .boxed()
    }
}
