//! Confirm payin tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::create::{ContactDetails, PAYIN_PATH};
use super::update::PayinMutation;
use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::response::{require_str, unwrap_data};
use crate::domains::tools::definitions::common::validate::{PAYIN_PREFIX, validate_id_prefix};
use crate::domains::tools::definitions::common::{ArgReader, FromArguments};
use crate::domains::tools::{PaymentTool, ToolError};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConfirmPayinParams {
    /// ID of the payin (must start with pay_).
    pub id: String,
    #[schemars(description = "Customer reference, e.g. {\"customer\": \"cus_...\"}")]
    pub customer_details: JsonObject,
    pub success_url: String,
    pub cancel_url: String,
    pub shipping_details: Option<ContactDetails>,
    pub billing_details: Option<ContactDetails>,
    pub transaction_documents: Option<Value>,
    pub metadata: Option<JsonObject>,
    pub reference_id: Option<String>,
    pub statement_descriptor: Option<String>,
    pub payment_method_details: JsonObject,
    pub session_id: String,
}

/// Confirmation body: unlike an update, the payment fields are mandatory.
#[derive(Debug, Clone)]
pub struct PayinConfirmation(PayinMutation);

impl FromArguments for PayinConfirmation {
    fn from_arguments(args: &JsonObject) -> Result<Self, ToolError> {
        let mut reader = ArgReader::new(args);
        let id = reader.required_str("id");
        reader.required_object("customer_details");
        reader.required_str("success_url");
        reader.required_str("cancel_url");
        reader.required_object("payment_method_details");
        reader.required_str("session_id");
        reader.optional_object("shipping_details");
        reader.optional_object("billing_details");
        reader.optional_object("metadata");
        let body = reader.rest(&["id"]);
        reader.finish()?;
        validate_id_prefix(PAYIN_PREFIX, &id)?;
        Ok(Self(PayinMutation { id, body }))
    }
}

#[derive(Debug, Clone)]
pub struct ConfirmPayinTool;

impl PaymentTool for ConfirmPayinTool {
    const NAME: &'static str = "confirm_payin_tool";
    const DESCRIPTION: &'static str =
        "Confirm a payin and create a payment attempt on Tazapay";
    type Params = ConfirmPayinParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let PayinConfirmation(confirm) = PayinConfirmation::from_arguments(args)?;
            let response = client
                .send(
                    Method::POST,
                    &format!("{PAYIN_PATH}/{}/confirm", confirm.id),
                    Some(Value::Object(confirm.body)),
                )
                .await
                .map_err(|e| ToolError::api("confirm payin request failed", e))?;
            let data = unwrap_data(response)?;
            let status = require_str(&data, "status")?;
            let description = require_str(&data, "status_description")?;
            info!(payin_id = %confirm.id, status, "Payin confirmed");
            Ok(format!("Payin confirmed. Status: {status}. {description}"))
        }
        .boxed()
    }
}
