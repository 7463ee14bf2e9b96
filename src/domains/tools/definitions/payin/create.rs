//! Create payin tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::models::{Address, Phone};
use crate::domains::tools::definitions::common::money::major_to_minor;
use crate::domains::tools::definitions::common::response::{resource_id, unwrap_data};
use crate::domains::tools::definitions::common::validate::{check_country_field, validate_currency};
use crate::domains::tools::definitions::common::{ArgReader, FromArguments};
use crate::domains::tools::{PaymentTool, ToolError};

pub(crate) const PAYIN_PATH: &str = "/payin";

/// Optional string fields forwarded only when non-empty.
const OPTIONAL_STRINGS: [&str; 5] = [
    "customer",
    "webhook_url",
    "reference_id",
    "statement_descriptor",
    "session_id",
];

/// Optional structured fields forwarded only when non-empty.
const OPTIONAL_VALUES: [&str; 5] = [
    "shipping_details",
    "billing_details",
    "transaction_documents",
    "metadata",
    "payment_method_details",
];

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct CustomerDetails {
    pub name: Option<String>,
    pub email: Option<String>,
    #[schemars(description = "ISO 3166 alpha-2 code, e.g. SG, IN, US")]
    pub country: Option<String>,
    pub phone: Option<Phone>,
}

/// Shipping or billing contact.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ContactDetails {
    pub name: Option<String>,
    pub address: Option<Address>,
    pub phone: Option<Phone>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreatePayinParams {
    #[schemars(description = "Currency of the invoice, ISO 4217 in uppercase (USD, EUR, ...)")]
    pub invoice_currency: String,

    #[schemars(description = "Amount in major units, e.g. 12.34")]
    pub amount: f64,

    pub customer_details: CustomerDetails,

    /// ID of an existing customer.
    pub customer: Option<String>,

    pub success_url: String,
    pub cancel_url: String,
    pub webhook_url: Option<String>,
    pub transaction_description: String,

    pub shipping_details: Option<ContactDetails>,
    pub billing_details: Option<ContactDetails>,
    pub transaction_documents: Option<Value>,
    pub metadata: Option<JsonObject>,
    pub reference_id: Option<String>,

    /// Confirm the payin on creation.
    pub confirm: Option<bool>,

    pub statement_descriptor: Option<String>,
    pub payment_method_details: Option<JsonObject>,
    pub session_id: Option<String>,
}

/// Outgoing payin request. Optional fields live in `extra` and only appear
/// when they carry something.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayinRequest {
    pub amount: i64,
    pub invoice_currency: String,
    pub transaction_description: String,
    pub success_url: String,
    pub cancel_url: String,
    pub customer_details: JsonObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<bool>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

impl FromArguments for PayinRequest {
    fn from_arguments(args: &JsonObject) -> Result<Self, ToolError> {
        let mut reader = ArgReader::new(args);
        let invoice_currency = reader.required_str("invoice_currency");
        let amount = reader.required_f64("amount");
        let transaction_description = reader.required_str("transaction_description");
        let success_url = reader.required_str("success_url");
        let cancel_url = reader.required_str("cancel_url");
        let customer_details = reader.required_object("customer_details");
        let confirm = reader.optional_bool("confirm");

        let mut extra = JsonObject::new();
        for key in OPTIONAL_STRINGS {
            if let Some(value) = reader.optional_str(key) {
                extra.insert(key.to_string(), Value::String(value));
            }
        }
        for key in OPTIONAL_VALUES {
            if let Some(value) = args.get(key).filter(|v| !is_blank(v)) {
                extra.insert(key.to_string(), value.clone());
            }
        }
        reader.finish()?;

        validate_currency(&invoice_currency)?;
        check_country_field(&customer_details, "country")?;

        Ok(Self {
            amount: major_to_minor(amount),
            invoice_currency,
            transaction_description,
            success_url,
            cancel_url,
            customer_details,
            confirm,
            extra,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreatePayinTool;

impl PaymentTool for CreatePayinTool {
    const NAME: &'static str = "create_payin_tool";
    const DESCRIPTION: &'static str = "Create (and optionally confirm) a payin on Tazapay";
    type Params = CreatePayinParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let request = PayinRequest::from_arguments(args)?;
            debug!(
                amount = request.amount,
                currency = %request.invoice_currency,
                "Built payin request"
            );
            let body = serde_json::to_value(&request)
                .map_err(|e| ToolError::internal(format!("failed to encode payin: {e}")))?;

            let response = client
                .send(Method::POST, PAYIN_PATH, Some(body))
                .await
                .map_err(|e| ToolError::api("create payin request failed", e))?;
            let data = unwrap_data(response)?;
            let id = resource_id(&data, "payin")?;
            info!(payin_id = %id, "Payin created");

            Ok(format!("Payin created with ID: {id}"))
        }
        .boxed()
    }
}
