//! Create payout tool.
//!
//! A payout goes either to an existing beneficiary (`beneficiary`, a `bnf_`
//! ID) or to one described inline (`beneficiary_details`), never both.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::beneficiary::{BeneficiaryDetails, BeneficiaryParams};
use crate::domains::tools::definitions::common::models::Document;
use crate::domains::tools::definitions::common::money::major_to_minor;
use crate::domains::tools::definitions::common::reshape::{BeneficiarySelection, select_beneficiary};
use crate::domains::tools::definitions::common::response::{resource_id, unwrap_data};
use crate::domains::tools::definitions::common::validate::validate_currency;
use crate::domains::tools::definitions::common::{ArgReader, FromArguments};
use crate::domains::tools::{PaymentTool, ToolError};

pub(crate) const PAYOUT_PATH: &str = "/payout";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChargeType {
    Shared,
    Ours,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PayoutType {
    Local,
    Swift,
    Wallet,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LogisticsTrackingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logistics_provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logistics_provider_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
}

/// Parameters for creating a payout.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreatePayoutParams {
    #[schemars(description = "Payout amount in major units, e.g. 10.12")]
    pub amount: f64,

    #[schemars(description = "Payout currency, ISO 4217 in uppercase")]
    pub currency: String,

    #[schemars(
        description = "Reason for payout, in the form PYR0XX where XX is 01 to 28. Default is PYR001."
    )]
    pub purpose: String,

    /// Additional details for the payout.
    pub transaction_description: String,

    /// Reference ID of the payout on your system.
    pub reference_id: Option<String>,

    pub statement_descriptor: Option<String>,

    /// Charge bearer, for wire transfers only.
    pub charge_type: Option<ChargeType>,

    #[serde(rename = "type")]
    pub kind: Option<PayoutType>,

    #[schemars(description = "Balance currency that funds the payout, ISO 4217 in uppercase")]
    pub holding_currency: Option<String>,

    /// ID of the entity the payout is created on behalf of.
    pub on_behalf_of: Option<String>,

    #[schemars(description = "Key-value pairs to attach to the payout")]
    pub metadata: Option<JsonObject>,

    #[schemars(description = "ID of an existing beneficiary (bnf_...). Mutually exclusive with beneficiary_details.")]
    pub beneficiary: Option<String>,

    #[schemars(description = "Inline beneficiary. Mutually exclusive with beneficiary.")]
    pub beneficiary_details: Option<BeneficiaryParams>,

    pub documents: Option<Vec<Document>>,

    pub logistics_tracking_details: Option<LogisticsTrackingDetails>,
}

/// Outgoing payout request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoutRequest {
    pub amount: i64,
    pub currency: String,
    pub purpose: String,
    pub transaction_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_descriptor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_type: Option<ChargeType>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<PayoutType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holding_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_behalf_of: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beneficiary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beneficiary_details: Option<BeneficiaryDetails>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logistics_tracking_details: Option<LogisticsTrackingDetails>,
}

fn parse_beneficiary_details(value: &Value) -> Result<BeneficiaryDetails, ToolError> {
    let object = value
        .as_object()
        .ok_or_else(|| ToolError::invalid_type("beneficiary_details", "object"))?;
    BeneficiaryDetails::parse(object, "beneficiary_details.")
}

impl FromArguments for PayoutRequest {
    fn from_arguments(args: &JsonObject) -> Result<Self, ToolError> {
        let selection = select_beneficiary(args, parse_beneficiary_details)?;

        let mut reader = ArgReader::new(args);
        let amount = reader.required_f64("amount");
        let currency = reader.required_str("currency");
        let purpose = reader.required_str("purpose");
        let transaction_description = reader.required_str("transaction_description");
        let reference_id = reader.optional_str("reference_id");
        let statement_descriptor = reader.optional_str("statement_descriptor");
        let charge_type = reader.optional_as::<ChargeType>("charge_type", "one of: shared, ours");
        let kind = reader.optional_as::<PayoutType>("type", "one of: local, swift, wallet");
        let holding_currency = reader.optional_str("holding_currency");
        let on_behalf_of = reader.optional_str("on_behalf_of");
        let metadata = reader.optional_object("metadata");
        let documents = reader.optional_as::<Vec<Document>>("documents", "array of documents");
        let logistics_tracking_details = reader
            .optional_as::<LogisticsTrackingDetails>("logistics_tracking_details", "object");
        reader.finish()?;

        validate_currency(&currency)?;
        if let Some(holding) = &holding_currency {
            validate_currency(holding)?;
        }

        let (beneficiary, beneficiary_details) = match selection {
            BeneficiarySelection::Reference(id) => (Some(id), None),
            BeneficiarySelection::Details(details) => (None, Some(details)),
        };

        Ok(Self {
            amount: major_to_minor(amount),
            currency,
            purpose,
            transaction_description,
            reference_id,
            statement_descriptor,
            charge_type,
            kind,
            holding_currency,
            on_behalf_of,
            metadata,
            beneficiary,
            beneficiary_details,
            documents: documents.unwrap_or_default(),
            logistics_tracking_details,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreatePayoutTool;

impl PaymentTool for CreatePayoutTool {
    const NAME: &'static str = "create_payout_tool";
    const DESCRIPTION: &'static str = "Create a payout on Tazapay to an existing beneficiary (beneficiary) or to an inline one (beneficiary_details)";
    type Params = CreatePayoutParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let request = PayoutRequest::from_arguments(args)?;
            debug!(
                by_reference = request.beneficiary.is_some(),
                amount = request.amount,
                "Built payout request"
            );
            let body = serde_json::to_value(&request)
                .map_err(|e| ToolError::internal(format!("failed to encode payout: {e}")))?;

            let response = client
                .send(Method::POST, PAYOUT_PATH, Some(body))
                .await
                .map_err(|e| ToolError::api("create payout request failed", e))?;
            let data = unwrap_data(response)?;
            let id = resource_id(&data, "payout")?;
            info!(payout_id = %id, "Payout created");

            Ok(format!("Payout created with ID: {id}"))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::testing::{RecordingClient, args};
    use serde_json::json;

    fn base_args() -> serde_json::Value {
        json!({
            "amount": 10.12,
            "currency": "USD",
            "purpose": "PYR001",
            "transaction_description": "invoice 42"
        })
    }

    fn inline_details() -> serde_json::Value {
        json!({
            "name": "Acme Ltd",
            "type": "business",
            "destination_details": {
                "type": "bank",
                "bank": {
                    "account_number": "1",
                    "country": "SG",
                    "currency": "SGD",
                    "swift_code": "DBSSSGSG"
                }
            }
        })
    }

    #[tokio::test]
    async fn test_payout_by_reference() {
        let mut raw = base_args();
        raw["beneficiary"] = json!("bnf_123");
        raw["charge_type"] = json!("shared");

        let client = RecordingClient::responding(json!({ "data": { "id": "pot_1" } }));
        let text = CreatePayoutTool::handle(&client, &args(raw)).await.unwrap();
        assert_eq!(text, "Payout created with ID: pot_1");

        let call = client.single_call();
        assert_eq!(call.method, Method::POST);
        assert_eq!(call.path, "/payout");
        let body = call.body.unwrap();
        assert_eq!(body["amount"], 1012);
        assert_eq!(body["beneficiary"], "bnf_123");
        assert_eq!(body["charge_type"], "shared");
        assert!(body.get("beneficiary_details").is_none());
    }

    #[tokio::test]
    async fn test_payout_with_inline_details() {
        let mut raw = base_args();
        raw["beneficiary_details"] = inline_details();
        raw["type"] = json!("swift");
        raw["logistics_tracking_details"] = json!({ "tracking_number": "TRK1" });

        let client = RecordingClient::responding(json!({ "data": { "id": "pot_2" } }));
        CreatePayoutTool::handle(&client, &args(raw)).await.unwrap();

        let body = client.single_call().body.unwrap();
        assert!(body.get("beneficiary").is_none());
        assert_eq!(body["type"], "swift");
        assert_eq!(body["beneficiary_details"]["type"], "business");
        assert_eq!(
            body["beneficiary_details"]["destination_details"]["bank"]["bank_codes"],
            json!({ "swift_code": "DBSSSGSG" })
        );
        assert_eq!(body["logistics_tracking_details"], json!({ "tracking_number": "TRK1" }));
    }

    #[tokio::test]
    async fn test_both_beneficiary_forms_rejected() {
        let mut raw = base_args();
        raw["beneficiary"] = json!("bnf_123");
        raw["beneficiary_details"] = inline_details();

        let client = RecordingClient::responding(json!({}));
        let err = CreatePayoutTool::handle(&client, &args(raw)).await.unwrap_err();
        assert!(matches!(err, ToolError::BeneficiaryXorDetails));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_neither_beneficiary_form_rejected() {
        let client = RecordingClient::responding(json!({}));
        let err = CreatePayoutTool::handle(&client, &args(base_args())).await.unwrap_err();
        assert!(matches!(err, ToolError::BeneficiaryXorDetails));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_reference_must_be_beneficiary_id() {
        let mut raw = base_args();
        raw["beneficiary"] = json!("cus_123");
        let client = RecordingClient::responding(json!({}));
        let err = CreatePayoutTool::handle(&client, &args(raw)).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidIdFormat { prefix: "bnf_", .. }));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields_and_bad_currency() {
        let client = RecordingClient::responding(json!({}));
        let err = CreatePayoutTool::handle(&client, &args(json!({ "beneficiary": "bnf_1" })))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required fields: amount, currency, purpose, transaction_description"
        );

        let mut raw = base_args();
        raw["beneficiary"] = json!("bnf_1");
        raw["holding_currency"] = json!("usd");
        let err = CreatePayoutTool::handle(&client, &args(raw)).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidCurrencyFormat(_)));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_inline_details_missing_fields_named() {
        let mut raw = base_args();
        raw["beneficiary_details"] = json!({ "email": "x@y.z" });
        let client = RecordingClient::responding(json!({}));
        let err = CreatePayoutTool::handle(&client, &args(raw)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required fields: beneficiary_details.name, beneficiary_details.type, beneficiary_details.destination_details"
        );
    }

    #[tokio::test]
    async fn test_missing_payout_id() {
        let mut raw = base_args();
        raw["beneficiary"] = json!("bnf_1");
        let client = RecordingClient::responding(json!({ "data": { "status": "requires_funding" } }));
        let err = CreatePayoutTool::handle(&client, &args(raw)).await.unwrap_err();
        assert_eq!(err.to_string(), "no payout id in response");
    }
}
