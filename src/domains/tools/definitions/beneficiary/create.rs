//! Create beneficiary tool.
//!
//! Also home of [`BeneficiaryDetails`], the inline beneficiary shape that the
//! payout tool accepts in place of a beneficiary ID.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::models::{
    Address, BENEFICIARY_TYPE_EXPECTED, BeneficiaryType, DestinationDetails,
    DestinationDetailsInput, Document, Phone,
};
use crate::domains::tools::definitions::common::response::{optional_str, resource_id, unwrap_data};
use crate::domains::tools::definitions::common::{ArgReader, FromArguments};
use crate::domains::tools::{PaymentTool, ToolError};

pub(crate) const BENEFICIARY_PATH: &str = "/beneficiary";

/// Beneficiary fields as published in the tool schema.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BeneficiaryParams {
    /// Full legal name as it appears on the bank account or official documents.
    pub name: String,

    #[serde(rename = "type")]
    #[schemars(description = "'individual' for persons or 'business' for companies")]
    pub kind: BeneficiaryType,

    #[schemars(description = "Email address for notifications")]
    pub email: Option<String>,

    #[schemars(description = "National ID, passport or other government-issued number")]
    pub national_identification_number: Option<String>,

    #[schemars(description = "Tax identification number (TIN, SSN, VAT number, ...)")]
    pub tax_id: Option<String>,

    /// Where the beneficiary receives funds. Only the branch named by `type`
    /// is used. Bank codes may be given under `bank.bank_codes` or directly
    /// on `bank`.
    pub destination_details: DestinationDetailsInput,

    pub phone: Option<Phone>,

    pub address: Option<Address>,

    #[schemars(description = "Supporting document for identity verification")]
    pub document: Option<Document>,
}

/// Validated beneficiary, ready to send.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeneficiaryDetails {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: BeneficiaryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_identification_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    pub destination_details: DestinationDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<Document>,
}

impl BeneficiaryDetails {
    /// Parse a beneficiary object; reported field names carry `prefix`.
    pub fn parse(object: &JsonObject, prefix: &'static str) -> Result<Self, ToolError> {
        let mut reader = ArgReader::nested(object, prefix);
        let name = reader.required_str("name");
        let kind = reader.required_as::<BeneficiaryType>("type", BENEFICIARY_TYPE_EXPECTED);
        let email = reader.optional_str("email");
        let national_identification_number = reader.optional_str("national_identification_number");
        let tax_id = reader.optional_str("tax_id");
        let destination = reader.required_object("destination_details");
        let phone = reader.optional_as::<Phone>("phone", "object");
        let address = reader.optional_as::<Address>("address", "object");
        let document = reader.optional_as::<Document>("document", "object");
        reader.finish()?;

        let destination_details = DestinationDetails::from_raw(destination)?;
        if let Some(address) = &address {
            address.validate()?;
        }

        Ok(Self {
            name,
            kind,
            email,
            national_identification_number,
            tax_id,
            destination_details,
            phone,
            address,
            documents: document.into_iter().collect(),
        })
    }
}

impl FromArguments for BeneficiaryDetails {
    fn from_arguments(args: &JsonObject) -> Result<Self, ToolError> {
        Self::parse(args, "")
    }
}

#[derive(Debug, Clone)]
pub struct CreateBeneficiaryTool;

impl PaymentTool for CreateBeneficiaryTool {
    const NAME: &'static str = "create_beneficiary_tool";
    const DESCRIPTION: &'static str = "Create a new beneficiary for payouts with destination details for a bank account, wallet or local payment network";
    type Params = BeneficiaryParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let payload = BeneficiaryDetails::from_arguments(args)?;
            let body = serde_json::to_value(&payload)
                .map_err(|e| ToolError::internal(format!("failed to encode beneficiary: {e}")))?;

            let response = client
                .send(Method::POST, BENEFICIARY_PATH, Some(body))
                .await
                .map_err(|e| ToolError::api("create beneficiary request failed", e))?;
            let data = unwrap_data(response)?;
            let id = resource_id(&data, "beneficiary")?;
            info!(beneficiary_id = %id, "Beneficiary created");

            let mut text = format!("Beneficiary created with ID: {id}");
            if let Some(destination) = optional_str(&data, "destination") {
                text.push_str(&format!(", destinationID: {destination}"));
            }
            Ok(text)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::testing::{RecordingClient, args};
    use serde_json::json;

    fn valid_args() -> serde_json::Value {
        json!({
            "name": "Jane Doe",
            "type": "individual",
            "email": "jane@example.com",
            "destination_details": {
                "type": "bank",
                "bank": {
                    "account_number": "1",
                    "bank_name": "HDFC",
                    "country": "IN",
                    "currency": "INR",
                    "ifsc_code": "HDFC0001234",
                    "bank_codes": { "swift_code": "HDFCINBB" }
                },
                "wallet": { "deposit_address": "ignored" }
            },
            "address": { "line1": "1 Main St", "country": "IN" },
            "document": { "type": "passport", "url": "https://docs/p.pdf" }
        })
    }

    #[tokio::test]
    async fn test_create_beneficiary_payload() {
        let client = RecordingClient::responding(json!({
            "data": { "id": "bnf_123", "destination": "dst_9" }
        }));
        let text = CreateBeneficiaryTool::handle(&client, &args(valid_args()))
            .await
            .unwrap();
        assert_eq!(text, "Beneficiary created with ID: bnf_123, destinationID: dst_9");

        let call = client.single_call();
        assert_eq!(call.method, Method::POST);
        assert_eq!(call.path, "/beneficiary");
        let body = call.body.unwrap();
        assert_eq!(body["type"], "individual");
        assert_eq!(
            body["destination_details"],
            json!({
                "type": "bank",
                "bank": {
                    "account_number": "1",
                    "bank_name": "HDFC",
                    "country": "IN",
                    "currency": "INR",
                    "bank_codes": { "swift_code": "HDFCINBB", "ifsc_code": "HDFC0001234" }
                }
            })
        );
        assert_eq!(body["documents"], json!([{ "type": "passport", "url": "https://docs/p.pdf" }]));
        assert!(body.get("phone").is_none());
    }

    #[tokio::test]
    async fn test_create_without_destination_id() {
        let client = RecordingClient::responding(json!({ "data": { "id": "bnf_1" } }));
        let text = CreateBeneficiaryTool::handle(&client, &args(valid_args()))
            .await
            .unwrap();
        assert_eq!(text, "Beneficiary created with ID: bnf_1");
    }

    #[tokio::test]
    async fn test_missing_fields_collected() {
        let client = RecordingClient::responding(json!({}));
        let err = CreateBeneficiaryTool::handle(&client, &args(json!({ "email": "a@b.com" })))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required fields: name, type, destination_details"
        );
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_type_enum() {
        let mut raw = valid_args();
        raw["type"] = json!("partner");
        let client = RecordingClient::responding(json!({}));
        let err = CreateBeneficiaryTool::handle(&client, &args(raw)).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidFieldType { ref field, .. } if field == "type"));
    }

    #[tokio::test]
    async fn test_address_country_validated() {
        let mut raw = valid_args();
        raw["address"]["country"] = json!("india");
        let client = RecordingClient::responding(json!({}));
        let err = CreateBeneficiaryTool::handle(&client, &args(raw)).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidCountryFormat(_)));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_id_in_response() {
        let client = RecordingClient::responding(json!({ "data": { "object": "beneficiary" } }));
        let err = CreateBeneficiaryTool::handle(&client, &args(valid_args()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "no beneficiary id in response");
    }
}
