//! Update beneficiary tool.
//!
//! Partial update: the caller's fields are forwarded as-is apart from `id`,
//! after the same bank-code consolidation and code checks used on create.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use super::create::BENEFICIARY_PATH;
use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::models::{
    Address, BENEFICIARY_TYPE_EXPECTED, BeneficiaryType, DestinationDetailsInput, Document, Phone,
};
use crate::domains::tools::definitions::common::reshape::consolidate_destination_bank_codes;
use crate::domains::tools::definitions::common::response::{pretty, unwrap_data};
use crate::domains::tools::definitions::common::validate::{
    BENEFICIARY_PREFIX, check_country_field, check_currency_field, validate_id_prefix,
};
use crate::domains::tools::definitions::common::{ArgReader, FromArguments};
use crate::domains::tools::{PaymentTool, ToolError};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateBeneficiaryParams {
    /// ID of the existing beneficiary (must start with bnf_).
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<BeneficiaryType>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
    pub national_identification_number: Option<String>,
    pub address: Option<Address>,
    pub phone: Option<Phone>,
    pub destination_details: Option<DestinationDetailsInput>,
    pub documents: Option<Vec<Document>>,
    #[schemars(description = "Key-value pairs to attach to the beneficiary")]
    pub metadata: Option<JsonObject>,
}

/// Target ID and the body to send.
#[derive(Debug, Clone)]
pub struct BeneficiaryUpdate {
    pub id: String,
    pub body: JsonObject,
}

impl FromArguments for BeneficiaryUpdate {
    fn from_arguments(args: &JsonObject) -> Result<Self, ToolError> {
        let mut reader = ArgReader::new(args);
        let id = reader.required_str("id");
        reader.optional_str("name");
        reader.optional_as::<BeneficiaryType>("type", BENEFICIARY_TYPE_EXPECTED);
        let destination = reader.optional_object("destination_details");
        let address = reader.optional_object("address");
        let mut body = reader.rest(&["id"]);
        reader.finish()?;

        validate_id_prefix(BENEFICIARY_PREFIX, &id)?;

        if let Some(mut destination) = destination {
            consolidate_destination_bank_codes(&mut destination);
            if let Some(Value::Object(bank)) = destination.get("bank") {
                check_currency_field(bank, "currency")?;
                check_country_field(bank, "country")?;
            }
            if let Some(Value::Object(wallet)) = destination.get("wallet") {
                check_currency_field(wallet, "currency")?;
            }
            body.insert("destination_details".to_string(), Value::Object(destination));
        }
        if let Some(address) = &address {
            check_country_field(address, "country")?;
        }

        Ok(Self { id, body })
    }
}

#[derive(Debug, Clone)]
pub struct UpdateBeneficiaryTool;

impl PaymentTool for UpdateBeneficiaryTool {
    const NAME: &'static str = "update_beneficiary_tool";
    const DESCRIPTION: &'static str = "Update an existing beneficiary by ID on Tazapay";
    type Params = UpdateBeneficiaryParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let update = BeneficiaryUpdate::from_arguments(args)?;
            let response = client
                .send(
                    Method::PUT,
                    &format!("{BENEFICIARY_PATH}/{}", update.id),
                    Some(Value::Object(update.body)),
                )
                .await
                .map_err(|e| ToolError::api("update beneficiary request failed", e))?;
            let data = unwrap_data(response)?;
            Ok(format!("Beneficiary updated: {}", pretty(&data)?))
        }
        .boxed()
    }
}
