//! Create customer tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::models::{Address, Phone};
use crate::domains::tools::definitions::common::response::{optional_str, resource_id, unwrap_data};
use crate::domains::tools::definitions::common::validate::validate_country;
use crate::domains::tools::definitions::common::{ArgReader, FromArguments};
use crate::domains::tools::{PaymentTool, ToolError};

pub(crate) const CUSTOMER_PATH: &str = "/customer";

/// A billing or shipping entry on a customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CustomerContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    /// Kind of address, e.g. home or work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateCustomerParams {
    pub name: String,
    pub email: String,
    #[schemars(description = "ISO 3166 alpha-2 code, e.g. SG, IN, US")]
    pub country: String,
    /// Unique reference of the customer on your system.
    pub reference_id: Option<String>,
    pub phone: Option<Phone>,
    pub billing: Option<Vec<CustomerContact>>,
    pub shipping: Option<Vec<CustomerContact>>,
    #[schemars(description = "Key-value pairs to attach to the customer")]
    pub metadata: Option<JsonObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRequest {
    pub name: String,
    pub email: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub billing: Vec<CustomerContact>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shipping: Vec<CustomerContact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonObject>,
}

impl FromArguments for CustomerRequest {
    fn from_arguments(args: &JsonObject) -> Result<Self, ToolError> {
        let mut reader = ArgReader::new(args);
        let name = reader.required_str("name");
        let email = reader.required_str("email");
        let country = reader.required_str("country");
        let reference_id = reader.optional_str("reference_id");
        let phone = reader.optional_as::<Phone>("phone", "object");
        let billing = reader.optional_as::<Vec<CustomerContact>>("billing", "array of contacts");
        let shipping = reader.optional_as::<Vec<CustomerContact>>("shipping", "array of contacts");
        let metadata = reader.optional_object("metadata");
        reader.finish()?;

        validate_country(&country)?;
        let billing = billing.unwrap_or_default();
        let shipping = shipping.unwrap_or_default();
        for address in billing.iter().chain(&shipping).filter_map(|c| c.address.as_ref()) {
            address.validate()?;
        }

        Ok(Self {
            name,
            email,
            country,
            reference_id,
            phone,
            billing,
            shipping,
            metadata,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateCustomerTool;

impl PaymentTool for CreateCustomerTool {
    const NAME: &'static str = "tazapay_create_customer_tool";
    const DESCRIPTION: &'static str = "Create a customer in Tazapay";
    type Params = CreateCustomerParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let request = CustomerRequest::from_arguments(args)?;
            let body = serde_json::to_value(&request)
                .map_err(|e| ToolError::internal(format!("failed to encode customer: {e}")))?;

            let response = client
                .send(Method::POST, CUSTOMER_PATH, Some(body))
                .await
                .map_err(|e| ToolError::api("create customer request failed", e))?;
            let data = unwrap_data(response)?;
            let id = resource_id(&data, "customer")?;
            let name = optional_str(&data, "name").unwrap_or(&request.name);
            info!(customer_id = %id, "Customer created");

            Ok(format!("Customer created with ID: {id}, name: {name}"))
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
    async fn test_create_customer() {
        let client = RecordingClient::responding(json!({
            "data": { "id": "cus_1", "name": "Jane" }
        }));
        let text = CreateCustomerTool::handle(
            &client,
            &args(json!({
                "name": "Jane",
                "email": "j@x.io",
                "country": "SG",
                "billing": [{ "name": "Jane", "label": "home", "address": { "country": "SG" } }]
            })),
        )
        .await
        .unwrap();
        assert_eq!(text, "Customer created with ID: cus_1, name: Jane");

        let call = client.single_call();
        assert_eq!(call.method, Method::POST);
        assert_eq!(call.path, "/customer");
        let body = call.body.unwrap();
        assert_eq!(body["billing"][0]["label"], "home");
        assert!(body.get("shipping").is_none());
    }

    #[tokio::test]
    async fn test_country_validated() {
        let client = RecordingClient::responding(json!({}));
        let err = CreateCustomerTool::handle(
            &client,
            &args(json!({ "name": "Jane", "email": "j@x.io", "country": "Singapore" })),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ToolError::InvalidCountryFormat(_)));

        let err = CreateCustomerTool::handle(&client, &args(json!({ "name": "Jane" })))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required fields: email, country");
        assert!(client.calls().is_empty());
    }
}
