//! Fetch customer tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;
use schemars::JsonSchema;
use serde::Deserialize;

use super::create::CUSTOMER_PATH;
use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::id_argument;
use crate::domains::tools::definitions::common::response::{pretty, unwrap_data};
use crate::domains::tools::definitions::common::validate::CUSTOMER_PREFIX;
use crate::domains::tools::{PaymentTool, ToolError};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FetchCustomerParams {
    /// ID of the customer (must start with cus_).
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct FetchCustomerTool;

impl PaymentTool for FetchCustomerTool {
    const NAME: &'static str = "tazapay_fetch_customer_tool";
    const DESCRIPTION: &'static str = "Fetch a customer by ID from Tazapay";
    type Params = FetchCustomerParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let id = id_argument(args, Some(CUSTOMER_PREFIX))?;
            let response = client
                .send(Method::GET, &format!("{CUSTOMER_PATH}/{id}"), None)
                .await
                .map_err(|e| ToolError::api("fetch customer request failed", e))?;
            pretty(&unwrap_data(response)?)
        }
        .boxed()
    }
}
