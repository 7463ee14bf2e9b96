//! Get beneficiary tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;
use schemars::JsonSchema;
use serde::Deserialize;

use super::create::BENEFICIARY_PATH;
use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::id_argument;
use crate::domains::tools::definitions::common::response::{pretty, unwrap_data};
use crate::domains::tools::definitions::common::validate::BENEFICIARY_PREFIX;
use crate::domains::tools::{PaymentTool, ToolError};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetBeneficiaryParams {
    /// ID of the beneficiary (must start with bnf_).
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct GetBeneficiaryTool;

impl PaymentTool for GetBeneficiaryTool {
    const NAME: &'static str = "get_beneficiary_tool";
    const DESCRIPTION: &'static str =
        "Fetch the details of a beneficiary by ID from Tazapay. ID must start with bnf_.";
    type Params = GetBeneficiaryParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let id = id_argument(args, Some(BENEFICIARY_PREFIX))?;
            let response = client
                .send(Method::GET, &format!("{BENEFICIARY_PATH}/{id}"), None)
                .await
                .map_err(|e| ToolError::api("get beneficiary request failed", e))?;
            pretty(&unwrap_data(response)?)
        }
        .boxed()
    }
}
