//! Get payout tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;
use schemars::JsonSchema;
use serde::Deserialize;

use super::create::PAYOUT_PATH;
use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::id_argument;
use crate::domains::tools::definitions::common::response::{
    convert_amounts_with_transactions, pretty, unwrap_data,
};
use crate::domains::tools::definitions::common::validate::PAYOUT_PREFIX;
use crate::domains::tools::{PaymentTool, ToolError};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetPayoutParams {
    /// ID of the payout (must start with pot_).
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct GetPayoutTool;

impl PaymentTool for GetPayoutTool {
    const NAME: &'static str = "get_payout_tool";
    const DESCRIPTION: &'static str =
        "Fetch a payout by ID from Tazapay. Amounts are shown in major units.";
    type Params = GetPayoutParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let id = id_argument(args, Some(PAYOUT_PREFIX))?;
            let response = client
                .send(Method::GET, &format!("{PAYOUT_PATH}/{id}"), None)
                .await
                .map_err(|e| ToolError::api("get payout request failed", e))?;
            let mut data = unwrap_data(response)?;
            convert_amounts_with_transactions(&mut data);
            pretty(&data)
        }
        .boxed()
    }
}
