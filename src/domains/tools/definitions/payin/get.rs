//! Get payin tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;
use schemars::JsonSchema;
use serde::Deserialize;

use super::create::PAYIN_PATH;
use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::id_argument;
use crate::domains::tools::definitions::common::response::{convert_amount, pretty, unwrap_data};
use crate::domains::tools::definitions::common::validate::PAYIN_PREFIX;
use crate::domains::tools::{PaymentTool, ToolError};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PayinIdParams {
    /// ID of the payin (must start with pay_).
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct GetPayinTool;

impl PaymentTool for GetPayinTool {
    const NAME: &'static str = "get_payin_tool";
    const DESCRIPTION: &'static str = "Fetch a payin by ID from Tazapay";
    type Params = PayinIdParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let id = id_argument(args, Some(PAYIN_PREFIX))?;
            let response = client
                .send(Method::GET, &format!("{PAYIN_PATH}/{id}"), None)
                .await
                .map_err(|e| ToolError::api("get payin request failed", e))?;
            let mut data = unwrap_data(response)?;
            convert_amount(&mut data);
            pretty(&data)
        }
        .boxed()
    }
}
