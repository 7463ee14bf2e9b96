//! Cancel payin tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;

use super::create::PAYIN_PATH;
use super::get::PayinIdParams;
use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::id_argument;
use crate::domains::tools::definitions::common::response::{require_str, unwrap_data};
use crate::domains::tools::definitions::common::validate::PAYIN_PREFIX;
use crate::domains::tools::{PaymentTool, ToolError};

#[derive(Debug, Clone)]
pub struct CancelPayinTool;

impl PaymentTool for CancelPayinTool {
    const NAME: &'static str = "cancel_payin_tool";
    const DESCRIPTION: &'static str = "Cancel a payin on Tazapay";
    type Params = PayinIdParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let id = id_argument(args, Some(PAYIN_PREFIX))?;
            let response = client
                .send(Method::POST, &format!("{PAYIN_PATH}/{id}/cancel"), None)
                .await
                .map_err(|e| ToolError::api("cancel payin request failed", e))?;
            let data = unwrap_data(response)?;
            Ok(format!("Payin cancelled. Status: {}", require_str(&data, "status")?))
        }
        .boxed()
    }
}
