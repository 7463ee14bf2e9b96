//! Expire checkout tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;

use super::fetch::CheckoutIdParams;
use super::payment_link::CHECKOUT_PATH;
use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::id_argument;
use crate::domains::tools::definitions::common::response::{optional_str, unwrap_data};
use crate::domains::tools::{PaymentTool, ToolError};

#[derive(Debug, Clone)]
pub struct ExpireCheckoutTool;

impl PaymentTool for ExpireCheckoutTool {
    const NAME: &'static str = "expire_checkout_tool";
    const DESCRIPTION: &'static str = "Expire a checkout session by ID on Tazapay";
    type Params = CheckoutIdParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let id = id_argument(args, None)?;
            let response = client
                .send(Method::POST, &format!("{CHECKOUT_PATH}/{id}/expire"), None)
                .await
                .map_err(|e| ToolError::api("expire checkout request failed", e))?;
            let data = unwrap_data(response)?;
            // An absent status renders empty.
            let status = optional_str(&data, "status").unwrap_or_default();
            Ok(format!("Checkout session expired. Status: {status}"))
        }
        .boxed()
    }
}
