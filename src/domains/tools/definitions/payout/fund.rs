//! Fund payout tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::create::PAYOUT_PATH;
use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::id_argument;
use crate::domains::tools::definitions::common::money::minor_to_major;
use crate::domains::tools::definitions::common::response::{optional_str, require_str, unwrap_data};
use crate::domains::tools::definitions::common::validate::PAYOUT_PREFIX;
use crate::domains::tools::{PaymentTool, ToolError};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FundPayoutParams {
    /// ID of the payout to fund (must start with pot_).
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct FundPayoutTool;

fn render_funded(data: &JsonObject) -> Result<String, ToolError> {
    let status = require_str(data, "status")?;
    let mut text = format!("Payout funded. Status: {status}");
    let amount = data.get("amount").and_then(Value::as_i64);
    if let (Some(amount), Some(currency)) = (amount, optional_str(data, "currency")) {
        text.push_str(&format!("\nAmount: {currency} {:.2}", minor_to_major(amount)));
    }
    Ok(text)
}

impl PaymentTool for FundPayoutTool {
    const NAME: &'static str = "fund_payout_tool";
    const DESCRIPTION: &'static str =
        "Fund a payout that is in requires_funding status on Tazapay";
    type Params = FundPayoutParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let id = id_argument(args, Some(PAYOUT_PREFIX))?;
            let response = client
                .send(Method::POST, &format!("{PAYOUT_PATH}/{id}/fund"), None)
                .await
                .map_err(|e| ToolError::api("fund payout request failed", e))?;
            let data = unwrap_data(response)?;
            let text = render_funded(&data)?;
            info!(payout_id = %id, "Payout funded");
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

    #[tokio::test]
    async fn test_fund_payout() {
        let client = RecordingClient::responding(json!({
            "data": { "id": "pot_1", "status": "processing", "amount": 1234, "currency": "USD" }
        }));
        let text = FundPayoutTool::handle(&client, &args(json!({ "id": "pot_1" })))
            .await
            .unwrap();
        assert_eq!(text, "Payout funded. Status: processing\nAmount: USD 12.34");

        let call = client.single_call();
        assert_eq!(call.method, Method::POST);
        assert_eq!(call.path, "/payout/pot_1/fund");
        assert!(call.body.is_none());
    }

    #[tokio::test]
    async fn test_fund_without_amount() {
        let client = RecordingClient::responding(json!({ "data": { "status": "processing" } }));
        let text = FundPayoutTool::handle(&client, &args(json!({ "id": "pot_1" })))
            .await
            .unwrap();
        assert_eq!(text, "Payout funded. Status: processing");
    }

    #[tokio::test]
    async fn test_fund_requires_status() {
        let client = RecordingClient::responding(json!({ "data": { "id": "pot_1" } }));
        let err = FundPayoutTool::handle(&client, &args(json!({ "id": "pot_1" })))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::MissingResponseField("status")));
    }

    #[tokio::test]
    async fn test_fund_id_must_be_one_segment() {
        let client = RecordingClient::responding(json!({ "data": { "status": "processing" } }));
        for id in ["pot_1/../../beneficiary/bnf_1", "pot_1?x=1", "pot_1#fund"] {
            let err = FundPayoutTool::handle(&client, &args(json!({ "id": id })))
                .await
                .unwrap_err();
            assert!(matches!(err, ToolError::InvalidIdCharacters(_)), "{id}");
        }
        assert!(client.calls().is_empty());
    }
}
