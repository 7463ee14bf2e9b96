//! Account balance tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::money::minor_to_major;
use crate::domains::tools::definitions::common::response::unwrap_data;
use crate::domains::tools::definitions::common::validate::validate_currency;
use crate::domains::tools::definitions::common::{ArgReader, FromArguments};
use crate::domains::tools::{PaymentTool, ToolError};

const BALANCE_PATH: &str = "/balance";

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct BalanceParams {
    /// Currency to fetch the balance for (3 letter code). Leave empty for all balances.
    #[serde(default)]
    pub currency: Option<String>,
}

impl FromArguments for BalanceParams {
    fn from_arguments(args: &JsonObject) -> Result<Self, ToolError> {
        let mut reader = ArgReader::new(args);
        let currency = reader.optional_str("currency").map(|c| c.to_uppercase());
        reader.finish()?;

        if let Some(code) = &currency {
            validate_currency(code)?;
        }
        Ok(Self { currency })
    }
}

#[derive(Debug, Deserialize)]
struct BalanceData {
    #[serde(default)]
    available: Vec<BalanceEntry>,
}

#[derive(Debug, Deserialize)]
struct BalanceEntry {
    currency: String,
    amount: f64,
}

fn render_balances(available: &[BalanceEntry], currency: Option<&str>) -> String {
    if available.is_empty() {
        return "No balances found.".to_string();
    }

    match currency {
        Some(code) => available
            .iter()
            .find(|b| b.currency.eq_ignore_ascii_case(code))
            .map(|b| format!("{} balance: {:.2}", b.currency, minor_to_major(b.amount as i64)))
            .unwrap_or_else(|| format!("No balance found for currency: {code}")),
        None => available.iter().fold(
            String::from("Available account balances:\n"),
            |mut out, b| {
                out.push_str(&format!(
                    "- {}: {:.2}\n",
                    b.currency,
                    minor_to_major(b.amount as i64)
                ));
                out
            },
        ),
    }
}

#[derive(Debug, Clone)]
pub struct FetchBalanceTool;

impl PaymentTool for FetchBalanceTool {
    const NAME: &'static str = "tazapay_fetch_balance_tool";
    const DESCRIPTION: &'static str = "Get balance from Tazapay. Send currency code to fetch balance for that currency. For all the balances available in Tazapay send empty string.";
    type Params = BalanceParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let params = BalanceParams::from_arguments(args)?;

            let response = client
                .send(Method::GET, BALANCE_PATH, None)
                .await
                .map_err(|e| ToolError::api("balance request failed", e))?;
            let data = unwrap_data(response)?;
            let balances: BalanceData = serde_json::from_value(Value::Object(data))
                .map_err(|_| ToolError::MissingResponseField("available balances"))?;

            Ok(render_balances(&balances.available, params.currency.as_deref()))
        }
        .boxed()
    }
}
