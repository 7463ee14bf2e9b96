//! FX quote tool.
//!
//! Quotes a payout conversion between two currencies. The amount goes out in
//! minor units; the reply's rate and converted amount are rendered for display.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Method;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::core::client::{ApiClient, JsonObject};
use crate::domains::tools::definitions::common::money::{major_to_minor, minor_to_major, round_2, round_6};
use crate::domains::tools::definitions::common::response::unwrap_data;
use crate::domains::tools::definitions::common::validate::validate_currency;
use crate::domains::tools::definitions::common::{ArgReader, FromArguments};
use crate::domains::tools::{PaymentTool, ToolError};

const FX_PATH: &str = "/fx/payout";

/// Parameters for an FX quote.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FxParams {
    /// Currency to convert from, 3 letter code (e.g. USD, INR).
    pub from: String,

    /// Currency to convert to, 3 letter code (e.g. USD, INR).
    pub to: String,

    #[schemars(description = "Amount to convert, in major units (e.g. 12.34)")]
    pub amount: f64,
}

impl FromArguments for FxParams {
    fn from_arguments(args: &JsonObject) -> Result<Self, ToolError> {
        let mut reader = ArgReader::new(args);
        let from = reader.required_str("from").to_uppercase();
        let to = reader.required_str("to").to_uppercase();
        let amount = reader.required_f64("amount");
        reader.finish()?;

        validate_currency(&from)?;
        validate_currency(&to)?;
        Ok(Self { from, to, amount })
    }
}

impl FxParams {
    fn path(&self) -> Result<String, ToolError> {
        let minor = major_to_minor(self.amount).to_string();
        let query = serde_urlencoded::to_string([
            ("initial_currency", self.from.as_str()),
            ("final_currency", self.to.as_str()),
            ("amount", minor.as_str()),
        ])
        .map_err(|e| ToolError::internal(format!("failed to encode query: {e}")))?;
        Ok(format!("{FX_PATH}?{query}"))
    }
}

/// Decide whether a converted amount came back in minor units.
///
/// The API does not state the unit; a value above 100 for a request below 100
/// is read as minor units.
fn display_converted(converted: f64, requested: f64) -> f64 {
    if converted > 100.0 && requested < 100.0 {
        minor_to_major(converted as i64)
    } else {
        round_2(converted)
    }
}

#[derive(Debug, Clone)]
pub struct FetchFxTool;

impl PaymentTool for FetchFxTool {
    const NAME: &'static str = "tazapay_fetch_fx_tool";
    const DESCRIPTION: &'static str =
        "Get FX rate from one currency to another using Tazapay FX rate";
    type Params = FxParams;

    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let params = FxParams::from_arguments(args)?;
            let path = params.path()?;
            info!(path = %path, "Requesting FX quote");

            let response = client
                .send(Method::GET, &path, None)
                .await
                .map_err(|e| ToolError::api("FX request failed", e))?;
            let data = unwrap_data(response)?;

            let rate = data
                .get("exchange_rate")
                .and_then(Value::as_f64)
                .ok_or(ToolError::MissingResponseField("exchange_rate"))?;
            let converted = data
                .get("converted_amount")
                .and_then(Value::as_f64)
                .ok_or(ToolError::MissingResponseField("converted_amount"))?;

            Ok(format!(
                "Exchange Rate: 1 {from} = {rate} {to}\nConverted Amount: {amount:.2} {from} = {converted:.2} {to}",
                from = params.from,
                to = params.to,
                rate = round_6(rate),
                amount = params.amount,
                converted = display_converted(converted, params.amount),
            ))
        }
        .boxed()
    }
}
