//! Response unwrapping and display formatting.

use serde_json::Value;

use super::money::minor_to_major;
use crate::core::client::JsonObject;
use crate::domains::tools::ToolError;

/// Take the `data` object out of a response envelope.
pub fn unwrap_data(mut response: JsonObject) -> Result<JsonObject, ToolError> {
    match response.remove("data") {
        Some(Value::Object(data)) => Ok(data),
        _ => Err(ToolError::NoData),
    }
}

/// A string field of `data` the result depends on.
pub fn require_str<'a>(data: &'a JsonObject, field: &'static str) -> Result<&'a str, ToolError> {
    data.get(field)
        .and_then(Value::as_str)
        .ok_or(ToolError::MissingResponseField(field))
}

/// The `id` of a newly created resource; empty counts as absent.
pub fn resource_id<'a>(data: &'a JsonObject, kind: &'static str) -> Result<&'a str, ToolError> {
    match data.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ToolError::MissingResourceId(kind)),
    }
}

/// Optional string field, empty treated as absent.
pub fn optional_str<'a>(data: &'a JsonObject, field: &str) -> Option<&'a str> {
    data.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Rewrite a minor-unit `amount` as a display decimal, keeping the raw value
/// under `amount_original`.
pub fn convert_amount(object: &mut JsonObject) {
    let Some(raw) = object.get("amount").filter(|v| v.is_number()).cloned() else {
        return;
    };
    let minor = raw.as_f64().unwrap_or_default() as i64;
    object.insert("amount".to_string(), Value::from(minor_to_major(minor)));
    object.insert("amount_original".to_string(), raw);
}

/// [`convert_amount`] on `data` and on every object of `data.transactions`.
pub fn convert_amounts_with_transactions(data: &mut JsonObject) {
    convert_amount(data);
    if let Some(Value::Array(transactions)) = data.get_mut("transactions") {
        for transaction in transactions.iter_mut() {
            if let Value::Object(transaction) = transaction {
                convert_amount(transaction);
            }
        }
    }
}

/// Indented JSON for display.
pub fn pretty(data: &JsonObject) -> Result<String, ToolError> {
    serde_json::to_string_pretty(data)
        .map_err(|e| ToolError::internal(format!("failed to render response: {e}")))
}
