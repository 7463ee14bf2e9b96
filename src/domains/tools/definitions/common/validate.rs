//! Field validators for currency codes, country codes and resource IDs.
//!
//! Validators only run on values that were actually supplied: callers skip
//! absent and empty fields.

use crate::core::client::JsonObject;
use crate::domains::tools::ToolError;

/// Resource ID prefixes used by the Tazapay API.
pub const BENEFICIARY_PREFIX: &str = "bnf_";
pub const PAYOUT_PREFIX: &str = "pot_";
pub const PAYIN_PREFIX: &str = "pay_";
pub const PAYMENT_ATTEMPT_PREFIX: &str = "pat_";
pub const CUSTOMER_PREFIX: &str = "cus_";

fn is_upper_alpha(code: &str, len: usize) -> bool {
    code.len() == len && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// ISO 4217-shaped: exactly three uppercase ASCII letters.
pub fn validate_currency(code: &str) -> Result<(), ToolError> {
    if is_upper_alpha(code, 3) {
        Ok(())
    } else {
        Err(ToolError::InvalidCurrencyFormat(code.to_string()))
    }
}

/// ISO 3166-1 alpha-2-shaped: exactly two uppercase ASCII letters.
pub fn validate_country(code: &str) -> Result<(), ToolError> {
    if is_upper_alpha(code, 2) {
        Ok(())
    } else {
        Err(ToolError::InvalidCountryFormat(code.to_string()))
    }
}

/// Ids are spliced into request paths, so they must form exactly one segment.
pub fn validate_id_segment(id: &str) -> Result<(), ToolError> {
    let safe = !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if safe {
        Ok(())
    } else {
        Err(ToolError::InvalidIdCharacters(id.to_string()))
    }
}

pub fn validate_id_prefix(prefix: &'static str, id: &str) -> Result<(), ToolError> {
    if !id.starts_with(prefix) {
        return Err(ToolError::InvalidIdFormat {
            prefix,
            id: id.to_string(),
        });
    }
    validate_id_segment(id)
}

/// Validate `object[key]` as a currency when it holds a non-empty string.
pub fn check_currency_field(object: &JsonObject, key: &str) -> Result<(), ToolError> {
    match object.get(key).and_then(|v| v.as_str()) {
        Some(code) if !code.is_empty() => validate_currency(code),
        _ => Ok(()),
    }
}

/// Validate `object[key]` as a country when it holds a non-empty string.
pub fn check_country_field(object: &JsonObject, key: &str) -> Result<(), ToolError> {
    match object.get(key).and_then(|v| v.as_str()) {
        Some(code) if !code.is_empty() => validate_country(code),
        _ => Ok(()),
    }
}
