//! Payload reshaping applied before a request is built.

use serde_json::Value;

use super::validate::{BENEFICIARY_PREFIX, validate_id_prefix};
use crate::core::client::JsonObject;
use crate::domains::tools::ToolError;

/// Code fields that belong under `bank.bank_codes`.
pub const BANK_CODE_FIELDS: [&str; 9] = [
    "swift_code",
    "bic_code",
    "ifsc_code",
    "aba_code",
    "sort_code",
    "branch_code",
    "bsb_code",
    "bank_code",
    "cnaps",
];

/// Move top-level bank code fields of `bank` into `bank.bank_codes`.
///
/// Existing `bank_codes` entries are kept; a key given at the top level wins
/// over the same key already nested. A non-object `bank_codes` is replaced.
pub fn consolidate_bank_codes(bank: &mut JsonObject) {
    let moved: Vec<(String, Value)> = BANK_CODE_FIELDS
        .iter()
        .filter_map(|field| bank.remove(*field).map(|v| (field.to_string(), v)))
        .collect();
    if moved.is_empty() {
        return;
    }

    let codes = bank
        .entry("bank_codes")
        .or_insert_with(|| Value::Object(JsonObject::new()));
    if !codes.is_object() {
        *codes = Value::Object(JsonObject::new());
    }
    if let Value::Object(codes) = codes {
        codes.extend(moved);
    }
}

/// Apply [`consolidate_bank_codes`] to `destination_details.bank`, if any.
pub fn consolidate_destination_bank_codes(destination_details: &mut JsonObject) {
    if let Some(Value::Object(bank)) = destination_details.get_mut("bank") {
        consolidate_bank_codes(bank);
    }
}

/// Who receives a payout.
#[derive(Debug, Clone, PartialEq)]
pub enum BeneficiarySelection<T> {
    /// An existing beneficiary, by `bnf_` ID.
    Reference(String),
    /// A beneficiary described inline.
    Details(T),
}

/// Resolve the `beneficiary` / `beneficiary_details` pair of a payout request.
///
/// Presence is decided by key existence, not content: exactly one of the two
/// keys must be in the argument map. A referenced ID must carry the `bnf_`
/// prefix. `parse_details` turns the inline object into its typed form.
pub fn select_beneficiary<T>(
    args: &JsonObject,
    parse_details: impl FnOnce(&Value) -> Result<T, ToolError>,
) -> Result<BeneficiarySelection<T>, ToolError> {
    match (args.get("beneficiary"), args.get("beneficiary_details")) {
        (Some(_), Some(_)) | (None, None) => Err(ToolError::BeneficiaryXorDetails),
        (Some(reference), None) => {
            let id = reference
                .as_str()
                .ok_or_else(|| ToolError::invalid_type("beneficiary", "string"))?;
            validate_id_prefix(BENEFICIARY_PREFIX, id)?;
            Ok(BeneficiarySelection::Reference(id.to_string()))
        }
        (None, Some(details)) => parse_details(details).map(BeneficiarySelection::Details),
    }
}
