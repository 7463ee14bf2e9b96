//! Shared request shapes used by several tools.
//!
//! These types double as the published parameter schema (via `JsonSchema`) and
//! as the outgoing payload (via `Serialize`). Absent fields are never sent.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::reshape::consolidate_destination_bank_codes;
use super::validate::{validate_country, validate_currency};
use crate::core::client::JsonObject;
use crate::domains::tools::ToolError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Phone {
    /// International calling code without the + sign, e.g. "65".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calling_code: Option<String>,
    /// Phone number without the calling code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// ISO 3166-1 alpha-2 country code, e.g. "SG".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Address {
    pub fn validate(&self) -> Result<(), ToolError> {
        check_country(self.country.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Document {
    /// Document kind, e.g. "invoice", "passport" or "other".
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Publicly downloadable URL of the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Routing and identifier codes of a bank account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BankCodes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swift_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bic_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifsc_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aba_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bsb_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cnaps: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Bank {
    /// Account number. Either this or `iban` is mandatory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    /// ISO 3166-1 alpha-2 country code of the bank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// ISO 4217 currency the account receives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Purpose code, required for INR accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_type: Option<String>,
    /// Request a Foreign Inward Remittance Certificate (India).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firc_required: Option<bool>,
    /// Codes given at the top level of `bank` are moved in here before sending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_codes: Option<BankCodes>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Wallet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit_address: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LocalPaymentNetwork {
    /// Network name, e.g. "UPI" or "PIX".
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit_key_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit_key: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DestinationType {
    #[default]
    Bank,
    Wallet,
    LocalPaymentNetwork,
}

impl DestinationType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Bank => "bank",
            Self::Wallet => "wallet",
            Self::LocalPaymentNetwork => "local_payment_network",
        }
    }
}

/// Destination details as the caller sends them: a discriminator plus any
/// number of branches.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct DestinationDetailsInput {
    /// Which payment rail receives the funds.
    #[serde(rename = "type")]
    pub kind: DestinationType,
    #[serde(default)]
    pub bank: Option<Bank>,
    #[serde(default)]
    pub wallet: Option<Wallet>,
    #[serde(default)]
    pub local_payment_network: Option<LocalPaymentNetwork>,
}

/// Destination details narrowed to the branch selected by `type`.
#[derive(Debug, Clone, PartialEq)]
pub enum DestinationDetails {
    Bank(Bank),
    Wallet(Wallet),
    LocalPaymentNetwork(LocalPaymentNetwork),
}

impl TryFrom<DestinationDetailsInput> for DestinationDetails {
    type Error = ToolError;

    fn try_from(input: DestinationDetailsInput) -> Result<Self, Self::Error> {
        let kind = input.kind;
        let branch = match kind {
            DestinationType::Bank => input.bank.map(Self::Bank),
            DestinationType::Wallet => input.wallet.map(Self::Wallet),
            DestinationType::LocalPaymentNetwork => {
                input.local_payment_network.map(Self::LocalPaymentNetwork)
            }
        };
        branch.ok_or_else(|| {
            ToolError::MissingFields(vec![format!("destination_details.{}", kind.as_str())])
        })
    }
}

impl DestinationDetails {
    /// Build from the caller's raw `destination_details` object.
    ///
    /// Stray bank codes are consolidated first, then the selected branch is
    /// validated. Branches other than the selected one are dropped.
    pub fn from_raw(mut raw: JsonObject) -> Result<Self, ToolError> {
        if raw.get("type").is_none_or(|t| t.is_null() || t == "") {
            return Err(ToolError::MissingFields(vec![
                "destination_details.type".to_string(),
            ]));
        }
        consolidate_destination_bank_codes(&mut raw);
        let input: DestinationDetailsInput =
            serde_json::from_value(serde_json::Value::Object(raw)).map_err(|_| {
                ToolError::invalid_type(
                    "destination_details",
                    "object with type one of: bank, wallet, local_payment_network",
                )
            })?;
        let details = Self::try_from(input)?;
        details.validate()?;
        Ok(details)
    }

    pub fn validate(&self) -> Result<(), ToolError> {
        match self {
            Self::Bank(bank) => {
                check_currency(bank.currency.as_deref())?;
                check_country(bank.country.as_deref())
            }
            Self::Wallet(wallet) => check_currency(wallet.currency.as_deref()),
            Self::LocalPaymentNetwork(_) => Ok(()),
        }
    }

    pub fn kind(&self) -> DestinationType {
        match self {
            Self::Bank(_) => DestinationType::Bank,
            Self::Wallet(_) => DestinationType::Wallet,
            Self::LocalPaymentNetwork(_) => DestinationType::LocalPaymentNetwork,
        }
    }
}

impl Serialize for DestinationDetails {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", &self.kind())?;
        match self {
            Self::Bank(bank) => map.serialize_entry("bank", bank)?,
            Self::Wallet(wallet) => map.serialize_entry("wallet", wallet)?,
            Self::LocalPaymentNetwork(lpn) => map.serialize_entry("local_payment_network", lpn)?,
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BeneficiaryType {
    #[default]
    Individual,
    Business,
}

pub const BENEFICIARY_TYPE_EXPECTED: &str = "one of: individual, business";

fn check_currency(code: Option<&str>) -> Result<(), ToolError> {
    match code {
        Some(code) if !code.is_empty() => validate_currency(code),
        _ => Ok(()),
    }
}

fn check_country(code: Option<&str>) -> Result<(), ToolError> {
    match code {
        Some(code) if !code.is_empty() => validate_country(code),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_bank_destination_consolidates_codes() {
        let details = DestinationDetails::from_raw(obj(json!({
            "type": "bank",
            "bank": {
                "account_number": "1",
                "country": "IN",
                "currency": "INR",
                "ifsc_code": "HDFC0001234"
            }
        })))
        .unwrap();

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["type"], "bank");
        assert_eq!(json["bank"]["bank_codes"]["ifsc_code"], "HDFC0001234");
        assert!(json["bank"].get("ifsc_code").is_none());
    }

    #[test]
    fn test_other_branches_dropped() {
        let details = DestinationDetails::from_raw(obj(json!({
            "type": "wallet",
            "wallet": { "deposit_address": "0xabc", "currency": "USD" },
            "bank": { "account_number": "1" }
        })))
        .unwrap();

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["type"], "wallet");
        assert!(json.get("bank").is_none());
        assert_eq!(json["wallet"]["deposit_address"], "0xabc");
    }

    #[test]
    fn test_selected_branch_required() {
        let err = DestinationDetails::from_raw(obj(json!({
            "type": "local_payment_network",
            "bank": { "account_number": "1" }
        })))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required fields: destination_details.local_payment_network"
        );
    }

    #[test]
    fn test_missing_type() {
        let err = DestinationDetails::from_raw(obj(json!({ "bank": {} }))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required fields: destination_details.type"
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = DestinationDetails::from_raw(obj(json!({ "type": "cash" }))).unwrap_err();
        assert!(matches!(err, ToolError::InvalidFieldType { .. }));
    }

    #[test]
    fn test_branch_currency_and_country_validated() {
        let err = DestinationDetails::from_raw(obj(json!({
            "type": "bank",
            "bank": { "account_number": "1", "currency": "usd" }
        })))
        .unwrap_err();
        assert!(matches!(err, ToolError::InvalidCurrencyFormat(_)));

        let err = DestinationDetails::from_raw(obj(json!({
            "type": "bank",
            "bank": { "account_number": "1", "country": "SGP" }
        })))
        .unwrap_err();
        assert!(matches!(err, ToolError::InvalidCountryFormat(_)));

        let err = DestinationDetails::from_raw(obj(json!({
            "type": "wallet",
            "wallet": { "currency": "US" }
        })))
        .unwrap_err();
        assert!(matches!(err, ToolError::InvalidCurrencyFormat(_)));
    }

    #[test]
    fn test_absent_fields_not_serialized() {
        let phone = Phone {
            calling_code: Some("65".into()),
            number: None,
        };
        assert_eq!(serde_json::to_value(&phone).unwrap(), json!({ "calling_code": "65" }));
    }
}
