//! Validating parse of untyped tool arguments.
//!
//! Every tool receives its arguments as a loosely-typed JSON map. [`ArgReader`]
//! walks that map once, handing back typed values and recording problems as it
//! goes; [`ArgReader::finish`] then reports the first wrong-typed field, or all
//! absent required fields together.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::validate::{validate_id_prefix, validate_id_segment};
use crate::core::client::JsonObject;
use crate::domains::tools::ToolError;

/// Parse a tool's parameter struct out of the raw argument map.
pub trait FromArguments: Sized {
    fn from_arguments(args: &JsonObject) -> Result<Self, ToolError>;
}

/// Single-pass reader over a tool argument map.
///
/// `null` is treated the same as an absent key, and an empty string counts as
/// "not supplied" for both required and optional string fields.
pub struct ArgReader<'a> {
    args: &'a JsonObject,
    prefix: &'static str,
    missing: Vec<String>,
    invalid: Option<ToolError>,
}

impl<'a> ArgReader<'a> {
    pub fn new(args: &'a JsonObject) -> Self {
        Self {
            args,
            prefix: "",
            missing: Vec::new(),
            invalid: None,
        }
    }

    /// Reader for a nested object; reported field names carry `prefix`,
    /// e.g. `"beneficiary_details."`.
    pub fn nested(args: &'a JsonObject, prefix: &'static str) -> Self {
        Self {
            prefix,
            ..Self::new(args)
        }
    }

    fn value(&self, key: &str) -> Option<&'a Value> {
        self.args.get(key).filter(|v| !v.is_null())
    }

    fn mark_missing(&mut self, key: &str) {
        self.missing.push(format!("{}{}", self.prefix, key));
    }

    fn mark_invalid(&mut self, key: &str, expected: &'static str) {
        if self.invalid.is_none() {
            self.invalid = Some(ToolError::invalid_type(
                format!("{}{}", self.prefix, key),
                expected,
            ));
        }
    }

    pub fn optional_str(&mut self, key: &str) -> Option<String> {
        match self.value(key)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            _ => {
                self.mark_invalid(key, "string");
                None
            }
        }
    }

    pub fn required_str(&mut self, key: &str) -> String {
        if self.value(key).is_none() {
            self.mark_missing(key);
            return String::new();
        }
        match self.optional_str(key) {
            Some(s) => s,
            None => {
                if self.value(key).and_then(Value::as_str).is_some() {
                    self.mark_missing(key);
                }
                String::new()
            }
        }
    }

    pub fn optional_f64(&mut self, key: &str) -> Option<f64> {
        let value = self.value(key)?;
        match value.as_f64() {
            Some(n) => Some(n),
            None => {
                self.mark_invalid(key, "number");
                None
            }
        }
    }

    pub fn required_f64(&mut self, key: &str) -> f64 {
        if self.value(key).is_none() {
            self.mark_missing(key);
            return 0.0;
        }
        self.optional_f64(key).unwrap_or_default()
    }

    pub fn optional_bool(&mut self, key: &str) -> Option<bool> {
        let value = self.value(key)?;
        match value.as_bool() {
            Some(b) => Some(b),
            None => {
                self.mark_invalid(key, "boolean");
                None
            }
        }
    }

    pub fn optional_object(&mut self, key: &str) -> Option<JsonObject> {
        match self.value(key)? {
            Value::Object(map) => Some(map.clone()),
            _ => {
                self.mark_invalid(key, "object");
                None
            }
        }
    }

    pub fn required_object(&mut self, key: &str) -> JsonObject {
        if self.value(key).is_none() {
            self.mark_missing(key);
            return JsonObject::new();
        }
        self.optional_object(key).unwrap_or_default()
    }

    /// Deserialize `key` into a typed value (an enum, a nested struct, ...).
    pub fn optional_as<T: DeserializeOwned>(
        &mut self,
        key: &str,
        expected: &'static str,
    ) -> Option<T> {
        let value = self.value(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.mark_invalid(key, expected);
                None
            }
        }
    }

    pub fn required_as<T: DeserializeOwned + Default>(
        &mut self,
        key: &str,
        expected: &'static str,
    ) -> T {
        if self.value(key).is_none() {
            self.mark_missing(key);
            return T::default();
        }
        self.optional_as(key, expected).unwrap_or_default()
    }

    /// Everything except `excluded` keys, for operations that forward the
    /// caller's fields to the API as-is.
    pub fn rest(&self, excluded: &[&str]) -> JsonObject {
        self.args
            .iter()
            .filter(|(k, _)| !excluded.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Report the first type error, otherwise every missing required field.
    pub fn finish(self) -> Result<(), ToolError> {
        if let Some(err) = self.invalid {
            return Err(err);
        }
        if !self.missing.is_empty() {
            return Err(ToolError::MissingFields(self.missing));
        }
        Ok(())
    }
}

/// Read the required `id` argument, checking its prefix when one is given.
///
/// The id always has to be a single path segment.
pub fn id_argument(args: &JsonObject, prefix: Option<&'static str>) -> Result<String, ToolError> {
    let mut reader = ArgReader::new(args);
    let id = reader.required_str("id");
    reader.finish()?;
    match prefix {
        Some(prefix) => validate_id_prefix(prefix, &id)?,
        None => validate_id_segment(&id)?,
    }
    Ok(id)
}

/// Turn a raw `arguments` value into an argument map.
pub fn arguments_object(arguments: Value) -> Result<JsonObject, ToolError> {
    match arguments {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(JsonObject::new()),
        other => Err(ToolError::invalid_arguments(format!(
            "expected an object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
