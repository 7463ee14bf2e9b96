//! Tool-specific error types.

use thiserror::Error;

use crate::core::client::ApiError;

/// Errors that can occur while handling a tool call.
///
/// Everything up to and including [`ToolError::BeneficiaryXorDetails`] is raised
/// locally, before any request is sent.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The arguments could not be read as a string-keyed map.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A field was present but had the wrong JSON type.
    #[error("invalid type for field '{field}': expected {expected}")]
    InvalidFieldType {
        field: String,
        expected: &'static str,
    },

    /// One or more required fields were absent.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("invalid currency format: must be 3 uppercase letters (e.g., 'USD'), got '{0}'")]
    InvalidCurrencyFormat(String),

    #[error("invalid country format: must be 2 uppercase letters (e.g., 'US'), got '{0}'")]
    InvalidCountryFormat(String),

    #[error("invalid id format: must start with '{prefix}', got '{id}'")]
    InvalidIdFormat { prefix: &'static str, id: String },

    /// The id would not stay a single URL path segment.
    #[error("invalid id format: only letters, digits, '_' and '-' are allowed, got '{0}'")]
    InvalidIdCharacters(String),

    #[error("either 'beneficiary' or 'beneficiary_details' must be provided, but not both or neither")]
    BeneficiaryXorDetails,

    /// The backend call failed.
    #[error("{context}: {source}")]
    Api {
        context: &'static str,
        #[source]
        source: ApiError,
    },

    /// The response did not carry a `data` object.
    #[error("no data received in response")]
    NoData,

    /// A sub-field of `data` required to build the result was missing.
    #[error("missing {0} in response")]
    MissingResponseField(&'static str),

    /// The created resource's id was missing from the response.
    #[error("no {0} id in response")]
    MissingResourceId(&'static str),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "invalid field type" error.
    pub fn invalid_type(field: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidFieldType {
            field: field.into(),
            expected,
        }
    }

    /// Wrap a backend failure with the stage that produced it.
    pub fn api(context: &'static str, source: ApiError) -> Self {
        Self::Api { context, source }
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error was raised before any network call.
    pub fn is_local(&self) -> bool {
        !matches!(
            self,
            Self::Api { .. }
                | Self::NoData
                | Self::MissingResponseField(_)
                | Self::MissingResourceId(_)
                | Self::Internal(_)
        )
    }
}
