// ── Core error types ──
//
// Remote failures pass through untouched as `CoreError::Api`; the other
// variants cover what the manager itself can detect: missing response
// fields, unresolvable identifiers, bad caller input, and response records
// that don't decode into the shape a summary needs.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Error raised by the service provider, unmodified.
    #[error(transparent)]
    Api(#[from] slnet_api::Error),

    /// A field the operation depends on was absent from the response.
    #[error("Response is missing field '{field}'")]
    MissingField { field: &'static str },

    #[error("No {entity_type} found matching '{identifier}'")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Unexpected response shape: {message}")]
    Decode { message: String },
}

impl From<slnet_api::InvalidFilter> for CoreError {
    fn from(err: slnet_api::InvalidFilter) -> Self {
        CoreError::ValidationFailed {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Decode {
            message: err.to_string(),
        }
    }
}
