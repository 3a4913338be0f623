//! Error types for the aisearch API client.
//!
//! # Design
//! Four failure families reach the caller unchanged: the transport could not
//! complete the round-trip, JSON could not be encoded or decoded, the server
//! answered with a non-2xx status, or a decoded payload did not fit the
//! record it was mapped onto. A 404 is the exception: actions report it as an
//! `ActionResult` with no model instead of an error.

use thiserror::Error;

/// Errors returned by the client, the transports and the pagers.
#[derive(Debug, Error)]
pub enum AisearchError {
    /// Connect, timeout or socket failure while executing a request.
    #[error("transport error: {0}")]
    Transport(String),

    /// A request body could not be encoded, or a response body was not valid JSON.
    #[error("JSON error for {context}: {source}")]
    Protocol {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The server returned a non-2xx status. `message` is the body's `error`
    /// field when one was sent.
    #[error("request failed with HTTP status {status}{}", status_suffix(.message))]
    HttpStatus {
        status: u16,
        message: Option<String>,
    },

    /// The decoded payload could not be mapped onto the expected record.
    #[error("mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Client configuration is missing or invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

fn status_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// A raw JSON value did not fit the record being built.
///
/// `field` is a dotted path from the root of the payload, e.g.
/// `products[2].variants[0].price`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("missing required field `{field}`")]
    MissingField { field: String },

    #[error("field `{field}` expected {expected}, found {found}")]
    InvalidType {
        field: String,
        expected: &'static str,
        found: String,
    },
}

impl MappingError {
    /// Path of the offending field.
    pub fn field(&self) -> &str {
        match self {
            MappingError::MissingField { field }
            | MappingError::InvalidType { field, .. } => field,
        }
    }

    /// Prefix the field path with the location of the enclosing record.
    pub(crate) fn within(self, prefix: &str) -> Self {
        let join = |field: String| {
            if field.is_empty() {
                prefix.to_string()
            } else {
                format!("{prefix}.{field}")
            }
        };
        match self {
            MappingError::MissingField { field } => MappingError::MissingField { field: join(field) },
            MappingError::InvalidType {
                field,
                expected,
                found,
            } => MappingError::InvalidType {
                field: join(field),
                expected,
                found,
            },
        }
    }
}
