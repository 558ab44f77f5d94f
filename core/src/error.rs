//! Error types for the tracker API client and its forms.
//!
//! # Design
//! `ApiError` keeps the failure cause apart (status, decode, transport) so
//! the form layer can choose what to show. `FormError` adds the failures a
//! form detects before any request leaves the process.

/// Errors returned by `TrackerClient` parse methods and by hosts executing
/// requests.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404 for a single-record lookup.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status outside the 2xx range.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The host could not complete the round-trip (connection refused, DNS).
    #[error("request failed: {0}")]
    Transport(String),
}

/// Errors raised while submitting a form.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error(transparent)]
    Api(#[from] ApiError),
}
