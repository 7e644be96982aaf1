use thiserror::Error;

/// Errors returned while talking to the pump service.
///
/// These carry detail for logs only; a session reports every one of them to
/// the user as [`pumpfinder_core::SessionError::FetchFailed`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network, TLS, timeout or non-2xx status from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not JSON, or not the shape the variant expects.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid service URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Errors from a [`crate::LocationProvider`].
#[derive(Debug, Error)]
pub enum LocationError {
    /// No position source is configured or permitted.
    #[error("location unavailable")]
    Unavailable,

    /// A position lookup was attempted and failed.
    #[error("location lookup failed: {0}")]
    Lookup(String),
}
