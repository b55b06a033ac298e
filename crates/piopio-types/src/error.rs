use thiserror::Error;

/// Errors surfaced by the chat and speech relays and the origin guard.
///
/// The HTTP layer maps each variant to a fixed, generic wire message; the
/// carried detail is for server-side logs only.
#[derive(Debug, Error)]
pub enum RelayError {
    /// A required request field was absent or blank.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// The request origin is not on the allow-list.
    #[error("origin not allowed: {0}")]
    CorsRejected(String),

    /// The completion or speech upstream failed (network, auth, quota, ...).
    #[error("upstream failure: {0}")]
    UpstreamFailure(String),

    /// Required server-side configuration is absent.
    #[error("configuration error: {0}")]
    Configuration(String),
}
