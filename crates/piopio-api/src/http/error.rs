//! Application error type mapping to HTTP status codes and the `{"error": ...}`
//! body.
//!
//! Wire messages are fixed strings. Upstream detail is logged where the
//! failure happens and never reaches the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use piopio_types::error::RelayError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A required query parameter was absent or blank.
    MissingField(&'static str),
    /// The completion upstream failed.
    ChatFailed,
    /// The speech upstream failed.
    TtsFailed,
    /// The speech API key or voice id is not configured.
    MissingSpeechConfig,
    /// The request's `Origin` is not on the allow-list.
    OriginRejected,
}

impl AppError {
    /// Map a [`RelayError`] raised by the chat relay.
    pub fn from_chat(err: RelayError) -> Self {
        match err {
            RelayError::MissingField(field) => AppError::MissingField(field),
            RelayError::CorsRejected(_) => AppError::OriginRejected,
            RelayError::UpstreamFailure(_) | RelayError::Configuration(_) => AppError::ChatFailed,
        }
    }

    /// Map a [`RelayError`] raised by the speech relay.
    pub fn from_speech(err: RelayError) -> Self {
        match err {
            RelayError::MissingField(field) => AppError::MissingField(field),
            RelayError::CorsRejected(_) => AppError::OriginRejected,
            RelayError::Configuration(_) => AppError::MissingSpeechConfig,
            RelayError::UpstreamFailure(_) => AppError::TtsFailed,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingField(_) => StatusCode::BAD_REQUEST,
            AppError::OriginRejected => StatusCode::FORBIDDEN,
            AppError::ChatFailed | AppError::TtsFailed | AppError::MissingSpeechConfig => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::MissingField(field) => format!("Missing {field}"),
            AppError::ChatFailed => "Chat failed".to_string(),
            AppError::TtsFailed => "TTS failed".to_string(),
            AppError::MissingSpeechConfig => "Missing ElevenLabs config".to_string(),
            AppError::OriginRejected => "Origin not allowed".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}
