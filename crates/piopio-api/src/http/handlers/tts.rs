//! `GET /tts` handler. Streams MP3 from the speech upstream as it arrives.

use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::http::error::AppError;
use crate::http::extractors::query::QueryParams;
use crate::state::AppState;

/// GET /tts?message=.. - synthesize speech for `message`.
pub async fn tts(State(state): State<AppState>, query: QueryParams) -> Result<Response, AppError> {
    let message = query.first("message").unwrap_or_default();

    let audio = state
        .speech
        .handle(message)
        .await
        .map_err(AppError::from_speech)?;

    Ok((
        [
            (header::CONTENT_TYPE, "audio/mpeg"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        Body::from_stream(audio),
    )
        .into_response())
}
