//! `GET /chat` handler.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::http::error::AppError;
use crate::http::extractors::query::QueryParams;
use crate::state::AppState;

/// GET /chat?message=..&sessionId=.. - one conversational turn.
pub async fn chat(
    State(state): State<AppState>,
    query: QueryParams,
) -> Result<Json<Value>, AppError> {
    let message = query.first("message").unwrap_or_default();
    let session_id = query.first("sessionId").unwrap_or_default();

    let output = state
        .chat
        .handle(message, session_id)
        .await
        .map_err(AppError::from_chat)?;

    Ok(Json(json!({ "output": output })))
}
