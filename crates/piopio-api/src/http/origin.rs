//! Origin enforcement middleware and the matching CORS layer.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

use piopio_core::origin::OriginGuard;

use crate::http::error::AppError;
use crate::state::AppState;

/// Reject requests whose `Origin` is not on the allow-list before any
/// handler (and therefore any upstream call) runs.
pub async fn enforce_origin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

    if let Err(e) = state.origin_guard.check(origin.as_deref()) {
        warn!(path = %request.uri().path(), error = %e, "request rejected by origin guard");
        return AppError::OriginRejected.into_response();
    }

    next.run(request).await
}

/// CORS headers for allowed origins. Allowed origins are echoed back in
/// `Access-Control-Allow-Origin`.
pub fn cors_layer(guard: Arc<OriginGuard>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &axum::http::request::Parts| {
                let origin = String::from_utf8_lossy(origin.as_bytes());
                guard.is_allowed(Some(origin.as_ref()))
            },
        ))
        .allow_methods([Method::GET])
        .allow_headers(Any)
}
