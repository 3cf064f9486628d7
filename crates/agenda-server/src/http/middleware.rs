use agenda_core::ensure_available;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use super::{AppState, found, session_token};
use crate::error::ApiError;

/// 503 for every route while the backing store is not ready.
pub async fn availability_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if let Err(err) = ensure_available(state.backing.as_ref()) {
        debug!(path = %request.uri().path(), "rejecting request, backing store not ready");
        return ApiError::from(err).into_response();
    }
    next.run(request).await
}

/// Static files are looked up by decoded path, so the gate decides on the
/// decoded form too (`/%61genda/` is `/agenda/`).
pub async fn access_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let has_session = session_token(request.headers()).is_some();
    let decoded = urlencoding::decode_binary(request.uri().path().as_bytes());
    let path = String::from_utf8_lossy(&decoded);
    let decision = state.gate.decide(&path, has_session);
    match state.gate.location(decision) {
        Some(location) => {
            debug!(path = %request.uri().path(), ?decision, "access gate redirect");
            found(location)
        }
        None => next.run(request).await,
    }
}
