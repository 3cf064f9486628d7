//! HTTP surface: router, gate middleware, handlers.
//!
//! Request flow: CORS -> availability gate -> access gate -> route or static file.

mod handlers;
mod middleware;
mod session;

use std::path::Path;
use std::sync::Arc;

use agenda_core::{AccessGate, AuthSessionAdapter, BackingStore, RecordStore};
use axum::Router;
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

pub use self::handlers::{CallbackQuery, RecordForm};
pub use self::session::{session_cookie, session_token};

pub const AUTH_PATH: &str = "/auth/github";
pub const CALLBACK_PATH: &str = "/auth/github/authorized";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub backing: Arc<dyn BackingStore>,
    pub auth: Arc<dyn AuthSessionAdapter>,
    pub gate: Arc<AccessGate>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        backing: Arc<dyn BackingStore>,
        auth: Arc<dyn AuthSessionAdapter>,
        agenda_path: &str,
    ) -> Self {
        Self {
            store,
            backing,
            auth,
            gate: Arc::new(AccessGate::new(agenda_path, AUTH_PATH)),
        }
    }
}

/// Build the application router.
///
/// Layers added later run first, so the availability gate sees every request
/// before the access gate does.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    let data_path = format!("{}/data", state.gate.protected_root());

    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route(
            &data_path,
            get(handlers::list_records)
                .post(handlers::upsert_record)
                .put(handlers::upsert_record)
                .delete(handlers::delete_record),
        )
        .route(AUTH_PATH, get(handlers::login))
        .route(CALLBACK_PATH, get(handlers::authorized))
        .fallback_service(ServeDir::new(static_dir))
        .layer(from_fn_with_state(state.clone(), middleware::access_gate))
        .layer(from_fn_with_state(state.clone(), middleware::availability_gate))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `302 Found` to `location` (what browsers expect after a login round trip).
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}
