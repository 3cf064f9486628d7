//! agenda-server
//!
//! HTTP surface for the homework agenda: configuration, logging, the axum
//! router with its gate middleware, and the boundary adapters (GitHub OAuth,
//! backing-store readiness probe).

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod oauth;
pub mod probe;

pub use config::{Args, Settings};
pub use error::ApiError;
pub use http::{AppState, router};
