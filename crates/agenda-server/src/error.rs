//! Error types for the HTTP boundary.

use agenda_core::AgendaError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};
use url::form_urlencoded;

use crate::http::found;

/// Message shown on the landing page after a failed login.
pub const AUTH_FAILURE_MESSAGE: &str = "Failed to authenticate with GitHub";

/// Wraps core errors so handlers can return them with `?`.
///
/// - Validation: 400 Bad Request
/// - NotFound: 404 Not Found
/// - UpstreamUnavailable: 503 Service Unavailable (empty body)
/// - AuthFailure: 302 to `/?error=...` (never a 5xx)
/// - Internal: 500 Internal Server Error
#[derive(Debug)]
pub struct ApiError(pub AgendaError);

impl ApiError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match &self.0 {
            AgendaError::Validation(_) => StatusCode::BAD_REQUEST,
            AgendaError::NotFound(_) => StatusCode::NOT_FOUND,
            AgendaError::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AgendaError::AuthFailure(_) => StatusCode::FOUND,
            AgendaError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AgendaError> for ApiError {
    fn from(err: AgendaError) -> Self {
        Self(err)
    }
}

/// `/?error=Failed+to+authenticate+with+GitHub`
pub fn auth_failure_location() -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("error", AUTH_FAILURE_MESSAGE)
        .finish();
    format!("/?{query}")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self.0 {
            AgendaError::Validation(reason) => (status, reason).into_response(),
            err @ AgendaError::NotFound(_) => (status, err.to_string()).into_response(),
            AgendaError::UpstreamUnavailable => status.into_response(),
            AgendaError::AuthFailure(reason) => {
                warn!(%reason, "oauth exchange failed");
                found(&auth_failure_location())
            }
            AgendaError::Internal(reason) => {
                // details stay in the log
                error!(%reason, "internal error");
                (status, "Internal server error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (AgendaError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AgendaError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AgendaError::UpstreamUnavailable, StatusCode::SERVICE_UNAVAILABLE),
            (AgendaError::AuthFailure("x".into()), StatusCode::FOUND),
            (AgendaError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            let api = ApiError::from(err);
            assert_eq!(api.status_code(), expected);
            assert_eq!(api.into_response().status(), expected);
        }
    }

    #[test]
    fn auth_failure_redirects_home_with_message() {
        let response = ApiError(AgendaError::AuthFailure("bad_verification_code".into()))
            .into_response();
        assert_eq!(
            response.headers()[LOCATION],
            "/?error=Failed+to+authenticate+with+GitHub"
        );
    }
}
