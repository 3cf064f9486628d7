use thiserror::Error;

/// Errors surfaced by the record engine and its boundary ports.
///
/// None of these are fatal: the request boundary translates each variant into
/// an HTTP status (or a redirect, for `AuthFailure`).
#[derive(Debug, Error)]
pub enum AgendaError {
    /// Malformed record payload or timestamp.
    #[error("invalid record payload: {0}")]
    Validation(String),

    /// Delete/replace referencing a key that is not in the record set.
    #[error("no record for subDate={0}")]
    NotFound(String),

    /// The backing store reported not ready.
    #[error("backing store is not ready")]
    UpstreamUnavailable,

    /// The OAuth code exchange failed.
    #[error("authentication failed: {0}")]
    AuthFailure(String),

    #[error("{0}")]
    Internal(String),
}

impl From<serde_json::Error> for AgendaError {
    fn from(err: serde_json::Error) -> Self {
        AgendaError::Validation(err.to_string())
    }
}
