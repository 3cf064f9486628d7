use agenda_core::{AgendaError, HomeworkDraft, RecordKey, RecordSet};
use axum::extract::{Form, FromRequest, Query, Request, State};
use axum::http::header::{CONTENT_TYPE, SET_COOKIE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, async_trait};
use serde::Deserialize;
use tracing::info;

use super::{AppState, found, session_cookie};
use crate::error::ApiError;

/// Envelope of the record API: `newHW=<json>`.
///
/// Read from an urlencoded form, or from a JSON body `{"newHW": "<json>"}`
/// when the request says `application/json`.
#[derive(Debug, Deserialize)]
pub struct RecordForm {
    #[serde(rename = "newHW")]
    pub new_hw: String,
}

#[async_trait]
impl<S> FromRequest<S> for RecordForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.trim_start().starts_with("application/json"));

        let form = if is_json {
            Json::<RecordForm>::from_request(request, state)
                .await
                .map(|Json(form)| form)
                .map_err(|rejection| AgendaError::Validation(rejection.body_text()))?
        } else {
            Form::<RecordForm>::from_request(request, state)
                .await
                .map(|Form(form)| form)
                .map_err(|rejection| AgendaError::Validation(rejection.body_text()))?
        };
        Ok(form)
    }
}

pub async fn list_records(State(state): State<AppState>) -> Result<Json<RecordSet>, ApiError> {
    Ok(Json(state.store.list().await?))
}

/// POST and PUT: both create-or-replace.
pub async fn upsert_record(
    State(state): State<AppState>,
    form: RecordForm,
) -> Result<Response, ApiError> {
    let draft = HomeworkDraft::from_json(&form.new_hw)?;
    let record = state.store.upsert(draft).await?;
    let body =
        serde_json::to_string(&record).map_err(|e| AgendaError::Internal(e.to_string()))?;
    Ok((StatusCode::OK, [(CONTENT_TYPE, "text/plain")], body).into_response())
}

pub async fn delete_record(
    State(state): State<AppState>,
    form: RecordForm,
) -> Result<Response, ApiError> {
    let key = RecordKey::from_json(&form.new_hw)?;
    match state.store.remove(&key.sub_date).await? {
        Some(_) => Ok((StatusCode::OK, [(CONTENT_TYPE, "text/plain")]).into_response()),
        None => Err(AgendaError::NotFound(key.sub_date.to_string()).into()),
    }
}

/// Start the OAuth handshake.
pub async fn login(State(state): State<AppState>) -> Response {
    found(&state.auth.authorize_url())
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    /// Set by the provider when the user denies access.
    pub error: Option<String>,
}

/// OAuth callback: exchange the code, set the session cookie, go to the agenda.
pub async fn authorized(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, ApiError> {
    if let Some(error) = query.error {
        return Err(AgendaError::AuthFailure(error).into());
    }
    let code = query
        .code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| AgendaError::AuthFailure("missing authorization code".to_string()))?;

    let token = state.auth.exchange_code(&code).await?;
    let cookie = session_cookie(&token)?;
    info!("session established");

    let mut response = found(state.gate.protected_root());
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}
