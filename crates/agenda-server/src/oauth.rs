//! GitHub OAuth adapter.
//!
//! Implements the authorization-code flow against GitHub: the login route
//! redirects to the authorize endpoint, the callback exchanges the returned
//! `code` for an access token.

use std::time::Duration;

use agenda_core::{AccessToken, AgendaError, AuthSessionAdapter};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use url::Url;

const AUTHORIZE_ENDPOINT: &str = "https://github.com/login/oauth/authorize";
const TOKEN_ENDPOINT: &str = "https://github.com/login/oauth/access_token";
const USER_SCOPE: &str = "read:user";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Token endpoint reply. GitHub answers 200 with `error` set on a bad code.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

pub struct GithubOAuth {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    callback_url: String,
    authorize_endpoint: Url,
    token_endpoint: String,
}

impl GithubOAuth {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Result<Self, AgendaError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AgendaError::Internal(format!("http client: {e}")))?;
        Ok(Self {
            client,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            callback_url: callback_url.into(),
            authorize_endpoint: parse_endpoint(AUTHORIZE_ENDPOINT)?,
            token_endpoint: TOKEN_ENDPOINT.to_string(),
        })
    }

    /// Point at a different provider (GitHub Enterprise, a local stub).
    pub fn with_endpoints(
        mut self,
        authorize_endpoint: &str,
        token_endpoint: impl Into<String>,
    ) -> Result<Self, AgendaError> {
        self.authorize_endpoint = parse_endpoint(authorize_endpoint)?;
        self.token_endpoint = token_endpoint.into();
        Ok(self)
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, AgendaError> {
    Url::parse(raw).map_err(|e| AgendaError::Internal(format!("bad oauth endpoint {raw:?}: {e}")))
}

#[async_trait]
impl AuthSessionAdapter for GithubOAuth {
    fn authorize_url(&self) -> String {
        let mut url = self.authorize_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.callback_url)
            .append_pair("scope", USER_SCOPE);
        url.into()
    }

    async fn exchange_code(&self, code: &str) -> Result<AccessToken, AgendaError> {
        let response = self
            .client
            .post(&self.token_endpoint)
            .header(ACCEPT, "application/json")
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.callback_url.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AgendaError::AuthFailure(format!("token request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgendaError::AuthFailure(format!(
                "token endpoint returned {status}"
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AgendaError::AuthFailure(format!("token response: {e}")))?;
        match body {
            TokenResponse {
                access_token: Some(token),
                ..
            } if !token.is_empty() => Ok(AccessToken::new(token)),
            TokenResponse {
                error,
                error_description,
                ..
            } => Err(AgendaError::AuthFailure(
                error_description
                    .or(error)
                    .unwrap_or_else(|| "no access token in response".to_string()),
            )),
        }
    }
}
