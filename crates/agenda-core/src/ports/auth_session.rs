//! AuthSessionAdapter port - OAuth handshake の抽象化
//!
//! core が使うのは token の有無と値だけです。
//! code 交換の詳細（provider の URL、client secret など）は実装側に閉じます。

use std::fmt;

use async_trait::async_trait;

use crate::domain::AgendaError;

/// Cookie holding the access token; its presence is the session.
pub const SESSION_COOKIE: &str = "access_token";

/// Opaque token issued by the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// AuthSessionAdapter は OAuth の code 交換を担当
///
/// # フロー
/// 1. `authorize_url()` へ redirect（provider のログイン画面）
/// 2. provider が callback に `code` を付けて戻す
/// 3. `exchange_code()` で access token を取得 → cookie に保存
#[async_trait]
pub trait AuthSessionAdapter: Send + Sync {
    /// Provider authorization URL the login route redirects to.
    fn authorize_url(&self) -> String;

    /// Exchange an authorization code for an access token.
    ///
    /// Failures are reported as `AgendaError::AuthFailure`.
    async fn exchange_code(&self, code: &str) -> Result<AccessToken, AgendaError>;
}
