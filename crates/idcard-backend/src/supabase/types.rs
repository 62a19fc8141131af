//! GoTrue and Storage wire types.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use idcard_core::UserId;

use crate::session::Session;

/// Email/password credentials.
#[derive(Debug, Serialize)]
pub struct PasswordCredentials<'a> {
    /// Account email.
    pub email: &'a str,
    /// Account password.
    pub password: &'a str,
}

/// Refresh token grant body.
#[derive(Debug, Serialize)]
pub struct RefreshTokenGrant<'a> {
    /// The refresh token.
    pub refresh_token: &'a str,
}

/// GoTrue user object.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// User id.
    pub id: UserId,
    /// Email, if the account has one.
    #[serde(default)]
    pub email: Option<String>,
}

/// GoTrue token response (sign-in, refresh, auto-confirmed sign-up).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Expiry as a Unix timestamp.
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// The signed-in user.
    pub user: User,
}

impl TokenResponse {
    /// Convert into a `Session`, resolving the expiry against `now`.
    #[must_use]
    pub fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .or_else(|| {
                self.expires_in
                    .map(|secs| now + chrono::Duration::seconds(secs))
            });

        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            user_id: self.user.id,
            email: self.user.email,
            expires_at,
        }
    }
}

/// Sign-up response: a token response when the project auto-confirms,
/// otherwise the bare user awaiting email confirmation.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    /// Signed in immediately.
    Session(TokenResponse),
    /// Confirmation email sent.
    PendingConfirmation(User),
}

/// Claims carried in a GoTrue access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (user id).
    pub sub: String,
    /// Audience, `authenticated` for signed-in users.
    #[serde(default)]
    pub aud: Option<serde_json::Value>,
    /// Expiration time.
    pub exp: i64,
    /// Email.
    #[serde(default)]
    pub email: Option<String>,
}

/// Storage bulk-delete body.
#[derive(Debug, Serialize)]
pub struct RemoveObjects<'a> {
    /// Object names inside the bucket.
    pub prefixes: [&'a str; 1],
}
