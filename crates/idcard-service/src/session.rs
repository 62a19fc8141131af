//! Session gate and session cookies.
//!
//! This module provides extractors for:
//! - `SessionUser` - a signed-in student; anything else is redirected to `/auth`
//! - `MaybeSession` - pages that render for everyone

use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, IntoResponseParts, Redirect, Response, ResponseParts};
use chrono::Utc;

use idcard_backend::Session;
use idcard_core::UserId;

use crate::state::AppState;

// ============================================================================
// Constants
// ============================================================================

/// Cookie holding the access token.
pub const ACCESS_COOKIE: &str = "idcard_session";

/// Cookie holding the refresh token.
pub const REFRESH_COOKIE: &str = "idcard_refresh";

/// Where the gate sends visitors without a session.
pub const LOGIN_ROUTE: &str = "/auth";

/// Access cookie lifetime when the provider does not report an expiry.
const DEFAULT_ACCESS_MAX_AGE_SECS: i64 = 60 * 60;

/// Refresh cookie lifetime (30 days).
const REFRESH_MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;

/// A signed-in student.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// The verified session.
    pub session: Session,
    /// Whether the session was renewed from the refresh cookie during this
    /// request, so new cookies must be sent back.
    renewed: bool,
    cookie_secure: bool,
}

impl SessionUser {
    /// The authenticated identity.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.session.user_id
    }

    /// Cookies to send back when the session was renewed.
    #[must_use]
    pub fn renewed_cookies(&self) -> Option<SessionCookies> {
        self.renewed
            .then(|| SessionCookies::set(&self.session, self.cookie_secure))
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for SessionUser {
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        resolve(&parts.headers, state).await.ok_or(LoginRedirect {
            cookie_secure: state.config.cookie_secure,
        })
    }
}

/// The signed-in student, if any.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<SessionUser>);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for MaybeSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve(&parts.headers, state).await))
    }
}

/// Find the session behind the request cookies.
///
/// A provider error is treated as "no session": the visitor is sent to log
/// in again rather than shown an error page.
async fn resolve(headers: &HeaderMap, state: &AppState) -> Option<SessionUser> {
    let cookie_secure = state.config.cookie_secure;

    if let Some(token) = cookie(headers, ACCESS_COOKIE) {
        match state.auth.get_session(token).await {
            Ok(Some(session)) => {
                return Some(SessionUser {
                    session,
                    renewed: false,
                    cookie_secure,
                })
            }
            Ok(None) => tracing::debug!("Access token no longer valid"),
            Err(e) => tracing::warn!(error = %e, "Session lookup failed"),
        }
    }

    let refresh_token = cookie(headers, REFRESH_COOKIE)?;
    match state.auth.refresh(refresh_token).await {
        Ok(session) => {
            tracing::debug!(user_id = %session.user_id, "Session renewed");
            Some(SessionUser {
                session,
                renewed: true,
                cookie_secure,
            })
        }
        Err(e) => {
            tracing::debug!(error = %e, "Session refresh failed");
            None
        }
    }
}

/// Value of the first non-empty cookie called `name`.
#[must_use]
pub fn cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then_some(value)
        })
        .find(|value| !value.is_empty())
}

/// Rejection of the session gate: clear stale cookies and go to `/auth`.
#[derive(Debug)]
pub struct LoginRedirect {
    cookie_secure: bool,
}

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        (
            SessionCookies::clear(self.cookie_secure),
            Redirect::to(LOGIN_ROUTE),
        )
            .into_response()
    }
}

/// `Set-Cookie` headers for the session cookies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookies {
    headers: Vec<String>,
}

impl SessionCookies {
    /// Store a session.
    #[must_use]
    pub fn set(session: &Session, secure: bool) -> Self {
        let access_max_age = session
            .expires_at
            .map_or(DEFAULT_ACCESS_MAX_AGE_SECS, |at| {
                (at - Utc::now()).num_seconds().max(0)
            });

        let mut headers = vec![cookie_header(
            ACCESS_COOKIE,
            &session.access_token,
            access_max_age,
            secure,
        )];
        if let Some(refresh) = &session.refresh_token {
            headers.push(cookie_header(
                REFRESH_COOKIE,
                refresh,
                REFRESH_MAX_AGE_SECS,
                secure,
            ));
        }

        Self { headers }
    }

    /// Remove both session cookies.
    #[must_use]
    pub fn clear(secure: bool) -> Self {
        Self {
            headers: vec![
                cookie_header(ACCESS_COOKIE, "", 0, secure),
                cookie_header(REFRESH_COOKIE, "", 0, secure),
            ],
        }
    }
}

fn cookie_header(name: &str, value: &str, max_age: i64, secure: bool) -> String {
    let mut header = format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
    if secure {
        header.push_str("; Secure");
    }
    header
}

impl IntoResponseParts for SessionCookies {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        for header in self.headers {
            match HeaderValue::from_str(&header) {
                Ok(value) => {
                    res.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => tracing::warn!(error = %e, "Dropping malformed session cookie"),
            }
        }
        Ok(res)
    }
}
