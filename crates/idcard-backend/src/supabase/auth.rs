//! GoTrue session client.

use std::fmt;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use reqwest::{Method, StatusCode};

use idcard_core::UserId;

use super::types::{
    AccessTokenClaims, PasswordCredentials, RefreshTokenGrant, SignUpResponse, TokenResponse, User,
};
use super::SupabaseClient;
use crate::error::{BackendError, Result};
use crate::session::{Session, SessionEvent, SessionEvents, SessionSubscription};
use crate::AuthProvider;

/// Audience GoTrue puts in tokens of signed-in users.
const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// GoTrue client implementing [`AuthProvider`].
#[derive(Clone)]
pub struct SupabaseAuth {
    client: SupabaseClient,
    jwt_key: Option<DecodingKey>,
    events: SessionEvents,
}

impl fmt::Debug for SupabaseAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseAuth")
            .field("client", &self.client)
            .field("local_verification", &self.jwt_key.is_some())
            .finish_non_exhaustive()
    }
}

impl SupabaseAuth {
    pub(crate) fn new(
        client: SupabaseClient,
        jwt_secret: Option<String>,
        events: SessionEvents,
    ) -> Self {
        Self {
            client,
            jwt_key: jwt_secret.map(|s| DecodingKey::from_secret(s.as_bytes())),
            events,
        }
    }

    /// Verify an access token against the project JWT secret.
    fn verify_locally(key: &DecodingKey, access_token: &str) -> Option<Session> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUTHENTICATED_AUDIENCE]);

        let claims = match decode::<AccessTokenClaims>(access_token, key, &validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!(error = %e, "Access token rejected");
                return None;
            }
        };

        let user_id = claims.sub.parse::<UserId>().ok()?;

        Some(Session {
            access_token: access_token.to_string(),
            refresh_token: None,
            user_id,
            email: claims.email,
            expires_at: Utc.timestamp_opt(claims.exp, 0).single(),
        })
    }

    /// Ask GoTrue who owns an access token.
    async fn fetch_user(&self, access_token: &str) -> Result<Option<Session>> {
        let response = self
            .client
            .as_user(Method::GET, "/auth/v1/user", access_token)
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }

        let user: User = SupabaseClient::check(response).await?.json().await?;

        Ok(Some(Session {
            access_token: access_token.to_string(),
            refresh_token: None,
            user_id: user.id,
            email: user.email,
            expires_at: None,
        }))
    }

    async fn token_grant<B: serde::Serialize + Sync>(
        &self,
        grant_type: &str,
        body: &B,
    ) -> Result<Session> {
        let response = self
            .client
            .anon(Method::POST, "/auth/v1/token")
            .query(&[("grant_type", grant_type)])
            .json(body)
            .send()
            .await?;

        if response.status() == StatusCode::BAD_REQUEST {
            tracing::debug!(grant_type, "Token grant rejected");
            return Err(BackendError::InvalidCredentials);
        }

        let token: TokenResponse = SupabaseClient::check(response).await?.json().await?;
        let session = token.into_session(Utc::now());

        self.events.publish(SessionEvent::signed_in(session.clone()));
        Ok(session)
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn get_session(&self, access_token: &str) -> Result<Option<Session>> {
        if access_token.is_empty() {
            return Ok(None);
        }

        match &self.jwt_key {
            Some(key) => Ok(Self::verify_locally(key, access_token)),
            None => self.fetch_user(access_token).await,
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session> {
        self.token_grant("refresh_token", &RefreshTokenGrant { refresh_token })
            .await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let session = self
            .token_grant("password", &PasswordCredentials { email, password })
            .await?;
        tracing::info!(user_id = %session.user_id, "User signed in");
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>> {
        let response = self
            .client
            .anon(Method::POST, "/auth/v1/signup")
            .json(&PasswordCredentials { email, password })
            .send()
            .await?;

        let body: SignUpResponse = SupabaseClient::check(response).await?.json().await?;

        match body {
            SignUpResponse::Session(token) => {
                let session = token.into_session(Utc::now());
                tracing::info!(user_id = %session.user_id, "User registered and signed in");
                self.events.publish(SessionEvent::signed_in(session.clone()));
                Ok(Some(session))
            }
            SignUpResponse::PendingConfirmation(user) => {
                tracing::info!(user_id = %user.id, "User registered, awaiting confirmation");
                Ok(None)
            }
        }
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        let result: Result<()> = async {
            let response = self
                .client
                .as_user(Method::POST, "/auth/v1/logout", &session.access_token)
                .send()
                .await?;
            SupabaseClient::check(response).await.map(|_| ())
        }
        .await;

        // The local session is over either way.
        self.events.publish(SessionEvent::signed_out(session.user_id));
        tracing::info!(user_id = %session.user_id, "User signed out");
        result
    }

    fn subscribe(&self) -> SessionSubscription {
        self.events.subscribe()
    }
}
