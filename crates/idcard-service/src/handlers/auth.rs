//! Login route handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use futures::StreamExt;
use serde::Deserialize;

use idcard_backend::{BackendError, Session};

use crate::error::PageError;
use crate::live;
use crate::notice::{Notice, NoticeQuery, Toast};
use crate::session::{MaybeSession, SessionCookies, SessionUser};
use crate::state::AppState;
use crate::views;

/// Email/password form.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// `GET /auth` - sign-in and registration forms.
///
/// A student who is already signed in goes straight to the landing page.
pub async fn login_page(
    MaybeSession(user): MaybeSession,
    Query(query): Query<NoticeQuery>,
) -> Response {
    if let Some(user) = user {
        return (user.renewed_cookies(), Redirect::to("/")).into_response();
    }
    Html(views::auth::render("", query.toast().as_ref())).into_response()
}

/// `POST /auth/sign-in`
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Form(credentials): Form<Credentials>,
) -> Result<Response, PageError> {
    let email = credentials.email.trim();

    match state.auth.sign_in(email, &credentials.password).await {
        Ok(session) => {
            tracing::info!(user_id = %session.user_id, "Signed in");
            Ok(signed_in(&state, &session))
        }
        Err(e) => rejected(email, e),
    }
}

/// `POST /auth/sign-up`
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    Form(credentials): Form<Credentials>,
) -> Result<Response, PageError> {
    let email = credentials.email.trim();

    match state.auth.sign_up(email, &credentials.password).await {
        Ok(Some(session)) => {
            tracing::info!(user_id = %session.user_id, "Registered and signed in");
            Ok(signed_in(&state, &session))
        }
        Ok(None) => {
            tracing::info!("Registered, awaiting email confirmation");
            Ok(Redirect::to(&Notice::ConfirmEmail.on("/auth")).into_response())
        }
        Err(e) => rejected(email, e),
    }
}

/// `POST /auth/sign-out`
///
/// The provider call is best effort; the cookies are cleared either way.
pub async fn sign_out(
    State(state): State<Arc<AppState>>,
    MaybeSession(user): MaybeSession,
) -> Response {
    if let Some(user) = user {
        match state.auth.sign_out(&user.session).await {
            Ok(()) => tracing::info!(user_id = %user.user_id(), "Signed out"),
            Err(e) => {
                tracing::warn!(user_id = %user.user_id(), error = %e, "Provider sign-out failed");
            }
        }
    }

    (
        SessionCookies::clear(state.config.cookie_secure),
        Redirect::to(&Notice::SignedOut.on("/")),
    )
        .into_response()
}

/// `GET /session/events` - tells an open gated page when its student signs
/// out elsewhere.
pub async fn session_events(State(state): State<Arc<AppState>>, user: SessionUser) -> Response {
    let redirects = live::sign_out_redirects(&state, &user.session)
        .map(|path| Ok::<_, axum::Error>(Event::default().event("redirect").data(path)));

    (
        user.renewed_cookies(),
        Sse::new(redirects).keep_alive(KeepAlive::default()),
    )
        .into_response()
}

fn signed_in(state: &AppState, session: &Session) -> Response {
    (
        SessionCookies::set(session, state.config.cookie_secure),
        Redirect::to(&Notice::SignedIn.on("/")),
    )
        .into_response()
}

/// Redraw the login page for errors the student can fix; anything else is
/// an error page.
fn rejected(email: &str, err: BackendError) -> Result<Response, PageError> {
    let status = match &err {
        BackendError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        BackendError::Api { status, .. } if (400..500).contains(status) => StatusCode::BAD_REQUEST,
        _ => return Err(err.into()),
    };

    tracing::debug!(error = %err, "Credentials rejected");
    let toast = Toast::error(err.user_message());
    Ok((status, Html(views::auth::render(email, Some(&toast)))).into_response())
}
