//! Dashboard handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{Html, IntoResponse, Response};
use futures::StreamExt;

use crate::live::{self, DashboardUpdate};
use crate::notice::NoticeQuery;
use crate::session::SessionUser;
use crate::state::AppState;
use crate::views;

/// `GET /dashboard`
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
    Query(query): Query<NoticeQuery>,
) -> Response {
    let applications = live::load_applications(&state, &user.session).await;
    tracing::debug!(user_id = %user.user_id(), count = applications.len(), "Dashboard loaded");

    let html = views::dashboard::render(&applications, query.toast().as_ref());
    (user.renewed_cookies(), Html(html)).into_response()
}

/// `GET /dashboard/events` - live updates for an open dashboard.
pub async fn events(State(state): State<Arc<AppState>>, user: SessionUser) -> Response {
    let cookies = user.renewed_cookies();
    let updates = live::dashboard_updates(state, user.session).map(into_event);

    (cookies, Sse::new(updates).keep_alive(KeepAlive::default())).into_response()
}

fn into_event(update: DashboardUpdate) -> Result<Event, axum::Error> {
    match update {
        DashboardUpdate::Applications(applications) => Event::default()
            .event("applications")
            .json_data(views::dashboard::applications(&applications)),
        DashboardUpdate::Redirect(path) => Ok(Event::default().event("redirect").data(path)),
    }
}
