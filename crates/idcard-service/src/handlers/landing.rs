//! Landing page handler.

use axum::extract::Query;
use axum::response::{Html, IntoResponse, Response};

use crate::notice::NoticeQuery;
use crate::session::{MaybeSession, SessionUser};
use crate::views;

/// `GET /` - renders for everyone; the call to action depends on the session.
pub async fn landing(
    MaybeSession(user): MaybeSession,
    Query(query): Query<NoticeQuery>,
) -> Response {
    let html = views::landing::render(user.is_some(), query.toast().as_ref());
    let cookies = user.as_ref().and_then(SessionUser::renewed_cookies);
    (cookies, Html(html)).into_response()
}
