//! Live page updates.
//!
//! Each open gated page holds one session subscription. When its student
//! signs out the page is told to leave. An open dashboard also refetches the
//! application list on any other session change of its student.

use std::sync::Arc;

use futures::stream::{self, Stream};

use idcard_backend::{Session, SessionEvent, SessionSubscription};
use idcard_core::Application;

use crate::session::LOGIN_ROUTE;
use crate::state::AppState;

/// Something the dashboard page must react to.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardUpdate {
    /// Fresh application list, newest first.
    Applications(Vec<Application>),
    /// Navigate away; the stream ends after this.
    Redirect(&'static str),
}

/// Updates for the dashboard of `session`'s student.
///
/// The subscription is taken immediately, so events published after this
/// call returns are not missed. Dropping the stream unsubscribes.
pub fn dashboard_updates(
    state: Arc<AppState>,
    session: Session,
) -> impl Stream<Item = DashboardUpdate> + Send + 'static {
    let subscription = state.auth.subscribe();

    stream::unfold(
        Some(Cursor {
            state,
            session,
            subscription,
        }),
        |cursor| async move {
            let Some(mut cursor) = cursor else {
                return None;
            };
            let Some(event) = cursor.subscription.next_for(cursor.session.user_id).await else {
                return None;
            };

            match event {
                SessionEvent { session: None, .. } => {
                    tracing::debug!(user_id = %cursor.session.user_id, "Signed out, closing dashboard");
                    Some((DashboardUpdate::Redirect(LOGIN_ROUTE), None))
                }
                SessionEvent {
                    session: Some(session),
                    ..
                } => {
                    let applications = load_applications(&cursor.state, &session).await;
                    cursor.session = session;
                    Some((DashboardUpdate::Applications(applications), Some(cursor)))
                }
            }
        },
    )
}

/// Where a gated page showing `session`'s student must go once that
/// student signs out.
///
/// Yields at most one path and then ends. Sign-ins and token refreshes are
/// ignored. Dropping the stream unsubscribes.
pub fn sign_out_redirects(
    state: &AppState,
    session: &Session,
) -> impl Stream<Item = &'static str> + Send + 'static {
    let subscription = state.auth.subscribe();
    let user_id = session.user_id;

    stream::unfold(Some(subscription), move |subscription| async move {
        let Some(mut subscription) = subscription else {
            return None;
        };
        loop {
            let Some(event) = subscription.next_for(user_id).await else {
                return None;
            };
            if event.session.is_none() {
                tracing::debug!(user_id = %user_id, "Signed out, closing page");
                return Some((LOGIN_ROUTE, None));
            }
        }
    })
}

struct Cursor {
    state: Arc<AppState>,
    session: Session,
    subscription: SessionSubscription,
}

/// The student's applications, newest first.
///
/// A failed fetch is logged and shown as an empty list.
pub async fn load_applications(state: &AppState, session: &Session) -> Vec<Application> {
    match state
        .records
        .list_by_owner(session, session.user_id)
        .await
    {
        Ok(applications) => applications,
        Err(e) => {
            tracing::error!(user_id = %session.user_id, error = %e, "Failed to fetch applications");
            Vec::new()
        }
    }
}
