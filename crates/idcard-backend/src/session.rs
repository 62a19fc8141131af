//! Sessions and session-change notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use idcard_core::UserId;

/// Number of undelivered events a slow subscriber may fall behind by before
/// it starts skipping.
const EVENT_CAPACITY: usize = 64;

/// An authenticated session issued by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for calls made on the user's behalf.
    pub access_token: String,
    /// Token used to renew the session.
    pub refresh_token: Option<String>,
    /// Authenticated identity.
    pub user_id: UserId,
    /// Account email, when the provider reports one.
    pub email: Option<String>,
    /// When `access_token` stops being accepted.
    pub expires_at: Option<DateTime<Utc>>,
}

/// A change in a user's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    /// Whose session changed.
    pub user_id: UserId,
    /// The new session, `None` after sign-out.
    pub session: Option<Session>,
}

impl SessionEvent {
    /// A sign-in or token refresh.
    #[must_use]
    pub fn signed_in(session: Session) -> Self {
        Self {
            user_id: session.user_id,
            session: Some(session),
        }
    }

    /// A sign-out.
    #[must_use]
    pub fn signed_out(user_id: UserId) -> Self {
        Self {
            user_id,
            session: None,
        }
    }
}

/// Fan-out hub for session changes.
///
/// Auth providers own one and publish on every sign-in, refresh and
/// sign-out.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    /// Create an empty hub.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    /// Notify every live subscriber.
    pub fn publish(&self, event: SessionEvent) {
        let user_id = event.user_id;
        let signed_in = event.session.is_some();
        // No subscribers is fine.
        let delivered = self.tx.send(event).unwrap_or(0);
        tracing::debug!(user_id = %user_id, signed_in, delivered, "Session event published");
    }

    /// Start receiving events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// A live subscription to session changes. Dropping it unsubscribes.
#[derive(Debug)]
pub struct SessionSubscription {
    rx: broadcast::Receiver<SessionEvent>,
}

impl SessionSubscription {
    /// Wait for the next event. Returns `None` once the hub is gone.
    pub async fn next(&mut self) -> Option<SessionEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Session subscriber lagged, skipping events");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Wait for the next event concerning `user_id`.
    pub async fn next_for(&mut self, user_id: UserId) -> Option<SessionEvent> {
        loop {
            let event = self.next().await?;
            if event.user_id == user_id {
                return Some(event);
            }
        }
    }
}
