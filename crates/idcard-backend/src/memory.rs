//! In-process backend.
//!
//! `MemoryBackend` implements all three collaborator traits over maps held
//! in memory. The portal can run against it locally (`BACKEND=memory`), and
//! the integration tests use it as a test double. Failures can be injected
//! per bucket and for record operations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use idcard_core::{Application, Bucket, NewApplication, UserId};

use crate::error::{BackendError, Result};
use crate::session::{Session, SessionEvent, SessionEvents, SessionSubscription};
use crate::{AuthProvider, ObjectStorage, RecordStore};

/// Base of the URLs returned by `public_url`.
const PUBLIC_URL_BASE: &str = "http://localhost/storage";

/// In-memory auth, storage and record store.
///
/// Cloning yields another handle to the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<RwLock<State>>,
    events: SessionEvents,
}

#[derive(Debug, Default)]
struct State {
    /// email -> (password, user)
    accounts: HashMap<String, (String, UserId)>,
    /// access token -> session
    sessions: HashMap<String, Session>,
    /// refresh token -> user
    refresh_tokens: HashMap<String, UserId>,
    objects: HashMap<(Bucket, String), StoredObject>,
    applications: Vec<Application>,
    failing_buckets: Vec<Bucket>,
    insert_failure: Option<String>,
    list_failure: Option<String>,
    last_created_at: Option<DateTime<Utc>>,
}

/// An uploaded object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// File contents.
    pub bytes: Vec<u8>,
    /// MIME type given at upload.
    pub content_type: String,
}

impl MemoryBackend {
    /// An empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a signed-in session for `user_id` without going through
    /// sign-in. No event is published.
    pub async fn issue_session(&self, user_id: UserId) -> Session {
        self.inner.write().await.start_session(user_id, None)
    }

    /// Make every upload to `bucket` fail.
    pub async fn fail_uploads_to(&self, bucket: Bucket) {
        self.inner.write().await.failing_buckets.push(bucket);
    }

    /// Make every insert fail with `message`.
    pub async fn fail_inserts(&self, message: impl Into<String>) {
        self.inner.write().await.insert_failure = Some(message.into());
    }

    /// Make every list fail with `message`.
    pub async fn fail_lists(&self, message: impl Into<String>) {
        self.inner.write().await.list_failure = Some(message.into());
    }

    /// Store a record as-is, bypassing the insert path.
    pub async fn seed_application(&self, application: Application) {
        self.inner.write().await.applications.push(application);
    }

    /// All stored applications in insertion order.
    pub async fn applications(&self) -> Vec<Application> {
        self.inner.read().await.applications.clone()
    }

    /// Names of the objects currently stored in `bucket`.
    pub async fn objects_in(&self, bucket: Bucket) -> Vec<String> {
        let mut names: Vec<String> = self
            .inner
            .read()
            .await
            .objects
            .keys()
            .filter(|(b, _)| *b == bucket)
            .map(|(_, name)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// A stored object.
    pub async fn object(&self, bucket: Bucket, name: &str) -> Option<StoredObject> {
        self.inner
            .read()
            .await
            .objects
            .get(&(bucket, name.to_string()))
            .cloned()
    }

    /// Number of live session subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.events.subscriber_count()
    }
}

fn new_session(user_id: UserId, email: Option<String>) -> Session {
    Session {
        access_token: uuid::Uuid::new_v4().simple().to_string(),
        refresh_token: Some(uuid::Uuid::new_v4().simple().to_string()),
        user_id,
        email,
        expires_at: Some(Utc::now() + Duration::hours(1)),
    }
}

impl State {
    fn start_session(&mut self, user_id: UserId, email: Option<String>) -> Session {
        let session = new_session(user_id, email);
        if let Some(refresh) = &session.refresh_token {
            self.refresh_tokens.insert(refresh.clone(), user_id);
        }
        self.sessions
            .insert(session.access_token.clone(), session.clone());
        session
    }

    /// Strictly increasing creation times, so newest-first ordering is total.
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let created_at = match self.last_created_at {
            Some(last) if now <= last => last + Duration::milliseconds(1),
            _ => now,
        };
        self.last_created_at = Some(created_at);
        created_at
    }
}

fn require_session(state: &State, session: &Session) -> Result<()> {
    if state.sessions.contains_key(&session.access_token) {
        Ok(())
    } else {
        Err(BackendError::Api {
            status: 401,
            message: "invalid JWT".into(),
        })
    }
}

#[async_trait]
impl AuthProvider for MemoryBackend {
    async fn get_session(&self, access_token: &str) -> Result<Option<Session>> {
        Ok(self.inner.read().await.sessions.get(access_token).cloned())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session> {
        let session = {
            let mut state = self.inner.write().await;
            let user_id = state
                .refresh_tokens
                .remove(refresh_token)
                .ok_or(BackendError::InvalidCredentials)?;
            let email = state
                .accounts
                .iter()
                .find(|(_, (_, id))| *id == user_id)
                .map(|(email, _)| email.clone());
            state.start_session(user_id, email)
        };

        self.events.publish(SessionEvent::signed_in(session.clone()));
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let session = {
            let mut state = self.inner.write().await;
            let user_id = match state.accounts.get(email) {
                Some((stored, user_id)) if stored == password => *user_id,
                _ => return Err(BackendError::InvalidCredentials),
            };
            state.start_session(user_id, Some(email.to_string()))
        };

        self.events.publish(SessionEvent::signed_in(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>> {
        let session = {
            let mut state = self.inner.write().await;
            if state.accounts.contains_key(email) {
                return Err(BackendError::Api {
                    status: 422,
                    message: "User already registered".into(),
                });
            }
            let user_id = UserId::generate();
            state
                .accounts
                .insert(email.to_string(), (password.to_string(), user_id));
            state.start_session(user_id, Some(email.to_string()))
        };

        self.events.publish(SessionEvent::signed_in(session.clone()));
        Ok(Some(session))
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        {
            let mut state = self.inner.write().await;
            state.sessions.retain(|_, s| s.user_id != session.user_id);
            state.refresh_tokens.retain(|_, user| *user != session.user_id);
        }

        self.events.publish(SessionEvent::signed_out(session.user_id));
        Ok(())
    }

    fn subscribe(&self) -> SessionSubscription {
        self.events.subscribe()
    }
}

#[async_trait]
impl ObjectStorage for MemoryBackend {
    async fn upload(
        &self,
        session: &Session,
        bucket: Bucket,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let mut state = self.inner.write().await;
        require_session(&state, session)?;

        if state.failing_buckets.contains(&bucket) {
            return Err(BackendError::Api {
                status: 500,
                message: format!("bucket {bucket} unavailable"),
            });
        }

        let key = (bucket, name.to_string());
        if state.objects.contains_key(&key) {
            return Err(BackendError::Api {
                status: 409,
                message: "The resource already exists".into(),
            });
        }

        state.objects.insert(
            key,
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, name: &str) -> String {
        format!("{PUBLIC_URL_BASE}/{}/{name}", bucket.name())
    }

    async fn remove(&self, session: &Session, bucket: Bucket, name: &str) -> Result<()> {
        let mut state = self.inner.write().await;
        require_session(&state, session)?;
        state.objects.remove(&(bucket, name.to_string()));
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryBackend {
    async fn insert(&self, session: &Session, application: &NewApplication) -> Result<Application> {
        let mut state = self.inner.write().await;
        require_session(&state, session)?;

        if let Some(message) = &state.insert_failure {
            return Err(BackendError::Api {
                status: 400,
                message: message.clone(),
            });
        }

        let created_at = state.next_created_at();
        let stored = application
            .clone()
            .into_application(uuid::Uuid::new_v4().to_string(), created_at);
        state.applications.push(stored.clone());
        Ok(stored)
    }

    async fn list_by_owner(&self, session: &Session, owner: UserId) -> Result<Vec<Application>> {
        let state = self.inner.read().await;
        require_session(&state, session)?;

        if let Some(message) = &state.list_failure {
            return Err(BackendError::Api {
                status: 500,
                message: message.clone(),
            });
        }

        let mut rows: Vec<Application> = state
            .applications
            .iter()
            .filter(|a| a.user_id == owner)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}
