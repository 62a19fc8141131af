//! External collaborators of the ID card portal.
//!
//! The portal owns no persistent state. It talks to three hosted services,
//! each hidden behind a narrow trait so the web layer can be handed either
//! the real implementation or an in-process double:
//!
//! - [`AuthProvider`]: sessions, sign-in/out, session-change notifications
//! - [`ObjectStorage`]: file uploads and public URLs
//! - [`RecordStore`]: insert and list application records
//!
//! # Implementations
//!
//! - [`supabase`]: Supabase REST APIs (GoTrue, Storage, PostgREST) over `reqwest`
//! - [`memory`]: in-process maps, for local development and tests
//!
//! # Example
//!
//! ```no_run
//! use idcard_backend::supabase::{Supabase, SupabaseConfig};
//! use idcard_backend::AuthProvider;
//!
//! # async fn example() -> Result<(), idcard_backend::BackendError> {
//! let supabase = Supabase::new(SupabaseConfig::new(
//!     "https://project.supabase.co",
//!     "anon-key",
//! ))?;
//!
//! let session = supabase.auth().sign_in("student@fulafia.edu.ng", "secret").await?;
//! println!("signed in as {}", session.user_id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)] // every trait method returns `Result<_, BackendError>`

pub mod error;
pub mod memory;
pub mod session;
pub mod supabase;

pub use error::{BackendError, Result};
pub use session::{Session, SessionEvent, SessionEvents, SessionSubscription};

use async_trait::async_trait;
use idcard_core::{Application, Bucket, NewApplication, UserId};

/// Authentication service.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve an access token to its session, `None` if the token is not
    /// (or no longer) valid.
    async fn get_session(&self, access_token: &str) -> Result<Option<Session>>;

    /// Exchange a refresh token for a new session.
    async fn refresh(&self, refresh_token: &str) -> Result<Session>;

    /// Email/password sign-in.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Register a new account. Returns a session when the provider signs the
    /// user in immediately, `None` when email confirmation is pending.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>>;

    /// End a session.
    async fn sign_out(&self, session: &Session) -> Result<()>;

    /// Subscribe to session changes. Dropping the subscription unsubscribes.
    fn subscribe(&self) -> SessionSubscription;
}

/// Object storage service.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` as `bucket/name`. Fails if the object already exists.
    async fn upload(
        &self,
        session: &Session,
        bucket: Bucket,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;

    /// Public URL of `bucket/name`.
    fn public_url(&self, bucket: Bucket, name: &str) -> String;

    /// Delete `bucket/name`.
    async fn remove(&self, session: &Session, bucket: Bucket, name: &str) -> Result<()>;
}

/// Application record store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert one application and return the stored row.
    async fn insert(&self, session: &Session, application: &NewApplication) -> Result<Application>;

    /// All applications owned by `owner`, newest first.
    async fn list_by_owner(&self, session: &Session, owner: UserId) -> Result<Vec<Application>>;
}
