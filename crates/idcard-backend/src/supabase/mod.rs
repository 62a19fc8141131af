//! Supabase implementations of the backend traits.
//!
//! One `reqwest` client is shared by the three services:
//!
//! - GoTrue (`/auth/v1`) for sessions
//! - Storage (`/storage/v1`) for uploads
//! - PostgREST (`/rest/v1`) for application records
//!
//! Calls made on a student's behalf carry the project anon key in `apikey`
//! and the student's access token as the bearer, so row-level security on
//! the project applies.

pub mod auth;
pub mod records;
pub mod storage;
pub mod types;

pub use auth::SupabaseAuth;
pub use records::SupabaseRecords;
pub use storage::SupabaseStorage;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};

use crate::error::{api_error, BackendError, Result};
use crate::session::SessionEvents;

/// Default timeout for a single call to the project.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`.
    pub url: String,
    /// Public anon key.
    pub anon_key: String,
    /// JWT secret. When set, access tokens are verified locally instead of
    /// asking GoTrue on every request.
    pub jwt_secret: Option<String>,
    /// Per-call timeout.
    pub timeout: Duration,
}

impl SupabaseConfig {
    /// Settings with no JWT secret and the default timeout.
    #[must_use]
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            jwt_secret: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Handle to a Supabase project, handing out the three service clients.
#[derive(Debug, Clone)]
pub struct Supabase {
    auth: SupabaseAuth,
    storage: SupabaseStorage,
    records: SupabaseRecords,
}

impl Supabase {
    /// Connect to a project.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Configuration` if the URL or key is empty, or
    /// the HTTP client cannot be built.
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        let client = SupabaseClient::new(&config)?;

        Ok(Self {
            auth: SupabaseAuth::new(client.clone(), config.jwt_secret, SessionEvents::new()),
            storage: SupabaseStorage::new(client.clone()),
            records: SupabaseRecords::new(client),
        })
    }

    /// GoTrue client.
    #[must_use]
    pub fn auth(&self) -> &SupabaseAuth {
        &self.auth
    }

    /// Storage client.
    #[must_use]
    pub fn storage(&self) -> &SupabaseStorage {
        &self.storage
    }

    /// PostgREST client.
    #[must_use]
    pub fn records(&self) -> &SupabaseRecords {
        &self.records
    }
}

/// Shared HTTP plumbing.
#[derive(Debug, Clone)]
pub(crate) struct SupabaseClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    fn new(config: &SupabaseConfig) -> Result<Self> {
        let base_url = config.url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(BackendError::Configuration("Supabase URL is empty".into()));
        }
        if config.anon_key.trim().is_empty() {
            return Err(BackendError::Configuration("Supabase anon key is empty".into()));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                anon_key: config.anon_key.clone(),
            }),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    /// Request authorised with the anon key only.
    pub(crate) fn anon(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.inner
            .http
            .request(method, self.url(path))
            .header("apikey", &self.inner.anon_key)
    }

    /// Request made on behalf of a signed-in user.
    pub(crate) fn as_user(
        &self,
        method: reqwest::Method,
        path: &str,
        access_token: &str,
    ) -> RequestBuilder {
        self.anon(method, path).bearer_auth(access_token)
    }

    /// Turn a non-success response into `BackendError::Api`.
    pub(crate) async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = %status, body = %body, "Supabase returned an error");
        Err(api_error(status.as_u16(), &body))
    }
}
