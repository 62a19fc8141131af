//! Application state.

use std::sync::Arc;
use std::time::Duration;

use idcard_backend::memory::MemoryBackend;
use idcard_backend::supabase::{Supabase, SupabaseConfig};
use idcard_backend::{AuthProvider, BackendError, ObjectStorage, RecordStore};

use crate::config::{BackendKind, ServiceConfig};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Session provider.
    pub auth: Arc<dyn AuthProvider>,

    /// Upload storage.
    pub storage: Arc<dyn ObjectStorage>,

    /// Application records.
    pub records: Arc<dyn RecordStore>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Build the state for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Configuration` when the Supabase backend is
    /// selected without a project URL and anon key.
    pub fn new(config: ServiceConfig) -> Result<Self, BackendError> {
        match config.backend {
            BackendKind::Supabase => {
                let (Some(url), Some(anon_key)) =
                    (config.supabase_url.clone(), config.supabase_anon_key.clone())
                else {
                    return Err(BackendError::Configuration(
                        "SUPABASE_URL and SUPABASE_ANON_KEY are required".into(),
                    ));
                };

                let mut supabase_config = SupabaseConfig::new(url, anon_key);
                supabase_config.jwt_secret = config.supabase_jwt_secret.clone();
                supabase_config.timeout = Duration::from_secs(config.backend_timeout_seconds);

                let supabase = Supabase::new(supabase_config)?;
                tracing::info!(
                    local_token_verification = config.supabase_jwt_secret.is_some(),
                    "Supabase backend enabled"
                );

                Ok(Self::with_backends(
                    config,
                    Arc::new(supabase.auth().clone()),
                    Arc::new(supabase.storage().clone()),
                    Arc::new(supabase.records().clone()),
                ))
            }
            BackendKind::Memory => {
                tracing::warn!("In-memory backend enabled - data is lost on restart");
                let backend = MemoryBackend::new();
                Ok(Self::with_backends(
                    config,
                    Arc::new(backend.clone()),
                    Arc::new(backend.clone()),
                    Arc::new(backend),
                ))
            }
        }
    }

    /// Build the state from explicit collaborators.
    #[must_use]
    pub fn with_backends(
        config: ServiceConfig,
        auth: Arc<dyn AuthProvider>,
        storage: Arc<dyn ObjectStorage>,
        records: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            auth,
            storage,
            records,
            config,
        }
    }
}
