//! Service configuration.

use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// Which backend implementation to wire in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Hosted Supabase project.
    Supabase,
    /// In-process maps; data is lost on restart.
    Memory,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supabase" => Ok(Self::Supabase),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown backend: {other}")),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Backend implementation (default: supabase).
    pub backend: BackendKind,

    /// Supabase project URL.
    pub supabase_url: Option<String>,

    /// Supabase anon key.
    pub supabase_anon_key: Option<String>,

    /// Supabase JWT secret for local token verification (optional).
    pub supabase_jwt_secret: Option<String>,

    /// Timeout for each backend call in seconds.
    pub backend_timeout_seconds: u64,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes. Uploads count against it.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Mark session cookies `Secure` (serve over HTTPS).
    pub cookie_secure: bool,
}

/// Supabase secrets file structure.
#[derive(Debug, Deserialize)]
struct SupabaseSecrets {
    url: String,
    anon_key: String,
    #[serde(default)]
    jwt_secret: Option<String>,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        let (supabase_url, supabase_anon_key, supabase_jwt_secret) = load_supabase_secrets();
        let defaults = Self::default();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            backend: std::env::var("BACKEND")
                .ok()
                .and_then(|s| {
                    s.parse()
                        .map_err(|e: String| tracing::warn!(error = %e, "Ignoring BACKEND"))
                        .ok()
                })
                .unwrap_or(defaults.backend),
            supabase_url,
            supabase_anon_key,
            supabase_jwt_secret,
            backend_timeout_seconds: parse_var("BACKEND_TIMEOUT_SECONDS")
                .unwrap_or(defaults.backend_timeout_seconds),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: parse_var("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: parse_var("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or(defaults.request_timeout_seconds),
            cookie_secure: parse_var("COOKIE_SECURE").unwrap_or(defaults.cookie_secure),
        }
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

/// Load Supabase secrets from file or environment.
fn load_supabase_secrets() -> (Option<String>, Option<String>, Option<String>) {
    let secret_paths = [".secrets/supabase.json", "../.secrets/supabase.json"];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<SupabaseSecrets>(path) {
            tracing::info!(path = %path, "Loaded Supabase secrets from file");
            return (
                Some(secrets.url),
                Some(secrets.anon_key),
                secrets.jwt_secret,
            );
        }
    }

    tracing::debug!("Supabase secrets file not found, using environment variables");
    (
        std::env::var("SUPABASE_URL").ok(),
        std::env::var("SUPABASE_ANON_KEY").ok(),
        std::env::var("SUPABASE_JWT_SECRET").ok(),
    )
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            backend: BackendKind::Supabase,
            supabase_url: None,
            supabase_anon_key: None,
            supabase_jwt_secret: None,
            backend_timeout_seconds: 30,
            cors_origins: vec!["*".into()],
            max_body_bytes: 10 * 1024 * 1024, // 10MB
            request_timeout_seconds: 60,
            cookie_secure: false,
        }
    }
}
