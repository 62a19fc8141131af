//! Backend error types.

use serde::Deserialize;

/// Result type alias using `BackendError`.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Errors returned by the external collaborators.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an error.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the service.
        message: String,
    },

    /// Email or password rejected.
    #[error("invalid login credentials")]
    InvalidCredentials,

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl BackendError {
    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::InvalidCredentials => self.to_string(),
            Self::Http(_) => "service unavailable".to_string(),
            Self::Serialization(_) | Self::Configuration(_) => "unexpected response".to_string(),
        }
    }
}

/// Error body shapes used by the hosted services.
///
/// PostgREST and Storage use `message`; GoTrue uses `msg`,
/// `error_description` or `error` depending on the endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.message
            .or(self.msg)
            .or(self.error_description)
            .or_else(|| match self.error {
                Some(serde_json::Value::String(s)) => Some(s),
                _ => None,
            })
    }
}

/// Build an `Api` error from a non-success response body.
pub(crate) fn api_error(status: u16, body: &str) -> BackendError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("request failed with status {status}"));

    BackendError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postgrest_message_is_used() {
        let err = api_error(
            409,
            r#"{"code":"23505","message":"duplicate key value violates unique constraint","details":null}"#,
        );
        assert_eq!(err.to_string(), "duplicate key value violates unique constraint");
    }

    #[test]
    fn gotrue_error_description_is_used() {
        let err = api_error(400, r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#);
        assert_eq!(err.user_message(), "Invalid login credentials");
    }

    #[test]
    fn unparseable_body_falls_back_to_status() {
        let err = api_error(502, "<html>bad gateway</html>");
        assert_eq!(err.to_string(), "request failed with status 502");
    }
}
