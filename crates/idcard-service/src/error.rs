//! Page error types and responses.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use idcard_backend::BackendError;

use crate::views;

/// Error rendered as an HTML error page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Backend call failed.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Backend(err) => {
                tracing::error!(error = %err, "Backend call failed");
                (StatusCode::BAD_GATEWAY, err.user_message())
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        (status, Html(views::error_page(status, &message))).into_response()
    }
}

impl From<axum::extract::multipart::MultipartError> for PageError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        Self::BadRequest(err.body_text())
    }
}
