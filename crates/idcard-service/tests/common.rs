//! Common test utilities for idcard-service integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};

use idcard_backend::memory::MemoryBackend;
use idcard_backend::Session;
use idcard_core::UserId;
use idcard_service::{create_router, AppState, BackendKind, ServiceConfig};

/// Test harness wired to the in-memory backend.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The backend behind the server, for seeding and inspection.
    pub backend: MemoryBackend,
}

impl TestHarness {
    /// Create a new test harness with empty backend state.
    pub fn new() -> Self {
        let backend = MemoryBackend::new();

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            backend: BackendKind::Memory,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
            ..ServiceConfig::default()
        };

        let state = AppState::with_backends(
            config,
            Arc::new(backend.clone()),
            Arc::new(backend.clone()),
            Arc::new(backend.clone()),
        );
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, backend }
    }

    /// A live session for a fresh student.
    pub async fn session(&self) -> Session {
        self.backend.issue_session(UserId::generate()).await
    }

    /// A registered student with a live session.
    pub async fn registered(&self, email: &str) -> Session {
        use idcard_backend::AuthProvider;

        self.backend
            .sign_up(email, "correct horse")
            .await
            .expect("sign up")
            .expect("memory backend signs in on sign up")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// `Cookie` header carrying the access token of `session`.
pub fn session_cookie(session: &Session) -> (HeaderName, HeaderValue) {
    cookie_header(&format!("idcard_session={}", session.access_token))
}

/// `Cookie` header with a raw value.
pub fn cookie_header(value: &str) -> (HeaderName, HeaderValue) {
    (COOKIE, HeaderValue::from_str(value).expect("valid cookie header"))
}

/// Target of a redirect response.
pub fn location(response: &TestResponse) -> String {
    response
        .headers()
        .get(LOCATION)
        .expect("redirect has a location")
        .to_str()
        .expect("ascii location")
        .to_string()
}

/// All `Set-Cookie` values of a response.
pub fn set_cookies(response: &TestResponse) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// A complete, valid application form.
pub fn application_form() -> MultipartForm {
    MultipartForm::new()
        .add_text("fullName", "Amina Bello")
        .add_text("matricNumber", "FUL/SCI/20/0042")
        .add_text("faculty", "Faculty of Science")
        .add_text("department", "Computer Science")
        .add_text("level", "300")
        .add_part(
            "passport",
            Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
                .file_name("passport.jpg")
                .mime_type("image/jpeg"),
        )
        .add_part(
            "signature",
            Part::bytes(vec![0x89, 0x50, 0x4E, 0x47])
                .file_name("signature.png")
                .mime_type("image/png"),
        )
}
