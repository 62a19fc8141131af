//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{apply, auth, dashboard, health, landing};
use crate::state::AppState;

// ============================================================================
// Concurrency Limiting Constants
// ============================================================================

/// Maximum concurrent page requests.
const PAGE_MAX_CONCURRENT_REQUESTS: usize = 100;

/// Maximum concurrent submissions. Each one holds two uploads in memory.
const SUBMIT_MAX_CONCURRENT_REQUESTS: usize = 20;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
/// - `GET /` - Landing page
/// - `GET /auth` - Sign-in and registration forms
/// - `POST /auth/sign-in`, `POST /auth/sign-up`, `POST /auth/sign-out`
/// - `GET /apply/departments` - Departments of a faculty (JSON)
///
/// ## Session required (redirect to `/auth` otherwise)
/// - `GET /apply` - Application form
/// - `POST /apply` - Submit an application (multipart)
/// - `GET /dashboard` - Application status
/// - `GET /dashboard/events` - Live dashboard updates (SSE)
/// - `GET /session/events` - Sign-out notice for an open page (SSE)
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let submit = post(apply::submit)
        .layer(ConcurrencyLimitLayer::new(SUBMIT_MAX_CONCURRENT_REQUESTS));

    // Live streams stay open, so they are neither concurrency-limited with
    // the pages nor subject to the request timeout.
    let live_routes = Router::new()
        .route("/session/events", get(auth::session_events))
        .route("/dashboard/events", get(dashboard::events));

    let page_routes = Router::new()
        .route("/", get(landing::landing))
        .route("/auth", get(auth::login_page))
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/sign-up", post(auth::sign_up))
        .route("/auth/sign-out", post(auth::sign_out))
        .route("/apply", get(apply::apply_page).merge(submit))
        .route("/apply/departments", get(apply::departments))
        .route("/dashboard", get(dashboard::dashboard))
        .layer(ConcurrencyLimitLayer::new(PAGE_MAX_CONCURRENT_REQUESTS))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )));

    Router::new()
        // Health (public, no rate limit)
        .route("/health", get(health::health))
        .merge(page_routes)
        .merge(live_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
