//! ID card enrollment portal.
//!
//! Server-rendered web application where students apply for a university ID
//! card and follow the status of their applications:
//!
//! - `/` landing page
//! - `/auth` sign-in and registration
//! - `/apply` application form
//! - `/dashboard` application status cards, with live updates over SSE
//!
//! # Sessions
//!
//! The auth provider's access and refresh tokens are kept in `HttpOnly`
//! cookies. Pages that need a student are guarded by the [`session::SessionUser`]
//! extractor, which redirects to `/auth` before any data is touched.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Page handlers are async for uniformity

pub mod config;
pub mod error;
pub mod handlers;
pub mod live;
pub mod notice;
pub mod routes;
pub mod session;
pub mod state;
pub mod submission;
pub mod views;

pub use config::{BackendKind, ServiceConfig};
pub use error::PageError;
pub use routes::create_router;
pub use state::AppState;
