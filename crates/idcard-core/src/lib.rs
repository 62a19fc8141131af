//! Core types and utilities for the ID card enrollment portal.
//!
//! This crate provides the foundational types used throughout the portal:
//!
//! - **Identifiers**: `UserId`
//! - **Applications**: `Application`, `NewApplication`, `ApplicationStatus`, `StatusBadge`
//! - **Catalog**: `Faculty`, `Level`, `FacultySelection`
//! - **Forms**: `ApplicationForm`, `ValidatedForm`
//! - **Uploads**: `object_name`, `Bucket`
//!
//! Nothing here performs I/O. Persistence, authentication and file storage
//! live behind the traits in `idcard-backend`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod application;
pub mod catalog;
pub mod error;
pub mod form;
pub mod ids;
pub mod status;
pub mod upload;

pub use application::{Application, NewApplication};
pub use catalog::{Faculty, FacultySelection, Level};
pub use error::ValidationError;
pub use form::{ApplicationForm, ValidatedForm};
pub use ids::{IdError, UserId};
pub use status::{ApplicationStatus, BadgeIcon, BadgeVariant, StatusBadge};
pub use upload::{file_extension, object_name, Bucket};
