//! Page and endpoint handlers.

pub mod apply;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod landing;
