//! Middleware for the clinic API

pub mod auth;

pub use auth::{require_auth, AuthenticatedUser};
