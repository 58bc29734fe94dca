//! Veterinary clinic back-office library
//!
//! Owners, pets, appointments and medical-record files behind a
//! bearer-token gate, with signup/login issuing the tokens.

pub mod app_state;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

pub use app_state::AppState;
pub use routes::build_router;
