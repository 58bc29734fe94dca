//! API handlers for the clinic back-office

pub mod appointments;
pub mod auth;
pub mod files;
pub mod owners;
pub mod pets;

pub use appointments::*;
pub use auth::*;
pub use files::*;
pub use owners::*;
pub use pets::*;

pub async fn health_check() -> &'static str {
    "OK"
}
