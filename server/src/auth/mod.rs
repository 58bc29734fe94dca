//! Authentication for the clinic API
//!
//! - bcrypt password hashing
//! - HS256 session token issuance and verification
//! - credential persistence behind the [`CredentialStore`] trait

pub mod jwt;
pub mod password;
pub mod store;

pub use jwt::{AuthError, Claims, SignError, TokenIssuer, TokenVerifier};
pub use password::{HashError, PasswordHasher};
pub use store::{CredentialStore, PgCredentialStore};
