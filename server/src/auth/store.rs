//! Credential persistence

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::Credential;

/// Storage of user identities and their password hashes.
///
/// Credentials are write-once: created at signup, read at login.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist a new credential and return its id.
    ///
    /// A taken email yields [`StoreError::Duplicate`].
    async fn create(&self, email: &str, password_hash: &str) -> Result<i32, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError>;
}

/// Postgres-backed credential store over the `users` table
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create(&self, email: &str, password_hash: &str) -> Result<i32, StoreError> {
        sqlx::query_scalar::<_, i32>(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING id",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError> {
        let credential = sqlx::query_as::<_, Credential>(
            "SELECT id, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }
}
