//! Salted bcrypt hashing for stored credentials

use thiserror::Error;

use crate::config::AuthConfig;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("Failed to hash password: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// bcrypt hasher with a fixed work factor.
///
/// Both operations are CPU-bound; async callers go through
/// [`PasswordHasher::hash_blocking`] and [`PasswordHasher::verify_blocking`],
/// which move the work onto the blocking thread pool.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.bcrypt_cost)
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash `password` with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Returns `false` for a mismatch and for a hash that cannot be parsed.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash could not be parsed");
                false
            }
        }
    }

    pub async fn hash_blocking(&self, password: String) -> Result<String, HashError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&password)).await?
    }

    pub async fn verify_blocking(&self, password: String, hash: String) -> bool {
        let hasher = *self;
        match tokio::task::spawn_blocking(move || hasher.verify(&password, &hash)).await {
            Ok(valid) => valid,
            Err(join_error) => {
                tracing::error!(error = %join_error, "Password verification task failed");
                false
            }
        }
    }

    /// Spend one bcrypt round at this cost for a caller with no stored hash,
    /// so the rejection takes as long as a wrong password. Always `false`.
    pub async fn reject_blocking(&self, password: String) -> bool {
        let hasher = *self;
        let burned = tokio::task::spawn_blocking(move || {
            let _ = hasher.hash(&password);
        })
        .await;
        if let Err(join_error) = burned {
            tracing::error!(error = %join_error, "Password rejection task failed");
        }
        false
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(crate::config::BCRYPT_COST)
    }
}
