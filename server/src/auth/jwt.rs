//! Signed session tokens (HS256 issuance, HMAC-only verification)

use std::time::Duration;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AuthConfig;

/// Algorithms the verifier accepts. Anything else in the header is refused
/// before the signature is looked at.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    /// Expiry as seconds since the Unix epoch
    pub exp: u64,
}

/// Why a presented token was refused
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("token is malformed")]
    Malformed,

    #[error("token declares an unacceptable signing algorithm")]
    UnacceptableAlgorithm,

    #[error("token signature does not match")]
    BadSignature,

    #[error("token has expired")]
    Expired,
}

#[derive(Debug, Error)]
#[error("Failed to sign token: {0}")]
pub struct SignError(#[from] jsonwebtoken::errors::Error);

/// Creates tokens for authenticated users.
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: config.token_ttl,
        }
    }

    /// Issue a token for `user_id` that expires after the configured window.
    pub fn issue(&self, user_id: i32) -> Result<String, SignError> {
        let now = Utc::now().timestamp().max(0) as u64;
        let claims = Claims {
            user_id,
            exp: now + self.ttl.as_secs(),
        };
        self.sign(&claims)
    }

    /// Sign arbitrary claims with HS256.
    pub fn sign(&self, claims: &Claims) -> Result<String, SignError> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.key)?)
    }
}

/// Stateless verifier: no storage lookup, only the process secret and the clock.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verify `token` and return the user id it was issued for.
    ///
    /// Checks run in a fixed order: structure, declared algorithm, signature,
    /// expiry. The first failing check decides the error.
    pub fn verify(&self, token: &str) -> Result<i32, AuthError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(AuthError::Malformed);
        }

        match declared_algorithm(segments[0])?.parse::<Algorithm>() {
            Ok(alg) if ACCEPTED_ALGORITHMS.contains(&alg) => {}
            _ => return Err(AuthError::UnacceptableAlgorithm),
        }

        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims.user_id)
            .map_err(|e| classify(e.kind()))
    }
}

fn declared_algorithm(header_segment: &str) -> Result<String, AuthError> {
    let raw = URL_SAFE_NO_PAD
        .decode(header_segment)
        .map_err(|_| AuthError::Malformed)?;
    let header: serde_json::Value =
        serde_json::from_slice(&raw).map_err(|_| AuthError::Malformed)?;

    header
        .get("alg")
        .and_then(|alg| alg.as_str())
        .map(str::to_string)
        .ok_or(AuthError::Malformed)
}

fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::InvalidSignature => AuthError::BadSignature,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            AuthError::UnacceptableAlgorithm
        }
        _ => AuthError::Malformed,
    }
}
