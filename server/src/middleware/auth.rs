//! Bearer-token gate in front of the protected routes

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthError, TokenVerifier};
use crate::error::ApiError;

const MISSING_CREDENTIAL: &str = "Missing Authorization header";
const MALFORMED_HEADER: &str = "Invalid Authorization header format";
const INVALID_TOKEN: &str = "Invalid or expired token";

/// Identity of the caller, present on every request that passed the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i32,
}

/// Why the gate turned a request away
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    MissingCredential,
    MalformedHeader,
    Token(AuthError),
}

impl Rejection {
    fn message(&self) -> &'static str {
        match self {
            Rejection::MissingCredential => MISSING_CREDENTIAL,
            Rejection::MalformedHeader => MALFORMED_HEADER,
            Rejection::Token(_) => INVALID_TOKEN,
        }
    }
}

/// Check the `Authorization: Bearer <token>` header of a request.
pub fn authenticate(
    headers: &HeaderMap,
    verifier: &TokenVerifier,
) -> Result<AuthenticatedUser, Rejection> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(Rejection::MissingCredential)?
        .to_str()
        .map_err(|_| Rejection::MalformedHeader)?;

    let parts: Vec<&str> = value.split(' ').collect();
    let token = match parts.as_slice() {
        ["Bearer", token] => *token,
        _ => return Err(Rejection::MalformedHeader),
    };

    verifier
        .verify(token)
        .map(|user_id| AuthenticatedUser { user_id })
        .map_err(Rejection::Token)
}

/// Rejects unauthenticated requests; otherwise attaches [`AuthenticatedUser`]
/// to the request and runs the wrapped handler once.
pub async fn require_auth(
    State(verifier): State<Arc<TokenVerifier>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match authenticate(request.headers(), &verifier) {
        Ok(user) => {
            tracing::debug!(user_id = user.user_id, "Authenticated request");
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        Err(rejection) => {
            tracing::warn!(
                reason = ?rejection,
                method = %request.method(),
                path = %request.uri().path(),
                "Unauthorized request"
            );
            Err(ApiError::Unauthorized(rejection.message()))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or(ApiError::Unauthorized(MISSING_CREDENTIAL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenIssuer;
    use crate::config::AuthConfig;
    use axum::http::HeaderValue;

    fn setup() -> (TokenIssuer, TokenVerifier) {
        let config = AuthConfig::new("gate-test-secret").unwrap();
        (TokenIssuer::new(&config), TokenVerifier::new(&config))
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_rejected() {
        let (_, verifier) = setup();
        assert_eq!(
            authenticate(&HeaderMap::new(), &verifier),
            Err(Rejection::MissingCredential)
        );
    }

    #[test]
    fn header_shape_is_checked() {
        let (issuer, verifier) = setup();
        let token = issuer.issue(5).unwrap();

        for value in [
            token.clone(),
            format!("Basic {}", token),
            format!("bearer {}", token),
            format!("Bearer  {}", token),
            format!("Bearer {} extra", token),
            "Bearer".to_string(),
        ] {
            assert_eq!(
                authenticate(&headers_with(&value), &verifier),
                Err(Rejection::MalformedHeader),
                "{value}"
            );
        }
    }

    #[test]
    fn valid_bearer_token_yields_user() {
        let (issuer, verifier) = setup();
        let token = issuer.issue(5).unwrap();
        assert_eq!(
            authenticate(&headers_with(&format!("Bearer {}", token)), &verifier),
            Ok(AuthenticatedUser { user_id: 5 })
        );
    }

    #[test]
    fn verifier_errors_are_carried() {
        let (_, verifier) = setup();
        assert_eq!(
            authenticate(&headers_with("Bearer not.a.token"), &verifier),
            Err(Rejection::Token(AuthError::Malformed))
        );
    }

    #[test]
    fn token_rejections_share_one_message() {
        for err in [
            AuthError::Malformed,
            AuthError::UnacceptableAlgorithm,
            AuthError::BadSignature,
            AuthError::Expired,
        ] {
            assert_eq!(Rejection::Token(err).message(), INVALID_TOKEN);
        }
    }
}
