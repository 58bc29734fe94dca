use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::app_state::AppState;
use crate::error::{ApiError, StoreError};
use crate::extract::ApiJson;
use crate::middleware::AuthenticatedUser;
use crate::models::{Credentials, LoginResponse, MeResponse, SignupResponse};

const BAD_CREDENTIALS: &str = "Invalid email or password";

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    if let Err(e) = credentials.validate() {
        tracing::warn!("Signup failed: missing email or password");
        return Err(e.into());
    }

    let password_hash = state
        .hasher
        .hash_blocking(credentials.password)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to hash password");
            ApiError::Internal("Failed to process signup")
        })?;

    let user_id = state
        .credentials
        .create(&credentials.email, &password_hash)
        .await
        .map_err(|e| {
            if matches!(e, StoreError::Duplicate) {
                tracing::warn!(email = %credentials.email, "Signup rejected: email already registered");
            }
            ApiError::store("Email already in use or database error", e)
        })?;

    tracing::info!(email = %credentials.email, user_id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully",
            user_id,
        }),
    ))
}

/// POST /login
///
/// Unknown email and wrong password produce the same 401 after the same
/// amount of bcrypt work.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> Result<Json<LoginResponse>, ApiError> {
    let found = state
        .credentials
        .find_by_email(&credentials.email)
        .await
        .map_err(|e| ApiError::store("Database error", e))?;

    let Some(credential) = found else {
        state.hasher.reject_blocking(credentials.password).await;
        tracing::warn!(email = %credentials.email, "Login failed: user not found");
        return Err(ApiError::Unauthorized(BAD_CREDENTIALS));
    };

    let valid = state
        .hasher
        .verify_blocking(credentials.password, credential.password_hash)
        .await;
    if !valid {
        tracing::warn!(email = %credentials.email, "Login failed: incorrect password");
        return Err(ApiError::Unauthorized(BAD_CREDENTIALS));
    }

    let token = state.issuer.issue(credential.id).map_err(|e| {
        tracing::error!(error = %e, "Failed to generate token");
        ApiError::Internal("Failed to generate token")
    })?;

    tracing::info!(email = %credentials.email, user_id = credential.id, "User logged in");
    Ok(Json(LoginResponse { token }))
}

/// GET /me
pub async fn me(user: AuthenticatedUser) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: user.user_id,
    })
}
