use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::models::{MessageResponse, Owner, OwnerInput};
use crate::services::OwnerService;

/// GET /owners
pub async fn list_owners(
    State(owners): State<Arc<OwnerService>>,
) -> Result<Json<Vec<Owner>>, ApiError> {
    let list = owners
        .list_owners()
        .await
        .map_err(|e| ApiError::store("Failed to list owners", e))?;
    Ok(Json(list))
}

/// POST /owners
pub async fn create_owner(
    State(owners): State<Arc<OwnerService>>,
    ApiJson(input): ApiJson<OwnerInput>,
) -> Result<(StatusCode, Json<Owner>), ApiError> {
    input.validate()?;

    let owner = owners
        .create_owner(input)
        .await
        .map_err(|e| ApiError::store("Failed to create owner", e))?;

    tracing::info!(owner_id = owner.id, "Owner created");
    Ok((StatusCode::CREATED, Json(owner)))
}

/// GET /owners/:id
pub async fn get_owner(
    State(owners): State<Arc<OwnerService>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Owner>, ApiError> {
    owners
        .get_owner(id)
        .await
        .map_err(|e| ApiError::store("Failed to fetch owner", e))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Owner not found".to_string()))
}

/// PUT /owners/:id
pub async fn update_owner(
    State(owners): State<Arc<OwnerService>>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<OwnerInput>,
) -> Result<Json<Owner>, ApiError> {
    input.validate()?;

    owners
        .update_owner(id, input)
        .await
        .map_err(|e| ApiError::store("Failed to update owner", e))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Owner not found".to_string()))
}

/// DELETE /owners/:id
pub async fn delete_owner(
    State(owners): State<Arc<OwnerService>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = owners
        .delete_owner(id)
        .await
        .map_err(|e| ApiError::store("Failed to delete owner", e))?;

    if !deleted {
        return Err(ApiError::NotFound("Owner not found".to_string()));
    }

    tracing::info!(owner_id = id, "Owner deleted");
    Ok(Json(MessageResponse {
        message: "Owner deleted successfully",
    }))
}
