use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::models::{MessageResponse, Pet, PetInput};
use crate::services::PetService;

fn pet_not_found() -> ApiError {
    ApiError::NotFound("Pet not found".to_string())
}

/// GET /pets
pub async fn list_pets(State(pets): State<Arc<PetService>>) -> Result<Json<Vec<Pet>>, ApiError> {
    match pets.list_pets().await {
        Ok(list) => Ok(Json(list)),
        Err(e) => Err(ApiError::store("Failed to list pets", e)),
    }
}

/// POST /pets
pub async fn create_pet(
    State(pets): State<Arc<PetService>>,
    ApiJson(input): ApiJson<PetInput>,
) -> Result<(StatusCode, Json<Pet>), ApiError> {
    input.validate()?;

    match pets.create_pet(input).await {
        Ok(pet) => {
            tracing::info!(pet_id = pet.id, owner_id = pet.owner_id, "Pet created");
            Ok((StatusCode::CREATED, Json(pet)))
        }
        Err(e) => Err(ApiError::store("Failed to create pet", e)),
    }
}

/// GET /pets/:id
pub async fn get_pet(
    State(pets): State<Arc<PetService>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Pet>, ApiError> {
    match pets.get_pet(id).await {
        Ok(Some(pet)) => Ok(Json(pet)),
        Ok(None) => Err(pet_not_found()),
        Err(e) => Err(ApiError::store("Failed to fetch pet", e)),
    }
}

/// PUT /pets/:id
pub async fn update_pet(
    State(pets): State<Arc<PetService>>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<PetInput>,
) -> Result<Json<Pet>, ApiError> {
    input.validate()?;

    match pets.update_pet(id, input).await {
        Ok(Some(pet)) => Ok(Json(pet)),
        Ok(None) => Err(pet_not_found()),
        Err(e) => Err(ApiError::store("Failed to update pet", e)),
    }
}

/// DELETE /pets/:id
pub async fn delete_pet(
    State(pets): State<Arc<PetService>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    match pets.delete_pet(id).await {
        Ok(true) => {
            tracing::info!(pet_id = id, "Pet deleted");
            Ok(Json(MessageResponse {
                message: "Pet deleted successfully",
            }))
        }
        Ok(false) => Err(pet_not_found()),
        Err(e) => Err(ApiError::store("Failed to delete pet", e)),
    }
}
