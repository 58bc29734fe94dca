use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::models::{Appointment, AppointmentInput, MessageResponse};
use crate::services::AppointmentService;

fn appointment_not_found() -> ApiError {
    ApiError::NotFound("Appointment not found".to_string())
}

/// GET /appointments
pub async fn list_appointments(
    State(appointments): State<Arc<AppointmentService>>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    match appointments.list_appointments().await {
        Ok(list) => Ok(Json(list)),
        Err(e) => Err(ApiError::store("Failed to list appointments", e)),
    }
}

/// POST /appointments
pub async fn create_appointment(
    State(appointments): State<Arc<AppointmentService>>,
    ApiJson(input): ApiJson<AppointmentInput>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    input.validate()?;

    match appointments.create_appointment(input).await {
        Ok(appointment) => {
            tracing::info!(
                appointment_id = appointment.id,
                pet_id = appointment.pet_id,
                "Appointment booked"
            );
            Ok((StatusCode::CREATED, Json(appointment)))
        }
        Err(e) => Err(ApiError::store("Failed to create appointment", e)),
    }
}

/// GET /appointments/:id
pub async fn get_appointment(
    State(appointments): State<Arc<AppointmentService>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Appointment>, ApiError> {
    match appointments.get_appointment(id).await {
        Ok(Some(appointment)) => Ok(Json(appointment)),
        Ok(None) => Err(appointment_not_found()),
        Err(e) => Err(ApiError::store("Failed to fetch appointment", e)),
    }
}

/// PUT /appointments/:id
pub async fn update_appointment(
    State(appointments): State<Arc<AppointmentService>>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<AppointmentInput>,
) -> Result<Json<Appointment>, ApiError> {
    input.validate()?;

    match appointments.update_appointment(id, input).await {
        Ok(Some(appointment)) => Ok(Json(appointment)),
        Ok(None) => Err(appointment_not_found()),
        Err(e) => Err(ApiError::store("Failed to update appointment", e)),
    }
}

/// DELETE /appointments/:id
pub async fn delete_appointment(
    State(appointments): State<Arc<AppointmentService>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    match appointments.delete_appointment(id).await {
        Ok(true) => Ok(Json(MessageResponse {
            message: "Appointment deleted successfully",
        })),
        Ok(false) => Err(appointment_not_found()),
        Err(e) => Err(ApiError::store("Failed to delete appointment", e)),
    }
}
