//! Data models for the clinic back-office

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub mod auth;
pub use auth::*;

/// Owner model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Owner {
    pub id: i32,
    pub name: String,
    pub contact: String,
    pub email: String,
}

/// Request DTO for creating or replacing an owner
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct OwnerInput {
    #[validate(length(min = 1))]
    pub name: String,
    pub contact: String,
    #[validate(length(min = 1))]
    pub email: String,
}

/// Pet model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pet {
    pub id: i32,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub owner_id: i32,
    pub medical_history: String,
}

/// Request DTO for creating or replacing a pet
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PetInput {
    #[validate(length(min = 1))]
    pub name: String,
    pub species: String,
    pub breed: String,
    #[validate(range(min = 1))]
    pub owner_id: i32,
    pub medical_history: String,
}

/// Appointment model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Appointment {
    pub id: i32,
    pub pet_id: i32,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub reason: String,
}

/// Request DTO for creating or replacing an appointment
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AppointmentInput {
    #[validate(range(min = 1))]
    pub pet_id: i32,
    #[validate(required)]
    pub appointment_date: Option<NaiveDate>,
    #[validate(required)]
    pub appointment_time: Option<NaiveTime>,
    pub reason: String,
}

/// Metadata of a stored medical-record file
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FileRecord {
    pub id: i32,
    pub pet_id: i32,
    pub file_name: String,
    pub file_path: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Query parameters for `/download` and `/files/delete`
#[derive(Debug, Deserialize)]
pub struct FileIdQuery {
    pub id: Option<String>,
}

/// Query parameters for `/files`
#[derive(Debug, Deserialize)]
pub struct PetFilesQuery {
    pub pet_id: Option<String>,
}

/// Plain acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}
