use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ApiError;
use crate::extract::ApiQuery;
use crate::middleware::AuthenticatedUser;
use crate::models::{FileIdQuery, FileRecord, MessageResponse, PetFilesQuery};
use crate::services::{stored_file_name, FileService, NewUpload};

/// Largest accepted upload body
pub const MAX_UPLOAD_BYTES: usize = 10 << 20;

/// POST /upload (multipart: `file`, `pet_id`)
pub async fn upload_file(
    State(files): State<Arc<FileService>>,
    user: AuthenticatedUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<FileRecord>, ApiError> {
    let mut multipart = multipart?;
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut pet_id_raw: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse multipart form");
        ApiError::Validation("Error parsing form".to_string())
    })? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    tracing::warn!(error = %e, "Failed to read uploaded file");
                    ApiError::Validation("Error retrieving file".to_string())
                })?;
                file = Some((file_name, bytes.to_vec()));
            }
            "pet_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| ApiError::Validation("Invalid pet_id".to_string()))?;
                pet_id_raw = Some(text);
            }
            _ => {}
        }
    }

    let (file_name, bytes) =
        file.ok_or_else(|| ApiError::Validation("Error retrieving file".to_string()))?;
    let pet_id = match parse_positive_id(pet_id_raw.as_deref(), "pet_id") {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(pet_id = ?pet_id_raw, "Invalid pet_id provided for upload");
            return Err(e);
        }
    };

    let record = files
        .store_upload(NewUpload {
            pet_id,
            file_name,
            bytes,
        })
        .await
        .map_err(|e| ApiError::store("Failed to save file", e))?;

    tracing::info!(
        file = %record.file_name,
        pet_id,
        user_id = user.user_id,
        "File uploaded"
    );
    Ok(Json(record))
}

/// GET /download?id=N
pub async fn download_file(
    State(files): State<Arc<FileService>>,
    ApiQuery(query): ApiQuery<FileIdQuery>,
) -> Result<Response, ApiError> {
    let id = parse_positive_id(query.id.as_deref(), "id")
        .map_err(|_| ApiError::Validation("Invalid file ID".to_string()))?;

    let record = files
        .get_record(id)
        .await
        .map_err(|e| ApiError::store("Database error", e))?
        .ok_or_else(|| {
            tracing::warn!(file_id = id, "File not found in database");
            ApiError::NotFound("File not found".to_string())
        })?;

    let bytes = files
        .read_contents(&record)
        .await
        .map_err(|e| ApiError::store("Failed to read file", e))?
        .ok_or_else(|| {
            tracing::error!(path = %record.file_path, "File not found on disk");
            ApiError::Internal("File not found on server")
        })?;

    tracing::info!(file = %record.file_name, pet_id = record.pet_id, "File downloaded");
    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&record.file_name)),
        ],
        bytes,
    )
        .into_response())
}

/// GET /files?pet_id=N
pub async fn list_files(
    State(files): State<Arc<FileService>>,
    ApiQuery(query): ApiQuery<PetFilesQuery>,
) -> Result<Json<Vec<FileRecord>>, ApiError> {
    let pet_id = parse_positive_id(query.pet_id.as_deref(), "pet_id")?;

    let records = files
        .list_for_pet(pet_id)
        .await
        .map_err(|e| ApiError::store("Database error", e))?;
    Ok(Json(records))
}

/// DELETE /files/delete?id=N
pub async fn delete_file(
    State(files): State<Arc<FileService>>,
    ApiQuery(query): ApiQuery<FileIdQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_positive_id(query.id.as_deref(), "id")?;

    let deleted = files
        .delete(id)
        .await
        .map_err(|e| ApiError::store("Database error", e))?;
    if !deleted {
        return Err(ApiError::NotFound("File not found".to_string()));
    }

    tracing::info!(file_id = id, "File deleted");
    Ok(Json(MessageResponse {
        message: "File deleted successfully",
    }))
}

fn parse_positive_id(raw: Option<&str>, field: &str) -> Result<i32, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::Validation(format!("{} is required", field)))?;

    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::Validation(format!("Invalid {}", field))),
    }
}

/// `attachment` disposition with a header-safe rendering of `file_name`.
fn content_disposition(file_name: &str) -> String {
    let safe: String = stored_file_name(file_name)
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!("attachment; filename=\"{}\"", safe)
}
