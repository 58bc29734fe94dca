use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::app_state::AppState;
use crate::handlers::{delete_file, download_file, list_files, upload_file};

pub fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_file))
        .route("/download", get(download_file))
        .route("/files", get(list_files))
        .route("/files/delete", delete(delete_file))
}
