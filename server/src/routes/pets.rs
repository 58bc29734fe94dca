use axum::{routing::get, Router};

use crate::app_state::AppState;
use crate::handlers::{create_pet, delete_pet, get_pet, list_pets, update_pet};

pub fn pet_routes() -> Router<AppState> {
    Router::new()
        .route("/pets", get(list_pets).post(create_pet))
        .route("/pets/:id", get(get_pet).put(update_pet).delete(delete_pet))
}
