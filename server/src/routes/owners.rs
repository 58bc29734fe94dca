use axum::{routing::get, Router};

use crate::app_state::AppState;
use crate::handlers::{create_owner, delete_owner, get_owner, list_owners, update_owner};

pub fn owner_routes() -> Router<AppState> {
    Router::new()
        .route("/owners", get(list_owners).post(create_owner))
        .route(
            "/owners/:id",
            get(get_owner).put(update_owner).delete(delete_owner),
        )
}
