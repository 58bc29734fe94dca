use axum::{routing::get, Router};

use crate::app_state::AppState;
use crate::handlers::{
    create_appointment, delete_appointment, get_appointment, list_appointments,
    update_appointment,
};

pub fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/appointments", get(list_appointments).post(create_appointment))
        .route(
            "/appointments/:id",
            get(get_appointment)
                .put(update_appointment)
                .delete(delete_appointment),
        )
}
