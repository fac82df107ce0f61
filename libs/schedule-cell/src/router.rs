use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, patch},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

/// Schedule routes, all behind authentication. Role checks happen in the
/// handlers; the middleware only establishes identity.
pub fn schedule_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_schedules).post(handlers::create_schedule),
        )
        .route(
            "/schedule/{doctor_id}",
            get(handlers::get_schedule).put(handlers::update_schedule),
        )
        .route("/schedule/{doctor_id}/{day}", patch(handlers::patch_day))
        .route(
            "/schedule/{doctor_id}/available-slots/{date}",
            get(handlers::available_slots),
        )
        .route("/doctor/{doctor_id}", get(handlers::doctor_schedules))
        .route("/patient/{patient_id}", get(handlers::patient_appointments))
        .route("/{schedule_id}", delete(handlers::delete_schedule))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
