use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use schedule_cell::router::schedule_routes;
use shared_config::AppConfig;
use shared_database::StoreClient;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Schedule service is running!" }))
        .route("/health", get(health_check))
        .with_state(state.clone())
        .nest("/api/schedules", schedule_routes(state))
}

async fn health_check(State(state): State<Arc<AppConfig>>) -> Json<Value> {
    let store = StoreClient::new(&state);
    let store_status = match store.health_check().await {
        Ok(()) => "ok",
        Err(_) => "unreachable",
    };

    Json(json!({
        "status": "ok",
        "service": "schedule-service",
        "store": store_status
    }))
}
