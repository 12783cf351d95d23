use axum::extract::State;
use axum::Json;

use crate::api::AppState;
use crate::error::AppError;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Ready once the store answers a query.
pub async fn ready(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let vehicles = state.repo.count_vehicles().await?;
    Ok(Json(serde_json::json!({"status": "ready", "vehicles": vehicles})))
}
