pub mod health;
pub mod maintenance;
pub mod vehicles;

use crate::db::Repository;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Where every successful vehicle write redirects to.
pub const LIST_PATH: &str = "/list";

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

impl AppState {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/", get(vehicles::list_vehicles))
        .route(LIST_PATH, get(vehicles::list_vehicles))
        .route("/add", post(vehicles::create_vehicle))
        .route("/create", post(vehicles::create_vehicle))
        .route("/vehicle/:id", get(vehicles::get_vehicle))
        .route(
            "/update/:id",
            get(vehicles::get_vehicle).post(vehicles::update_vehicle),
        )
        .route("/delete/:id", get(vehicles::delete_vehicle))
        .route(
            "/vehicle/:id/maintenance",
            get(maintenance::get_maintenance_history),
        )
        .route(
            "/vehicle/:id/maintenance/add",
            post(maintenance::add_maintenance_record),
        )
        .layer(cors)
        .with_state(state)
}
