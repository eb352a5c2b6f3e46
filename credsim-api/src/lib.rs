//! HTTP API for people and credit simulations.
//!
//! All CRUD routes live under `/api`; `/health` is a liveness probe. The
//! data store is injected through [`build_router`].

mod error;
mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use credsim_storage::DataStore;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult, ErrorDetail, ErrorResponse};

/// Build the HTTP API router over the given data store.
pub fn build_router(store: Arc<dyn DataStore>) -> Router {
    let api = Router::new()
        .route("/create-people", post(handlers::create_people))
        .route("/peoples", get(handlers::list_people))
        .route("/delete-people/{id}", delete(handlers::delete_people))
        .route("/create-simulation", post(handlers::create_simulation))
        .route("/simulations", get(handlers::list_simulations))
        .route("/get-restrictions/{cpf}", get(handlers::get_restrictions))
        .route("/simulation-by-cpf/{cpf}", get(handlers::simulation_by_cpf))
        .route("/delete-simulation/{id}", delete(handlers::delete_simulation))
        .route("/update-simulation/{id}", put(handlers::update_simulation));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .with_state(store)
        .layer(TraceLayer::new_for_http())
}
