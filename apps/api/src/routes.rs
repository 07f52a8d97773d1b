//! Router construction.
//!
//! ```text
//! /health                      GET
//! /company-owners[/{pid}]      POST GET | GET PUT DELETE
//! /companies[/{pid}]           POST GET | GET PUT DELETE
//! /products[/{pid}]            POST GET | GET PUT DELETE
//! ```

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use comercio_db::{EntityManager, Resource};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, resource};
use crate::state::AppState;

/// Builds the full application router with middleware.
pub fn create_router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .with_state(state.clone())
        .merge(resource_routes("/company-owners", state.owners))
        .merge(resource_routes("/companies", state.companies))
        .merge(resource_routes("/products", state.products))
        // RequestBodyLimitLayer owns the limit; axum's own 2 MB cap is lifted
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        // Mirrors the request origin and allows credentials
        .layer(CorsLayer::very_permissive())
}

/// The five CRUD routes for one resource under `base`.
fn resource_routes<R: Resource>(base: &str, manager: EntityManager<R>) -> Router {
    Router::new()
        .route(
            base,
            get(resource::find_all::<R>).post(resource::create::<R>),
        )
        .route(
            &format!("{base}/{{pid}}"),
            get(resource::find_one::<R>)
                .put(resource::update::<R>)
                .delete(resource::remove::<R>),
        )
        .with_state(manager)
}
