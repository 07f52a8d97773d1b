//! # Comercio API
//!
//! REST server for company owners, companies and products.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Comercio API Server                              │
//! │                                                                         │
//! │  Client ───► axum (3000) ───► handlers::resource<R> ───► EntityManager │
//! │                  │                     │                      │         │
//! │                  │                     ▼                      ▼         │
//! │            CORS, trace,           present()                SQLite      │
//! │            body limit                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The binary in `main.rs` only loads configuration, connects the database
//! and serves [`build_app`]; tests drive the same router in memory.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use axum::Router;
use comercio_db::Database;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ErrorCode};
pub use routes::create_router;
pub use state::AppState;

/// Builds the application router over a connected database.
pub fn build_app(db: Database, config: &ApiConfig) -> Router {
    create_router(AppState::new(db), config.request_body_limit)
}
