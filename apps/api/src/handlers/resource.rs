//! # Resource Handlers
//!
//! One set of handlers serves all three collections.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /products  {"name": "Bolo", "price": 39.05, ...}                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Json<NewProduct>           ── rejected ──► 400                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EntityManager<ProductResource>::create                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductRecord {id: 7, price: 3905, company: {id: 2, ...}}             │
//! │       │  present()                                                      │
//! │       ▼                                                                 │
//! │  201 {"pid": "…", "price": 39.05, "company": {"pid": "…", ...}}        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use comercio_core::present;
use comercio_db::{EntityManager, Resource};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

type Presented = Result<Json<Value>, ApiError>;

/// Serializes a record and applies the boundary transform exactly once.
fn presented<T: Serialize>(record: &T) -> Presented {
    Ok(Json(present(serde_json::to_value(record)?)))
}

/// POST /{collection}
pub async fn create<R: Resource>(
    State(manager): State<EntityManager<R>>,
    body: Result<Json<R::New>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(input) = body?;
    let record = manager.create(input).await?;
    Ok((StatusCode::CREATED, presented(&record)?))
}

/// GET /{collection}
pub async fn find_all<R: Resource>(State(manager): State<EntityManager<R>>) -> Presented {
    let records = manager.find_all().await?;
    presented(&records)
}

/// GET /{collection}/{pid}
pub async fn find_one<R: Resource>(
    State(manager): State<EntityManager<R>>,
    Path(pid): Path<String>,
) -> Presented {
    let record = manager.find_one(&pid).await?;
    presented(&record)
}

/// PUT /{collection}/{pid}
pub async fn update<R: Resource>(
    State(manager): State<EntityManager<R>>,
    Path(pid): Path<String>,
    body: Result<Json<R::Changes>, JsonRejection>,
) -> Presented {
    let Json(changes) = body?;
    let record = manager.update(&pid, changes).await?;
    presented(&record)
}

/// DELETE /{collection}/{pid} - 200 with an empty body.
pub async fn remove<R: Resource>(
    State(manager): State<EntityManager<R>>,
    Path(pid): Path<String>,
) -> Result<StatusCode, ApiError> {
    manager.remove(&pid).await?;
    Ok(StatusCode::OK)
}
