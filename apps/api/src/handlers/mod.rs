//! HTTP request handlers.
//!
//! - [`resource`] - create/list/get/update/delete, generic over the entity
//! - [`health`] - liveness backed by a database ping

pub mod health;
pub mod resource;
