//! # comercio-db: Database Layer for Comercio
//!
//! This crate provides database access for the Comercio API.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Comercio Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (POST /companies)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    comercio-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ EntityManager │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (manager.rs) │    │  (embedded)  │  │   │
//! │  │   │               │    │       │       │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  Resource     │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │  ├ owners     │    │              │  │   │
//! │  │   │ Management    │    │  ├ companies  │    │              │  │   │
//! │  │   │               │    │  └ products   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   data/comercio.db                                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`manager`] - The generic create/find/update/remove flow
//! - [`repository`] - Per-entity SQL behind the [`Resource`] trait
//!
//! ## Usage
//!
//! ```rust,ignore
//! use comercio_core::NewOwner;
//! use comercio_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("data/comercio.db")).await?;
//!
//! let owner = db.owners().create(NewOwner {
//!     name: "Maria Silva".into(),
//!     email: "maria@example.com".into(),
//!     contact: "+55 11 99999-0000".into(),
//! }).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod manager;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use manager::EntityManager;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::company::CompanyResource;
pub use repository::owner::OwnerResource;
pub use repository::product::ProductResource;
pub use repository::Resource;

/// Entity manager for company owners.
pub type OwnerManager = EntityManager<OwnerResource>;

/// Entity manager for companies.
pub type CompanyManager = EntityManager<CompanyResource>;

/// Entity manager for products.
pub type ProductManager = EntityManager<ProductResource>;
