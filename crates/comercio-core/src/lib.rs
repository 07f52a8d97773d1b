//! # comercio-core: Pure Business Logic for Comercio
//!
//! This crate holds every rule of the owner/company/product domain that can
//! be expressed without touching a database or a socket.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Comercio Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    POST /companies ──► handler ──► present(record)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    comercio-db                                  │   │
//! │  │    EntityManager<R> ──► Resource impls ──► SQLite               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ comercio-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ validation│  │ presenter │  │   │
//! │  │   │  Owner    │  │  cents ⇄  │  │   rules   │  │ strip id, │  │   │
//! │  │   │  Company  │  │  decimal  │  │  checks   │  │ price fmt │  │   │
//! │  │   │  Product  │  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records, summaries and request inputs
//! - [`money`] - Minor-unit / decimal price conversion
//! - [`error`] - Domain error types
//! - [`validation`] - Field rules and the [`Validate`] trait
//! - [`presenter`] - Outbound payload transform
//!
//! ## Example Usage
//!
//! ```rust
//! use comercio_core::money::{decimal_to_minor_units, minor_units_to_decimal};
//!
//! let cents = decimal_to_minor_units(39.05);
//! assert_eq!(cents, 3905);
//! assert_eq!(minor_units_to_decimal(cents), 39.05);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod presenter;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use presenter::present;
pub use types::*;
pub use validation::Validate;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum length of every entity name (owner, company, product).
pub const MIN_NAME_LENGTH: usize = 3;

/// Field name the presenter strips from outbound payloads.
pub const INTERNAL_ID_FIELD: &str = "id";

/// Field name the presenter converts from minor units to decimal.
pub const PRICE_FIELD: &str = "price";
