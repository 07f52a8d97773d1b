//! # Error Types
//!
//! Domain-specific error types for comercio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  comercio-core errors (this file)                                      │
//! │  ├── CoreError        - Referential integrity violations               │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  comercio-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What HTTP callers see                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → HTTP         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
///
/// Every variant is caused by the caller and surfaces as a 400.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A parent reference points at a public id that does not exist.
    ///
    /// ## When This Occurs
    /// - Creating a company with an unknown `ownerPid`
    /// - Moving a product to an unknown `companyPid`
    #[error("{entity} with PID {pid} not found")]
    MissingReference { entity: String, pid: String },

    /// Deleting the row would orphan its children.
    ///
    /// ## User Workflow
    /// ```text
    /// DELETE /company-owners/{pid}
    ///      │
    ///      ▼
    /// Owner still has 2 companies
    ///      │
    ///      ▼
    /// HasDependents { entity: "company owner", dependents: "companies" }
    ///      │
    ///      ▼
    /// 400: "Cannot delete a company owner that has companies. ..."
    /// ```
    #[error("Cannot delete a {entity} that has {dependents}. Please delete the {dependents} first.")]
    HasDependents { entity: String, dependents: String },

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a MissingReference error for a parent entity label and public id.
    pub fn missing_reference(entity: impl Into<String>, pid: impl Into<String>) -> Self {
        CoreError::MissingReference {
            entity: entity.into(),
            pid: pid.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These run before any query is issued.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Numeric value must not be below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Numeric value is above the storable maximum.
    #[error("{field} must not exceed {max}")]
    TooLarge { field: String, max: String },

    /// Invalid format (e.g., malformed email, NaN price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
