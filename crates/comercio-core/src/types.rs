//! # Domain Types
//!
//! Core domain types used throughout Comercio.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  OwnerRecord    │   │  CompanyRecord  │   │  ProductRecord  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (internal)  │   │  id (internal)  │   │  id (internal)  │       │
//! │  │  pid (public)   │   │  pid (public)   │   │  pid (public)   │       │
//! │  │  name           │   │  name           │   │  name           │       │
//! │  │  email          │◄──│  owner          │◄──│  company        │       │
//! │  │  contact        │   │  products ──────┼──►│  price (cents)  │       │
//! │  │  companies ─────┼──►│                 │   │  description    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Relations are loaded one level deep, as *Summary rows.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: INTEGER row id - used for foreign keys, never leaves the server
//! - `pid`: UUID v4 string - the only identifier callers ever see
//!
//! Records serialize `id` and integer `price`; the presenter rewrites both
//! on the way out.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Summaries (flat rows, one relation level)
// =============================================================================

/// An owner as embedded in a company.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OwnerSummary {
    pub id: i64,
    pub pid: String,
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// A company as embedded in an owner or a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CompanySummary {
    pub id: i64,
    pub pid: String,
    pub name: String,
}

/// A product as embedded in a company.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductSummary {
    pub id: i64,
    pub pid: String,
    pub name: String,
    /// Price in cents.
    pub price: i64,
    pub description: String,
}

// =============================================================================
// Records (entity + immediate relations)
// =============================================================================

/// A company owner with the companies it owns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerRecord {
    pub id: i64,
    pub pid: String,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub companies: Vec<CompanySummary>,
}

impl OwnerSummary {
    /// Attaches the owner's companies.
    pub fn with_companies(self, companies: Vec<CompanySummary>) -> OwnerRecord {
        OwnerRecord {
            id: self.id,
            pid: self.pid,
            name: self.name,
            email: self.email,
            contact: self.contact,
            companies,
        }
    }
}

/// A company with its owner and products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRecord {
    pub id: i64,
    pub pid: String,
    pub name: String,
    pub owner: OwnerSummary,
    pub products: Vec<ProductSummary>,
}

impl CompanySummary {
    /// Attaches the company's owner and products.
    pub fn with_relations(self, owner: OwnerSummary, products: Vec<ProductSummary>) -> CompanyRecord {
        CompanyRecord {
            id: self.id,
            pid: self.pid,
            name: self.name,
            owner,
            products,
        }
    }
}

/// A product with the company selling it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub id: i64,
    pub pid: String,
    pub name: String,
    /// Price in cents.
    pub price: i64,
    pub description: String,
    pub company: CompanySummary,
}

impl ProductSummary {
    /// Attaches the product's company.
    pub fn with_company(self, company: CompanySummary) -> ProductRecord {
        ProductRecord {
            id: self.id,
            pid: self.pid,
            name: self.name,
            price: self.price,
            description: self.description,
            company,
        }
    }
}

// =============================================================================
// Request Inputs
// =============================================================================
//
// Create inputs default missing strings to "" so that an absent field is
// reported by validation ("name is required") instead of a serde error.
// Unknown fields are rejected outright.

/// Body of `POST /company-owners`.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
#[ts(export)]
pub struct NewOwner {
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// Body of `PUT /company-owners/{pid}`.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
#[ts(export)]
pub struct OwnerChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}

/// Body of `POST /companies`.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
#[ts(export)]
pub struct NewCompany {
    pub name: String,
    /// Public id of the owning company owner.
    pub owner_pid: String,
}

/// Body of `PUT /companies/{pid}`.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
#[ts(export)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub owner_pid: Option<String>,
}

/// Body of `POST /products`.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    /// Decimal price (e.g. 39.05). Stored as cents.
    pub price: Option<f64>,
    pub description: String,
    /// Public id of the company selling the product.
    pub company_pid: String,
}

/// Body of `PUT /products/{pid}`.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
#[ts(export)]
pub struct ProductChanges {
    pub name: Option<String>,
    /// Decimal price (e.g. 39.05). Stored as cents.
    pub price: Option<f64>,
    pub description: Option<String>,
    pub company_pid: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_company_reads_camel_case() {
        let input: NewCompany =
            serde_json::from_value(json!({"name": "Acme", "ownerPid": "owner-1"})).unwrap();
        assert_eq!(input.name, "Acme");
        assert_eq!(input.owner_pid, "owner-1");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let input: NewProduct = serde_json::from_value(json!({"name": "Widget"})).unwrap();
        assert_eq!(input.description, "");
        assert_eq!(input.company_pid, "");
        assert!(input.price.is_none());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: Result<NewOwner, _> =
            serde_json::from_value(json!({"name": "John", "id": 7}));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_changes_parse() {
        let changes: ProductChanges = serde_json::from_value(json!({})).unwrap();
        assert!(changes.name.is_none());
        assert!(changes.price.is_none());
        assert!(changes.description.is_none());
        assert!(changes.company_pid.is_none());
    }

    #[test]
    fn test_record_keeps_internal_fields_until_presented() {
        let record = ProductSummary {
            id: 4,
            pid: "p-1".to_string(),
            name: "Widget".to_string(),
            price: 3905,
            description: "A widget".to_string(),
        }
        .with_company(CompanySummary {
            id: 2,
            pid: "c-1".to_string(),
            name: "Acme".to_string(),
        });

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], 4);
        assert_eq!(value["price"], 3905);
        assert_eq!(value["company"]["pid"], "c-1");
    }
}
