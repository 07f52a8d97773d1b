//! # Repository Module
//!
//! Per-entity SQL for Comercio, behind one trait.
//!
//! ## Resource Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Generic Manager, Specific SQL                        │
//! │                                                                         │
//! │  EntityManager<R: Resource>    (manager.rs, shared by all three)       │
//! │  ├── validate input                                                    │
//! │  ├── resolve parent pid  ── R::PARENT                                  │
//! │  ├── refuse orphaning    ── R::CHILDREN                                │
//! │  ├── open / commit transaction                                         │
//! │  └── wrap unclassified errors                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Resource impls                (this module)                           │
//! │  ├── OwnerResource    company_owners                                   │
//! │  ├── CompanyResource  companies  → parent: company_owners              │
//! │  └── ProductResource  products   → parent: companies                   │
//! │       insert / apply / load / load_all                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Integrity rules live in the manager once; resources only know their
//! columns.

use async_trait::async_trait;
use comercio_core::Validate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqliteConnection;

use crate::error::DbResult;

pub mod company;
pub mod owner;
pub mod product;

/// The table a resource points at through its foreign key.
#[derive(Debug, Clone, Copy)]
pub struct Relation {
    /// Parent table, looked up by `pid`.
    pub table: &'static str,
    /// Parent label used in "… with PID … not found".
    pub label: &'static str,
}

/// Rows in another table that block deleting a resource.
#[derive(Debug, Clone, Copy)]
pub struct Dependents {
    pub table: &'static str,
    /// Column in `table` referencing this resource's `id`.
    pub fk_column: &'static str,
    /// Plural label used in "Cannot delete a … that has …".
    pub label: &'static str,
}

/// Storage hooks for one entity type.
///
/// Hooks receive a connection that is already inside the manager's
/// transaction, and internal ids that are already resolved.
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    /// Singular label, capitalized: "Company owner".
    const LABEL: &'static str;
    /// Plural label, lowercase: "company owners".
    const PLURAL: &'static str;
    const TABLE: &'static str;
    const PARENT: Option<Relation>;
    const CHILDREN: Option<Dependents>;

    /// Entity joined with its immediate relations.
    type Record: Serialize + Send;
    /// Create body.
    type New: DeserializeOwned + Validate + Send + Sync;
    /// Partial update body.
    type Changes: DeserializeOwned + Validate + Send + Sync;

    /// Parent public id carried by a create body.
    fn parent_pid_of_new(_new: &Self::New) -> Option<&str> {
        None
    }

    /// Parent public id carried by an update body, if it moves the row.
    fn parent_pid_of_changes(_changes: &Self::Changes) -> Option<&str> {
        None
    }

    /// Inserts a row and returns its internal id.
    async fn insert(
        conn: &mut SqliteConnection,
        pid: &str,
        new: &Self::New,
        parent_id: Option<i64>,
    ) -> DbResult<i64>;

    /// Writes the supplied fields, leaving the rest untouched.
    async fn apply(
        conn: &mut SqliteConnection,
        id: i64,
        changes: &Self::Changes,
        parent_id: Option<i64>,
    ) -> DbResult<()>;

    /// Loads one row with relations.
    async fn load(conn: &mut SqliteConnection, id: i64) -> DbResult<Self::Record>;

    /// Loads every row with relations, in storage order.
    async fn load_all(conn: &mut SqliteConnection) -> DbResult<Vec<Self::Record>>;
}

/// Looks up the internal id for a public id in `table`.
pub(crate) async fn id_for_pid(
    conn: &mut SqliteConnection,
    table: &str,
    pid: &str,
) -> DbResult<Option<i64>> {
    let sql = format!("SELECT id FROM {table} WHERE pid = ?1");
    let id = sqlx::query_scalar::<_, i64>(&sql)
        .bind(pid)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(id)
}

/// Counts rows in `table` whose `column` equals `id`.
pub(crate) async fn count_referencing(
    conn: &mut SqliteConnection,
    table: &str,
    column: &str,
    id: i64,
) -> DbResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?1");
    let count = sqlx::query_scalar::<_, i64>(&sql)
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}
