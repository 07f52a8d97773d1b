//! # Entity Manager
//!
//! The create / find / update / remove flow shared by every resource.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create(input)                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  input.validate()            ──✗──► Domain(Validation)        400      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │  resolve parent pid → id     ──✗──► Domain(MissingReference)  400      │
//! │  INSERT (new UUID v4 pid)                                               │
//! │  load record + relations                                                │
//! │  COMMIT                      ──✗──► OperationFailed("Error creating …") │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Record                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each mutation runs in one transaction, so the parent or dependents seen
//! by the check are the ones the write commits against. A failure anywhere
//! rolls the whole operation back when the transaction is dropped.
//!
//! Write transactions open with `BEGIN IMMEDIATE`. A deferred transaction
//! that reads before writing cannot be upgraded once another writer has
//! committed, and fails with `SQLITE_BUSY` instead of waiting.
//!
//! ## Error Boundary
//! `NotFound` and `Domain` errors leave the manager unchanged. Anything else
//! is logged and replaced by `OperationFailed` with a generic message, so
//! SQL details never reach callers.

use std::marker::PhantomData;

use comercio_core::{CoreError, Validate};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::{count_referencing, id_for_pid, Resource};

/// Takes the write lock up front so concurrent writers queue on the busy timeout.
const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

/// CRUD over one resource type.
///
/// ## Usage
/// ```rust,ignore
/// let products = db.products();
///
/// let created = products.create(new_product).await?;
/// let all = products.find_all().await?;
/// products.remove(&created.pid).await?;
/// ```
pub struct EntityManager<R: Resource> {
    pool: SqlitePool,
    _resource: PhantomData<fn() -> R>,
}

// Manual impl: deriving would require `R: Clone`.
impl<R: Resource> Clone for EntityManager<R> {
    fn clone(&self) -> Self {
        EntityManager::new(self.pool.clone())
    }
}

impl<R: Resource> std::fmt::Debug for EntityManager<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityManager")
            .field("resource", &R::LABEL)
            .finish()
    }
}

impl<R: Resource> EntityManager<R> {
    /// Creates a manager over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        EntityManager {
            pool,
            _resource: PhantomData,
        }
    }

    /// Validates and inserts a row, returning it with its relations.
    pub async fn create(&self, input: R::New) -> DbResult<R::Record> {
        input.validate()?;

        self.create_in_transaction(&input)
            .await
            .map_err(surface(format!("Error creating {}", entity::<R>())))
    }

    /// Returns every row with its relations.
    pub async fn find_all(&self) -> DbResult<Vec<R::Record>> {
        debug!(resource = R::PLURAL, "Listing");

        let result: DbResult<Vec<R::Record>> = async {
            let mut conn = self.pool.acquire().await?;
            R::load_all(&mut conn).await
        }
        .await;

        result.map_err(surface(format!("Error retrieving {}", R::PLURAL)))
    }

    /// Returns one row by public id.
    pub async fn find_one(&self, pid: &str) -> DbResult<R::Record> {
        let result: DbResult<R::Record> = async {
            let mut conn = self.pool.acquire().await?;
            let id = existing_id::<R>(&mut conn, pid).await?;
            R::load(&mut conn, id).await
        }
        .await;

        result.map_err(surface(format!(
            "Error retrieving {} with PID {pid}",
            entity::<R>()
        )))
    }

    /// Applies a partial update. Omitted fields keep their values.
    pub async fn update(&self, pid: &str, changes: R::Changes) -> DbResult<R::Record> {
        changes.validate()?;

        self.update_in_transaction(pid, &changes)
            .await
            .map_err(surface(format!(
                "Error updating {} with PID {pid}",
                entity::<R>()
            )))
    }

    /// Deletes a row that nothing depends on.
    pub async fn remove(&self, pid: &str) -> DbResult<()> {
        self.remove_in_transaction(pid)
            .await
            .map_err(surface(format!(
                "Error deleting {} with PID {pid}",
                entity::<R>()
            )))
    }

    async fn create_in_transaction(&self, input: &R::New) -> DbResult<R::Record> {
        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;

        let parent_id = match R::parent_pid_of_new(input) {
            Some(parent_pid) => Some(resolve_parent::<R>(&mut tx, parent_pid).await?),
            None => None,
        };

        let pid = Uuid::new_v4().to_string();
        let id = R::insert(&mut tx, &pid, input, parent_id).await?;
        let record = R::load(&mut tx, id).await?;

        tx.commit().await?;

        info!(resource = R::LABEL, pid = %pid, "Created");
        Ok(record)
    }

    async fn update_in_transaction(&self, pid: &str, changes: &R::Changes) -> DbResult<R::Record> {
        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;

        let id = existing_id::<R>(&mut tx, pid).await?;

        let parent_id = match R::parent_pid_of_changes(changes) {
            Some(parent_pid) => Some(resolve_parent::<R>(&mut tx, parent_pid).await?),
            None => None,
        };

        R::apply(&mut tx, id, changes, parent_id).await?;
        let record = R::load(&mut tx, id).await?;

        tx.commit().await?;

        info!(resource = R::LABEL, pid = %pid, "Updated");
        Ok(record)
    }

    async fn remove_in_transaction(&self, pid: &str) -> DbResult<()> {
        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;

        let id = existing_id::<R>(&mut tx, pid).await?;

        if let Some(children) = R::CHILDREN {
            let count = count_referencing(&mut tx, children.table, children.fk_column, id).await?;
            if count > 0 {
                return Err(CoreError::HasDependents {
                    entity: entity::<R>(),
                    dependents: children.label.to_string(),
                }
                .into());
            }
        }

        let sql = format!("DELETE FROM {} WHERE id = ?1", R::TABLE);
        sqlx::query(&sql).bind(id).execute(&mut *tx).await?;

        tx.commit().await?;

        info!(resource = R::LABEL, pid = %pid, "Deleted");
        Ok(())
    }
}

/// Lowercase singular label, as used inside sentences.
fn entity<R: Resource>() -> String {
    R::LABEL.to_lowercase()
}

/// Internal id of an existing row, or `NotFound`.
async fn existing_id<R: Resource>(conn: &mut SqliteConnection, pid: &str) -> DbResult<i64> {
    id_for_pid(conn, R::TABLE, pid)
        .await?
        .ok_or_else(|| DbError::not_found(R::LABEL, pid))
}

/// Internal id of the parent named by `parent_pid`, or `MissingReference`.
async fn resolve_parent<R: Resource>(conn: &mut SqliteConnection, parent_pid: &str) -> DbResult<i64> {
    let Some(parent) = R::PARENT else {
        return Err(DbError::Internal(format!(
            "{} has no parent relation",
            R::LABEL
        )));
    };

    id_for_pid(conn, parent.table, parent_pid)
        .await?
        .ok_or_else(|| CoreError::missing_reference(parent.label, parent_pid).into())
}

/// Passes caller errors through and hides everything else behind `context`.
fn surface(context: String) -> impl FnOnce(DbError) -> DbError {
    move |err| {
        if err.is_client_error() {
            err
        } else {
            error!(error = %err, "{context}");
            DbError::OperationFailed(context)
        }
    }
}
