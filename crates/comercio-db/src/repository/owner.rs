//! # Company Owner Repository
//!
//! SQL for `company_owners`. Owners sit at the root of the hierarchy:
//! no parent, companies as dependents.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::debug;

use super::{Dependents, Relation, Resource};
use crate::error::DbResult;
use comercio_core::{CompanySummary, NewOwner, OwnerChanges, OwnerRecord, OwnerSummary};

/// Company owners.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerResource;

/// Companies belonging to one owner.
async fn companies_of(conn: &mut SqliteConnection, owner_id: i64) -> DbResult<Vec<CompanySummary>> {
    let companies = sqlx::query_as::<_, CompanySummary>(
        "SELECT id, pid, name FROM companies WHERE owner_id = ?1 ORDER BY id",
    )
    .bind(owner_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(companies)
}

#[async_trait]
impl Resource for OwnerResource {
    const LABEL: &'static str = "Company owner";
    const PLURAL: &'static str = "company owners";
    const TABLE: &'static str = "company_owners";
    const PARENT: Option<Relation> = None;
    const CHILDREN: Option<Dependents> = Some(Dependents {
        table: "companies",
        fk_column: "owner_id",
        label: "companies",
    });

    type Record = OwnerRecord;
    type New = NewOwner;
    type Changes = OwnerChanges;

    async fn insert(
        conn: &mut SqliteConnection,
        pid: &str,
        new: &NewOwner,
        _parent_id: Option<i64>,
    ) -> DbResult<i64> {
        debug!(pid = %pid, "Inserting company owner");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO company_owners (pid, name, email, contact, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            "#,
        )
        .bind(pid)
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.contact)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn apply(
        conn: &mut SqliteConnection,
        id: i64,
        changes: &OwnerChanges,
        _parent_id: Option<i64>,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            UPDATE company_owners SET
                name = COALESCE(?2, name),
                email = COALESCE(?3, email),
                contact = COALESCE(?4, contact),
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.contact.as_deref())
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn load(conn: &mut SqliteConnection, id: i64) -> DbResult<OwnerRecord> {
        let owner = sqlx::query_as::<_, OwnerSummary>(
            "SELECT id, pid, name, email, contact FROM company_owners WHERE id = ?1",
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;

        let companies = companies_of(conn, owner.id).await?;
        Ok(owner.with_companies(companies))
    }

    async fn load_all(conn: &mut SqliteConnection) -> DbResult<Vec<OwnerRecord>> {
        let owners = sqlx::query_as::<_, OwnerSummary>(
            "SELECT id, pid, name, email, contact FROM company_owners ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut records = Vec::with_capacity(owners.len());
        for owner in owners {
            let companies = companies_of(conn, owner.id).await?;
            records.push(owner.with_companies(companies));
        }

        Ok(records)
    }
}
