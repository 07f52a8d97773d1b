//! # Company Repository
//!
//! SQL for `companies`. A company belongs to one owner and blocks its own
//! deletion while it still has products.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::debug;

use super::{Dependents, Relation, Resource};
use crate::error::{DbError, DbResult};
use comercio_core::{
    CompanyChanges, CompanyRecord, CompanySummary, NewCompany, OwnerSummary, ProductSummary,
};

/// Companies.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompanyResource;

async fn attach_relations(
    conn: &mut SqliteConnection,
    company: CompanySummary,
) -> DbResult<CompanyRecord> {
    let owner = sqlx::query_as::<_, OwnerSummary>(
        r#"
        SELECT o.id, o.pid, o.name, o.email, o.contact
        FROM company_owners o
        INNER JOIN companies c ON c.owner_id = o.id
        WHERE c.id = ?1
        "#,
    )
    .bind(company.id)
    .fetch_one(&mut *conn)
    .await?;

    let products = sqlx::query_as::<_, ProductSummary>(
        "SELECT id, pid, name, price, description FROM products WHERE company_id = ?1 ORDER BY id",
    )
    .bind(company.id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(company.with_relations(owner, products))
}

#[async_trait]
impl Resource for CompanyResource {
    const LABEL: &'static str = "Company";
    const PLURAL: &'static str = "companies";
    const TABLE: &'static str = "companies";
    const PARENT: Option<Relation> = Some(Relation {
        table: "company_owners",
        label: "Company owner",
    });
    const CHILDREN: Option<Dependents> = Some(Dependents {
        table: "products",
        fk_column: "company_id",
        label: "products",
    });

    type Record = CompanyRecord;
    type New = NewCompany;
    type Changes = CompanyChanges;

    fn parent_pid_of_new(new: &NewCompany) -> Option<&str> {
        Some(new.owner_pid.as_str())
    }

    fn parent_pid_of_changes(changes: &CompanyChanges) -> Option<&str> {
        changes.owner_pid.as_deref()
    }

    async fn insert(
        conn: &mut SqliteConnection,
        pid: &str,
        new: &NewCompany,
        parent_id: Option<i64>,
    ) -> DbResult<i64> {
        let owner_id = parent_id
            .ok_or_else(|| DbError::Internal("company insert without owner id".to_string()))?;

        debug!(pid = %pid, owner_id = owner_id, "Inserting company");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO companies (pid, name, owner_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
        )
        .bind(pid)
        .bind(&new.name)
        .bind(owner_id)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn apply(
        conn: &mut SqliteConnection,
        id: i64,
        changes: &CompanyChanges,
        parent_id: Option<i64>,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            UPDATE companies SET
                name = COALESCE(?2, name),
                owner_id = COALESCE(?3, owner_id),
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(parent_id)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn load(conn: &mut SqliteConnection, id: i64) -> DbResult<CompanyRecord> {
        let company =
            sqlx::query_as::<_, CompanySummary>("SELECT id, pid, name FROM companies WHERE id = ?1")
                .bind(id)
                .fetch_one(&mut *conn)
                .await?;

        attach_relations(conn, company).await
    }

    async fn load_all(conn: &mut SqliteConnection) -> DbResult<Vec<CompanyRecord>> {
        let companies =
            sqlx::query_as::<_, CompanySummary>("SELECT id, pid, name FROM companies ORDER BY id")
                .fetch_all(&mut *conn)
                .await?;

        let mut records = Vec::with_capacity(companies.len());
        for company in companies {
            records.push(attach_relations(conn, company).await?);
        }

        Ok(records)
    }
}
