//! # Product Repository
//!
//! SQL for `products`.
//!
//! ## Price Storage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  request "price": 39.05                                            │
//! │       │  Money::from_decimal (round half up)                        │
//! │       ▼                                                             │
//! │  products.price = 3905   (INTEGER, CHECK >= 0)                     │
//! │       │  presenter, on the way out                                  │
//! │       ▼                                                             │
//! │  response "price": 39.05                                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::debug;

use super::{Dependents, Relation, Resource};
use crate::error::{DbError, DbResult};
use comercio_core::{
    CompanySummary, Money, NewProduct, ProductChanges, ProductRecord, ProductSummary,
    ValidationError,
};

/// Products.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductResource;

async fn attach_company(
    conn: &mut SqliteConnection,
    product: ProductSummary,
) -> DbResult<ProductRecord> {
    let company = sqlx::query_as::<_, CompanySummary>(
        r#"
        SELECT c.id, c.pid, c.name
        FROM companies c
        INNER JOIN products p ON p.company_id = c.id
        WHERE p.id = ?1
        "#,
    )
    .bind(product.id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(product.with_company(company))
}

#[async_trait]
impl Resource for ProductResource {
    const LABEL: &'static str = "Product";
    const PLURAL: &'static str = "products";
    const TABLE: &'static str = "products";
    const PARENT: Option<Relation> = Some(Relation {
        table: "companies",
        label: "Company",
    });
    const CHILDREN: Option<Dependents> = None;

    type Record = ProductRecord;
    type New = NewProduct;
    type Changes = ProductChanges;

    fn parent_pid_of_new(new: &NewProduct) -> Option<&str> {
        Some(new.company_pid.as_str())
    }

    fn parent_pid_of_changes(changes: &ProductChanges) -> Option<&str> {
        changes.company_pid.as_deref()
    }

    async fn insert(
        conn: &mut SqliteConnection,
        pid: &str,
        new: &NewProduct,
        parent_id: Option<i64>,
    ) -> DbResult<i64> {
        let company_id = parent_id
            .ok_or_else(|| DbError::Internal("product insert without company id".to_string()))?;
        let price = new.price.map(Money::from_decimal).ok_or_else(|| {
            ValidationError::Required {
                field: "price".to_string(),
            }
        })?;

        debug!(pid = %pid, company_id = company_id, price = %price, "Inserting product");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO products (pid, name, price, description, company_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            "#,
        )
        .bind(pid)
        .bind(&new.name)
        .bind(price.cents())
        .bind(&new.description)
        .bind(company_id)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn apply(
        conn: &mut SqliteConnection,
        id: i64,
        changes: &ProductChanges,
        parent_id: Option<i64>,
    ) -> DbResult<()> {
        let price = changes.price.map(|p| Money::from_decimal(p).cents());

        sqlx::query(
            r#"
            UPDATE products SET
                name = COALESCE(?2, name),
                price = COALESCE(?3, price),
                description = COALESCE(?4, description),
                company_id = COALESCE(?5, company_id),
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(price)
        .bind(changes.description.as_deref())
        .bind(parent_id)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn load(conn: &mut SqliteConnection, id: i64) -> DbResult<ProductRecord> {
        let product = sqlx::query_as::<_, ProductSummary>(
            "SELECT id, pid, name, price, description FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;

        attach_company(conn, product).await
    }

    async fn load_all(conn: &mut SqliteConnection) -> DbResult<Vec<ProductRecord>> {
        let products = sqlx::query_as::<_, ProductSummary>(
            "SELECT id, pid, name, price, description FROM products ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut records = Vec::with_capacity(products.len());
        for product in products {
            records.push(attach_company(conn, product).await?);
        }

        Ok(records)
    }
}
