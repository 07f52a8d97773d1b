//! Entity manager behavior against an in-memory database.

use comercio_core::{
    CompanyChanges, CoreError, NewCompany, NewOwner, NewProduct, OwnerChanges, ProductChanges,
};
use comercio_db::{Database, DbConfig, DbError};

async fn setup() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

fn new_owner(name: &str) -> NewOwner {
    NewOwner {
        name: name.to_string(),
        email: "owner@example.com".to_string(),
        contact: "+55 11 90000-0000".to_string(),
    }
}

fn new_company(name: &str, owner_pid: &str) -> NewCompany {
    NewCompany {
        name: name.to_string(),
        owner_pid: owner_pid.to_string(),
    }
}

fn new_product(name: &str, price: f64, company_pid: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price: Some(price),
        description: "Test product".to_string(),
        company_pid: company_pid.to_string(),
    }
}

async fn count(db: &Database, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(db.pool())
        .await
        .unwrap()
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_owner_assigns_uuid_pid() {
    let db = setup().await;

    let owner = db.owners().create(new_owner("Maria Silva")).await.unwrap();

    assert_eq!(owner.name, "Maria Silva");
    assert!(owner.companies.is_empty());
    assert!(uuid::Uuid::parse_str(&owner.pid).is_ok());
}

#[tokio::test]
async fn test_create_company_with_unknown_owner_creates_nothing() {
    let db = setup().await;

    let err = db
        .companies()
        .create(new_company("Acme", "no-such-owner"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DbError::Domain(CoreError::MissingReference { .. })
    ));
    assert_eq!(err.to_string(), "Company owner with PID no-such-owner not found");
    assert_eq!(count(&db, "companies").await, 0);
}

#[tokio::test]
async fn test_create_company_returns_owner_and_products() {
    let db = setup().await;
    let owner = db.owners().create(new_owner("Maria Silva")).await.unwrap();

    let company = db
        .companies()
        .create(new_company("Padaria", &owner.pid))
        .await
        .unwrap();

    assert_eq!(company.owner.pid, owner.pid);
    assert!(company.products.is_empty());

    let owner = db.owners().find_one(&owner.pid).await.unwrap();
    assert_eq!(owner.companies.len(), 1);
    assert_eq!(owner.companies[0].pid, company.pid);
}

#[tokio::test]
async fn test_invalid_input_is_rejected_before_storage() {
    let db = setup().await;

    let err = db.owners().create(new_owner("Al")).await.unwrap_err();

    assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    assert_eq!(count(&db, "company_owners").await, 0);
}

#[tokio::test]
async fn test_product_price_is_stored_in_cents() {
    let db = setup().await;
    let owner = db.owners().create(new_owner("Maria Silva")).await.unwrap();
    let company = db
        .companies()
        .create(new_company("Padaria", &owner.pid))
        .await
        .unwrap();

    let product = db
        .products()
        .create(new_product("Bolo", 39.05, &company.pid))
        .await
        .unwrap();
    assert_eq!(product.price, 3905);
    assert_eq!(product.company.pid, company.pid);

    let rounded = db
        .products()
        .create(new_product("Torta", 10.999, &company.pid))
        .await
        .unwrap();
    assert_eq!(rounded.price, 1100);

    let stored: i64 = sqlx::query_scalar("SELECT price FROM products WHERE pid = ?1")
        .bind(&product.pid)
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(stored, 3905);
}

#[tokio::test]
async fn test_negative_price_is_rejected() {
    let db = setup().await;
    let owner = db.owners().create(new_owner("Maria Silva")).await.unwrap();
    let company = db
        .companies()
        .create(new_company("Padaria", &owner.pid))
        .await
        .unwrap();

    let err = db
        .products()
        .create(new_product("Bolo", -1.0, &company.pid))
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    assert_eq!(count(&db, "products").await, 0);
}

// =============================================================================
// Find
// =============================================================================

#[tokio::test]
async fn test_find_unknown_pid_is_not_found() {
    let db = setup().await;

    let err = db.owners().find_one("never-created").await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));
    assert_eq!(err.to_string(), "Company owner with PID never-created not found");

    assert!(matches!(
        db.companies().find_one("never-created").await,
        Err(DbError::NotFound { .. })
    ));
    assert!(matches!(
        db.products().find_one("never-created").await,
        Err(DbError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_find_all_returns_every_row_with_relations() {
    let db = setup().await;
    let owner = db.owners().create(new_owner("Maria Silva")).await.unwrap();
    let first = db
        .companies()
        .create(new_company("Padaria", &owner.pid))
        .await
        .unwrap();
    db.companies()
        .create(new_company("Cafe Central", &owner.pid))
        .await
        .unwrap();
    db.products()
        .create(new_product("Bolo", 39.05, &first.pid))
        .await
        .unwrap();

    let companies = db.companies().find_all().await.unwrap();
    assert_eq!(companies.len(), 2);
    assert!(companies.iter().all(|c| c.owner.pid == owner.pid));

    let with_products = companies.iter().find(|c| c.pid == first.pid).unwrap();
    assert_eq!(with_products.products.len(), 1);
    assert_eq!(with_products.products[0].price, 3905);

    let owners = db.owners().find_all().await.unwrap();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].companies.len(), 2);
}

#[tokio::test]
async fn test_find_all_on_empty_table() {
    let db = setup().await;

    assert!(db.products().find_all().await.unwrap().is_empty());
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_empty_update_changes_nothing() {
    let db = setup().await;
    let owner = db.owners().create(new_owner("Maria Silva")).await.unwrap();

    let updated = db
        .owners()
        .update(&owner.pid, OwnerChanges::default())
        .await
        .unwrap();

    assert_eq!(updated, owner);
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let db = setup().await;
    let owner = db.owners().create(new_owner("Maria Silva")).await.unwrap();
    let company = db
        .companies()
        .create(new_company("Padaria", &owner.pid))
        .await
        .unwrap();
    let product = db
        .products()
        .create(new_product("Bolo", 39.05, &company.pid))
        .await
        .unwrap();

    let updated = db
        .products()
        .update(
            &product.pid,
            ProductChanges {
                price: Some(12.5),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.price, 1250);
    assert_eq!(updated.name, product.name);
    assert_eq!(updated.description, product.description);
    assert_eq!(updated.company.pid, company.pid);
}

#[tokio::test]
async fn test_update_moves_company_to_new_owner() {
    let db = setup().await;
    let maria = db.owners().create(new_owner("Maria Silva")).await.unwrap();
    let joao = db.owners().create(new_owner("Joao Pereira")).await.unwrap();
    let company = db
        .companies()
        .create(new_company("Padaria", &maria.pid))
        .await
        .unwrap();

    let moved = db
        .companies()
        .update(
            &company.pid,
            CompanyChanges {
                owner_pid: Some(joao.pid.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(moved.owner.pid, joao.pid);
    assert_eq!(moved.name, "Padaria");
}

#[tokio::test]
async fn test_update_with_unknown_parent_keeps_row() {
    let db = setup().await;
    let owner = db.owners().create(new_owner("Maria Silva")).await.unwrap();
    let company = db
        .companies()
        .create(new_company("Padaria", &owner.pid))
        .await
        .unwrap();

    let err = db
        .companies()
        .update(
            &company.pid,
            CompanyChanges {
                name: Some("Renamed".to_string()),
                owner_pid: Some("ghost".to_string()),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DbError::Domain(CoreError::MissingReference { .. })
    ));

    let unchanged = db.companies().find_one(&company.pid).await.unwrap();
    assert_eq!(unchanged.name, "Padaria");
    assert_eq!(unchanged.owner.pid, owner.pid);
}

#[tokio::test]
async fn test_update_unknown_pid_is_not_found() {
    let db = setup().await;

    let err = db
        .products()
        .update("ghost", ProductChanges::default())
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::NotFound { .. }));
}

// =============================================================================
// Remove
// =============================================================================

#[tokio::test]
async fn test_owner_with_companies_cannot_be_deleted() {
    let db = setup().await;
    let owner = db.owners().create(new_owner("Maria Silva")).await.unwrap();
    db.companies()
        .create(new_company("Padaria", &owner.pid))
        .await
        .unwrap();

    let err = db.owners().remove(&owner.pid).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Cannot delete a company owner that has companies. Please delete the companies first."
    );
    assert!(db.owners().find_one(&owner.pid).await.is_ok());
}

#[tokio::test]
async fn test_company_with_products_cannot_be_deleted() {
    let db = setup().await;
    let owner = db.owners().create(new_owner("Maria Silva")).await.unwrap();
    let company = db
        .companies()
        .create(new_company("Padaria", &owner.pid))
        .await
        .unwrap();
    db.products()
        .create(new_product("Bolo", 39.05, &company.pid))
        .await
        .unwrap();

    let err = db.companies().remove(&company.pid).await.unwrap_err();

    assert!(matches!(
        err,
        DbError::Domain(CoreError::HasDependents { .. })
    ));
    assert_eq!(count(&db, "companies").await, 1);
}

#[tokio::test]
async fn test_delete_bottom_up() {
    let db = setup().await;
    let owner = db.owners().create(new_owner("Maria Silva")).await.unwrap();
    let company = db
        .companies()
        .create(new_company("Padaria", &owner.pid))
        .await
        .unwrap();
    let product = db
        .products()
        .create(new_product("Bolo", 39.05, &company.pid))
        .await
        .unwrap();

    db.products().remove(&product.pid).await.unwrap();
    db.companies().remove(&company.pid).await.unwrap();
    db.owners().remove(&owner.pid).await.unwrap();

    assert!(matches!(
        db.owners().find_one(&owner.pid).await,
        Err(DbError::NotFound { .. })
    ));
    assert_eq!(count(&db, "products").await, 0);
}

#[tokio::test]
async fn test_remove_unknown_pid_is_not_found() {
    let db = setup().await;

    let err = db.companies().remove("ghost").await.unwrap_err();

    assert_eq!(err.to_string(), "Company with PID ghost not found");
}

// =============================================================================
// Storage Constraints
// =============================================================================

#[tokio::test]
async fn test_foreign_keys_restrict_raw_deletes() {
    let db = setup().await;
    let owner = db.owners().create(new_owner("Maria Silva")).await.unwrap();
    db.companies()
        .create(new_company("Padaria", &owner.pid))
        .await
        .unwrap();

    let result = sqlx::query("DELETE FROM company_owners WHERE pid = ?1")
        .bind(&owner.pid)
        .execute(db.pool())
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_storage_failures_are_generic() {
    let db = setup().await;
    db.close().await;

    let err = db.products().find_all().await.unwrap_err();

    assert!(matches!(err, DbError::OperationFailed(_)));
    assert_eq!(err.to_string(), "Error retrieving products");
}
