//! # Seed Data Loader
//!
//! Loads the JSON fixtures in `db_mock/` into the database for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./data/comercio.db from ./db_mock
//! cargo run -p comercio-db --bin seed
//!
//! # Specify database path and fixture directory
//! cargo run -p comercio-db --bin seed -- --db ./dev.db --data ./db_mock
//! ```
//!
//! ## Fixtures
//! - `owners.json`    - `{pid, name, email, contact}`
//! - `companies.json` - `{pid, name, owner_pid}`
//! - `products.json`  - `{pid, name, price, description, company_pid}`, price in cents
//!
//! Rows are upserted by `pid`, so running the seed twice updates instead of
//! duplicating. Parents are loaded before children.

use std::env;
use std::path::{Path, PathBuf};

use chrono::Utc;
use comercio_db::{Database, DbConfig};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sqlx::SqlitePool;

#[derive(Debug, Deserialize)]
struct OwnerFixture {
    pid: String,
    name: String,
    email: String,
    contact: String,
}

#[derive(Debug, Deserialize)]
struct CompanyFixture {
    pid: String,
    name: String,
    owner_pid: String,
}

#[derive(Debug, Deserialize)]
struct ProductFixture {
    pid: String,
    name: String,
    /// Cents.
    price: i64,
    description: String,
    company_pid: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./data/comercio.db");
    let mut data_dir = PathBuf::from("./db_mock");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--data" => {
                if i + 1 < args.len() {
                    data_dir = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Comercio Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>      Database file path (default: ./data/comercio.db)");
                println!("      --data <DIR>     Fixture directory (default: ./db_mock)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Comercio Seed Data Loader");
    println!("============================");
    println!("Database: {}", db_path);
    println!("Fixtures: {}", data_dir.display());
    println!();

    let owners: Vec<OwnerFixture> = load_fixture(&data_dir, "owners.json")?;
    let companies: Vec<CompanyFixture> = load_fixture(&data_dir, "companies.json")?;
    let products: Vec<ProductFixture> = load_fixture(&data_dir, "products.json")?;

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");
    println!();

    let pool = db.pool();

    println!("Creating company owners...");
    let mut seeded = 0;
    for owner in &owners {
        match upsert_owner(pool, owner).await {
            Ok(()) => seeded += 1,
            Err(e) => eprintln!("Failed to upsert owner {}: {}", owner.pid, e),
        }
    }
    println!("  {} of {} owners", seeded, owners.len());

    println!("Creating companies...");
    let mut seeded = 0;
    for company in &companies {
        match upsert_company(pool, company).await {
            Ok(()) => seeded += 1,
            Err(e) => eprintln!("Failed to upsert company {}: {}", company.pid, e),
        }
    }
    println!("  {} of {} companies", seeded, companies.len());

    println!("Creating products...");
    let mut seeded = 0;
    for product in &products {
        match upsert_product(pool, product).await {
            Ok(()) => seeded += 1,
            Err(e) => eprintln!("Failed to upsert product {}: {}", product.pid, e),
        }
    }
    println!("  {} of {} products", seeded, products.len());

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

fn load_fixture<T: DeserializeOwned>(
    dir: &Path,
    file: &str,
) -> Result<Vec<T>, Box<dyn std::error::Error>> {
    let path = dir.join(file);
    let content = std::fs::read_to_string(&path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    Ok(serde_json::from_str(&content)?)
}

async fn upsert_owner(pool: &SqlitePool, owner: &OwnerFixture) -> Result<(), sqlx::Error> {
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO company_owners (pid, name, email, contact, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?5)
        ON CONFLICT (pid) DO UPDATE SET
            name = excluded.name,
            email = excluded.email,
            contact = excluded.contact,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(&owner.pid)
    .bind(&owner.name)
    .bind(&owner.email)
    .bind(&owner.contact)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// The owner is resolved by pid inside the statement; an unknown pid
/// yields NULL and trips the NOT NULL constraint.
async fn upsert_company(pool: &SqlitePool, company: &CompanyFixture) -> Result<(), sqlx::Error> {
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO companies (pid, name, owner_id, created_at, updated_at)
        VALUES (?1, ?2, (SELECT id FROM company_owners WHERE pid = ?3), ?4, ?4)
        ON CONFLICT (pid) DO UPDATE SET
            name = excluded.name,
            owner_id = excluded.owner_id,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(&company.pid)
    .bind(&company.name)
    .bind(&company.owner_pid)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

async fn upsert_product(pool: &SqlitePool, product: &ProductFixture) -> Result<(), sqlx::Error> {
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO products (pid, name, price, description, company_id, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, (SELECT id FROM companies WHERE pid = ?5), ?6, ?6)
        ON CONFLICT (pid) DO UPDATE SET
            name = excluded.name,
            price = excluded.price,
            description = excluded.description,
            company_id = excluded.company_id,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(&product.pid)
    .bind(&product.name)
    .bind(product.price)
    .bind(&product.description)
    .bind(&product.company_pid)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}
