//! Shared application state.

use comercio_db::{CompanyManager, Database, OwnerManager, ProductManager};

/// Handles shared by every request.
///
/// The managers are cheap clones over the database pool. Each resource
/// router receives its own manager as state; the health check uses `db`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub owners: OwnerManager,
    pub companies: CompanyManager,
    pub products: ProductManager,
}

impl AppState {
    /// Builds the state from a connected database.
    pub fn new(db: Database) -> Self {
        AppState {
            owners: db.owners(),
            companies: db.companies(),
            products: db.products(),
            db,
        }
    }
}
