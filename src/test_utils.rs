//! Shared test utilities for the BBM inventory.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test supplies with sensible defaults.

use crate::{core::supply, entities, errors::Result};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with the supply table initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test supply with sensible defaults.
///
/// # Defaults
/// * `quantity`: 100
/// * `price`: 10000.0
pub async fn create_test_supply(
    db: &DatabaseConnection,
    supply_type: &str,
    id_supplier: &str,
) -> Result<entities::supply::Model> {
    create_custom_supply(db, supply_type, 100, 10_000.0, id_supplier).await
}

/// Creates a test supply with custom quantity and price.
pub async fn create_custom_supply(
    db: &DatabaseConnection,
    supply_type: &str,
    quantity: i64,
    price: f64,
    id_supplier: &str,
) -> Result<entities::supply::Model> {
    supply::add_supply(
        db,
        supply_type.to_string(),
        quantity,
        price,
        id_supplier.to_string(),
    )
    .await
}

/// Sets up a database holding two supplies:
/// `#1 Diesel 100 × 15000 (SUP1)` and `#2 Petrol 50 × 20000 (SUP2)`.
pub async fn setup_with_supplies() -> Result<(DatabaseConnection, Vec<entities::supply::Model>)> {
    let db = setup_test_db().await?;
    let diesel = create_custom_supply(&db, "Diesel", 100, 15_000.0, "SUP1").await?;
    let petrol = create_custom_supply(&db, "Petrol", 50, 20_000.0, "SUP2").await?;
    Ok((db, vec![diesel, petrol]))
}
