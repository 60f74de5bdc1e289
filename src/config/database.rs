//! Database configuration module for the BBM inventory.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! The supply table is generated from the entity definition with
//! `Schema::create_table_from_entity`, so the on-disk schema always matches the
//! Rust struct without hand-written DDL.

use crate::entities::Supply;
use crate::errors::{Error, Result};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Fallback store location when neither the flag, the environment nor the config file name one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/bbm_inventory.sqlite?mode=rwc";

/// Resolves the database URL in precedence order: explicit override,
/// `DATABASE_URL`, config file value, then [`DEFAULT_DATABASE_URL`].
#[must_use]
pub fn resolve_database_url(cli_override: Option<&str>, configured: Option<&str>) -> String {
    cli_override
        .map(str::to_string)
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Creates the parent directory of a file-backed `SQLite` URL so `mode=rwc` can create the file.
fn ensure_sqlite_parent_dir(database_url: &str) -> Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.contains(":memory:") {
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
        debug!("Ensured database directory {:?}", parent);
    }
    Ok(())
}

/// Opens a connection pool to the store at `database_url`.
///
/// # Errors
/// Returns [`Error::Io`] if the `SQLite` directory cannot be created, and
/// [`Error::StoreUnavailable`] for any connect failure whatever the driver's
/// own error kind was.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    ensure_sqlite_parent_dir(database_url)?;
    Database::connect(database_url)
        .await
        .map_err(|e| Error::StoreUnavailable(format!("{database_url}: {e}")))
}

/// Creates the supply table if it does not exist yet.
///
/// # Errors
/// Returns an error if the `CREATE TABLE` statement fails.
#[instrument(skip(db))]
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut supply_table = schema.create_table_from_entity(Supply);
    supply_table.if_not_exists();

    db.execute(builder.build(&supply_table)).await?;
    info!("Supply table ensured.");

    Ok(())
}
