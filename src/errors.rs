//! Unified error type for the inventory.
//!
//! Store failures are split into "cannot reach the store" and "a statement
//! failed" so callers can tell an unreachable database apart from a missing row.

use sea_orm::DbErr;
use thiserror::Error;

/// Every failure the repository, configuration and shell layers can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// No connection to the store could be opened or acquired
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A statement against the store failed
    #[error("Database error: {0}")]
    Database(String),

    /// Update or delete matched no row for the composite key
    #[error("No supply #{supply_number} found for supplier '{id_supplier}'")]
    SupplyNotFound {
        /// Supply number that was looked up
        supply_number: i64,
        /// Supplier ID that was looked up
        id_supplier: String,
    },

    /// Operator entered a value that cannot be parsed for the field
    #[error("Invalid {field}: {message}")]
    InvalidInput {
        /// Name of the prompted field
        field: String,
        /// Parser message
        message: String,
    },

    /// Terminal or filesystem I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DbErr> for Error {
    fn from(value: DbErr) -> Self {
        match value {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::StoreUnavailable(value.to_string()),
            other => Self::Database(other.to_string()),
        }
    }
}

impl Error {
    /// True for failures that originate in the store rather than in the caller's input.
    #[must_use]
    pub const fn is_store_failure(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_) | Self::Database(_))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
