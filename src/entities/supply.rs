//! Supply entity - One fuel delivery held in inventory.
//!
//! Each row records the fuel `type`, the `quantity` on hand, the per-unit `price`,
//! the supplier it came from and the time it was added. `supply_number` is
//! assigned by the store's auto-increment sequence and, together with
//! `id_supplier`, forms the lookup key for updates and deletes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format used wherever an `added_date` is shown to an operator
pub const ADDED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Supply database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "supply")]
pub struct Model {
    /// Store-assigned number, restarts at 1 after a full reset
    #[sea_orm(primary_key)]
    pub supply_number: i64,
    /// Free-form fuel label (e.g., "Diesel", "Pertalite")
    #[sea_orm(column_name = "type")]
    pub supply_type: String,
    /// Units on hand (liters)
    pub quantity: i64,
    /// Price per unit
    pub price: f64,
    /// When the supply was recorded, never changed afterwards
    pub added_date: DateTimeUtc,
    /// Opaque supplier identifier
    pub id_supplier: String,
}

/// The supply table stands alone
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Value of this row: quantity × price.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_value(&self) -> f64 {
        self.quantity as f64 * self.price
    }

    /// Fuel type in upper case, the way it is shown in one-line summaries.
    #[must_use]
    pub fn capitalized_type(&self) -> String {
        self.supply_type.to_uppercase()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Type: {}, Quantity: {}, Price: {}, Supplier ID: {}, Added Date: {}",
            self.capitalized_type(),
            self.quantity,
            self.price,
            self.id_supplier,
            self.added_date.format(ADDED_DATE_FORMAT)
        )
    }
}
