//! Entity module - Contains the SeaORM entity definition for the supply table.
//! The Model struct carries row data and the Entity struct drives queries.

pub mod supply;

pub use supply::{ActiveModel as SupplyActiveModel, Column as SupplyColumn, Entity as Supply, Model as SupplyModel};
