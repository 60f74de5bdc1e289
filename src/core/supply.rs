//! Supply business logic - the repository over the `supply` table.
//!
//! Every function takes the database connection, issues one logical statement
//! (or one transaction) and maps rows back to [`supply::Model`]. Failures are
//! returned as typed [`Error`]s; nothing here prints. The store is the only
//! source of truth: supply numbers come from its auto-increment sequence and no
//! copy of the table is kept in memory.

use crate::{
    entities::{Supply, supply},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{
    DatabaseBackend, DatabaseTransaction, QueryOrder, QuerySelect, Set, Statement,
    TransactionTrait, prelude::*, sea_query::Expr,
};
use tracing::{debug, info, instrument, warn};

/// Records a new supply. The store assigns `supply_number`; `added_date` is now.
///
/// Values are persisted as given: negative quantities or prices and empty labels
/// are not rejected here.
///
/// # Errors
/// Returns an error if the insert fails.
#[instrument(skip(db))]
pub async fn add_supply(
    db: &DatabaseConnection,
    supply_type: String,
    quantity: i64,
    price: f64,
    id_supplier: String,
) -> Result<supply::Model> {
    let supply = supply::ActiveModel {
        supply_type: Set(supply_type),
        quantity: Set(quantity),
        price: Set(price),
        added_date: Set(Utc::now()),
        id_supplier: Set(id_supplier),
        ..Default::default()
    };

    let created = supply.insert(db).await?;
    info!(supply_number = created.supply_number, "Supply added");
    Ok(created)
}

/// Retrieves every supply in the order it was recorded.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_supplies(db: &DatabaseConnection) -> Result<Vec<supply::Model>> {
    Supply::find()
        .order_by_asc(supply::Column::SupplyNumber)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds the supply with this number *and* supplier, or `None`.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_supply<C>(
    db: &C,
    supply_number: i64,
    id_supplier: &str,
) -> Result<Option<supply::Model>>
where
    C: ConnectionTrait,
{
    Supply::find_by_id(supply_number)
        .filter(supply::Column::IdSupplier.eq(id_supplier))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Replaces quantity and price on the supply matching both keys.
///
/// Type, supplier and `added_date` are never touched. Lookup and write share
/// one transaction.
///
/// # Errors
/// Returns [`Error::SupplyNotFound`] if no row matches the pair, or a store
/// error if the lookup or update fails.
#[instrument(skip(db))]
pub async fn update_supply(
    db: &DatabaseConnection,
    supply_number: i64,
    id_supplier: &str,
    new_quantity: i64,
    new_price: f64,
) -> Result<supply::Model> {
    let txn = db.begin().await?;

    let mut supply: supply::ActiveModel = get_supply(&txn, supply_number, id_supplier)
        .await?
        .ok_or_else(|| Error::SupplyNotFound {
            supply_number,
            id_supplier: id_supplier.to_string(),
        })?
        .into();

    supply.quantity = Set(new_quantity);
    supply.price = Set(new_price);
    let updated = supply.update(&txn).await?;

    txn.commit().await?;

    info!("Supply updated");
    Ok(updated)
}

/// Removes the supply matching both keys.
///
/// Deleting the highest-numbered supply does not hand its number out again and
/// deleting a lower one does not renumber the rest.
///
/// # Errors
/// Returns [`Error::SupplyNotFound`] if no row matches the pair, or a store
/// error if the delete itself fails. Once the row is removed the call succeeds.
#[instrument(skip(db))]
pub async fn delete_supply(
    db: &DatabaseConnection,
    supply_number: i64,
    id_supplier: &str,
) -> Result<()> {
    let result = Supply::delete_many()
        .filter(supply::Column::SupplyNumber.eq(supply_number))
        .filter(supply::Column::IdSupplier.eq(id_supplier))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::SupplyNotFound {
            supply_number,
            id_supplier: id_supplier.to_string(),
        });
    }

    // Row is already removed; only the log field depends on this read
    match highest_supply_number(db).await {
        Ok(highest) => info!(highest_remaining = ?highest, "Supply deleted"),
        Err(e) => warn!("Supply deleted, highest remaining number unavailable: {e}"),
    }
    Ok(())
}

/// Highest supply number currently stored, `None` when the table is empty.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn highest_supply_number<C>(db: &C) -> Result<Option<i64>>
where
    C: ConnectionTrait,
{
    let highest: Option<Option<i64>> = Supply::find()
        .select_only()
        .column_as(Expr::col(supply::Column::SupplyNumber).max(), "highest")
        .into_tuple()
        .one(db)
        .await?;

    Ok(highest.flatten())
}

/// Sum of quantity × price over every stored supply. An empty table is worth `0.0`.
///
/// Only the two columns involved are read.
///
/// # Errors
/// Returns an error if the database query fails.
#[allow(clippy::cast_precision_loss)]
pub async fn calculate_total_value(db: &DatabaseConnection) -> Result<f64> {
    let rows: Vec<(i64, f64)> = Supply::find()
        .select_only()
        .column(supply::Column::Quantity)
        .column(supply::Column::Price)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(quantity, price)| quantity as f64 * price)
        .sum())
}

/// Deletes every supply and restarts numbering at 1, returning how many rows went.
///
/// Both steps run in one transaction so a failed sequence restart leaves the
/// table untouched. Confirmation is the caller's job.
///
/// # Errors
/// Returns an error if the delete or the sequence restart fails; nothing is
/// removed in that case.
#[instrument(skip(db))]
pub async fn reset_all(db: &DatabaseConnection) -> Result<u64> {
    let txn = db.begin().await?;

    let removed = Supply::delete_many().exec(&txn).await?.rows_affected;
    restart_supply_sequence(&txn).await?;

    txn.commit().await?;

    info!(removed, "All supply data reset");
    Ok(removed)
}

async fn restart_supply_sequence(txn: &DatabaseTransaction) -> Result<()> {
    let backend = txn.get_database_backend();
    match backend {
        DatabaseBackend::Sqlite => {
            // sqlite_sequence only exists once an AUTOINCREMENT table has been created
            let has_sequence_table = txn
                .query_one(Statement::from_string(
                    backend,
                    "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence'",
                ))
                .await?
                .is_some();
            if has_sequence_table {
                txn.execute_unprepared("DELETE FROM sqlite_sequence WHERE name = 'supply'")
                    .await?;
            }
        }
        DatabaseBackend::Postgres => {
            txn.execute_unprepared("ALTER SEQUENCE supply_supply_number_seq RESTART WITH 1")
                .await?;
        }
        DatabaseBackend::MySql => {
            txn.execute_unprepared("ALTER TABLE supply AUTO_INCREMENT = 1")
                .await?;
        }
    }
    debug!(?backend, "Supply sequence restarted");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{MockDatabase, MockExecResult, RuntimeErr};

    #[tokio::test]
    async fn test_add_supply_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let supply = add_supply(&db, "Diesel".to_string(), 100, 15_000.0, "SUP1".to_string()).await?;

        assert_eq!(supply.supply_number, 1);
        assert_eq!(supply.supply_type, "Diesel");
        assert_eq!(supply.quantity, 100);
        assert_eq!(supply.price, 15_000.0);
        assert_eq!(supply.id_supplier, "SUP1");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_then_list_yields_one_more_row() -> Result<()> {
        let (db, existing) = setup_with_supplies().await?;
        let before = list_supplies(&db).await?;
        let previous_max = existing.iter().map(|s| s.supply_number).max().unwrap();

        let added = create_custom_supply(&db, "Solar", 75, 6_800.0, "SUP3").await?;

        let after = list_supplies(&db).await?;
        assert_eq!(after.len(), before.len() + 1);
        assert!(added.supply_number > previous_max);

        let listed = after.last().unwrap();
        assert_eq!(listed.supply_number, added.supply_number);
        assert_eq!(listed.supply_type, "Solar");
        assert_eq!(listed.quantity, 75);
        assert_eq!(listed.price, 6_800.0);
        assert_eq!(listed.id_supplier, "SUP3");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_supply_accepts_negative_and_empty_values() -> Result<()> {
        let db = setup_test_db().await?;

        let supply = add_supply(&db, String::new(), -5, -1.5, String::new()).await?;

        assert_eq!(supply.quantity, -5);
        assert_eq!(supply.price, -1.5);
        assert!(supply.supply_type.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_list_supplies_in_insertion_order() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_supply(&db, "Pertamax", "SUP2").await?;
        create_test_supply(&db, "Diesel", "SUP1").await?;
        create_test_supply(&db, "Avtur", "SUP9").await?;

        let supplies = list_supplies(&db).await?;
        let types: Vec<&str> = supplies.iter().map(|s| s.supply_type.as_str()).collect();
        assert_eq!(types, ["Pertamax", "Diesel", "Avtur"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_supply_requires_both_keys() -> Result<()> {
        let db = setup_test_db().await?;
        let supply = create_test_supply(&db, "Diesel", "SUP1").await?;

        assert!(get_supply(&db, supply.supply_number, "SUP1").await?.is_some());
        assert!(get_supply(&db, supply.supply_number, "SUP2").await?.is_none());
        assert!(get_supply(&db, supply.supply_number + 1, "SUP1").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_supply_changes_only_quantity_and_price() -> Result<()> {
        let (db, supplies) = setup_with_supplies().await?;
        let target = &supplies[0];
        let before = list_supplies(&db).await?;

        let updated = update_supply(&db, target.supply_number, &target.id_supplier, 80, 15_500.0).await?;
        assert_eq!(updated.quantity, 80);
        assert_eq!(updated.price, 15_500.0);

        let after = list_supplies(&db).await?;
        assert_eq!(after.len(), before.len());

        let (old, new) = (&before[0], &after[0]);
        assert_eq!(new.supply_number, old.supply_number);
        assert_eq!(new.supply_type, old.supply_type);
        assert_eq!(new.id_supplier, old.id_supplier);
        assert_eq!(new.added_date, old.added_date);
        assert_eq!(new.quantity, 80);
        assert_eq!(new.price, 15_500.0);

        // The other row is untouched
        assert_eq!(after[1], before[1]);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_supply_wrong_supplier_is_not_found() -> Result<()> {
        let (db, supplies) = setup_with_supplies().await?;
        let before = list_supplies(&db).await?;

        let result = update_supply(&db, supplies[0].supply_number, "SUP2", 1, 1.0).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::SupplyNotFound { supply_number: 1, ref id_supplier } if id_supplier == "SUP2"
        ));

        assert_eq!(list_supplies(&db).await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_supply_removes_exactly_one_row() -> Result<()> {
        let (db, supplies) = setup_with_supplies().await?;

        delete_supply(&db, supplies[1].supply_number, &supplies[1].id_supplier).await?;

        let remaining = list_supplies(&db).await?;
        assert_eq!(remaining, vec![supplies[0].clone()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_supply_twice_is_not_found() -> Result<()> {
        let (db, supplies) = setup_with_supplies().await?;

        delete_supply(&db, supplies[0].supply_number, "SUP1").await?;
        let result = delete_supply(&db, supplies[0].supply_number, "SUP1").await;

        assert!(matches!(result.unwrap_err(), Error::SupplyNotFound { .. }));
        assert_eq!(list_supplies(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_lower_number_does_not_renumber() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_supply(&db, "Diesel", "SUP1").await?;
        create_test_supply(&db, "Petrol", "SUP2").await?;
        create_test_supply(&db, "Avtur", "SUP3").await?;

        delete_supply(&db, 1, "SUP1").await?;

        let numbers: Vec<i64> = list_supplies(&db)
            .await?
            .iter()
            .map(|s| s.supply_number)
            .collect();
        assert_eq!(numbers, [2, 3]);
        assert_eq!(highest_supply_number(&db).await?, Some(3));

        Ok(())
    }

    #[tokio::test]
    async fn test_highest_supply_number_empty_table() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(highest_supply_number(&db).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_total_value_matches_list() -> Result<()> {
        let db = setup_test_db().await?;
        create_custom_supply(&db, "Diesel", 12, 6_800.5, "SUP1").await?;
        create_custom_supply(&db, "Pertamax", 3, 12_950.25, "SUP2").await?;
        create_custom_supply(&db, "Avtur", 0, 99_999.0, "SUP3").await?;

        let expected: f64 = list_supplies(&db)
            .await?
            .iter()
            .map(supply::Model::total_value)
            .sum();
        let total = calculate_total_value(&db).await?;

        assert!((total - expected).abs() < 1e-6);
        Ok(())
    }

    #[tokio::test]
    async fn test_total_value_empty_table_is_zero() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(calculate_total_value(&db).await?, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_reset_all_clears_rows_and_restarts_numbering() -> Result<()> {
        let (db, _supplies) = setup_with_supplies().await?;
        create_test_supply(&db, "Avtur", "SUP3").await?;

        let removed = reset_all(&db).await?;
        assert_eq!(removed, 3);

        assert!(list_supplies(&db).await?.is_empty());
        assert_eq!(calculate_total_value(&db).await?, 0.0);
        assert_eq!(highest_supply_number(&db).await?, None);

        let next = create_test_supply(&db, "Diesel", "SUP1").await?;
        assert_eq!(next.supply_number, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_reset_all_on_empty_table() -> Result<()> {
        let db = setup_test_db().await?;

        assert_eq!(reset_all(&db).await?, 0);

        let next = create_test_supply(&db, "Diesel", "SUP1").await?;
        assert_eq!(next.supply_number, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_inventory_scenario() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;

        add_supply(&db, "Diesel".to_string(), 100, 15_000.0, "SUP1".to_string()).await?;
        assert_eq!(calculate_total_value(&db).await?, 1_500_000.0);

        add_supply(&db, "Petrol".to_string(), 50, 20_000.0, "SUP2".to_string()).await?;
        assert_eq!(calculate_total_value(&db).await?, 2_500_000.0);

        delete_supply(&db, 2, "SUP2").await?;
        assert_eq!(calculate_total_value(&db).await?, 1_500_000.0);
        assert_eq!(list_supplies(&db).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_store_failure_is_not_an_empty_result() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors([DbErr::Conn(RuntimeErr::Internal(
                "connection refused".to_string(),
            ))])
            .into_connection();

        let result = list_supplies(&db).await;
        assert!(result.unwrap_err().is_store_failure());
    }

    #[tokio::test]
    async fn test_delete_succeeds_when_follow_up_read_fails() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_errors([DbErr::Conn(RuntimeErr::Internal("gone".to_string()))])
            .into_connection();

        let result = delete_supply(&db, 1, "SUP1").await;
        assert!(result.is_ok(), "delete reported {result:?}");
    }

    #[tokio::test]
    async fn test_delete_failure_is_a_store_error() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_errors([DbErr::Conn(RuntimeErr::Internal("gone".to_string()))])
            .into_connection();

        let result = delete_supply(&db, 1, "SUP1").await;
        assert!(result.unwrap_err().is_store_failure());
    }

    #[tokio::test]
    async fn test_total_value_store_failure_is_not_zero() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors([DbErr::Custom("no such table: supply".to_string())])
            .into_connection();

        let result = calculate_total_value(&db).await;
        assert!(matches!(result.unwrap_err(), Error::Database(_)));
    }
}
