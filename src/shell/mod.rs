//! Interactive text menu over the supply repository.
//!
//! The shell reads from any [`BufRead`] and writes to any [`Write`], so the same
//! loop serves the terminal and the tests. Every repository error is printed and
//! logged, then the menu comes back; only a failure to write to the output ends
//! the loop early.

/// Menu choices and their stable numbers
pub mod menu;
/// Supply table and total rendering
pub mod render;

use crate::{
    core::supply,
    errors::{Error, Result},
};
pub use menu::MenuChoice;
use sea_orm::DatabaseConnection;
use std::{
    fmt::Display,
    io::{self, BufRead, Write},
    str::FromStr,
};
use tracing::{debug, error, warn};

/// Menu loop bound to one database connection and one pair of streams.
pub struct Shell<'a, R, W> {
    db: &'a DatabaseConnection,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    /// Creates a shell reading operator input from `input` and printing to `output`.
    pub const fn new(db: &'a DatabaseConnection, input: R, output: W) -> Self {
        Self { db, input, output }
    }

    /// Hands back the output stream, e.g. to inspect what was printed.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the menu until the operator chooses Exit or input ends.
    ///
    /// # Errors
    /// Returns an error only if writing to the output fails.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };

            let choice = match line.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(e) => {
                    debug!("Rejected menu input {line:?}: {e}");
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    continue;
                }
            };

            if choice == MenuChoice::Exit {
                writeln!(self.output, "Thank you for using the application!")?;
                break;
            }

            if let Err(e) = self.dispatch(choice).await {
                self.report(&e)?;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::AddSupply => self.add_supply().await,
            MenuChoice::DisplayInventory => self.display_inventory().await,
            MenuChoice::UpdateSupply => self.update_supply().await,
            MenuChoice::DeleteSupply => self.delete_supply().await,
            MenuChoice::CalculateTotalValue => self.calculate_total_value().await,
            MenuChoice::ResetAll => self.reset_all().await,
            MenuChoice::Exit => Ok(()),
        }
    }

    async fn add_supply(&mut self) -> Result<()> {
        let supply_type = self.prompt("Enter type of supply: ")?;
        let quantity: i64 = self.prompt_parsed("Enter quantity (liter): ", "quantity")?;
        let price = self.prompt_price("Enter price per liter: ")?;
        let id_supplier = self.prompt("Enter supplier ID: ")?;

        let created = supply::add_supply(self.db, supply_type, quantity, price, id_supplier).await?;
        writeln!(
            self.output,
            "Supply #{} added to database. {created}",
            created.supply_number
        )?;
        Ok(())
    }

    async fn display_inventory(&mut self) -> Result<()> {
        let supplies = supply::list_supplies(self.db).await?;
        write!(self.output, "{}", render::render_supply_table(&supplies))?;
        Ok(())
    }

    async fn update_supply(&mut self) -> Result<()> {
        let supply_number: i64 =
            self.prompt_parsed("Enter supply number to update: ", "supply number")?;
        let id_supplier = self.prompt("Enter supplier ID: ")?;
        let new_quantity: i64 = self.prompt_parsed("Enter new quantity: ", "quantity")?;
        let new_price = self.prompt_price("Enter new price per unit: ")?;

        match supply::update_supply(self.db, supply_number, &id_supplier, new_quantity, new_price)
            .await
        {
            Ok(_) => writeln!(self.output, "Supply updated in database.")?,
            Err(Error::SupplyNotFound { .. }) => {
                writeln!(self.output, "No supply found to update.")?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    async fn delete_supply(&mut self) -> Result<()> {
        let supply_number: i64 =
            self.prompt_parsed("Enter supply number to delete: ", "supply number")?;
        let id_supplier = self.prompt("Enter supplier ID: ")?;

        match supply::delete_supply(self.db, supply_number, &id_supplier).await {
            Ok(()) => writeln!(self.output, "Supply deleted from database.")?,
            Err(Error::SupplyNotFound { .. }) => {
                writeln!(self.output, "No supply found to delete.")?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    async fn calculate_total_value(&mut self) -> Result<()> {
        let total = supply::calculate_total_value(self.db).await?;
        writeln!(self.output, "{}", render::render_total_value(total))?;
        Ok(())
    }

    async fn reset_all(&mut self) -> Result<()> {
        let answer = self.prompt("Reset ALL supply data? This cannot be undone (y/N): ")?;
        if !matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes") {
            writeln!(self.output, "Reset cancelled.")?;
            return Ok(());
        }

        let removed = supply::reset_all(self.db).await?;
        writeln!(
            self.output,
            "All supply data has been reset ({removed} removed)."
        )?;
        Ok(())
    }

    fn report(&mut self, e: &Error) -> Result<()> {
        if e.is_store_failure() {
            error!("Store operation failed: {e}");
            writeln!(self.output, "{e}")?;
        } else {
            warn!("Menu action failed: {e}");
            writeln!(self.output, "An error occurred: {e}")?;
        }
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- BBM Supply Management ---")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{choice}")?;
        }
        write!(self.output, "Choose an option: ")?;
        self.output.flush()?;
        Ok(())
    }

    /// Next line without its line ending, `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()?.ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for a value",
            ))
        })
    }

    fn prompt_parsed<T>(&mut self, label: &str, field: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.prompt(label)?;
        raw.parse().map_err(|e: T::Err| Error::InvalidInput {
            field: field.to_string(),
            message: format!("{raw:?}: {e}"),
        })
    }

    fn prompt_price(&mut self, label: &str) -> Result<f64> {
        let price: f64 = self.prompt_parsed(label, "price")?;
        if !price.is_finite() {
            return Err(Error::InvalidInput {
                field: "price".to_string(),
                message: format!("{price} is not a finite number"),
            });
        }
        Ok(price)
    }
}
