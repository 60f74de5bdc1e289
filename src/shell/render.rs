//! Plain-text rendering of supplies for the terminal.

use crate::entities::supply::{self, ADDED_DATE_FORMAT};

const BORDER: &str =
    "+--------------+----------+----------+----------+----------------------+-------------------+";
const HEADER: &str =
    "| Supply No.   | Type     | Quantity | Price    | Added Date           | Supplier ID       |";

/// Renders supplies as a bordered table. An empty slice still gets the header.
#[must_use]
pub fn render_supply_table(supplies: &[supply::Model]) -> String {
    let mut out = format!("{BORDER}\n{HEADER}\n{BORDER}\n");
    for s in supplies {
        out.push_str(&render_supply_row(s));
        out.push('\n');
    }
    out.push_str(BORDER);
    out.push('\n');
    out
}

fn render_supply_row(s: &supply::Model) -> String {
    format!(
        "| {:<12} | {:<8} | {:<8} | {:<8.2} | {:<20} | {:<17} |",
        s.supply_number,
        s.supply_type,
        s.quantity,
        s.price,
        s.added_date.format(ADDED_DATE_FORMAT).to_string(),
        s.id_supplier
    )
}

/// One-line total, two decimals.
#[must_use]
pub fn render_total_value(total: f64) -> String {
    format!("Total Inventory Value: {total:.2}")
}
