// src/io/reporting.rs

use std::error::Error;
use std::path::Path;

use serde::Serialize;

use crate::model::Ledger;

/// One CSV row: the six ledger series for a single day.
#[derive(Debug, Clone, Serialize)]
struct DayRecord {
    day: usize,
    inventory: u64,
    demand: u64,
    procurement: u64,
    purchase: u64,
    sales: u64,
    lost_sales: u64,
}

/// Writes the ledger to a CSV file, one row per simulated day.
pub fn write_ledger_csv(file_path: impl AsRef<Path>, ledger: &Ledger) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(file_path.as_ref())?;

    for day in 0..ledger.len() {
        wtr.serialize(DayRecord {
            day,
            inventory: ledger.inventory[day],
            demand: ledger.demand[day],
            procurement: ledger.procurement[day],
            purchase: ledger.purchase[day],
            sales: ledger.sales[day],
            lost_sales: ledger.lost_sales[day],
        })?;
    }

    wtr.flush()?;
    Ok(())
}

/// Renders the ledger as a JSON object of six named series, the shape
/// consumed by charting front ends.
pub fn ledger_to_json(ledger: &Ledger) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(ledger)
}
