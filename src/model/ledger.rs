// src/model/ledger.rs

use serde::Serialize;

/// The six observable time series of one simulation run.
///
/// Each series is a fixed-length sequence of non-negative quantities indexed
/// by day `0..horizon`. Day 0 is the frozen seed state: `inventory[0]` holds
/// the starting inventory and the day-advance loop never writes to index 0.
///
/// Two invariants hold for every processed day `d >= 1`:
/// - `sales[d] + lost_sales[d] == demand[d]`
/// - `procurement[d]` accumulates every order whose delivery day is `d`
///   (additive, never overwritten).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ledger {
    pub inventory: Vec<u64>,
    pub demand: Vec<u64>,
    pub procurement: Vec<u64>,
    pub purchase: Vec<u64>,
    pub sales: Vec<u64>,
    pub lost_sales: Vec<u64>,
}

impl Ledger {
    /// Creates an all-zero ledger for `horizon` days.
    pub fn new(horizon: usize) -> Self {
        Self {
            inventory: vec![0; horizon],
            demand: vec![0; horizon],
            procurement: vec![0; horizon],
            purchase: vec![0; horizon],
            sales: vec![0; horizon],
            lost_sales: vec![0; horizon],
        }
    }

    /// Number of days covered, i.e. the simulation horizon.
    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }

    /// Sum of procurement scheduled to arrive in `(day, day + lead_time]`,
    /// clamped to the series bounds. This is the "pipeline inventory" a
    /// policy may look ahead at: its own previously-scheduled arrivals.
    pub fn pipeline_inventory(&self, day: usize, lead_time: usize) -> u64 {
        let start = day + 1;
        let end = (day + lead_time + 1).min(self.procurement.len());
        if start >= end {
            return 0;
        }
        self.procurement[start..end].iter().sum()
    }
}
