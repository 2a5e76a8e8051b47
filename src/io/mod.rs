// src/io/mod.rs

pub mod reporting;

pub use reporting::{ledger_to_json, write_ledger_csv};
