// src/model/mod.rs

pub mod ledger;

pub use ledger::Ledger;
