// src/policy/mod.rs

pub mod implementations;
pub mod traits;

pub use implementations::{PurchaseEoq, PurchaseRop, PurchaseTpop};
pub use traits::{PolicyConfig, PurchasePolicy};
