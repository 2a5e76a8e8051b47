// src/policy/traits.rs

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::model::ledger::Ledger;
use crate::policy::implementations::{PurchaseEoq, PurchaseRop, PurchaseTpop};

/// Defines the replenishment decision logic consulted once per simulated day.
///
/// Policies are pure with respect to the ledger: they read entries at indices
/// `<= day`, plus `procurement` up to `day + lead_time` to see their own
/// in-transit orders, and never mutate anything. `Send + Sync` so one policy
/// can be shared read-only by engines running on separate threads.
pub trait PurchasePolicy: Debug + Send + Sync {
    /// Returns the quantity to order on `day` (0 for no order).
    fn get_purchase(&self, ledger: &Ledger, day: usize) -> u64;

    /// Short policy identifier for logs and reports.
    fn name(&self) -> &'static str;

    /// Human-readable derivation of the decision for `day`: the formula with
    /// the actual values substituted. Diagnostics only, not part of the
    /// decision contract.
    fn calculation_details(&self, ledger: &Ledger, day: usize) -> String;
}

/// Descriptor for one of the three supported policies, shaped for
/// query-parameter / JSON configuration surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "UPPERCASE")]
pub enum PolicyConfig {
    Rop,
    Eoq {
        ordering_cost: f64,
        holding_cost_rate: f64,
    },
    Tpop {
        review_period: usize,
    },
}

impl PolicyConfig {
    /// Validates the parameters and constructs the policy. `lead_time` and
    /// `mean_demand` come from the simulation-level configuration.
    pub fn build(
        &self,
        lead_time: usize,
        mean_demand: f64,
    ) -> Result<Box<dyn PurchasePolicy>, PolicyError> {
        match *self {
            PolicyConfig::Rop => Ok(Box::new(PurchaseRop::new(lead_time, mean_demand)?)),
            PolicyConfig::Eoq {
                ordering_cost,
                holding_cost_rate,
            } => Ok(Box::new(PurchaseEoq::new(
                lead_time,
                mean_demand,
                ordering_cost,
                holding_cost_rate,
            )?)),
            PolicyConfig::Tpop { review_period } => Ok(Box::new(PurchaseTpop::new(
                lead_time,
                mean_demand,
                review_period,
            )?)),
        }
    }
}
