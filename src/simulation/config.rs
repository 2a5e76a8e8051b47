// src/simulation/config.rs

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Immutable parameters of one simulation run.
///
/// Constructed through [`SimulationConfig::new`], which is the single point
/// of validation: an engine built from a `SimulationConfig` never re-checks
/// these values per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub name: String,
    /// Total number of simulated days, >= 1.
    pub horizon: usize,
    /// Days between placing an order and its arrival, 0 < lead_time < horizon.
    pub lead_time: usize,
    /// On-hand inventory at day 0.
    pub starting_inventory: u64,
}

impl SimulationConfig {
    pub fn new(
        name: impl Into<String>,
        horizon: usize,
        lead_time: usize,
        starting_inventory: u64,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if horizon == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        if lead_time == 0 || lead_time >= horizon {
            return Err(ConfigError::LeadTimeOutOfRange { lead_time, horizon });
        }
        Ok(Self {
            name,
            horizon,
            lead_time,
            starting_inventory,
        })
    }
}
