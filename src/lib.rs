//! Single-echelon inventory simulation.
//!
//! Each simulated day the engine receives previously-ordered procurement,
//! satisfies sampled demand from on-hand stock, records any shortfall, and
//! asks a replenishment policy whether to place a new order. Demand is
//! generated for the whole horizon before the first transition, so runs are
//! reproducible for a given distribution and seed no matter which policy is
//! plugged in.
//!
//! ```no_run
//! use chainsim::demand::{generate_schedule, DemandConfig, DemandSampler};
//! use chainsim::policy::PolicyConfig;
//! use chainsim::simulation::{ChainSimulation, SimulationConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SimulationConfig::new("demo", 30, 5, 400)?;
//! let mut sampler = DemandConfig::Normal { mean: 50.0, std_dev: 10.0 }.build(7)?;
//! let schedule = generate_schedule(sampler.as_mut(), config.horizon);
//! let policy = PolicyConfig::Rop.build(config.lead_time, sampler.mean())?;
//!
//! let mut sim = ChainSimulation::new(config, schedule, policy)?;
//! sim.simulate_all();
//! println!("lost sales: {}", sim.ledger().lost_sales.iter().sum::<u64>());
//! # Ok(())
//! # }
//! ```

pub mod demand;
pub mod error;
pub mod io;
pub mod model;
pub mod policy;
pub mod simulation;

pub use error::{ConfigError, PolicyError, StepError};
pub use model::Ledger;
pub use simulation::{ChainSimulation, SimulationConfig};
