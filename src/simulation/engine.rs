// src/simulation/engine.rs

use tracing::{debug, info};

use crate::error::{ConfigError, StepError};
use crate::model::Ledger;
use crate::policy::PurchasePolicy;
use crate::simulation::config::SimulationConfig;

/// Callback invoked synchronously after each committed day, with the day
/// just processed and the ledger state. Observability only; nothing in the
/// simulation depends on it.
pub type DayObserver = Box<dyn FnMut(usize, &Ledger)>;

/// The day-advance state machine for one single-echelon inventory run.
///
/// The engine exclusively owns its ledger. Days `1..horizon-1` (inclusive)
/// are processed one transition each; `current_day == horizon` is the
/// terminal state. Day 0 is the frozen seed state and never processed.
/// Re-running requires a fresh engine; there is no implicit reset.
pub struct ChainSimulation {
    config: SimulationConfig,
    ledger: Ledger,
    policy: Box<dyn PurchasePolicy>,
    current_day: usize,
    observer: Option<DayObserver>,
}

impl ChainSimulation {
    /// Binds a fresh ledger to the configuration, demand schedule, and
    /// policy. The schedule must already cover the full horizon: the engine
    /// never samples demand mid-loop, which is what makes two runs with the
    /// same schedule identical regardless of policy.
    pub fn new(
        config: SimulationConfig,
        demand_schedule: Vec<u64>,
        policy: Box<dyn PurchasePolicy>,
    ) -> Result<Self, ConfigError> {
        if demand_schedule.len() != config.horizon {
            return Err(ConfigError::ScheduleLengthMismatch {
                expected: config.horizon,
                actual: demand_schedule.len(),
            });
        }

        let mut ledger = Ledger::new(config.horizon);
        ledger.demand = demand_schedule;
        ledger.inventory[0] = config.starting_inventory;

        debug!(
            name = %config.name,
            horizon = config.horizon,
            lead_time = config.lead_time,
            policy = policy.name(),
            "simulation initialized"
        );

        Ok(Self {
            config,
            ledger,
            policy,
            current_day: 1,
            observer: None,
        })
    }

    /// Registers a per-day observer, replacing any previous one.
    pub fn set_day_observer(&mut self, observer: impl FnMut(usize, &Ledger) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Read access to the complete ledger after any number of transitions.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn current_day(&self) -> usize {
        self.current_day
    }

    pub fn is_complete(&self) -> bool {
        self.current_day == self.config.horizon
    }

    fn remaining_days(&self) -> usize {
        self.config.horizon - self.current_day
    }

    /// Performs exactly one transition. Safe to call repeatedly for
    /// step-by-step inspection; fails once the horizon is reached.
    pub fn simulate_one_day(&mut self) -> Result<(), StepError> {
        self.simulate_n_days(1)
    }

    /// Performs `n` transitions, verifying up front that they all fit within
    /// the horizon. On failure the ledger is left untouched.
    pub fn simulate_n_days(&mut self, n: usize) -> Result<(), StepError> {
        let remaining = self.remaining_days();
        if n > remaining {
            return Err(StepError::BeyondHorizon {
                current_day: self.current_day,
                requested: n,
                remaining,
            });
        }
        for _ in 0..n {
            self.advance_one_day();
        }
        Ok(())
    }

    /// Runs every remaining transition until the terminal state.
    pub fn simulate_all(&mut self) {
        while !self.is_complete() {
            self.advance_one_day();
        }
    }

    fn advance_one_day(&mut self) {
        let day = self.current_day;

        let starting_inventory = self.ledger.inventory[day - 1];
        let incoming = self.ledger.procurement[day];
        // Procurement is incorporated at the beginning of the day.
        let available = starting_inventory.saturating_add(incoming);
        let demand = self.ledger.demand[day];

        let sales = available.min(demand);
        let lost_sales = demand - sales;
        let ending_inventory = available - sales;

        self.ledger.inventory[day] = ending_inventory;
        self.ledger.sales[day] = sales;
        self.ledger.lost_sales[day] = lost_sales;

        debug!(
            day,
            starting_inventory, incoming, demand, sales, lost_sales, ending_inventory,
        );

        let quantity = self.policy.get_purchase(&self.ledger, day);
        if quantity > 0 {
            self.ledger.purchase[day] = quantity;

            // In-flight orders that would fall off the end of the horizon are
            // credited to the last valid index rather than dropped.
            let delivery_day = (day + self.config.lead_time).min(self.config.horizon - 1);
            self.ledger.procurement[delivery_day] =
                self.ledger.procurement[delivery_day].saturating_add(quantity);

            info!(
                day,
                policy = self.policy.name(),
                quantity,
                delivery_day,
                "placing purchase order"
            );
        }

        if let Some(observer) = self.observer.as_mut() {
            observer(day, &self.ledger);
        }

        self.current_day = day + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand::{generate_schedule, DemandConfig};
    use crate::policy::{PolicyConfig, PurchaseRop};
    use proptest::prelude::*;

    fn fixed_schedule(horizon: usize, demand: u64) -> Vec<u64> {
        vec![demand; horizon]
    }

    fn rop_simulation(horizon: usize, lead_time: usize, starting_inventory: u64) -> ChainSimulation {
        let config = SimulationConfig::new("test", horizon, lead_time, starting_inventory).unwrap();
        let policy = Box::new(PurchaseRop::new(lead_time, 50.0).unwrap());
        ChainSimulation::new(config, fixed_schedule(horizon, 50), policy).unwrap()
    }

    fn assert_conservation(ledger: &Ledger) {
        for day in 1..ledger.len() {
            assert_eq!(
                ledger.sales[day] + ledger.lost_sales[day],
                ledger.demand[day],
                "sales + lost sales != demand on day {day}"
            );
        }
        let ordered: u64 = ledger.purchase.iter().sum();
        let credited: u64 = ledger.procurement.iter().sum();
        assert_eq!(ordered, credited, "orders placed != procurement credited");
    }

    #[test]
    fn rop_shortage_scenario_first_day() {
        let mut sim = rop_simulation(30, 5, 0);
        sim.simulate_one_day().unwrap();

        let ledger = sim.ledger();
        assert_eq!(ledger.sales[1], 0);
        assert_eq!(ledger.lost_sales[1], 50);
        assert_eq!(ledger.inventory[1], 0);
        // inventory 0 <= reorder point 500, order ceil(50 x 5) = 250 due day 6.
        assert_eq!(ledger.purchase[1], 250);
        assert_eq!(ledger.procurement[6], 250);
    }

    #[test]
    fn rop_shortage_scenario_full_run() {
        let mut sim = rop_simulation(30, 5, 0);
        sim.simulate_all();
        assert!(sim.is_complete());

        let ledger = sim.ledger();
        // Nothing arrives before day 6; every unit of demand is lost.
        for day in 1..6 {
            assert_eq!(ledger.inventory[day], 0);
            assert_eq!(ledger.lost_sales[day], 50);
        }
        // Day 6: the day-1 order of 250 arrives, demand 50 is met.
        assert_eq!(ledger.sales[6], 50);
        assert_eq!(ledger.inventory[6], 200);

        assert_conservation(ledger);
    }

    #[test]
    fn orders_past_horizon_are_credited_to_last_day() {
        let mut sim = rop_simulation(8, 5, 0);
        sim.simulate_all();

        let ledger = sim.ledger();
        // Orders placed on days 2..=6 all land on day 7, the later ones only
        // because their delivery day is clamped to the last valid index. Day
        // 7 ends with enough stock that no further order is placed.
        assert_eq!(ledger.procurement[6], 250);
        assert_eq!(ledger.procurement[7], 1250);
        assert_eq!(ledger.purchase[7], 0);
        assert_conservation(ledger);
    }

    #[test]
    fn step_bounds_error_leaves_ledger_untouched() {
        let mut sim = rop_simulation(30, 5, 0);
        sim.simulate_n_days(10).unwrap();
        let before = sim.ledger().clone();

        let err = sim.simulate_n_days(25).unwrap_err();
        assert_eq!(
            err,
            StepError::BeyondHorizon {
                current_day: 11,
                requested: 25,
                remaining: 19,
            }
        );
        assert_eq!(sim.ledger(), &before);
        assert_eq!(sim.current_day(), 11);

        // The remaining days are still simulatable.
        sim.simulate_n_days(19).unwrap();
        assert!(sim.is_complete());
    }

    #[test]
    fn single_stepping_reaches_terminal_state_then_fails() {
        let mut sim = rop_simulation(10, 2, 500);
        let mut steps = 0;
        while !sim.is_complete() {
            sim.simulate_one_day().unwrap();
            steps += 1;
        }
        assert_eq!(steps, 9);
        assert!(sim.simulate_one_day().is_err());
    }

    #[test]
    fn near_max_inventory_does_not_wrap_around() {
        let starting = u64::MAX - 10;
        let mut sim = rop_simulation(30, 5, starting);
        sim.simulate_one_day().unwrap();

        let ledger = sim.ledger();
        assert_eq!(ledger.sales[1], 50);
        assert_eq!(ledger.inventory[1], starting - 50);
        assert_eq!(ledger.lost_sales[1], 0);
        assert_eq!(ledger.purchase[1], 0);
    }

    #[test]
    fn identical_seed_and_config_reproduce_the_ledger() {
        let run = || {
            let config = SimulationConfig::new("repro", 120, 5, 400).unwrap();
            let demand = DemandConfig::Normal {
                mean: 50.0,
                std_dev: 10.0,
            };
            let mut sampler = demand.build(7).unwrap();
            let schedule = generate_schedule(sampler.as_mut(), config.horizon);
            let policy = PolicyConfig::Eoq {
                ordering_cost: 100.0,
                holding_cost_rate: 0.2,
            }
            .build(config.lead_time, 50.0)
            .unwrap();
            let mut sim = ChainSimulation::new(config, schedule, policy).unwrap();
            sim.simulate_all();
            sim.ledger().clone()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn tpop_orders_only_on_review_days() {
        let horizon = 60;
        let config = SimulationConfig::new("tpop", horizon, 5, 0).unwrap();
        let policy = PolicyConfig::Tpop { review_period: 7 }
            .build(config.lead_time, 50.0)
            .unwrap();
        let mut sim = ChainSimulation::new(config, fixed_schedule(horizon, 50), policy).unwrap();
        sim.simulate_all();

        let ledger = sim.ledger();
        let mut review_day_orders = 0;
        for day in 1..horizon {
            if day % 7 != 0 {
                assert_eq!(ledger.purchase[day], 0, "order on non-review day {day}");
            } else if ledger.purchase[day] > 0 {
                review_day_orders += 1;
            }
        }
        assert!(review_day_orders > 0);
        assert_conservation(ledger);
    }

    #[test]
    fn observer_sees_every_committed_day() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut sim = rop_simulation(10, 2, 100);
        sim.set_day_observer(move |day, ledger| {
            sink.borrow_mut().push((day, ledger.inventory[day]));
        });
        sim.simulate_all();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 9);
        assert_eq!(seen.first().map(|&(d, _)| d), Some(1));
        assert_eq!(seen.last().map(|&(d, _)| d), Some(9));
    }

    #[test]
    fn schedule_length_must_match_horizon() {
        let config = SimulationConfig::new("bad", 30, 5, 0).unwrap();
        let policy = Box::new(PurchaseRop::new(5, 50.0).unwrap());
        let result = ChainSimulation::new(config, fixed_schedule(20, 50), policy);
        assert_eq!(
            result.err(),
            Some(ConfigError::ScheduleLengthMismatch {
                expected: 30,
                actual: 20,
            })
        );
    }

    proptest! {
        #[test]
        fn invariants_hold_for_random_runs(
            horizon in 2usize..200,
            lead_fraction in 1usize..100,
            seed in 0u64..1000,
            starting_inventory in 0u64..10_000,
        ) {
            let lead_time = (lead_fraction % (horizon - 1)).max(1);
            let config = SimulationConfig::new(
                "prop", horizon, lead_time, starting_inventory,
            ).unwrap();

            let demand = DemandConfig::Uniform { min: 0.0, max: 120.0 };
            let mut sampler = demand.build(seed).unwrap();
            let schedule = generate_schedule(sampler.as_mut(), horizon);

            let policy = PolicyConfig::Rop.build(lead_time, 50.0).unwrap();
            let mut sim = ChainSimulation::new(config, schedule, policy).unwrap();
            sim.simulate_all();

            let ledger = sim.ledger();
            for day in 1..horizon {
                prop_assert_eq!(
                    ledger.sales[day] + ledger.lost_sales[day],
                    ledger.demand[day]
                );
            }
            let ordered: u64 = ledger.purchase.iter().sum();
            let credited: u64 = ledger.procurement.iter().sum();
            prop_assert_eq!(ordered, credited);
        }
    }
}
