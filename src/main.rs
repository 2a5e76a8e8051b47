use std::error::Error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use chainsim::demand::{generate_schedule, DemandConfig, DemandSampler};
use chainsim::io::reporting;
use chainsim::policy::PolicyConfig;
use chainsim::simulation::{ChainSimulation, SimulationConfig};

/// Command-line overrides for the demo scenario. Anything not given keeps
/// the classic defaults: 30 days, lead time 5, normal demand around 50.
struct Args {
    horizon: usize,
    lead_time: usize,
    starting_inventory: u64,
    average_demand: f64,
    std_demand: f64,
    seed: u64,
    policy: String,
    ordering_cost: f64,
    holding_cost_rate: f64,
    review_period: usize,
    output_file: String,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            horizon: 30,
            lead_time: 5,
            starting_inventory: 0,
            average_demand: 50.0,
            std_demand: 10.0,
            seed: 7,
            policy: "ROP".to_string(),
            ordering_cost: 100.0,
            holding_cost_rate: 0.2,
            review_period: 7,
            output_file: "simulation_records.csv".to_string(),
        }
    }
}

fn parse<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|s| s.parse().ok())
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        let value = it.next();
        match arg.as_str() {
            "--horizon" => args.horizon = parse(value).unwrap_or(args.horizon),
            "--lead_time" => args.lead_time = parse(value).unwrap_or(args.lead_time),
            "--starting_inventory" => {
                args.starting_inventory = parse(value).unwrap_or(args.starting_inventory)
            }
            "--average_demand" => args.average_demand = parse(value).unwrap_or(args.average_demand),
            "--std_demand" => args.std_demand = parse(value).unwrap_or(args.std_demand),
            "--seed" => args.seed = parse(value).unwrap_or(args.seed),
            "--policy" => args.policy = value.unwrap_or(args.policy),
            "--ordering_cost" => args.ordering_cost = parse(value).unwrap_or(args.ordering_cost),
            "--holding_cost_rate" => {
                args.holding_cost_rate = parse(value).unwrap_or(args.holding_cost_rate)
            }
            "--review_period" => args.review_period = parse(value).unwrap_or(args.review_period),
            "--output_file" => args.output_file = value.unwrap_or(args.output_file),
            _ => eprintln!("ignoring unknown argument: {arg}"),
        }
    }
    args
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = parse_args();

    // 1. CONFIGURATION
    let config = SimulationConfig::new(
        "chainsim",
        args.horizon,
        args.lead_time,
        args.starting_inventory,
    )?;

    // 2. DEMAND SCHEDULE
    // Generated up front for the whole horizon; the engine never samples.
    let demand = DemandConfig::Normal {
        mean: args.average_demand,
        std_dev: args.std_demand,
    };
    let mut sampler = demand.build(args.seed)?;
    let schedule = generate_schedule(sampler.as_mut(), config.horizon);

    // 3. REPLENISHMENT POLICY
    let policy_config = match args.policy.to_uppercase().as_str() {
        "EOQ" => PolicyConfig::Eoq {
            ordering_cost: args.ordering_cost,
            holding_cost_rate: args.holding_cost_rate,
        },
        "TPOP" => PolicyConfig::Tpop {
            review_period: args.review_period,
        },
        _ => PolicyConfig::Rop,
    };
    let policy = policy_config.build(config.lead_time, sampler.mean())?;

    // 4. RUN
    info!(
        horizon = config.horizon,
        lead_time = config.lead_time,
        policy = %args.policy,
        seed = args.seed,
        "starting simulation"
    );
    let mut sim = ChainSimulation::new(config, schedule, policy)?;
    sim.simulate_all();

    // 5. EXPORT & SUMMARY
    let ledger = sim.ledger();
    reporting::write_ledger_csv(&args.output_file, ledger)?;
    info!(output_file = %args.output_file, "wrote simulation records");

    let total_demand: u64 = ledger.demand.iter().skip(1).sum();
    let total_sales: u64 = ledger.sales.iter().sum();
    let total_lost: u64 = ledger.lost_sales.iter().sum();
    let orders_placed = ledger.purchase.iter().filter(|&&q| q > 0).count();
    println!("=== Simulation Summary ===");
    println!("Total demand:     {total_demand}");
    println!("Total sales:      {total_sales}");
    println!("Total lost sales: {total_lost}");
    println!("Orders placed:    {orders_placed}");
    println!("Ending inventory: {}", ledger.inventory[ledger.len() - 1]);

    Ok(())
}
