// src/error.rs

use thiserror::Error;

/// Errors raised while validating simulation-level configuration.
///
/// All of these are construction-time failures: once a `ChainSimulation`
/// exists, its configuration is known-good and is never re-checked per day.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("simulation name must not be empty")]
    EmptyName,
    #[error("simulation horizon must be at least 1 day")]
    ZeroHorizon,
    #[error("lead time {lead_time} must satisfy 0 < lead_time < horizon ({horizon})")]
    LeadTimeOutOfRange { lead_time: usize, horizon: usize },
    #[error("demand schedule has {actual} entries, expected {expected}")]
    ScheduleLengthMismatch { expected: usize, actual: usize },
    #[error("demand mean must be positive, got {0}")]
    NonPositiveMean(f64),
    #[error("demand standard deviation must be non-negative, got {0}")]
    NegativeStdDev(f64),
    #[error("gamma shape and scale must be positive, got shape={shape}, scale={scale}")]
    InvalidGamma { shape: f64, scale: f64 },
    #[error("uniform bounds require min < max, got min={min}, max={max}")]
    InvalidUniformBounds { min: f64, max: f64 },
}

/// Error raised when a bulk step request would run past the horizon.
///
/// The ledger is guaranteed untouched: bounds are checked before the first
/// transition of the batch.
#[derive(Debug, Error, PartialEq)]
pub enum StepError {
    #[error(
        "cannot simulate {requested} day(s) from day {current_day}: only {remaining} remain"
    )]
    BeyondHorizon {
        current_day: usize,
        requested: usize,
        remaining: usize,
    },
}

/// Policy-specific parameter validation failures, raised at policy
/// construction, independent of engine construction.
#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("lead time must be greater than zero")]
    ZeroLeadTime,
    #[error("average daily demand must be positive, got {0}")]
    NonPositiveDemand(f64),
    #[error("ordering cost must be positive, got {0}")]
    NonPositiveOrderingCost(f64),
    #[error("holding cost rate must be positive, got {0}")]
    NonPositiveHoldingCostRate(f64),
    #[error("review period must be greater than zero")]
    ZeroReviewPeriod,
}
