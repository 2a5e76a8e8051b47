// src/demand/mod.rs
//
// Demand processes. The full per-day schedule is generated once, before the
// engine starts stepping; the engine never samples mid-loop. Two runs with
// the same descriptor and seed therefore produce identical demand no matter
// which purchase policy consumes it.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Gamma, Normal, Poisson, Uniform};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A source of daily demand quantities.
pub trait DemandSampler: Send {
    /// Draws one day of demand. Never negative.
    fn sample(&mut self) -> f64;

    /// Long-run mean of the process, used by the purchase policies.
    fn mean(&self) -> f64;
}

/// Generates the complete demand schedule for `horizon` days.
///
/// Index 0 is populated like every other day even though the engine treats
/// day 0 as seed state and never processes it.
pub fn generate_schedule(sampler: &mut dyn DemandSampler, horizon: usize) -> Vec<u64> {
    (0..horizon).map(|_| sampler.sample().round() as u64).collect()
}

/// Descriptor for one of the five supported demand distributions, shaped for
/// query-parameter / JSON configuration surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "distribution", rename_all = "lowercase")]
pub enum DemandConfig {
    Fixed { mean: f64 },
    Normal { mean: f64, std_dev: f64 },
    Gamma { shape: f64, scale: f64 },
    Poisson { mean: f64 },
    Uniform { min: f64, max: f64 },
}

impl DemandConfig {
    /// Validates the parameters and constructs the sampler. Randomized
    /// variants are seeded explicitly; `Fixed` ignores the seed.
    pub fn build(&self, seed: u64) -> Result<Box<dyn DemandSampler>, ConfigError> {
        match *self {
            DemandConfig::Fixed { mean } => Ok(Box::new(FixedDemand::new(mean)?)),
            DemandConfig::Normal { mean, std_dev } => {
                Ok(Box::new(NormalDemand::new(mean, std_dev, seed)?))
            }
            DemandConfig::Gamma { shape, scale } => {
                Ok(Box::new(GammaDemand::new(shape, scale, seed)?))
            }
            DemandConfig::Poisson { mean } => Ok(Box::new(PoissonDemand::new(mean, seed)?)),
            DemandConfig::Uniform { min, max } => {
                Ok(Box::new(UniformDemand::new(min, max, seed)?))
            }
        }
    }
}

/// Constant demand: every day is exactly the configured mean.
#[derive(Debug, Clone)]
pub struct FixedDemand {
    mean: f64,
}

impl FixedDemand {
    pub fn new(mean: f64) -> Result<Self, ConfigError> {
        if mean <= 0.0 || !mean.is_finite() {
            return Err(ConfigError::NonPositiveMean(mean));
        }
        Ok(Self { mean })
    }
}

impl DemandSampler for FixedDemand {
    fn sample(&mut self) -> f64 {
        self.mean
    }

    fn mean(&self) -> f64 {
        self.mean
    }
}

/// Normally distributed demand, resampled until non-negative.
#[derive(Debug, Clone)]
pub struct NormalDemand {
    mean: f64,
    dist: Normal<f64>,
    rng: ChaCha8Rng,
}

impl NormalDemand {
    pub fn new(mean: f64, std_dev: f64, seed: u64) -> Result<Self, ConfigError> {
        if mean <= 0.0 || !mean.is_finite() {
            return Err(ConfigError::NonPositiveMean(mean));
        }
        if std_dev < 0.0 || !std_dev.is_finite() {
            return Err(ConfigError::NegativeStdDev(std_dev));
        }
        let dist = Normal::new(mean, std_dev).map_err(|_| ConfigError::NegativeStdDev(std_dev))?;
        Ok(Self {
            mean,
            dist,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }
}

impl DemandSampler for NormalDemand {
    fn sample(&mut self) -> f64 {
        // Rejection-resample: demand cannot be negative.
        loop {
            let value = self.dist.sample(&mut self.rng);
            if value >= 0.0 {
                return value;
            }
        }
    }

    fn mean(&self) -> f64 {
        self.mean
    }
}

/// Gamma-distributed demand (shape/scale). Intrinsically non-negative, so no
/// rejection step is needed.
#[derive(Debug, Clone)]
pub struct GammaDemand {
    shape: f64,
    scale: f64,
    dist: Gamma<f64>,
    rng: ChaCha8Rng,
}

impl GammaDemand {
    pub fn new(shape: f64, scale: f64, seed: u64) -> Result<Self, ConfigError> {
        if shape <= 0.0 || scale <= 0.0 || !shape.is_finite() || !scale.is_finite() {
            return Err(ConfigError::InvalidGamma { shape, scale });
        }
        let dist =
            Gamma::new(shape, scale).map_err(|_| ConfigError::InvalidGamma { shape, scale })?;
        Ok(Self {
            shape,
            scale,
            dist,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }
}

impl DemandSampler for GammaDemand {
    fn sample(&mut self) -> f64 {
        self.dist.sample(&mut self.rng)
    }

    fn mean(&self) -> f64 {
        self.shape * self.scale
    }
}

/// Poisson-distributed demand, widened from the discrete draw.
#[derive(Debug, Clone)]
pub struct PoissonDemand {
    mean: f64,
    dist: Poisson<f64>,
    rng: ChaCha8Rng,
}

impl PoissonDemand {
    pub fn new(mean: f64, seed: u64) -> Result<Self, ConfigError> {
        if mean <= 0.0 || !mean.is_finite() {
            return Err(ConfigError::NonPositiveMean(mean));
        }
        let dist = Poisson::new(mean).map_err(|_| ConfigError::NonPositiveMean(mean))?;
        Ok(Self {
            mean,
            dist,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }
}

impl DemandSampler for PoissonDemand {
    fn sample(&mut self) -> f64 {
        self.dist.sample(&mut self.rng)
    }

    fn mean(&self) -> f64 {
        self.mean
    }
}

/// Uniformly distributed demand over the half-open range `[min, max)`.
#[derive(Debug, Clone)]
pub struct UniformDemand {
    min: f64,
    max: f64,
    dist: Uniform<f64>,
    rng: ChaCha8Rng,
}

impl UniformDemand {
    pub fn new(min: f64, max: f64, seed: u64) -> Result<Self, ConfigError> {
        if !(min < max) || min < 0.0 || !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::InvalidUniformBounds { min, max });
        }
        Ok(Self {
            min,
            max,
            dist: Uniform::new(min, max),
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }
}

impl DemandSampler for UniformDemand {
    fn sample(&mut self) -> f64 {
        self.dist.sample(&mut self.rng)
    }

    fn mean(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}
