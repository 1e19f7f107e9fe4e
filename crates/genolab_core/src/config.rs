//! Configuration management for genome construction and breeding.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impl)
//! 2. `config.toml` file (overrides defaults)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [genome]
//! max_eyes = 4
//! thresholds_per_state = 2
//!
//! [evolution]
//! mutation_rate = 1.0
//! mutation_variance = 0.05
//! crossover = "Blend"
//! ```

use crate::gene::CrossoverMode;
use serde::{Deserialize, Serialize};

/// Shape and expression ranges of generated genomes.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GenomeConfig {
    /// Number of eye slots every genome carries.
    pub max_eyes: usize,
    /// Thresholds given to each non-resting state of a random genome.
    pub thresholds_per_state: usize,
    /// Upper bound of a body part or eye strength gene.
    pub max_feature_strength: f32,
    /// Value every body stat starts from before body parts apply.
    pub base_stat: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Bounds, in seconds, of the direction-change interval.
    pub min_turn_interval: f32,
    pub max_turn_interval: f32,
    /// Degrees of field of view per unit of eye strength.
    pub fov_per_unit: f32,
    /// Sensing distance per unit of eye strength.
    pub range_per_unit: f32,
}

impl Default for GenomeConfig {
    fn default() -> Self {
        Self {
            max_eyes: 4,
            thresholds_per_state: 2,
            max_feature_strength: 10.0,
            base_stat: 1.0,
            min_speed: 0.1,
            max_speed: 5.0,
            min_turn_interval: 0.5,
            max_turn_interval: 10.0,
            fov_per_unit: 36.0,
            range_per_unit: 10.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Probability that a given gene mutates when a genome mutates.
    pub mutation_rate: f32,
    /// Standard deviation of the Gaussian noise added to a mutating gene.
    pub mutation_variance: f32,
    /// Per-state probability of gaining or losing a threshold.
    pub structural_rate: f32,
    pub crossover: CrossoverMode,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 1.0,
            mutation_variance: 0.05,
            structural_rate: 0.02,
            crossover: CrossoverMode::Average,
        }
    }
}

/// Energy bookkeeping for expressed organisms.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MetabolismConfig {
    pub max_energy: f64,
    /// Share of `max_energy` an organism is born with.
    pub birth_energy_fraction: f64,
    /// Energy per second for each unit of feature strength.
    pub cost_per_unit: f64,
    /// Extra energy per second for each unit of discounted strength.
    pub discount_cost: f64,
}

impl Default for MetabolismConfig {
    fn default() -> Self {
        Self {
            max_energy: 100.0,
            birth_energy_fraction: 0.5,
            cost_per_unit: 1.0,
            discount_cost: 0.5,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub genome: GenomeConfig,
    pub evolution: EvolutionConfig,
    pub metabolism: MetabolismConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        let g = &self.genome;
        anyhow::ensure!(g.max_eyes <= 64, "Max eyes too large (max 64)");
        anyhow::ensure!(
            g.thresholds_per_state >= 1,
            "States need at least one threshold"
        );
        anyhow::ensure!(
            g.thresholds_per_state <= genolab_data::Parameter::ALL.len(),
            "More thresholds per state than parameters"
        );
        anyhow::ensure!(
            g.max_feature_strength > 0.0,
            "Max feature strength must be positive"
        );
        anyhow::ensure!(g.base_stat >= 0.0, "Base stat must be non-negative");
        anyhow::ensure!(
            g.min_speed >= 0.0 && g.min_speed < g.max_speed,
            "Speed range must be non-negative and non-empty"
        );
        anyhow::ensure!(
            g.min_turn_interval > 0.0 && g.min_turn_interval < g.max_turn_interval,
            "Turn interval range must be positive and non-empty"
        );
        anyhow::ensure!(g.fov_per_unit > 0.0, "FOV per unit must be positive");
        anyhow::ensure!(g.range_per_unit > 0.0, "Range per unit must be positive");

        let e = &self.evolution;
        anyhow::ensure!(
            (0.0..=1.0).contains(&e.mutation_rate),
            "Mutation rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            e.mutation_variance >= 0.0,
            "Mutation variance must be non-negative"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&e.structural_rate),
            "Structural rate must be in [0.0, 1.0]"
        );

        let m = &self.metabolism;
        anyhow::ensure!(m.max_energy > 0.0, "Max energy must be positive");
        anyhow::ensure!(
            m.birth_energy_fraction > 0.0 && m.birth_energy_fraction <= 1.0,
            "Birth energy fraction must be in (0.0, 1.0]"
        );
        anyhow::ensure!(m.cost_per_unit >= 0.0, "Cost per unit must be non-negative");
        anyhow::ensure!(m.discount_cost >= 0.0, "Discount cost must be non-negative");

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), fingerprint = %config.fingerprint(), "Loaded config");
        Ok(config)
    }

    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.genome).as_bytes());
        hasher.update(format!("{:?}", self.evolution).as_bytes());
        hasher.update(format!("{:?}", self.metabolism).as_bytes());
        hex::encode(hasher.finalize())
    }
}
