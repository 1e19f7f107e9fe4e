//! An expressed genome with an energy budget.

use crate::config::AppConfig;
use crate::genome::GenomeLogic;
use crate::phenotype::{express, Phenotype};
use crate::state::{select_state, Parameters};
use genolab_data::{BehaviourTrait, Genome, StateKind};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organism {
    pub id: Uuid,
    pub genome: Genome,
    pub phenotype: Phenotype,
    pub energy: f64,
    pub max_energy: f64,
    /// Seconds lived.
    pub age: f64,
}

impl Organism {
    #[must_use]
    pub fn new(genome: Genome, config: &AppConfig) -> Self {
        let phenotype = express(&genome, config);
        let max_energy = config.metabolism.max_energy;
        Self {
            id: genome.id,
            genome,
            phenotype,
            energy: max_energy * config.metabolism.birth_energy_fraction,
            max_energy,
            age: 0.0,
        }
    }

    /// Crossover of both parents' genomes followed by mutation.
    pub fn from_parents<R: Rng>(
        parent_a: &Organism,
        parent_b: &Organism,
        config: &AppConfig,
        rng: &mut R,
    ) -> Self {
        let mut genome = parent_a
            .genome
            .crossover_with_rng(&parent_b.genome, config, rng);
        genome.mutate_with_config(config, rng);
        Self::new(genome, config)
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.energy > 0.0
    }

    /// Pays the running cost of the organism's features for `dt` seconds.
    /// Returns whether it is still alive.
    pub fn upkeep(&mut self, dt: f64) -> bool {
        self.energy -= self.phenotype.energy_cost_per_second * dt;
        self.age += dt;
        if !self.is_alive() {
            tracing::debug!(organism = %self.id, age = self.age, "Organism starved");
        }
        self.is_alive()
    }

    /// Eats plant and animal matter; diet decides how much of each is
    /// digested. Returns the energy gained.
    pub fn eat(&mut self, plant: f64, meat: f64) -> f64 {
        let diet = f64::from(self.phenotype.trait_value(BehaviourTrait::Diet));
        let gain = (1.0 - diet) * plant.max(0.0) + diet * meat.max(0.0);
        let before = self.energy;
        self.energy = (self.energy + gain).min(self.max_energy);
        self.energy - before
    }

    /// Genetic similarity in `[0, 1]`.
    #[must_use]
    pub fn similarity(&self, other: &Organism) -> f32 {
        self.genome.similarity(&other.genome)
    }

    /// Whether `other` is similar enough to count as a friend.
    #[must_use]
    pub fn is_friend(&self, other: &Organism) -> bool {
        self.similarity(other) >= self.phenotype.trait_value(BehaviourTrait::Friendliness)
    }

    #[must_use]
    pub fn current_state(&self, params: &Parameters) -> StateKind {
        select_state(&self.genome, params)
    }

    /// Flattened normalized genome.
    #[must_use]
    pub fn genome_vector(&self) -> Vec<f32> {
        self.genome.genome_vector()
    }
}
