//! # Genolab Core
//!
//! Operators for genolab genomes: the gene model, random construction,
//! mutation and crossover, and expression into an organism's phenotype.
//!
//! This crate contains:
//! - Normalized single and linked genes with clip/wrap/bounce folding
//! - Genome construction, mutation, crossover and similarity
//! - Phenotype expression (body stats, eyes, energy cost)
//! - Threshold-driven state selection and stimulus steering
//! - Configuration and structured logging
//!
//! ## Example
//!
//! ```
//! use genolab_core::config::AppConfig;
//! use genolab_core::genome::GenomeLogic;
//! use genolab_core::phenotype::express;
//! use genolab_data::Genome;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = AppConfig::default();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let a = Genome::new_random_with_rng(&config.genome, &mut rng).unwrap();
//! let b = Genome::new_random_with_rng(&config.genome, &mut rng).unwrap();
//!
//! let mut child = a.crossover_with_rng(&b, &config, &mut rng);
//! child.mutate_with_config(&config, &mut rng);
//! let phenotype = express(&child, &config);
//! assert!(phenotype.energy_cost_per_second >= 0.0);
//! ```

/// Configuration management for genome shape and breeding
pub mod config;
/// Validation errors for genes and genomes
pub mod error;
/// Single and linked gene operators
pub mod gene;
/// Genome construction, mutation, crossover and comparison
pub mod genome;
/// Operation counters and logging setup
pub mod metrics;
/// Expressed genomes with an energy budget
pub mod organism;
/// Genome expression into stats, eyes and costs
pub mod phenotype;
/// Behavioural state selection from thresholds
pub mod state;
/// Heading selection from weighted stimuli
pub mod steering;

pub use error::GenomeError;
pub use gene::{CrossoverMode, GeneLogic};
pub use genome::GenomeLogic;
pub use metrics::{init_logging, Metrics};
pub use organism::Organism;
pub use phenotype::{express, Phenotype};
