//! Command line front end for creating, breeding and inspecting genomes.

use crate::model::config::AppConfig;
use crate::model::genome::{Genome, GenomeLogic};
use crate::model::metrics::Metrics;
use crate::model::persistence::{load_genome, save_genome, save_genomes};
use crate::model::phenotype::{express, Phenotype};
use crate::model::serialization::{from_hex_dna, is_valid_hex_dna, to_hex_dna, to_json_pretty};
use crate::model::state::{active_states, select_state, Parameters};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use genolab_data::StateKind;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    /// Seed for reproducible runs
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create random genomes
    Random {
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Output file; prints hex DNA when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Mutate a genome
    Mutate {
        input: String,
        #[arg(short, long, default_value_t = 1)]
        times: usize,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Cross two genomes and mutate the child
    Breed {
        parent_a: String,
        parent_b: String,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print a genome's phenotype and resting state
    Inspect { input: String },
    /// Print the similarity of two genomes
    Compare { a: String, b: String },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Serialize)]
struct InspectReport {
    id: Uuid,
    lineage_id: Uuid,
    generation: u32,
    parents: Vec<Uuid>,
    phenotype: Phenotype,
    genes: BTreeMap<String, Vec<f32>>,
    state: StateKind,
    active_states: Vec<StateKind>,
}

#[derive(Serialize)]
struct CompareReport {
    a: Uuid,
    b: Uuid,
    distance: f32,
    similarity: f32,
    same_lineage: bool,
}

/// Reads a genome from a file, or from the argument itself when it is hex DNA.
pub fn read_genome(input: &str, config: &AppConfig) -> Result<Genome> {
    let path = Path::new(input);
    if !path.exists() && is_valid_hex_dna(input) {
        let genome: Genome = from_hex_dna(input)?;
        genome.validate(&config.genome)?;
        return Ok(genome);
    }
    load_genome(path, &config.genome).with_context(|| format!("reading genome from {}", input))
}

fn emit(genome: &Genome, out: Option<&Path>) -> Result<String> {
    match out {
        Some(path) => {
            save_genome(genome, path)?;
            Ok(format!("{} -> {}", genome.id, path.display()))
        }
        None => Ok(to_hex_dna(genome)?),
    }
}

/// Runs one command and returns what should be printed.
pub fn run(cli: &Cli, config: &AppConfig, metrics: &Metrics) -> Result<String> {
    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    match &cli.command {
        Command::Random { count, out } => {
            let genomes = (0..*count)
                .map(|_| {
                    metrics.record_created();
                    Genome::new_random_with_rng(&config.genome, &mut rng)
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            match (out, genomes.as_slice()) {
                (Some(path), [single]) => emit(single, Some(path.as_path())),
                (Some(path), many) => {
                    save_genomes(many, path)?;
                    Ok(format!("{} genomes -> {}", many.len(), path.display()))
                }
                (None, many) => Ok(many
                    .iter()
                    .map(to_hex_dna)
                    .collect::<genolab_io::Result<Vec<_>>>()?
                    .join("\n")),
            }
        }
        Command::Mutate { input, times, out } => {
            let mut genome = read_genome(input, config)?;
            for _ in 0..*times {
                genome.mutate_with_config(config, &mut rng);
                metrics.record_mutated();
            }
            emit(&genome, out.as_deref())
        }
        Command::Breed {
            parent_a,
            parent_b,
            out,
        } => {
            let a = read_genome(parent_a, config)?;
            let b = read_genome(parent_b, config)?;
            let mut child = a.crossover_with_rng(&b, config, &mut rng);
            child.mutate_with_config(config, &mut rng);
            metrics.record_bred();
            emit(&child, out.as_deref())
        }
        Command::Inspect { input } => {
            let genome = read_genome(input, config)?;
            let params = Parameters::default().with_derived_comfort();
            let report = InspectReport {
                id: genome.id,
                lineage_id: genome.lineage_id,
                generation: genome.generation,
                parents: genome.parents.clone(),
                phenotype: express(&genome, config),
                genes: genome.flatten(),
                state: select_state(&genome, &params),
                active_states: active_states(&genome, &params),
            };
            Ok(to_json_pretty(&report)?)
        }
        Command::Compare { a, b } => {
            let a = read_genome(a, config)?;
            let b = read_genome(b, config)?;
            let report = CompareReport {
                a: a.id,
                b: b.id,
                distance: a.distance(&b),
                similarity: a.similarity(&b),
                same_lineage: a.lineage_id == b.lineage_id,
            };
            Ok(to_json_pretty(&report)?)
        }
        Command::Config => Ok(format!(
            "# fingerprint: {}\n{}",
            config.fingerprint(),
            toml::to_string_pretty(config)?
        )),
    }
}
