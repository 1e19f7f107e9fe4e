use super::{genes_mut, schema};
use crate::config::AppConfig;
use crate::gene::GeneLogic;
use genolab_data::{Genome, Parameter, StateKind};
use rand::Rng;

pub fn mutate_with_config<R: Rng>(genome: &mut Genome, config: &AppConfig, rng: &mut R) {
    let rate = config.evolution.mutation_rate;
    let variance = config.evolution.mutation_variance;

    let mut mutated = 0usize;
    for mut gene in genes_mut(genome) {
        if rng.gen::<f32>() < rate {
            gene.mutate_with_rng(variance, rng);
            mutated += 1;
        }
    }

    let structural_rate = config.evolution.structural_rate;
    let mut structural = 0usize;
    for state in &mut genome.states {
        if state.kind == StateKind::Resting || rng.gen::<f32>() >= structural_rate {
            continue;
        }

        let unused: Vec<Parameter> = Parameter::ALL
            .iter()
            .copied()
            .filter(|p| !state.thresholds.iter().any(|t| t.parameter == *p))
            .collect();
        let grow = !unused.is_empty() && (state.thresholds.len() <= 1 || rng.gen_bool(0.5));

        if grow {
            let parameter = unused[rng.gen_range(0..unused.len())];
            let mut threshold = schema::threshold_gene(state.kind, parameter);
            threshold.bounds.randomize_with_rng(rng);
            state.thresholds.push(threshold);
            state.thresholds.sort_by_key(|t| t.parameter);
            structural += 1;
        } else if state.thresholds.len() > 1 {
            let idx = rng.gen_range(0..state.thresholds.len());
            state.thresholds.remove(idx);
            structural += 1;
        }
    }

    tracing::debug!(
        genome = %genome.id,
        mutated,
        structural,
        "Mutated genome"
    );
}
