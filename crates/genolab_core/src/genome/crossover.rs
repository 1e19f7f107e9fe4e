use crate::config::AppConfig;
use crate::gene::{CrossoverMode, GeneLogic};
use genolab_data::{
    BodyPartGene, EyeGene, FeatureGenes, Genome, MovementGenes, StateGene, StateKind,
    StimulusGene, ThresholdGene, TraitGene,
};
use rand::Rng;

/// Pairs items of `a` and `b` by key. Shared items are combined, items found
/// in one parent only go through `disjoint`, which may drop them.
fn merge_by_key<T, K, R, C, D>(
    a: &[T],
    b: &[T],
    key: impl Fn(&T) -> K,
    rng: &mut R,
    mut combine: C,
    mut disjoint: D,
) -> Vec<T>
where
    T: Clone,
    K: PartialEq,
    R: Rng,
    C: FnMut(&T, &T, &mut R) -> T,
    D: FnMut(&T, &mut R) -> Option<T>,
{
    let mut out = Vec::with_capacity(a.len().max(b.len()));
    for x in a {
        match b.iter().find(|y| key(y) == key(x)) {
            Some(y) => out.push(combine(x, y, rng)),
            None => out.extend(disjoint(x, rng)),
        }
    }
    for y in b {
        if !a.iter().any(|x| key(x) == key(y)) {
            out.extend(disjoint(y, rng));
        }
    }
    out
}

fn cross_traits<R: Rng>(
    a: &[TraitGene],
    b: &[TraitGene],
    mode: CrossoverMode,
    rng: &mut R,
) -> Vec<TraitGene> {
    merge_by_key(
        a,
        b,
        |t| t.kind,
        rng,
        |x, y, rng| TraitGene {
            kind: x.kind,
            gene: x.gene.blend_with_rng(&y.gene, mode, rng),
        },
        |x, _| Some(x.clone()),
    )
}

fn cross_states<R: Rng>(
    a: &[StateGene],
    b: &[StateGene],
    mode: CrossoverMode,
    rng: &mut R,
) -> Vec<StateGene> {
    let mut states = merge_by_key(
        a,
        b,
        |s| s.kind,
        rng,
        |x, y, rng| {
            let mut thresholds = merge_by_key(
                &x.thresholds,
                &y.thresholds,
                |t| t.parameter,
                rng,
                |tx, ty, rng| ThresholdGene {
                    parameter: tx.parameter,
                    bounds: tx.bounds.blend_with_rng(&ty.bounds, mode, rng),
                },
                |t, rng| rng.gen_bool(0.5).then(|| t.clone()),
            );
            if thresholds.is_empty() && x.kind != StateKind::Resting {
                thresholds = if rng.gen_bool(0.5) {
                    x.thresholds.clone()
                } else {
                    y.thresholds.clone()
                };
            }
            thresholds.sort_by_key(|t| t.parameter);
            StateGene {
                kind: x.kind,
                thresholds,
            }
        },
        |s, _| Some(s.clone()),
    );
    states.sort_by_key(|s| s.kind);
    states
}

fn cross_movement<R: Rng>(
    a: &MovementGenes,
    b: &MovementGenes,
    mode: CrossoverMode,
    rng: &mut R,
) -> MovementGenes {
    MovementGenes {
        speed: a.speed.blend_with_rng(&b.speed, mode, rng),
        turn_interval: a.turn_interval.blend_with_rng(&b.turn_interval, mode, rng),
        stimuli: merge_by_key(
            &a.stimuli,
            &b.stimuli,
            |s| s.stimulus,
            rng,
            |x, y, rng| StimulusGene {
                stimulus: x.stimulus,
                weight: x.weight.blend_with_rng(&y.weight, mode, rng),
                offset: x.offset.blend_with_rng(&y.offset, mode, rng),
            },
            |s, _| Some(s.clone()),
        ),
    }
}

fn cross_body<R: Rng>(
    a: &[BodyPartGene],
    b: &[BodyPartGene],
    mode: CrossoverMode,
    rng: &mut R,
) -> Vec<BodyPartGene> {
    merge_by_key(
        a,
        b,
        |p| p.part,
        rng,
        |x, y, rng| BodyPartGene {
            part: x.part,
            strength: x.strength.blend_with_rng(&y.strength, mode, rng),
            discount: x.discount.blend_with_rng(&y.discount, mode, rng),
            weights: x.weights.blend_with_rng(&y.weights, mode, rng),
        },
        |p, _| Some(p.clone()),
    )
}

fn cross_features<R: Rng>(
    a: &FeatureGenes,
    b: &FeatureGenes,
    mode: CrossoverMode,
    rng: &mut R,
) -> FeatureGenes {
    let slots = a.eyes.len().max(b.eyes.len());
    let eyes = (0..slots)
        .filter_map(|i| match (a.eyes.get(i), b.eyes.get(i)) {
            (Some(x), Some(y)) => Some(EyeGene {
                strength: x.strength.blend_with_rng(&y.strength, mode, rng),
                lens: x.lens.blend_with_rng(&y.lens, mode, rng),
            }),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        })
        .collect();
    FeatureGenes {
        eye_count: a.eye_count.blend_with_rng(&b.eye_count, mode, rng),
        eye_colour: a.eye_colour.blend_with_rng(&b.eye_colour, mode, rng),
        eyes,
    }
}

pub fn genome_crossover_with_rng<R: Rng>(
    genome: &Genome,
    other: &Genome,
    config: &AppConfig,
    rng: &mut R,
) -> Genome {
    let mode = config.evolution.crossover;

    let child = Genome {
        id: uuid::Uuid::from_u128(rng.gen::<u128>()),
        lineage_id: if rng.gen_bool(0.5) {
            genome.lineage_id
        } else {
            other.lineage_id
        },
        generation: genome.generation.max(other.generation) + 1,
        parents: vec![genome.id, other.id],
        behaviour: cross_traits(&genome.behaviour, &other.behaviour, mode, rng),
        states: cross_states(&genome.states, &other.states, mode, rng),
        movement: cross_movement(&genome.movement, &other.movement, mode, rng),
        body: cross_body(&genome.body, &other.body, mode, rng),
        features: cross_features(&genome.features, &other.features, mode, rng),
    };

    tracing::debug!(
        child = %child.id,
        parent_a = %genome.id,
        parent_b = %other.id,
        generation = child.generation,
        ?mode,
        "Bred genome"
    );
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EvolutionConfig, GenomeConfig};
    use crate::genome::{schema, GenomeLogic};
    use genolab_data::Parameter;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn random(seed: u64) -> Genome {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Genome::new_random_with_rng(&GenomeConfig::default(), &mut rng).unwrap()
    }

    fn config(mode: CrossoverMode) -> AppConfig {
        AppConfig {
            evolution: EvolutionConfig {
                crossover: mode,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_child_records_parents() {
        let a = random(1);
        let b = random(2);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let child = a.crossover_with_rng(&b, &config(CrossoverMode::Average), &mut rng);
        assert_eq!(child.parents, vec![a.id, b.id]);
        assert_eq!(child.generation, 1);
        assert!(child.lineage_id == a.lineage_id || child.lineage_id == b.lineage_id);
        assert_ne!(child.id, a.id);
    }

    #[test]
    fn test_children_are_valid_in_every_mode() {
        let a = random(10);
        let b = random(20);
        let mut rng = ChaCha8Rng::seed_from_u64(30);
        for mode in [
            CrossoverMode::Average,
            CrossoverMode::Uniform,
            CrossoverMode::Blend,
        ] {
            let child = a.crossover_with_rng(&b, &config(mode), &mut rng);
            child.validate(&GenomeConfig::default()).unwrap();
        }
    }

    #[test]
    fn test_average_lies_between_parents() {
        let a = random(4);
        let b = random(5);
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let child = a.crossover_with_rng(&b, &config(CrossoverMode::Average), &mut rng);
        let (ga, gb, gc) = (&a.movement.speed, &b.movement.speed, &child.movement.speed);
        let lo = ga.value[0].min(gb.value[0]);
        let hi = ga.value[0].max(gb.value[0]);
        assert!(gc.value[0] >= lo - 1e-6 && gc.value[0] <= hi + 1e-6);
    }

    #[test]
    fn test_child_is_closer_to_parents_than_they_are_to_each_other() {
        let a = random(7);
        let b = random(8);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let child = a.crossover_with_rng(&b, &config(CrossoverMode::Average), &mut rng);
        assert!(child.similarity(&a) > a.similarity(&b));
        assert!(child.similarity(&b) > a.similarity(&b));
    }

    #[test]
    fn test_disjoint_states_never_leave_a_state_empty() {
        let mut a = random(11);
        let mut b = random(12);
        // Give the parents disjoint thresholds on the danger state
        a.states[0].thresholds =
            vec![schema::threshold_gene(StateKind::Danger, Parameter::Energy)];
        b.states[0].thresholds =
            vec![schema::threshold_gene(StateKind::Danger, Parameter::Thirst)];
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let child = a.crossover_with_rng(&b, &config(CrossoverMode::Uniform), &mut rng);
            let danger = child.state(StateKind::Danger).unwrap();
            assert!(!danger.thresholds.is_empty());
            child.validate(&GenomeConfig::default()).unwrap();
        }
    }

    #[test]
    fn test_missing_eye_slots_are_inherited() {
        let a = random(13);
        let mut b = random(14);
        b.features.eyes.truncate(1);
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let child = a.crossover_with_rng(&b, &config(CrossoverMode::Average), &mut rng);
        assert_eq!(child.features.eyes.len(), a.features.eyes.len());
        assert_eq!(child.features.eyes[3], a.features.eyes[3]);
    }
}
