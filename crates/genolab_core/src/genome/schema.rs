//! Gene layout of a genome: names, ranges and clamp modes.

use super::genes_mut;
use crate::config::GenomeConfig;
use crate::error::Result;
use crate::gene::linked::link;
use genolab_data::{
    BehaviourTrait, BodyPart, BodyPartGene, ClampMode, EyeGene, FeatureGenes, Genome,
    LinkedGene, MovementGenes, Parameter, SingleGene, StateGene, StateKind, Stimulus,
    StimulusGene, ThresholdGene, TraitGene,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Equal-weight linked gene over CLIP members named `{name}.{member}`.
fn equal_link(prefix: &str, name: &str, members: &[&str]) -> Result<LinkedGene> {
    let genes = members
        .iter()
        .map(|m| SingleGene::new(format!("{prefix}.{m}"), 0.0, 1.0, 1, ClampMode::Clip))
        .collect();
    link(format!("{prefix}.{name}"), genes)
}

#[must_use]
pub fn trait_gene(kind: BehaviourTrait) -> TraitGene {
    TraitGene {
        kind,
        gene: SingleGene::new(
            format!("behaviour.{}", kind.label()),
            0.0,
            1.0,
            1,
            ClampMode::Clip,
        ),
    }
}

#[must_use]
pub fn threshold_gene(state: StateKind, parameter: Parameter) -> ThresholdGene {
    ThresholdGene {
        parameter,
        bounds: SingleGene::new(
            format!("state.{}.{}", state.label(), parameter.label()),
            0.0,
            1.0,
            2,
            ClampMode::Clip,
        ),
    }
}

#[must_use]
pub fn stimulus_gene(stimulus: Stimulus) -> StimulusGene {
    let prefix = format!("movement.{}", stimulus.label());
    StimulusGene {
        stimulus,
        weight: SingleGene::new(format!("{prefix}.weight"), -1.0, 1.0, 1, ClampMode::Clip),
        offset: SingleGene::new(format!("{prefix}.offset"), -1.0, 1.0, 2, ClampMode::Clip),
    }
}

#[must_use]
pub fn movement_genes(config: &GenomeConfig) -> MovementGenes {
    MovementGenes {
        speed: SingleGene::new(
            "movement.speed",
            config.min_speed,
            config.max_speed,
            1,
            ClampMode::Clip,
        ),
        turn_interval: SingleGene::new(
            "movement.turn_interval",
            config.min_turn_interval,
            config.max_turn_interval,
            1,
            ClampMode::Bounce,
        ),
        stimuli: Stimulus::ALL.iter().map(|&s| stimulus_gene(s)).collect(),
    }
}

pub fn body_part_gene(part: BodyPart, config: &GenomeConfig) -> Result<BodyPartGene> {
    let prefix = format!("body.{}", part.label());
    let members: Vec<&str> = part.effects().iter().map(|(s, _)| s.label()).collect();
    Ok(BodyPartGene {
        part,
        strength: SingleGene::new(
            format!("{prefix}.strength"),
            0.0,
            config.max_feature_strength,
            1,
            ClampMode::Clip,
        ),
        discount: SingleGene::new(format!("{prefix}.discount"), 0.0, 1.0, 1, ClampMode::Clip),
        weights: equal_link(&prefix, "weights", &members)?,
    })
}

pub fn eye_gene(slot: usize, config: &GenomeConfig) -> Result<EyeGene> {
    let prefix = format!("eyes.{slot}");
    Ok(EyeGene {
        strength: SingleGene::new(
            format!("{prefix}.strength"),
            0.0,
            config.max_feature_strength,
            1,
            ClampMode::Clip,
        ),
        lens: equal_link(&prefix, "lens", &["fov", "range"])?,
    })
}

pub fn feature_genes(config: &GenomeConfig) -> Result<FeatureGenes> {
    Ok(FeatureGenes {
        eye_count: SingleGene::new(
            "features.eye_count",
            0.0,
            config.max_eyes.max(1) as f32,
            1,
            ClampMode::Clip,
        ),
        eye_colour: SingleGene::new("features.eye_colour", 0.0, 255.0, 3, ClampMode::Wrap),
        eyes: (0..config.max_eyes)
            .map(|i| eye_gene(i, config))
            .collect::<Result<_>>()?,
    })
}

/// Builds the full gene layout and randomizes every gene.
pub fn create_genome_random_with_rng<R: Rng>(
    config: &GenomeConfig,
    rng: &mut R,
) -> Result<Genome> {
    let per_state = config.thresholds_per_state.clamp(1, Parameter::ALL.len());
    let states = StateKind::ALL
        .iter()
        .map(|&kind| {
            let thresholds = if kind == StateKind::Resting {
                Vec::new()
            } else {
                let mut params: Vec<Parameter> = Parameter::ALL
                    .choose_multiple(rng, per_state)
                    .copied()
                    .collect();
                params.sort();
                params.into_iter().map(|p| threshold_gene(kind, p)).collect()
            };
            StateGene { kind, thresholds }
        })
        .collect();

    let id = uuid::Uuid::from_u128(rng.gen::<u128>());
    let mut genome = Genome {
        id,
        lineage_id: id,
        generation: 0,
        parents: Vec::new(),
        behaviour: BehaviourTrait::ALL.iter().map(|&k| trait_gene(k)).collect(),
        states,
        movement: movement_genes(config),
        body: BodyPart::ALL
            .iter()
            .map(|&p| body_part_gene(p, config))
            .collect::<Result<_>>()?,
        features: feature_genes(config)?,
    };

    for mut gene in genes_mut(&mut genome) {
        gene.randomize_with_rng(rng);
    }
    Ok(genome)
}
