//! Expression of a genome into body stats, eyes and running costs.

use crate::config::AppConfig;
use genolab_data::{BehaviourTrait, BodyStat, Genome};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One expressed eye.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Eye {
    pub strength: f32,
    pub fov_degrees: f32,
    pub range: f32,
}

/// Observable properties of an organism, derived from its genome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phenotype {
    pub traits: BTreeMap<BehaviourTrait, f32>,
    pub stats: BTreeMap<BodyStat, f32>,
    pub eyes: Vec<Eye>,
    pub eye_colour: [u8; 3],
    pub speed: f32,
    pub turn_interval: f32,
    pub energy_cost_per_second: f64,
}

impl Phenotype {
    #[must_use]
    pub fn stat(&self, stat: BodyStat) -> f32 {
        self.stats.get(&stat).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn trait_value(&self, kind: BehaviourTrait) -> f32 {
        self.traits.get(&kind).copied().unwrap_or(0.5)
    }
}

/// Expresses `genome` under `config`.
#[must_use]
pub fn express(genome: &Genome, config: &AppConfig) -> Phenotype {
    let g = &config.genome;
    let m = &config.metabolism;

    let mut stats: BTreeMap<BodyStat, f32> =
        BodyStat::ALL.iter().map(|&s| (s, g.base_stat)).collect();
    let mut strength_total = 0.0f64;
    let mut discounted_total = 0.0f64;

    for part in &genome.body {
        let strength = part.strength.expressed().max(0.0);
        let discount = part.discount.expressed().clamp(0.0, 1.0);
        strength_total += f64::from(strength);
        discounted_total += f64::from(strength * discount);

        for (&(stat, sign), &weight) in part.part.effects().iter().zip(&part.weights.weights) {
            let mut delta = strength * part.weights.strength * weight * sign;
            if delta < 0.0 {
                delta *= 1.0 - discount;
            }
            if let Some(value) = stats.get_mut(&stat) {
                *value += delta;
            }
        }
    }
    for value in stats.values_mut() {
        *value = value.max(0.0);
    }

    let features = &genome.features;
    let eye_count = (features.eye_count.expressed().round().max(0.0) as usize)
        .min(g.max_eyes)
        .min(features.eyes.len());
    let eyes: Vec<Eye> = features.eyes[..eye_count]
        .iter()
        .map(|eye| {
            let strength = eye.strength.expressed().max(0.0);
            let w_fov = eye.lens.weights.first().copied().unwrap_or(0.5);
            let w_range = eye.lens.weights.get(1).copied().unwrap_or(0.5);
            Eye {
                strength,
                fov_degrees: (strength * w_fov * g.fov_per_unit).min(360.0),
                range: strength * w_range * g.range_per_unit,
            }
        })
        .collect();
    strength_total += eyes.iter().map(|e| f64::from(e.strength)).sum::<f64>();

    let colour = features.eye_colour.expressed_vec();
    let channel = |i: usize| colour.get(i).copied().unwrap_or(0.0).round().clamp(0.0, 255.0) as u8;

    Phenotype {
        traits: BehaviourTrait::ALL
            .iter()
            .map(|&k| {
                let v = genome
                    .trait_gene(k)
                    .map(|t| t.expressed().clamp(0.0, 1.0))
                    .unwrap_or(0.5);
                (k, v)
            })
            .collect(),
        stats,
        eyes,
        eye_colour: [channel(0), channel(1), channel(2)],
        speed: genome.movement.speed.expressed(),
        turn_interval: genome.movement.turn_interval.expressed(),
        energy_cost_per_second: m.cost_per_unit * strength_total
            + m.discount_cost * discounted_total,
    }
}
