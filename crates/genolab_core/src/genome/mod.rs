pub mod crossover;
pub mod mutation;
pub mod schema;

pub use genolab_data::{
    BehaviourTrait, BodyPart, BodyPartGene, BodyStat, EyeGene, FeatureGenes, Genome,
    MovementGenes, Parameter, StateGene, StateKind, Stimulus, StimulusGene, ThresholdGene,
    TraitGene,
};
pub use schema::create_genome_random_with_rng;

use crate::config::{AppConfig, GenomeConfig};
use crate::error::{GenomeError, Result};
use crate::gene::{GeneLogic, LinkedGene, SingleGene};
use rand::Rng;
use std::collections::{BTreeMap, HashSet};

/// Shared view of one gene inside a genome.
pub enum GeneRef<'a> {
    Single(&'a SingleGene),
    Linked(&'a LinkedGene),
}

/// Mutable view of one gene inside a genome.
pub enum GeneMut<'a> {
    Single(&'a mut SingleGene),
    Linked(&'a mut LinkedGene),
}

impl GeneRef<'_> {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            GeneRef::Single(g) => &g.name,
            GeneRef::Linked(g) => &g.name,
        }
    }

    #[must_use]
    pub fn flatten(&self) -> Vec<f32> {
        match self {
            GeneRef::Single(g) => g.flatten(),
            GeneRef::Linked(g) => g.flatten(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            GeneRef::Single(g) => g.validate(),
            GeneRef::Linked(g) => g.validate(),
        }
    }
}

impl GeneMut<'_> {
    pub fn mutate_with_rng<R: Rng>(&mut self, variance: f32, rng: &mut R) {
        match self {
            GeneMut::Single(g) => g.mutate_with_rng(variance, rng),
            GeneMut::Linked(g) => g.mutate_with_rng(variance, rng),
        }
    }

    pub fn randomize_with_rng<R: Rng>(&mut self, rng: &mut R) {
        match self {
            GeneMut::Single(g) => g.randomize_with_rng(rng),
            GeneMut::Linked(g) => g.randomize_with_rng(rng),
        }
    }
}

/// Every top-level gene of `genome`. Linked members are reached through
/// their group.
#[must_use]
pub fn genes(genome: &Genome) -> Vec<GeneRef<'_>> {
    let mut out = Vec::new();
    for t in &genome.behaviour {
        out.push(GeneRef::Single(&t.gene));
    }
    for s in &genome.states {
        for th in &s.thresholds {
            out.push(GeneRef::Single(&th.bounds));
        }
    }
    let m = &genome.movement;
    out.push(GeneRef::Single(&m.speed));
    out.push(GeneRef::Single(&m.turn_interval));
    for st in &m.stimuli {
        out.push(GeneRef::Single(&st.weight));
        out.push(GeneRef::Single(&st.offset));
    }
    for b in &genome.body {
        out.push(GeneRef::Single(&b.strength));
        out.push(GeneRef::Single(&b.discount));
        out.push(GeneRef::Linked(&b.weights));
    }
    let f = &genome.features;
    out.push(GeneRef::Single(&f.eye_count));
    out.push(GeneRef::Single(&f.eye_colour));
    for e in &f.eyes {
        out.push(GeneRef::Single(&e.strength));
        out.push(GeneRef::Linked(&e.lens));
    }
    out
}

/// Mutable counterpart of [`genes`].
pub fn genes_mut(genome: &mut Genome) -> Vec<GeneMut<'_>> {
    let mut out = Vec::new();
    for t in &mut genome.behaviour {
        out.push(GeneMut::Single(&mut t.gene));
    }
    for s in &mut genome.states {
        for th in &mut s.thresholds {
            out.push(GeneMut::Single(&mut th.bounds));
        }
    }
    let m = &mut genome.movement;
    out.push(GeneMut::Single(&mut m.speed));
    out.push(GeneMut::Single(&mut m.turn_interval));
    for st in &mut m.stimuli {
        out.push(GeneMut::Single(&mut st.weight));
        out.push(GeneMut::Single(&mut st.offset));
    }
    for b in &mut genome.body {
        out.push(GeneMut::Single(&mut b.strength));
        out.push(GeneMut::Single(&mut b.discount));
        out.push(GeneMut::Linked(&mut b.weights));
    }
    let f = &mut genome.features;
    out.push(GeneMut::Single(&mut f.eye_count));
    out.push(GeneMut::Single(&mut f.eye_colour));
    for e in &mut f.eyes {
        out.push(GeneMut::Single(&mut e.strength));
        out.push(GeneMut::Linked(&mut e.lens));
    }
    out
}

/// Trait defining the genetic interface for genomes.
pub trait GenomeLogic {
    fn new_random(config: &GenomeConfig) -> Result<Self>
    where
        Self: Sized;
    fn new_random_with_rng<R: Rng>(config: &GenomeConfig, rng: &mut R) -> Result<Self>
    where
        Self: Sized;
    fn mutate_with_config<R: Rng>(&mut self, config: &AppConfig, rng: &mut R);
    fn crossover_with_rng<R: Rng>(&self, other: &Genome, config: &AppConfig, rng: &mut R)
        -> Genome;
    fn crossover(&self, other: &Genome, config: &AppConfig) -> Genome;
    fn flatten(&self) -> BTreeMap<String, Vec<f32>>;
    fn genome_vector(&self) -> Vec<f32>;
    fn distance(&self, other: &Genome) -> f32;
    fn similarity(&self, other: &Genome) -> f32;
    fn trait_value(&self, kind: BehaviourTrait) -> f32;
    fn validate(&self, config: &GenomeConfig) -> Result<()>;
}

impl GenomeLogic for Genome {
    fn new_random(config: &GenomeConfig) -> Result<Self> {
        let mut rng = rand::thread_rng();
        Self::new_random_with_rng(config, &mut rng)
    }

    fn new_random_with_rng<R: Rng>(config: &GenomeConfig, rng: &mut R) -> Result<Self> {
        schema::create_genome_random_with_rng(config, rng)
    }

    fn mutate_with_config<R: Rng>(&mut self, config: &AppConfig, rng: &mut R) {
        mutation::mutate_with_config(self, config, rng)
    }

    fn crossover_with_rng<R: Rng>(
        &self,
        other: &Genome,
        config: &AppConfig,
        rng: &mut R,
    ) -> Genome {
        crossover::genome_crossover_with_rng(self, other, config, rng)
    }

    fn crossover(&self, other: &Genome, config: &AppConfig) -> Genome {
        let mut rng = rand::thread_rng();
        self.crossover_with_rng(other, config, &mut rng)
    }

    fn flatten(&self) -> BTreeMap<String, Vec<f32>> {
        genes(self)
            .iter()
            .map(|g| (g.name().to_string(), g.flatten()))
            .collect()
    }

    fn genome_vector(&self) -> Vec<f32> {
        self.flatten().into_values().flatten().collect()
    }

    fn distance(&self, other: &Genome) -> f32 {
        let a = self.flatten();
        let b = other.flatten();
        let mut total = 0.0;
        let mut keys = 0usize;
        for (key, va) in &a {
            keys += 1;
            total += match b.get(key) {
                Some(vb) => crate::gene::mean_abs_diff(va, vb),
                None => 0.5,
            };
        }
        for key in b.keys() {
            if !a.contains_key(key) {
                keys += 1;
                total += 0.5;
            }
        }
        if keys == 0 {
            return 0.0;
        }
        total / keys as f32
    }

    fn similarity(&self, other: &Genome) -> f32 {
        (1.0 - self.distance(other)).clamp(0.0, 1.0)
    }

    fn trait_value(&self, kind: BehaviourTrait) -> f32 {
        self.trait_gene(kind)
            .map(|g| g.expressed().clamp(0.0, 1.0))
            .unwrap_or(0.5)
    }

    fn validate(&self, config: &GenomeConfig) -> Result<()> {
        for gene in genes(self) {
            gene.validate()?;
        }

        let mut seen_states = HashSet::new();
        for state in &self.states {
            if !seen_states.insert(state.kind) {
                return Err(GenomeError::DuplicateState(state.kind));
            }
            if state.kind == StateKind::Resting {
                if !state.thresholds.is_empty() {
                    return Err(GenomeError::RestingThresholds);
                }
                continue;
            }
            if state.thresholds.is_empty() {
                return Err(GenomeError::EmptyState(state.kind));
            }
            let mut seen_params = HashSet::new();
            for th in &state.thresholds {
                if th.bounds.dimension() != 2 {
                    return Err(GenomeError::DimensionMismatch {
                        gene: th.bounds.name.clone(),
                        expected: 2,
                        actual: th.bounds.dimension(),
                    });
                }
                if !seen_params.insert(th.parameter) {
                    return Err(GenomeError::DuplicateThreshold {
                        state: state.kind,
                        parameter: th.parameter,
                    });
                }
            }
        }

        let mut seen_parts = HashSet::new();
        for part in &self.body {
            if !seen_parts.insert(part.part) {
                return Err(GenomeError::DuplicateBodyPart(part.part));
            }
            let expected = part.part.effects().len();
            if part.weights.weights.len() != expected {
                return Err(GenomeError::DimensionMismatch {
                    gene: part.weights.name.clone(),
                    expected,
                    actual: part.weights.weights.len(),
                });
            }
        }
        if let Some(&missing) = BodyPart::ALL.iter().find(|p| !seen_parts.contains(*p)) {
            return Err(GenomeError::MissingBodyPart(missing));
        }

        if self.features.eyes.len() > config.max_eyes {
            return Err(GenomeError::TooManyEyes {
                actual: self.features.eyes.len(),
                max: config.max_eyes,
            });
        }
        for eye in &self.features.eyes {
            if eye.lens.weights.len() != 2 {
                return Err(GenomeError::DimensionMismatch {
                    gene: eye.lens.name.clone(),
                    expected: 2,
                    actual: eye.lens.weights.len(),
                });
            }
        }

        expect_range(&self.movement.speed, config.min_speed, config.max_speed)?;
        expect_range(
            &self.movement.turn_interval,
            config.min_turn_interval,
            config.max_turn_interval,
        )?;
        for part in &self.body {
            expect_range(&part.strength, 0.0, config.max_feature_strength)?;
        }
        for eye in &self.features.eyes {
            expect_range(&eye.strength, 0.0, config.max_feature_strength)?;
        }
        expect_range(&self.features.eye_count, 0.0, config.max_eyes.max(1) as f32)
    }
}

/// Checks that a config-driven gene still spans the range `config` would give it.
fn expect_range(gene: &SingleGene, min: f32, max: f32) -> Result<()> {
    let close = |a: f32, b: f32| (a - b).abs() <= 1e-4 * b.abs().max(1.0);
    if close(gene.min_value, min) && close(gene.max_value, max) {
        return Ok(());
    }
    Err(GenomeError::RangeMismatch {
        gene: gene.name.clone(),
        min: gene.min_value,
        max: gene.max_value,
        expected_min: min,
        expected_max: max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn random(seed: u64) -> Genome {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Genome::new_random_with_rng(&GenomeConfig::default(), &mut rng).unwrap()
    }

    #[test]
    fn test_random_genome_is_valid() {
        let genome = random(42);
        genome.validate(&GenomeConfig::default()).unwrap();
    }

    #[test]
    fn test_random_genome_is_deterministic() {
        assert_eq!(random(7), random(7));
        assert_ne!(random(7).genome_vector(), random(8).genome_vector());
    }

    #[test]
    fn test_flatten_keys_are_unique() {
        let genome = random(1);
        assert_eq!(genome.flatten().len(), genes(&genome).len());
    }

    #[test]
    fn test_self_similarity_is_one() {
        let genome = random(11);
        assert!(genome.distance(&genome).abs() < f32::EPSILON);
        assert!((genome.similarity(&genome) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_similarity_is_symmetric_and_bounded() {
        let a = random(1);
        let b = random(2);
        let ab = a.similarity(&b);
        let ba = b.similarity(&a);
        assert!((ab - ba).abs() < 1e-6);
        assert!((0.0..=1.0).contains(&ab));
        assert!(ab < 1.0);
    }

    #[test]
    fn test_genome_vector_matches_flatten() {
        let genome = random(3);
        let total: usize = genome.flatten().values().map(Vec::len).sum();
        assert_eq!(genome.genome_vector().len(), total);
    }

    #[test]
    fn test_trait_value_in_unit_range() {
        let genome = random(4);
        for &kind in BehaviourTrait::ALL {
            let v = genome.trait_value(kind);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_validate_catches_duplicate_state() {
        let mut genome = random(5);
        let dup = genome.states[0].clone();
        genome.states.push(dup);
        assert!(matches!(
            genome.validate(&GenomeConfig::default()),
            Err(GenomeError::DuplicateState(_))
        ));
    }

    #[test]
    fn test_validate_catches_missing_body_part() {
        let mut genome = random(6);
        genome.body.retain(|b| b.part != BodyPart::Fins);
        assert_eq!(
            genome.validate(&GenomeConfig::default()),
            Err(GenomeError::MissingBodyPart(BodyPart::Fins))
        );
    }

    #[test]
    fn test_validate_catches_out_of_range_value() {
        let mut genome = random(7);
        genome.behaviour[0].gene.value[0] = 1.5;
        assert!(matches!(
            genome.validate(&GenomeConfig::default()),
            Err(GenomeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_catches_too_many_eyes() {
        let genome = random(8);
        let config = GenomeConfig {
            max_eyes: 1,
            ..Default::default()
        };
        assert!(matches!(
            genome.validate(&config),
            Err(GenomeError::TooManyEyes { .. })
        ));
    }

    #[test]
    fn test_validate_catches_widened_gene_range() {
        let mut genome = random(10);
        genome.movement.speed.max_value = 50.0;
        assert_eq!(
            genome.validate(&GenomeConfig::default()),
            Err(GenomeError::RangeMismatch {
                gene: "movement.speed".to_string(),
                min: 0.1,
                max: 50.0,
                expected_min: 0.1,
                expected_max: 5.0,
            })
        );

        let mut genome = random(10);
        genome.body[2].strength.min_value = -10.0;
        assert!(matches!(
            genome.validate(&GenomeConfig::default()),
            Err(GenomeError::RangeMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_checks_ranges_against_active_config() {
        let genome = random(12);
        let faster = GenomeConfig {
            max_speed: 8.0,
            ..Default::default()
        };
        assert!(matches!(
            genome.validate(&faster),
            Err(GenomeError::RangeMismatch { ref gene, .. }) if gene == "movement.speed"
        ));
    }

    #[test]
    fn test_validate_catches_negative_lens_weight() {
        let mut genome = random(13);
        genome.features.eyes[0].lens.weights = vec![1.5, -0.5];
        assert!(matches!(
            genome.validate(&GenomeConfig::default()),
            Err(GenomeError::WeightOutOfRange { .. })
        ));
    }

    #[test]
    fn test_resting_has_no_thresholds() {
        let genome = random(9);
        let resting = genome.state(StateKind::Resting).unwrap();
        assert!(resting.thresholds.is_empty());
    }
}
