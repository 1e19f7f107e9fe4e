use super::{blend_components, gaussian, mean_abs_diff, CrossoverMode, GeneLogic};
use crate::error::{GenomeError, Result};
use genolab_data::{ClampMode, LinkedGene, SingleGene};
use rand::Rng;

pub const MINIMUM_WEIGHT: f32 = 0.001;
pub const MAXIMUM_WEIGHT: f32 = 0.999;
/// Allowed drift between the weight sum and one, and between a weight and
/// its member's value.
const WEIGHT_TOLERANCE: f32 = 1e-3;

/// Builds a linked gene with equal weights over `genes`.
///
/// All members must use [`ClampMode::Clip`].
pub fn link<S: Into<String>>(name: S, genes: Vec<SingleGene>) -> Result<LinkedGene> {
    let name = name.into();
    if genes.is_empty() {
        return Err(GenomeError::EmptyLinkedGene(name));
    }
    if let Some(g) = genes.iter().find(|g| g.mode != ClampMode::Clip) {
        return Err(GenomeError::LinkedModeNotClip {
            gene: name,
            member: g.name.clone(),
        });
    }
    let mut linked = LinkedGene {
        name,
        strength: 1.0,
        weights: vec![1.0; genes.len()],
        genes,
    };
    normalize(&mut linked);
    Ok(linked)
}

/// Clips every weight to `[MINIMUM_WEIGHT, MAXIMUM_WEIGHT]`, rescales them to
/// sum to one and pushes the result into the member genes.
pub fn normalize(linked: &mut LinkedGene) {
    for w in &mut linked.weights {
        *w = if w.is_finite() {
            w.clamp(MINIMUM_WEIGHT, MAXIMUM_WEIGHT)
        } else {
            MINIMUM_WEIGHT
        };
    }
    let sum: f32 = linked.weights.iter().sum();
    if sum > 0.0 {
        for w in &mut linked.weights {
            *w /= sum;
        }
    }
    update_genes(linked);
}

fn update_genes(linked: &mut LinkedGene) {
    for (gene, &w) in linked.genes.iter_mut().zip(&linked.weights) {
        gene.value.fill(w.clamp(0.0, 1.0));
    }
}

impl GeneLogic for LinkedGene {
    fn randomize_with_rng<R: Rng>(&mut self, rng: &mut R) {
        for w in &mut self.weights {
            *w = rng.gen();
        }
        normalize(self);
    }

    fn mutate_with_rng<R: Rng>(&mut self, variance: f32, rng: &mut R) {
        for w in &mut self.weights {
            *w += gaussian(variance, rng);
        }
        normalize(self);
    }

    fn set_value(&mut self, values: &[f32]) -> Result<()> {
        if values.len() != self.weights.len() {
            return Err(GenomeError::DimensionMismatch {
                gene: self.name.clone(),
                expected: self.weights.len(),
                actual: values.len(),
            });
        }
        self.weights.copy_from_slice(values);
        normalize(self);
        Ok(())
    }

    fn flatten(&self) -> Vec<f32> {
        self.weights.clone()
    }

    fn blend_with_rng<R: Rng>(&self, other: &Self, mode: CrossoverMode, rng: &mut R) -> Self {
        let mut child = self.clone();
        if self.weights.len() != other.weights.len() {
            return child;
        }
        child.weights = blend_components(&self.weights, &other.weights, mode, rng);
        child.strength = (self.strength + other.strength) * 0.5;
        normalize(&mut child);
        child
    }

    fn distance(&self, other: &Self) -> f32 {
        mean_abs_diff(&self.weights, &other.weights)
    }

    fn validate(&self) -> Result<()> {
        if self.genes.is_empty() {
            return Err(GenomeError::EmptyLinkedGene(self.name.clone()));
        }
        if self.weights.len() != self.genes.len() {
            return Err(GenomeError::DimensionMismatch {
                gene: self.name.clone(),
                expected: self.genes.len(),
                actual: self.weights.len(),
            });
        }
        for gene in &self.genes {
            if gene.mode != ClampMode::Clip {
                return Err(GenomeError::LinkedModeNotClip {
                    gene: self.name.clone(),
                    member: gene.name.clone(),
                });
            }
            gene.validate()?;
        }
        for (index, &weight) in self.weights.iter().enumerate() {
            if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                return Err(GenomeError::WeightOutOfRange {
                    gene: self.name.clone(),
                    index,
                    weight,
                });
            }
        }
        let sum: f32 = self.weights.iter().sum();
        if !sum.is_finite() || (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(GenomeError::UnnormalizedWeights {
                gene: self.name.clone(),
                sum,
            });
        }
        for (gene, &weight) in self.genes.iter().zip(&self.weights) {
            let drifted = gene
                .value
                .iter()
                .find(|&&v| (v - weight).abs() > WEIGHT_TOLERANCE);
            if let Some(&value) = drifted {
                return Err(GenomeError::WeightMismatch {
                    gene: self.name.clone(),
                    member: gene.name.clone(),
                    weight,
                    value,
                });
            }
        }
        Ok(())
    }
}
