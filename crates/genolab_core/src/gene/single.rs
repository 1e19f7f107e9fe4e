use super::{blend_components, gaussian, mean_abs_diff, CrossoverMode, GeneLogic};
use crate::error::{GenomeError, Result};
use genolab_data::{ClampMode, SingleGene};
use rand::Rng;

/// Folds a raw component back into `[0, 1]` according to `mode`.
///
/// Non-finite input collapses to the midpoint. Bounce reflects off both
/// walls with period 2 rather than folding at 0.5, so it keeps the full
/// `[0, 1]` range.
#[must_use]
pub fn fold(value: f32, mode: ClampMode) -> f32 {
    if !value.is_finite() {
        return 0.5;
    }
    match mode {
        ClampMode::Clip => value.clamp(0.0, 1.0),
        ClampMode::Wrap => {
            let wrapped = value.rem_euclid(1.0);
            if wrapped >= 1.0 {
                0.0
            } else {
                wrapped
            }
        }
        ClampMode::Bounce => {
            let phase = value.rem_euclid(2.0);
            if phase > 1.0 {
                (2.0 - phase).max(0.0)
            } else {
                phase
            }
        }
    }
}

fn clamp_all(gene: &mut SingleGene) {
    let mode = gene.mode;
    for v in &mut gene.value {
        *v = fold(*v, mode);
    }
}

impl GeneLogic for SingleGene {
    fn randomize_with_rng<R: Rng>(&mut self, rng: &mut R) {
        for v in &mut self.value {
            *v = rng.gen();
        }
    }

    fn mutate_with_rng<R: Rng>(&mut self, variance: f32, rng: &mut R) {
        for v in &mut self.value {
            *v += gaussian(variance, rng);
        }
        clamp_all(self);
    }

    fn set_value(&mut self, values: &[f32]) -> Result<()> {
        if values.len() != self.dimension() {
            return Err(GenomeError::DimensionMismatch {
                gene: self.name.clone(),
                expected: self.dimension(),
                actual: values.len(),
            });
        }
        self.value.copy_from_slice(values);
        clamp_all(self);
        Ok(())
    }

    fn flatten(&self) -> Vec<f32> {
        self.value.clone()
    }

    fn blend_with_rng<R: Rng>(&self, other: &Self, mode: CrossoverMode, rng: &mut R) -> Self {
        let mut child = self.clone();
        if self.dimension() != other.dimension() {
            return child;
        }
        child.value = blend_components(&self.value, &other.value, mode, rng);
        clamp_all(&mut child);
        child
    }

    fn distance(&self, other: &Self) -> f32 {
        mean_abs_diff(&self.value, &other.value)
    }

    fn validate(&self) -> Result<()> {
        if !(self.min_value.is_finite() && self.max_value.is_finite())
            || self.min_value >= self.max_value
        {
            return Err(GenomeError::InvalidRange {
                gene: self.name.clone(),
                min: self.min_value,
                max: self.max_value,
            });
        }
        if self.value.is_empty() {
            return Err(GenomeError::DimensionMismatch {
                gene: self.name.clone(),
                expected: 1,
                actual: 0,
            });
        }
        if let Some(&bad) = self
            .value
            .iter()
            .find(|v| !v.is_finite() || !(0.0..=1.0).contains(*v))
        {
            return Err(GenomeError::OutOfRange {
                gene: self.name.clone(),
                value: bad,
            });
        }
        Ok(())
    }
}
