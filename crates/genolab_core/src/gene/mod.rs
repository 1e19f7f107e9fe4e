//! Gene-level operators.
//!
//! Every gene stores normalized components in `[0, 1]`. Operators act on the
//! normalized form only; scaling into a gene's real range happens when the
//! genome is expressed.

pub mod linked;
pub mod noise;
pub mod single;

pub use genolab_data::{ClampMode, LinkedGene, SingleGene};
pub use linked::{link, MAXIMUM_WEIGHT, MINIMUM_WEIGHT};
pub use noise::gaussian;
pub use single::fold;

use crate::error::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How two homologous genes are combined during crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CrossoverMode {
    /// Component-wise mean of both parents.
    #[default]
    Average,
    /// The whole gene comes from one parent, chosen at random.
    Uniform,
    /// Each component is a random interpolation between the parents.
    Blend,
}

/// Operations shared by single and linked genes.
pub trait GeneLogic: Sized {
    fn randomize_with_rng<R: Rng>(&mut self, rng: &mut R);

    fn randomize(&mut self) {
        let mut rng = rand::thread_rng();
        self.randomize_with_rng(&mut rng)
    }

    /// Adds Gaussian noise with standard deviation `variance` to every
    /// component, then folds the result back into range.
    fn mutate_with_rng<R: Rng>(&mut self, variance: f32, rng: &mut R);

    /// Replaces the normalized components. The length must match.
    fn set_value(&mut self, values: &[f32]) -> Result<()>;

    fn flatten(&self) -> Vec<f32>;

    #[must_use]
    fn blend_with_rng<R: Rng>(&self, other: &Self, mode: CrossoverMode, rng: &mut R) -> Self;

    /// Mean absolute difference between normalized components.
    fn distance(&self, other: &Self) -> f32;

    fn validate(&self) -> Result<()>;
}

/// Combines two component vectors of equal length.
pub(crate) fn blend_components<R: Rng>(
    a: &[f32],
    b: &[f32],
    mode: CrossoverMode,
    rng: &mut R,
) -> Vec<f32> {
    match mode {
        CrossoverMode::Average => a.iter().zip(b).map(|(x, y)| (x + y) * 0.5).collect(),
        CrossoverMode::Uniform => {
            if rng.gen_bool(0.5) {
                a.to_vec()
            } else {
                b.to_vec()
            }
        }
        CrossoverMode::Blend => a
            .iter()
            .zip(b)
            .map(|(x, y)| {
                let t: f32 = rng.gen();
                x * t + y * (1.0 - t)
            })
            .collect(),
    }
}

pub(crate) fn mean_abs_diff(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 1.0;
    }
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum::<f32>() / a.len() as f32
}
