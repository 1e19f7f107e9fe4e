use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};

/// How a gene folds values that leave the normalized `[0, 1]` range.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[archive(check_bytes)]
pub enum ClampMode {
    /// Saturate at the nearest bound.
    #[default]
    Clip,
    /// Re-enter from the opposite bound.
    Wrap,
    /// Reflect off the bound.
    Bounce,
}

/// A named gene with one or more normalized components.
///
/// Components are always stored in `[0, 1]` and scaled into
/// `[min_value, max_value]` on expression, so a gene lost during crossover
/// can always be rebuilt from any valid normalized value.
#[derive(
    Clone, Debug, Serialize, Deserialize, PartialEq, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct SingleGene {
    /// Gene path, e.g. `body.legs.strength`.
    pub name: String,
    /// Expressed value of a normalized `0.0`.
    pub min_value: f32,
    /// Expressed value of a normalized `1.0`.
    pub max_value: f32,
    /// Out-of-range folding rule.
    pub mode: ClampMode,
    /// Normalized components.
    pub value: Vec<f32>,
}

impl SingleGene {
    /// Creates a gene with `dimension` components, all at `0.0`.
    #[must_use]
    pub fn new<S: Into<String>>(
        name: S,
        min_value: f32,
        max_value: f32,
        dimension: usize,
        mode: ClampMode,
    ) -> Self {
        Self {
            name: name.into(),
            min_value,
            max_value,
            mode,
            value: vec![0.0; dimension.max(1)],
        }
    }

    /// Number of components.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.value.len()
    }

    /// Scales a normalized component into the gene's range.
    #[must_use]
    pub fn scale(&self, normalized: f32) -> f32 {
        self.min_value + normalized * (self.max_value - self.min_value)
    }

    /// Expressed first component.
    #[must_use]
    pub fn expressed(&self) -> f32 {
        self.scale(self.value.first().copied().unwrap_or(0.0))
    }

    /// Expressed components.
    #[must_use]
    pub fn expressed_vec(&self) -> Vec<f32> {
        self.value.iter().map(|&v| self.scale(v)).collect()
    }
}

/// A group of genes whose weights are inversely proportional.
///
/// The weights always sum to one, so raising one member lowers the others.
#[derive(
    Clone, Debug, Serialize, Deserialize, PartialEq, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct LinkedGene {
    /// Gene path, e.g. `body.legs.weights`.
    pub name: String,
    /// Coefficient for the total strength of the group.
    pub strength: f32,
    /// Normalized share of each member.
    pub weights: Vec<f32>,
    /// Member genes, one per weight.
    pub genes: Vec<SingleGene>,
}

impl LinkedGene {
    /// Share of the member called `name`, if any.
    #[must_use]
    pub fn weight_of(&self, name: &str) -> Option<f32> {
        self.genes
            .iter()
            .position(|g| g.name == name)
            .and_then(|i| self.weights.get(i).copied())
    }
}
