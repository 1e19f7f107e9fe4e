//! Errors raised when building or validating genes and genomes.

use genolab_data::{BodyPart, Parameter, StateKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenomeError {
    #[error("gene {gene} expects {expected} components but got {actual}")]
    DimensionMismatch {
        gene: String,
        expected: usize,
        actual: usize,
    },

    #[error("gene {gene} has an empty or inverted range [{min}, {max}]")]
    InvalidRange { gene: String, min: f32, max: f32 },

    #[error("gene {gene} holds a value outside [0, 1]: {value}")]
    OutOfRange { gene: String, value: f32 },

    #[error("linked gene {gene} member {member} must use CLIP mode")]
    LinkedModeNotClip { gene: String, member: String },

    #[error("linked gene {0} has no members")]
    EmptyLinkedGene(String),

    #[error("linked gene {gene} weights sum to {sum}, expected 1")]
    UnnormalizedWeights { gene: String, sum: f32 },

    #[error("linked gene {gene} weight {index} is {weight}, outside [0, 1]")]
    WeightOutOfRange {
        gene: String,
        index: usize,
        weight: f32,
    },

    #[error("linked gene {gene} member {member} holds {value} but its weight is {weight}")]
    WeightMismatch {
        gene: String,
        member: String,
        weight: f32,
        value: f32,
    },

    #[error("gene {gene} spans [{min}, {max}] but the config expects [{expected_min}, {expected_max}]")]
    RangeMismatch {
        gene: String,
        min: f32,
        max: f32,
        expected_min: f32,
        expected_max: f32,
    },

    #[error("state {0} appears more than once")]
    DuplicateState(StateKind),

    #[error("state {state} has more than one threshold on {parameter}")]
    DuplicateThreshold {
        state: StateKind,
        parameter: Parameter,
    },

    #[error("state {0} must have at least one threshold")]
    EmptyState(StateKind),

    #[error("resting state cannot carry thresholds")]
    RestingThresholds,

    #[error("body part {0} is missing")]
    MissingBodyPart(BodyPart),

    #[error("body part {0} appears more than once")]
    DuplicateBodyPart(BodyPart),

    #[error("genome carries {actual} eye slots, maximum is {max}")]
    TooManyEyes { actual: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, GenomeError>;
