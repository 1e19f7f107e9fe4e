//! Core data structures for genolab genomes.
//!
//! Everything here is plain, serializable data. The operators that act on
//! these types (randomization, mutation, crossover, expression) live in
//! `genolab_core`.

pub mod gene;
pub mod genome;

pub use gene::{ClampMode, LinkedGene, SingleGene};
pub use genome::{
    BehaviourTrait, BodyPart, BodyPartGene, BodyStat, EyeGene, FeatureGenes, Genome,
    MovementGenes, Parameter, StateGene, StateKind, Stimulus, StimulusGene, ThresholdGene,
    TraitGene,
};
