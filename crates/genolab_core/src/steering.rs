//! Heading selection from weighted stimuli.

use genolab_data::{Genome, Stimulus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or zero for a (near) zero vector.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON {
            Self::ZERO
        } else {
            Self::new(self.x / len, self.y / len)
        }
    }

    #[must_use]
    pub fn scale(self, k: f32) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Sensed stimuli. Each signal points toward the source and its length is
/// the stimulus intensity. Velocity stimuli carry the velocity itself.
#[derive(Debug, Clone, Default)]
pub struct StimulusField {
    signals: HashMap<Stimulus, Vec2>,
}

impl StimulusField {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, stimulus: Stimulus, signal: Vec2) -> Self {
        self.set(stimulus, signal);
        self
    }

    pub fn set(&mut self, stimulus: Stimulus, signal: Vec2) {
        self.signals.insert(stimulus, signal);
    }

    #[must_use]
    pub fn get(&self, stimulus: Stimulus) -> Option<Vec2> {
        self.signals.get(&stimulus).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Steering {
    /// Unit heading, zero when nothing pulls the organism anywhere.
    pub direction: Vec2,
    pub speed: f32,
}

/// Combines the sensed stimuli into a heading using the genome's weights
/// and offsets.
#[must_use]
pub fn steer(genome: &Genome, field: &StimulusField) -> Steering {
    let mut sum = Vec2::ZERO;
    for gene in &genome.movement.stimuli {
        let Some(signal) = field.get(gene.stimulus) else {
            continue;
        };
        let offset = gene.offset.expressed_vec();
        let bias = Vec2::new(
            offset.first().copied().unwrap_or(0.0),
            offset.get(1).copied().unwrap_or(0.0),
        );
        let pull = signal + bias.scale(signal.length());
        sum = sum + pull.scale(gene.weight.expressed());
    }

    let direction = sum.normalized();
    if direction == Vec2::ZERO {
        return Steering {
            direction,
            speed: 0.0,
        };
    }
    Steering {
        direction,
        speed: genome.movement.speed.expressed(),
    }
}
