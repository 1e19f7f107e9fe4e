//! Threshold-driven selection of behavioural states.

use genolab_data::{Genome, Parameter, StateGene, StateKind};
use serde::{Deserialize, Serialize};

/// Normalized internal condition of an organism. Every field is in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub energy: f32,
    pub health: f32,
    pub hunger: f32,
    pub thirst: f32,
    /// `0.5` is comfortable, `0.0` freezing, `1.0` overheating.
    pub temperature: f32,
    pub comfort: f32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            energy: 1.0,
            health: 1.0,
            hunger: 0.0,
            thirst: 0.0,
            temperature: 0.5,
            comfort: 1.0,
        }
    }
}

impl Parameters {
    #[must_use]
    pub fn get(&self, parameter: Parameter) -> f32 {
        match parameter {
            Parameter::Energy => self.energy,
            Parameter::Health => self.health,
            Parameter::Hunger => self.hunger,
            Parameter::Thirst => self.thirst,
            Parameter::Temperature => self.temperature,
            Parameter::Comfort => self.comfort,
        }
    }

    /// Recomputes `comfort` from temperature, hunger, thirst and injury.
    #[must_use]
    pub fn with_derived_comfort(mut self) -> Self {
        let heat_stress = ((self.temperature - 0.5).abs() * 2.0).clamp(0.0, 1.0);
        let injury = (1.0 - self.health).clamp(0.0, 1.0);
        let discomfort = (heat_stress + self.hunger + self.thirst + injury) / 4.0;
        self.comfort = (1.0 - discomfort).clamp(0.0, 1.0);
        self
    }
}

/// Whether every threshold of `state` admits `params`. A state without
/// thresholds never triggers.
#[must_use]
pub fn is_triggered(state: &StateGene, params: &Parameters) -> bool {
    !state.thresholds.is_empty()
        && state.thresholds.iter().all(|t| {
            let (min, max) = t.interval();
            let v = params.get(t.parameter);
            v >= min && v <= max
        })
}

/// Triggered states, highest priority first.
#[must_use]
pub fn active_states(genome: &Genome, params: &Parameters) -> Vec<StateKind> {
    let mut active: Vec<StateKind> = genome
        .states
        .iter()
        .filter(|s| is_triggered(s, params))
        .map(|s| s.kind)
        .collect();
    active.sort();
    active
}

/// Highest-priority triggered state, or `Resting` when none triggers.
#[must_use]
pub fn select_state(genome: &Genome, params: &Parameters) -> StateKind {
    active_states(genome, params)
        .into_iter()
        .next()
        .unwrap_or(StateKind::Resting)
}
