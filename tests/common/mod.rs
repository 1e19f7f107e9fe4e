pub mod macros;

use genolab_lib::model::config::AppConfig;
use genolab_lib::model::genome::{
    BehaviourTrait, BodyPart, Genome, GenomeLogic, Parameter, StateKind, Stimulus,
};
use genolab_lib::model::GeneLogic;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

type GenomeMod = Box<dyn FnOnce(&mut Genome)>;

#[allow(dead_code)]
pub struct GenomeBuilder {
    config: AppConfig,
    seed: u64,
    mods: Vec<GenomeMod>,
}

#[allow(dead_code)]
impl GenomeBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            seed: 42,
            mods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Sets a behaviour trait's normalized value.
    pub fn with_trait(mut self, kind: BehaviourTrait, value: f32) -> Self {
        self.mods.push(Box::new(move |g| {
            if let Some(t) = g.behaviour.iter_mut().find(|t| t.kind == kind) {
                t.gene.set_value(&[value]).expect("trait is one-dimensional");
            }
        }));
        self
    }

    /// Replaces a state's thresholds with `[lo, hi]` windows.
    pub fn with_state(mut self, kind: StateKind, windows: &[(Parameter, f32, f32)]) -> Self {
        let windows = windows.to_vec();
        self.mods.push(Box::new(move |g| {
            let state = g
                .states
                .iter_mut()
                .find(|s| s.kind == kind)
                .expect("every state is present");
            state.thresholds = windows
                .iter()
                .map(|&(parameter, lo, hi)| {
                    let mut th =
                        genolab_lib::model::genome::schema::threshold_gene(kind, parameter);
                    th.bounds.set_value(&[lo, hi]).expect("thresholds are 2-D");
                    th
                })
                .collect();
        }));
        self
    }

    /// Clears the thresholds of every state except Resting, so nothing
    /// triggers unless set up explicitly.
    pub fn with_quiet_states(mut self) -> Self {
        self.mods.push(Box::new(|g| {
            for state in &mut g.states {
                if state.kind != StateKind::Resting {
                    let mut th = genolab_lib::model::genome::schema::threshold_gene(
                        state.kind,
                        Parameter::Energy,
                    );
                    th.bounds.set_value(&[0.0, 0.0]).expect("thresholds are 2-D");
                    state.thresholds = vec![th];
                }
            }
        }));
        self
    }

    /// Sets a body part's normalized strength and discount.
    pub fn with_body_part(mut self, part: BodyPart, strength: f32, discount: f32) -> Self {
        self.mods.push(Box::new(move |g| {
            let gene = g
                .body
                .iter_mut()
                .find(|p| p.part == part)
                .expect("every body part is present");
            gene.strength.set_value(&[strength]).expect("1-D");
            gene.discount.set_value(&[discount]).expect("1-D");
        }));
        self
    }

    /// Sets a body part's stat weights; they are renormalized to sum to one.
    pub fn with_part_weights(mut self, part: BodyPart, weights: &[f32]) -> Self {
        let weights = weights.to_vec();
        self.mods.push(Box::new(move |g| {
            let gene = g
                .body
                .iter_mut()
                .find(|p| p.part == part)
                .expect("every body part is present");
            gene.weights
                .set_value(&weights)
                .expect("one weight per affected stat");
        }));
        self
    }

    /// Zero strength on every body part.
    pub fn with_bare_body(mut self) -> Self {
        self.mods.push(Box::new(|g| {
            for part in &mut g.body {
                part.strength.set_value(&[0.0]).expect("1-D");
            }
        }));
        self
    }

    /// Sets the normalized eye count gene.
    pub fn with_eye_count(mut self, normalized: f32) -> Self {
        self.mods.push(Box::new(move |g| {
            g.features.eye_count.set_value(&[normalized]).expect("1-D");
        }));
        self
    }

    /// Sets a stimulus's normalized weight and offset.
    pub fn with_stimulus(mut self, stimulus: Stimulus, weight: f32, offset: [f32; 2]) -> Self {
        self.mods.push(Box::new(move |g| {
            let gene = g
                .movement
                .stimuli
                .iter_mut()
                .find(|s| s.stimulus == stimulus)
                .expect("every stimulus is present");
            gene.weight.set_value(&[weight]).expect("1-D");
            gene.offset.set_value(&offset).expect("2-D");
        }));
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn build(self) -> Genome {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut genome = Genome::new_random_with_rng(&self.config.genome, &mut rng).unwrap();
        for modifier in self.mods {
            modifier(&mut genome);
        }
        genome
    }

    pub fn build_with_config(self) -> (Genome, AppConfig) {
        let config = self.config.clone();
        (self.build(), config)
    }
}

/// A seeded RNG for test bodies.
#[allow(dead_code)]
pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
