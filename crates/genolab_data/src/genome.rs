use crate::gene::{LinkedGene, SingleGene};
use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Serialize,
            Deserialize,
            Archive,
            RkyvSerialize,
            RkyvDeserialize,
        )]
        #[archive(check_bytes)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Snake-case label used in gene paths.
            #[must_use]
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum! {
    /// Scalar behaviour genes. They steer state transitions and carry no
    /// energy cost.
    pub enum BehaviourTrait {
        /// Plant (0.0) versus animal (1.0) share of food energy.
        Diet => "diet",
        /// Awareness of surroundings when not hunting or in danger.
        Attention => "attention",
        /// How quickly boredom sets in.
        Restlessness => "restlessness",
        /// How similar another animal must be to count as a friend.
        Friendliness => "friendliness",
        /// How often the animal sleeps.
        Sleepiness => "sleepiness",
        /// Tendency to fight rather than flee when threatened.
        Courage => "courage",
    }
}

labelled_enum! {
    /// Internal condition values that state thresholds compare against.
    pub enum Parameter {
        Energy => "energy",
        Health => "health",
        Hunger => "hunger",
        Thirst => "thirst",
        Temperature => "temperature",
        Comfort => "comfort",
    }
}

labelled_enum! {
    /// Behavioural states, declared in descending priority.
    pub enum StateKind {
        /// Being attacked.
        Danger => "danger",
        /// Too much damage taken.
        Injured => "injured",
        /// Too cold, tired or hungry to stay active.
        Hibernate => "hibernate",
        /// Too tired.
        Sleeping => "sleeping",
        /// Too hot, cold or wet.
        Uncomfortable => "uncomfortable",
        /// Chasing food, water or prey.
        Hunting => "hunting",
        /// Looking for food, water or prey.
        Searching => "searching",
        /// Hunted or searched too long without success.
        Bored => "bored",
        /// None of the above.
        Resting => "resting",
    }
}

labelled_enum! {
    /// Cues the movement genes weight when choosing a heading.
    pub enum Stimulus {
        Enemy => "enemy",
        Friend => "friend",
        Random => "random",
        Food => "food",
        Water => "water",
        Shelter => "shelter",
        /// The animal's own velocity.
        Momentum => "momentum",
        /// Mean velocity of nearby friends.
        FlockVelocity => "flock_velocity",
    }
}

labelled_enum! {
    /// Body parts that modify stats. Every genome carries all of them.
    pub enum BodyPart {
        Brain => "brain",
        Legs => "legs",
        Tail => "tail",
        Skin => "skin",
        Gills => "gills",
        Fins => "fins",
        Coat => "coat",
    }
}

labelled_enum! {
    /// Derived body stats. These belong to the animal, not the genome.
    pub enum BodyStat {
        InjuryThreshold => "injury_threshold",
        Speed => "speed",
        Defense => "defense",
        Agility => "agility",
        MovementEfficiency => "movement_efficiency",
        Decisiveness => "decisiveness",
        Memory => "memory",
        Perception => "perception",
        ColdResistance => "cold_resistance",
        HeatResistance => "heat_resistance",
        WaterResistance => "water_resistance",
        LandSpeed => "land_speed",
        WaterSpeed => "water_speed",
        AirSpeed => "air_speed",
    }
}

impl BodyPart {
    /// Stats this part modifies and the sign of each effect.
    #[must_use]
    pub fn effects(self) -> &'static [(BodyStat, f32)] {
        use BodyStat::*;
        match self {
            BodyPart::Brain => &[(Memory, 1.0), (Decisiveness, 1.0), (Perception, 1.0)],
            BodyPart::Legs => &[
                (LandSpeed, 1.0),
                (InjuryThreshold, -1.0),
                (MovementEfficiency, 1.0),
            ],
            BodyPart::Tail => &[(Agility, 1.0), (Defense, 1.0), (Speed, -1.0)],
            BodyPart::Skin => &[
                (InjuryThreshold, 1.0),
                (Speed, -1.0),
                (ColdResistance, 1.0),
                (HeatResistance, -1.0),
            ],
            BodyPart::Gills => &[(WaterResistance, 1.0)],
            BodyPart::Fins => &[(WaterResistance, 1.0), (WaterSpeed, 1.0), (LandSpeed, -1.0)],
            BodyPart::Coat => &[(ColdResistance, 1.0), (HeatResistance, 1.0)],
        }
    }
}

/// A behaviour trait and its gene.
#[derive(
    Clone, Debug, Serialize, Deserialize, PartialEq, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct TraitGene {
    pub kind: BehaviourTrait,
    pub gene: SingleGene,
}

/// One `(parameter, min, max)` trigger condition.
///
/// `bounds` has two normalized components; the smaller one is the minimum
/// threshold, so mutation can never produce an inverted interval.
#[derive(
    Clone, Debug, Serialize, Deserialize, PartialEq, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct ThresholdGene {
    pub parameter: Parameter,
    pub bounds: SingleGene,
}

impl ThresholdGene {
    /// Expressed `(min, max)` thresholds.
    #[must_use]
    pub fn interval(&self) -> (f32, f32) {
        let a = self.bounds.scale(self.bounds.value.first().copied().unwrap_or(0.0));
        let b = self.bounds.scale(self.bounds.value.get(1).copied().unwrap_or(1.0));
        (a.min(b), a.max(b))
    }
}

/// Trigger conditions of one behavioural state.
#[derive(
    Clone, Debug, Serialize, Deserialize, PartialEq, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct StateGene {
    pub kind: StateKind,
    pub thresholds: Vec<ThresholdGene>,
}

/// Weight and offset applied to one steering stimulus.
#[derive(
    Clone, Debug, Serialize, Deserialize, PartialEq, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct StimulusGene {
    pub stimulus: Stimulus,
    /// Attraction (positive) or repulsion (negative).
    pub weight: SingleGene,
    /// Two-component bias added to the stimulus direction.
    pub offset: SingleGene,
}

#[derive(
    Clone, Debug, Serialize, Deserialize, PartialEq, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct MovementGenes {
    pub speed: SingleGene,
    /// Seconds between heading changes.
    pub turn_interval: SingleGene,
    pub stimuli: Vec<StimulusGene>,
}

/// Strength, drawback discount and stat distribution of one body part.
#[derive(
    Clone, Debug, Serialize, Deserialize, PartialEq, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct BodyPartGene {
    pub part: BodyPart,
    pub strength: SingleGene,
    /// Fraction of the part's negative effects that is cancelled.
    pub discount: SingleGene,
    /// One member per entry of [`BodyPart::effects`], in the same order.
    pub weights: LinkedGene,
}

/// Strength and lens shape of one eye slot.
#[derive(
    Clone, Debug, Serialize, Deserialize, PartialEq, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct EyeGene {
    pub strength: SingleGene,
    /// Members: field of view, then range.
    pub lens: LinkedGene,
}

#[derive(
    Clone, Debug, Serialize, Deserialize, PartialEq, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct FeatureGenes {
    pub eye_count: SingleGene,
    /// Red, green and blue components.
    pub eye_colour: SingleGene,
    /// Eye slots; only the first `eye_count` are expressed.
    pub eyes: Vec<EyeGene>,
}

/// Complete genetic blueprint of an organism.
#[derive(
    Clone, Debug, Serialize, Deserialize, PartialEq, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct Genome {
    pub id: Uuid,
    pub lineage_id: Uuid,
    pub generation: u32,
    /// Ids of the genomes this one was bred from.
    pub parents: Vec<Uuid>,
    pub behaviour: Vec<TraitGene>,
    pub states: Vec<StateGene>,
    pub movement: MovementGenes,
    pub body: Vec<BodyPartGene>,
    pub features: FeatureGenes,
}

impl Genome {
    #[must_use]
    pub fn trait_gene(&self, kind: BehaviourTrait) -> Option<&SingleGene> {
        self.behaviour.iter().find(|t| t.kind == kind).map(|t| &t.gene)
    }

    #[must_use]
    pub fn state(&self, kind: StateKind) -> Option<&StateGene> {
        self.states.iter().find(|s| s.kind == kind)
    }

    #[must_use]
    pub fn body_part(&self, part: BodyPart) -> Option<&BodyPartGene> {
        self.body.iter().find(|b| b.part == part)
    }

    #[must_use]
    pub fn stimulus(&self, stimulus: Stimulus) -> Option<&StimulusGene> {
        self.movement.stimuli.iter().find(|s| s.stimulus == stimulus)
    }

    /// Serialize genome to hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        hex::encode(bytes)
    }

    /// Deserialize genome from hex string.
    pub fn from_hex(hex_str: &str) -> anyhow::Result<Self> {
        let bytes = hex::decode(hex_str)?;
        let genome = serde_json::from_slice(&bytes)?;
        Ok(genome)
    }
}
