//! Ambient mobs

use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::simulation::Effect;
use crate::world::WorldRng;

/// Chance per tick that a bird flaps
const FLAP_PROBABILITY: f32 = 0.05;
/// Speed of one flap, in pixels per second
const FLAP_SPEED: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MobKind {
    /// Floats (no gravity) and flaps in a random direction now and then
    Bird,
}

impl std::fmt::Display for MobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MobKind::Bird => write!(f, "bird"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mob {
    pub id: EntityId,
    pub kind: MobKind,
}

impl Mob {
    pub fn new(kind: MobKind) -> Self {
        Mob {
            id: EntityId::new(),
            kind,
        }
    }

    /// Whether the world applies gravity to this mob
    pub fn has_gravity(&self) -> bool {
        match self.kind {
            MobKind::Bird => false,
        }
    }

    /// Velocity change for this tick, if the mob decides to move
    pub fn step(&self, rng: &mut dyn WorldRng) -> Option<(f32, f32)> {
        match self.kind {
            MobKind::Bird => {
                if !rng.check_probability(FLAP_PROBABILITY) {
                    return None;
                }
                let dx = rng.gen_jitter(FLAP_SPEED);
                let dy = rng.gen_jitter(FLAP_SPEED);
                Some((dx, dy))
            }
        }
    }

    /// Mobs have nothing to offer when used
    pub fn use_mob(&self) -> Option<Effect> {
        None
    }
}
