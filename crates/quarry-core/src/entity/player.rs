use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::health::{Food, Health};
use super::EntityId;

/// The player entity
/// Position and velocity live on the physics body; the world owns those
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub health: Health,
    pub food: Food,
}

impl Player {
    /// Create a new player with full health and food
    pub fn new(max_health: f32, max_food: f32) -> Self {
        Player {
            id: EntityId::new(),
            health: Health::new(max_health),
            food: Food::new(max_food),
        }
    }

    pub fn change_health(&mut self, delta: f32) {
        self.health.change(delta);
    }

    pub fn change_food(&mut self, delta: f32) {
        self.food.change(delta);
    }

    /// The cost of breaking a block: food first, health once food runs out
    pub fn pay_mining_cost(&mut self, cost: f32) {
        if self.food.has_food() {
            self.change_food(-cost);
        } else if !self.health.is_dead() {
            self.change_health(-cost);
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// One-line summary for logs
    pub fn status_line(&self) -> String {
        format!(
            "health {:.1}/{:.1}, food {:.1}/{:.1}",
            self.health.current, self.health.max, self.food.current, self.food.max
        )
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(20.0, 20.0)
    }
}

/// Player stats an effect is allowed to touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Food,
    Health,
}

/// Mutator for one stat
pub type StatMutator = fn(&mut Player, f32);

impl StatKind {
    pub const ALL: [StatKind; 2] = [StatKind::Food, StatKind::Health];

    pub fn name(&self) -> &'static str {
        match self {
            StatKind::Food => "food",
            StatKind::Health => "health",
        }
    }

    /// Mutator for this stat
    pub fn mutator(&self) -> StatMutator {
        match self {
            StatKind::Food => Player::change_food,
            StatKind::Health => Player::change_health,
        }
    }

    /// Apply a signed change to this stat (clamped to 0..=max)
    pub fn apply(&self, player: &mut Player, amount: f32) {
        (self.mutator())(player, amount);
    }

    /// Current value of this stat
    pub fn read(&self, player: &Player) -> f32 {
        match self {
            StatKind::Food => player.food.current,
            StatKind::Health => player.health.current,
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown stat '{}'", s))
    }
}
