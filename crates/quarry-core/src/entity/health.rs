use serde::{Deserialize, Serialize};

/// Health component for the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    /// Create a new health component at full health
    pub fn new(max: f32) -> Self {
        Health { current: max, max }
    }

    /// Apply a signed change, clamped to 0..=max
    pub fn change(&mut self, delta: f32) {
        self.set(self.current + delta);
    }

    /// Deal damage to this entity
    /// Returns true if the entity died (health <= 0)
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.change(-amount);
        self.is_dead()
    }

    /// Check if the entity is dead
    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Check if the entity is at full health
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Get health as a percentage (0.0 - 1.0)
    pub fn percentage(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }

    /// Set current health (clamped to 0..=max)
    pub fn set(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max);
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(20.0)
    }
}

/// Food component for the player
/// Mining draws from food first; once it is empty the cost comes out of health
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub current: f32,
    pub max: f32,
}

impl Food {
    /// Create a new food component, fully fed
    pub fn new(max: f32) -> Self {
        Food { current: max, max }
    }

    /// Apply a signed change, clamped to 0..=max
    pub fn change(&mut self, delta: f32) {
        self.set(self.current + delta);
    }

    /// Check if there is any food left to draw from
    pub fn has_food(&self) -> bool {
        self.current > 0.0
    }

    /// Check if the player is fully fed
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Get food as a percentage (0.0 - 1.0)
    pub fn percentage(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }

    /// Set current food (clamped to 0..=max)
    pub fn set(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max);
    }
}

impl Default for Food {
    fn default() -> Self {
        Self::new(20.0)
    }
}
