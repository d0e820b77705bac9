//! Tool durability tracking

use quarry_materials::ToolMaterial;
use serde::{Deserialize, Serialize};

/// Remaining uses of a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durability {
    pub current: u32,
    pub max: u32,
}

impl Durability {
    /// Fresh durability for a tool of the given material
    pub fn for_material(material: ToolMaterial) -> Self {
        let max = material.max_durability();
        Self { current: max, max }
    }

    /// Use up one point of durability
    /// Returns true if the tool broke with this use
    pub fn consume(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.current == 0
    }

    pub fn is_broken(&self) -> bool {
        self.current == 0
    }

    /// Get durability as a fraction (0.0 - 1.0)
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }
}
