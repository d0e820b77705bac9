//! Drop descriptors produced by breaking blocks and placing items

use quarry_materials::{BlockKind, ItemKind};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use super::effects::Effect;

/// What appears in the world after a block breaks or an item is placed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Drop {
    /// A dropped item entity
    Item(ItemKind),
    /// A block placed straight into a cell
    Block(BlockKind),
    /// An effect applied to the player or UI
    Effect(Effect),
}

impl Drop {
    /// Category name used in logs and errors
    pub fn category(&self) -> &'static str {
        match self {
            Drop::Item(_) => "item",
            Drop::Block(_) => "block",
            Drop::Effect(_) => "effect",
        }
    }
}

impl fmt::Display for Drop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Drop::Item(kind) => write!(f, "item {}", kind),
            Drop::Block(kind) => write!(f, "block {}", kind),
            Drop::Effect(effect) => write!(f, "effect {}", effect),
        }
    }
}

/// Drop sequences are almost always zero to two entries long
pub type Drops = SmallVec<[Drop; 4]>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::StatKind;

    #[test]
    fn test_categories() {
        assert_eq!(Drop::Item(ItemKind::Stick).category(), "item");
        assert_eq!(Drop::Block(BlockKind::Dirt).category(), "block");
        assert_eq!(
            Drop::Effect(Effect::StatDelta(StatKind::Food, 2.0)).category(),
            "effect"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Drop::Item(ItemKind::Apple).to_string(), "item apple");
        assert_eq!(Drop::Block(BlockKind::Ember(1)).to_string(), "block ember(1)");
    }
}
