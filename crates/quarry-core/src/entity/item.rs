//! Items: what sits in a slot, in a hand, or on the ground

use bitflags::bitflags;
use quarry_materials::{BlockKind, ItemKind, ToolMaterial, ToolType};
use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use super::player::StatKind;
use super::tools::Durability;
use crate::simulation::{Drop, Drops, Effect};

bitflags! {
    /// What an item is able to do
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ItemCapabilities: u8 {
        /// Can be swung at blocks
        const CAN_ATTACK = 1 << 0;
        /// `place()` yields a drop descriptor
        const PLACEABLE = 1 << 1;
        /// Wears out with use
        const DURABILITY = 1 << 2;
        /// More than one fits in a slot
        const STACKABLE = 1 << 3;
    }
}

/// A concrete item instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    kind: ItemKind,
    durability: Option<Durability>,
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        let durability = kind
            .tool()
            .map(|(_, material)| Durability::for_material(material));
        Self { kind, durability }
    }

    pub fn hands() -> Self {
        Self::new(ItemKind::Hands)
    }

    pub fn tool(tool_type: ToolType, material: ToolMaterial) -> Self {
        Self::new(ItemKind::Tool(tool_type, material))
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn capabilities(&self) -> ItemCapabilities {
        let mut caps = ItemCapabilities::empty();
        match self.kind {
            ItemKind::Hands => caps |= ItemCapabilities::CAN_ATTACK,
            ItemKind::Tool(..) => {
                caps |= ItemCapabilities::DURABILITY;
                if self.durability.is_some_and(|d| !d.is_broken()) {
                    caps |= ItemCapabilities::CAN_ATTACK;
                }
            }
            ItemKind::Dirt | ItemKind::Stone | ItemKind::Wood | ItemKind::CraftingTable => {
                caps |= ItemCapabilities::PLACEABLE | ItemCapabilities::STACKABLE;
            }
            ItemKind::Apple => caps |= ItemCapabilities::PLACEABLE | ItemCapabilities::STACKABLE,
            ItemKind::Stick | ItemKind::Diamond => caps |= ItemCapabilities::STACKABLE,
        }
        caps
    }

    /// Whether this item can be used to strike a block
    pub fn can_attack(&self) -> bool {
        self.capabilities().contains(ItemCapabilities::CAN_ATTACK)
    }

    pub fn is_placeable(&self) -> bool {
        self.capabilities().contains(ItemCapabilities::PLACEABLE)
    }

    /// Tool type and material, if this is a tool
    pub fn tool_key(&self) -> Option<(ToolType, ToolMaterial)> {
        self.kind.tool()
    }

    pub fn durability(&self) -> Option<u32> {
        self.durability.map(|d| d.current)
    }

    pub fn max_durability(&self) -> Option<u32> {
        self.durability.map(|d| d.max)
    }

    /// Attack range in grid cells
    pub fn attack_range(&self) -> f32 {
        self.kind.attack_range()
    }

    /// Called after every swing. A successful swing wears a tool down by one;
    /// an ineffective swing leaves it untouched.
    /// Returns true if the tool broke with this swing
    pub fn attack(&mut self, successful: bool) -> bool {
        if !successful {
            return false;
        }

        match self.durability.as_mut() {
            Some(durability) => {
                let broke = durability.consume();
                if broke {
                    log::info!("[MINING] {} broke!", self.kind);
                }
                broke
            }
            None => false,
        }
    }

    /// What placing this item produces
    pub fn place(&self) -> Drops {
        if let Some(block) = BlockKind::from_item(self.kind) {
            return smallvec![Drop::Block(block)];
        }

        match self.kind.food_strength() {
            Some(strength) => smallvec![Drop::Effect(Effect::StatDelta(StatKind::Food, strength))],
            None => Drops::new(),
        }
    }

    /// Whether two items can share one stack
    pub fn stacks_with(&self, other: &Item) -> bool {
        self.kind == other.kind
            && self.capabilities().contains(ItemCapabilities::STACKABLE)
            && self.durability == other.durability
    }
}

impl From<ItemKind> for Item {
    fn from(kind: ItemKind) -> Self {
        Item::new(kind)
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.durability {
            Some(d) => write!(f, "{} ({}/{})", self.kind, d.current, d.max),
            None => write!(f, "{}", self.kind),
        }
    }
}
