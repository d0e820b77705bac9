//! Item kinds, tool types and tool materials

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tool types with different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolType {
    /// Stone and ores
    Pickaxe,
    /// Wood, leaves, crafting tables
    Axe,
    /// Dirt
    Shovel,
    /// Combat (no block it is preferred for)
    Sword,
}

impl ToolType {
    pub const ALL: [ToolType; 4] = [
        ToolType::Pickaxe,
        ToolType::Axe,
        ToolType::Shovel,
        ToolType::Sword,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolType::Pickaxe => "pickaxe",
            ToolType::Axe => "axe",
            ToolType::Shovel => "shovel",
            ToolType::Sword => "sword",
        }
    }
}

/// Tool material, declared in tier order so `Ord` compares tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ToolMaterial {
    /// 2x speed, 60 uses
    Wood,
    /// 4x speed, 132 uses
    Stone,
    /// 6x speed, 251 uses
    Iron,
    /// 12x speed, 33 uses
    Golden,
    /// 8x speed, 1562 uses
    Diamond,
}

impl ToolMaterial {
    pub const ALL: [ToolMaterial; 5] = [
        ToolMaterial::Wood,
        ToolMaterial::Stone,
        ToolMaterial::Iron,
        ToolMaterial::Golden,
        ToolMaterial::Diamond,
    ];

    /// Damage multiplier applied on top of the block's break table entry
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            ToolMaterial::Wood => 2.0,
            ToolMaterial::Stone => 4.0,
            ToolMaterial::Iron => 6.0,
            ToolMaterial::Golden => 12.0,
            ToolMaterial::Diamond => 8.0,
        }
    }

    /// Number of successful swings before the tool is spent
    pub fn max_durability(&self) -> u32 {
        match self {
            ToolMaterial::Wood => 60,
            ToolMaterial::Stone => 132,
            ToolMaterial::Iron => 251,
            ToolMaterial::Golden => 33,
            ToolMaterial::Diamond => 1562,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolMaterial::Wood => "wood",
            ToolMaterial::Stone => "stone",
            ToolMaterial::Iron => "iron",
            ToolMaterial::Golden => "golden",
            ToolMaterial::Diamond => "diamond",
        }
    }
}

/// Every kind of item that can exist in a slot or on the ground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Bare hands, the fallback when nothing usable is held
    Hands,
    Dirt,
    Stone,
    Wood,
    CraftingTable,
    Stick,
    Diamond,
    Apple,
    Tool(ToolType, ToolMaterial),
}

impl ItemKind {
    /// Attack range in grid cells
    pub fn attack_range(&self) -> f32 {
        match self {
            ItemKind::Tool(..) => 3.0,
            _ => 2.0,
        }
    }

    /// Maximum quantity a single stack of this item can hold
    pub fn max_stack_size(&self) -> u32 {
        match self {
            ItemKind::Hands | ItemKind::Tool(..) => 1,
            _ => 64,
        }
    }

    /// Food value restored when the item is eaten
    pub fn food_strength(&self) -> Option<f32> {
        match self {
            ItemKind::Apple => Some(2.0),
            _ => None,
        }
    }

    pub fn tool(&self) -> Option<(ToolType, ToolMaterial)> {
        match self {
            ItemKind::Tool(tool_type, material) => Some((*tool_type, *material)),
            _ => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Hands => write!(f, "hands"),
            ItemKind::Dirt => write!(f, "dirt"),
            ItemKind::Stone => write!(f, "stone"),
            ItemKind::Wood => write!(f, "wood"),
            ItemKind::CraftingTable => write!(f, "crafting_table"),
            ItemKind::Stick => write!(f, "stick"),
            ItemKind::Diamond => write!(f, "diamond"),
            ItemKind::Apple => write!(f, "apple"),
            ItemKind::Tool(tool_type, material) => {
                write!(f, "{}_{}", material.name(), tool_type.name())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_material_tiers_are_ordered() {
        assert!(ToolMaterial::Wood < ToolMaterial::Stone);
        assert!(ToolMaterial::Stone < ToolMaterial::Iron);
        assert!(ToolMaterial::Iron < ToolMaterial::Diamond);
    }

    #[test]
    fn test_tool_material_durability() {
        assert_eq!(ToolMaterial::Wood.max_durability(), 60);
        assert_eq!(ToolMaterial::Stone.max_durability(), 132);
        assert_eq!(ToolMaterial::Diamond.max_durability(), 1562);
    }

    #[test]
    fn test_item_stacking_rules() {
        assert_eq!(ItemKind::Dirt.max_stack_size(), 64);
        assert_eq!(
            ItemKind::Tool(ToolType::Pickaxe, ToolMaterial::Wood).max_stack_size(),
            1
        );
        assert_eq!(ItemKind::Hands.max_stack_size(), 1);
    }

    #[test]
    fn test_item_display_names() {
        assert_eq!(ItemKind::CraftingTable.to_string(), "crafting_table");
        assert_eq!(
            ItemKind::Tool(ToolType::Pickaxe, ToolMaterial::Stone).to_string(),
            "stone_pickaxe"
        );
    }

    #[test]
    fn test_attack_range() {
        assert_eq!(ItemKind::Hands.attack_range(), 2.0);
        assert_eq!(
            ItemKind::Tool(ToolType::Axe, ToolMaterial::Iron).attack_range(),
            3.0
        );
    }
}
