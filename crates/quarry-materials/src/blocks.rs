//! Block kinds and break tables

use crate::items::{ItemKind, ToolMaterial, ToolType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Number of times an ember re-ignites before burning out
pub const EMBER_GENERATIONS: u8 = 3;

/// Every kind of block that can occupy a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    Dirt,
    Stone,
    Wood,
    Leaves,
    Diamond,
    CraftingTable,
    /// Re-ignites in its own cell when mined, until the last generation
    Ember(u8),
}

impl BlockKind {
    /// The item a resource block drops when mined with a suitable tool
    pub fn resource_item(&self) -> Option<ItemKind> {
        match self {
            BlockKind::Dirt => Some(ItemKind::Dirt),
            BlockKind::Stone => Some(ItemKind::Stone),
            BlockKind::Wood => Some(ItemKind::Wood),
            BlockKind::Diamond => Some(ItemKind::Diamond),
            BlockKind::CraftingTable => Some(ItemKind::CraftingTable),
            BlockKind::Leaves | BlockKind::Ember(_) => None,
        }
    }

    /// The block a placeable item turns into
    pub fn from_item(item: ItemKind) -> Option<BlockKind> {
        match item {
            ItemKind::Dirt => Some(BlockKind::Dirt),
            ItemKind::Stone => Some(BlockKind::Stone),
            ItemKind::Wood => Some(BlockKind::Wood),
            ItemKind::CraftingTable => Some(BlockKind::CraftingTable),
            _ => None,
        }
    }

    fn table_index(&self) -> usize {
        match self {
            BlockKind::Dirt => 0,
            BlockKind::Stone => 1,
            BlockKind::Wood => 2,
            BlockKind::Leaves => 3,
            BlockKind::Diamond => 4,
            BlockKind::CraftingTable => 5,
            BlockKind::Ember(_) => 6,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Dirt => write!(f, "dirt"),
            BlockKind::Stone => write!(f, "stone"),
            BlockKind::Wood => write!(f, "wood"),
            BlockKind::Leaves => write!(f, "leaves"),
            BlockKind::Diamond => write!(f, "diamond"),
            BlockKind::CraftingTable => write!(f, "crafting_table"),
            BlockKind::Ember(generation) => write!(f, "ember({})", generation),
        }
    }
}

/// One row of a break table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakEntry {
    /// Damage per swing before tool speed and luck are applied
    pub multiplier: f32,
    /// Minimum tool material needed to make any progress at all
    pub min_material: Option<ToolMaterial>,
}

impl BreakEntry {
    pub const fn new(multiplier: f32) -> Self {
        Self {
            multiplier,
            min_material: None,
        }
    }

    pub const fn requiring(multiplier: f32, min_material: ToolMaterial) -> Self {
        Self {
            multiplier,
            min_material: Some(min_material),
        }
    }
}

/// A break table entry matched against a concrete tool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryMatch {
    pub entry: BreakEntry,
    /// Material of the tool the entry was matched for (None = bare hands)
    pub material: Option<ToolMaterial>,
}

impl EntryMatch {
    /// True unless the entry mandates a tier the tool does not reach
    pub fn is_suitable(&self) -> bool {
        match (self.entry.min_material, self.material) {
            (None, _) => true,
            (Some(required), Some(material)) => material >= required,
            (Some(_), None) => false,
        }
    }

    /// Speed contributed by the tool material (bare hands = 1.0)
    pub fn tool_speed(&self) -> f32 {
        self.material.map_or(1.0, |m| m.speed_multiplier())
    }
}

/// Per-block mapping from tool type to damage multiplier and tier requirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakTable {
    /// Hitpoints a fresh block of this kind starts with
    pub durability: f32,
    hand: BreakEntry,
    tools: Vec<(ToolType, BreakEntry)>,
}

impl BreakTable {
    pub fn new(durability: f32, hand: BreakEntry) -> Self {
        Self {
            durability,
            hand,
            tools: Vec::new(),
        }
    }

    pub fn with_tool(mut self, tool_type: ToolType, entry: BreakEntry) -> Self {
        self.tools.push((tool_type, entry));
        self
    }

    /// Look up the entry for a tool. A tool type without its own entry is
    /// treated as bare hands, tier checks included.
    pub fn lookup(&self, tool: Option<(ToolType, ToolMaterial)>) -> EntryMatch {
        if let Some((tool_type, material)) = tool {
            if let Some((_, entry)) = self.tools.iter().find(|(t, _)| *t == tool_type) {
                return EntryMatch {
                    entry: *entry,
                    material: Some(material),
                };
            }
        }

        EntryMatch {
            entry: self.hand,
            material: None,
        }
    }

    pub fn hand_entry(&self) -> BreakEntry {
        self.hand
    }
}

/// Break table registry, built once when the world is created
#[derive(Debug, Clone)]
pub struct BreakTables {
    tables: Vec<Arc<BreakTable>>,
}

impl BreakTables {
    pub fn new() -> Self {
        let tables = vec![
            // Dirt
            BreakTable::new(4.0, BreakEntry::new(1.0))
                .with_tool(ToolType::Shovel, BreakEntry::new(3.0)),
            // Stone
            BreakTable::new(12.0, BreakEntry::requiring(1.0, ToolMaterial::Wood))
                .with_tool(
                    ToolType::Pickaxe,
                    BreakEntry::requiring(2.0, ToolMaterial::Wood),
                ),
            // Wood
            BreakTable::new(8.0, BreakEntry::new(1.0))
                .with_tool(ToolType::Axe, BreakEntry::new(3.0)),
            // Leaves
            BreakTable::new(1.0, BreakEntry::new(1.0))
                .with_tool(ToolType::Axe, BreakEntry::new(2.0)),
            // Diamond
            BreakTable::new(20.0, BreakEntry::requiring(1.0, ToolMaterial::Iron))
                .with_tool(
                    ToolType::Pickaxe,
                    BreakEntry::requiring(2.0, ToolMaterial::Iron),
                ),
            // Crafting table
            BreakTable::new(6.0, BreakEntry::new(1.0))
                .with_tool(ToolType::Axe, BreakEntry::new(3.0)),
            // Ember
            BreakTable::new(1.0, BreakEntry::new(1.0)),
        ];

        log::debug!("Loaded {} break tables", tables.len());

        Self {
            tables: tables.into_iter().map(Arc::new).collect(),
        }
    }

    /// Shared break table for a block kind
    pub fn get(&self, kind: BlockKind) -> Arc<BreakTable> {
        Arc::clone(&self.tables[kind.table_index()])
    }
}

impl Default for BreakTables {
    fn default() -> Self {
        Self::new()
    }
}
