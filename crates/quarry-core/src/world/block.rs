//! Blocks: grid-aligned, minable, sharing their break table

use glam::IVec2;
use quarry_materials::{BlockKind, BreakTable, CraftKind, ItemKind, EMBER_GENERATIONS};
use smallvec::smallvec;
use std::sync::Arc;

use crate::simulation::{Drop, Drops, Effect};

/// Leaves drop an apple below this luck
const APPLE_LUCK: f32 = 0.3;
/// Leaves drop a stick at or above this luck
const STICK_LUCK: f32 = 0.8;

#[derive(Debug, Clone)]
pub struct Block {
    kind: BlockKind,
    table: Arc<BreakTable>,
    hitpoints: f32,
    cell: IVec2,
}

impl Block {
    pub fn new(kind: BlockKind, table: Arc<BreakTable>, cell: IVec2) -> Self {
        let hitpoints = table.durability;
        Self {
            kind,
            table,
            hitpoints,
            cell,
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn table(&self) -> &BreakTable {
        &self.table
    }

    pub fn cell(&self) -> IVec2 {
        self.cell
    }

    pub fn hitpoints(&self) -> f32 {
        self.hitpoints
    }

    pub fn is_mined(&self) -> bool {
        self.hitpoints <= 0.0
    }

    /// Knock hitpoints off; never increases them
    pub(crate) fn damage(&mut self, amount: f32) {
        self.hitpoints -= amount.max(0.0);
    }

    /// What the block leaves behind once mined
    pub fn drops(&self, luck: f32, tool_suitable: bool) -> Drops {
        match self.kind {
            BlockKind::Leaves => {
                if luck < APPLE_LUCK {
                    smallvec![Drop::Item(ItemKind::Apple)]
                } else if luck >= STICK_LUCK {
                    smallvec![Drop::Item(ItemKind::Stick)]
                } else {
                    Drops::new()
                }
            }
            BlockKind::Ember(generation) => {
                if generation + 1 < EMBER_GENERATIONS {
                    smallvec![Drop::Block(BlockKind::Ember(generation + 1))]
                } else {
                    smallvec![Drop::Item(ItemKind::Stick)]
                }
            }
            kind => match kind.resource_item() {
                Some(item) if tool_suitable => smallvec![Drop::Item(item)],
                _ => Drops::new(),
            },
        }
    }

    /// Right-click on the block
    pub fn use_block(&self) -> Option<Effect> {
        match self.kind {
            BlockKind::CraftingTable => Some(Effect::Crafting(CraftKind::CraftingTable)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_materials::BreakTables;

    fn block(kind: BlockKind) -> Block {
        Block::new(kind, BreakTables::new().get(kind), IVec2::new(2, 2))
    }

    #[test]
    fn test_fresh_block_has_table_durability() {
        let stone = block(BlockKind::Stone);
        assert_eq!(stone.hitpoints(), 12.0);
        assert!(!stone.is_mined());
    }

    #[test]
    fn test_damage_is_monotonic() {
        let mut dirt = block(BlockKind::Dirt);
        dirt.damage(-5.0);
        assert_eq!(dirt.hitpoints(), 4.0);
        dirt.damage(4.0);
        assert!(dirt.is_mined());
    }

    #[test]
    fn test_resource_drops_need_suitable_tool() {
        let stone = block(BlockKind::Stone);
        assert_eq!(stone.drops(0.5, true).as_slice(), &[Drop::Item(ItemKind::Stone)]);
        assert!(stone.drops(0.5, false).is_empty());
    }

    #[test]
    fn test_leaves_drops_by_luck() {
        let leaves = block(BlockKind::Leaves);
        assert_eq!(leaves.drops(0.1, true).as_slice(), &[Drop::Item(ItemKind::Apple)]);
        assert!(leaves.drops(0.5, true).is_empty());
        assert_eq!(leaves.drops(0.8, true).as_slice(), &[Drop::Item(ItemKind::Stick)]);
    }

    #[test]
    fn test_ember_reignites_then_burns_out() {
        let ember = block(BlockKind::Ember(0));
        assert_eq!(
            ember.drops(0.0, true).as_slice(),
            &[Drop::Block(BlockKind::Ember(1))]
        );

        let last = block(BlockKind::Ember(EMBER_GENERATIONS - 1));
        assert_eq!(last.drops(0.0, true).as_slice(), &[Drop::Item(ItemKind::Stick)]);
    }

    #[test]
    fn test_use_crafting_table() {
        assert_eq!(
            block(BlockKind::CraftingTable).use_block(),
            Some(Effect::Crafting(CraftKind::CraftingTable))
        );
        assert_eq!(block(BlockKind::Dirt).use_block(), None);
    }
}
