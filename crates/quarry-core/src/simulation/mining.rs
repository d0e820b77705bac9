//! Mining resolver: one swing of an item at a block

use serde::{Deserialize, Serialize};

use crate::entity::Item;
use crate::error::{InteractionError, InteractionResult};
use crate::world::Block;

/// Result of a single swing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MiningOutcome {
    /// The tool met the block's tier requirement
    pub tool_suitable: bool,
    /// The swing took hitpoints off the block
    pub attack_successful: bool,
    /// Hitpoints removed by this swing
    pub damage: f32,
    /// The block is at or below zero hitpoints and should be removed
    pub mined: bool,
}

/// Damage scale for a luck roll in [0, 1): 0.75 at worst, 1.25 at best
pub fn luck_factor(luck: f32) -> f32 {
    0.75 + 0.5 * luck
}

/// Resolves swings against blocks. Stateless; never touches world topology
#[derive(Debug, Default, Clone, Copy)]
pub struct MiningResolver;

impl MiningResolver {
    pub fn new() -> Self {
        Self
    }

    /// Strike `block` with `item` (already the effective item: bare hands if the
    /// held item cannot attack). The item wears down only on a successful swing
    pub fn resolve(
        &self,
        block: &mut Block,
        item: &mut Item,
        luck: f32,
    ) -> InteractionResult<MiningOutcome> {
        if block.is_mined() {
            return Err(InteractionError::AlreadyMined {
                kind: block.kind(),
                cell: block.cell(),
            });
        }

        let entry = block.table().lookup(item.tool_key());
        let tool_suitable = entry.is_suitable();

        let damage = if tool_suitable {
            entry.entry.multiplier * entry.tool_speed() * luck_factor(luck)
        } else {
            0.0
        };
        let attack_successful = damage > 0.0;

        block.damage(damage);
        item.attack(attack_successful);

        let outcome = MiningOutcome {
            tool_suitable,
            attack_successful,
            damage,
            mined: block.is_mined(),
        };

        log::debug!(
            "[MINING] {} hit {} at {} for {:.2} ({:.2} hp left, suitable: {})",
            item.kind(),
            block.kind(),
            block.cell(),
            damage,
            block.hitpoints().max(0.0),
            tool_suitable
        );

        Ok(outcome)
    }
}
