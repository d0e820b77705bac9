//! Drop system - turns drop descriptors into things in the world

use glam::{IVec2, Vec2};
use quarry_materials::BlockKind;

use super::rng_trait::WorldRng;
use super::world::{World, WorldError};
use crate::entity::{EntityId, Item};
use crate::error::{InteractionError, InteractionResult};
use crate::simulation::Drop;

/// Gap between the cell edge and the first drop
const EDGE_MARGIN: f32 = 5.0;
/// Maximum random offset per axis, in pixels
const MAX_JITTER: u32 = 2;
/// Step used to nudge a drop off a coordinate that is already taken
const NUDGE: f32 = 0.5;

/// What a scatter produced
#[derive(Debug, Default)]
pub struct ScatterReport {
    /// Dropped items spawned, with their spawn positions
    pub items: Vec<(EntityId, Vec2)>,
    /// Cells that received a block
    pub blocks: Vec<IVec2>,
    /// Block drops that could not be placed
    pub rejected: Vec<(BlockKind, InteractionError)>,
}

impl ScatterReport {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.blocks.is_empty() && self.rejected.is_empty()
    }
}

/// Scatters drops around the centre of a mined cell
pub struct DropSystem;

impl DropSystem {
    /// Offset of the i-th item drop from the cell centre, before jitter.
    /// Tiles a 3x3 pattern row by row
    pub fn pattern_offset(index: usize, cell_expanse: f32) -> Vec2 {
        let spacing = (cell_expanse - 2.0 * EDGE_MARGIN) / 2.0;
        let start = -cell_expanse / 2.0 + EDGE_MARGIN;
        let column = (index % 3) as f32;
        let row = ((index / 3) % 3) as f32;
        Vec2::new(start + column * spacing, start + row * spacing)
    }

    /// Place every drop. Item drops are spread over the cell without sharing a
    /// coordinate; block drops go straight into the origin cell.
    /// An effect drop is refused before anything is placed
    pub fn scatter(
        world: &mut World,
        origin: Vec2,
        drops: &[Drop],
        rng: &mut dyn WorldRng,
    ) -> InteractionResult<ScatterReport> {
        if let Some(drop) = drops.iter().find(|d| matches!(d, Drop::Effect(_))) {
            return Err(InteractionError::UnknownDropCategory(drop.category().to_string()));
        }

        let cell_expanse = world.cell_expanse();
        let mut report = ScatterReport::default();
        let mut taken: Vec<Vec2> = Vec::with_capacity(drops.len());

        for (i, drop) in drops.iter().enumerate() {
            log::debug!("[DROPS] Dropped {}", drop);

            match drop {
                Drop::Item(kind) => {
                    let jitter = Vec2::new(
                        rng.gen_offset(MAX_JITTER) as f32,
                        rng.gen_offset(MAX_JITTER) as f32,
                    );
                    let mut position = origin + Self::pattern_offset(i, cell_expanse) + jitter;
                    while taken.contains(&position) {
                        position.x += NUDGE;
                    }
                    taken.push(position);

                    let id = world.add_item(Item::new(*kind), position);
                    report.items.push((id, position));
                }
                Drop::Block(kind) => {
                    let cell = world.xy_to_grid(origin);
                    match world.add_block_to_grid(*kind, cell) {
                        Ok(()) => report.blocks.push(cell),
                        Err(err @ (WorldError::CellOccupied(_) | WorldError::OutOfBounds(_))) => {
                            log::warn!("[DROPS] Could not place {}: {}", kind, err);
                            report.rejected.push((*kind, err.into()));
                        }
                        Err(err) => return Err(err.into()),
                    }
                }
                Drop::Effect(_) => {
                    return Err(InteractionError::UnknownDropCategory(drop.category().to_string()))
                }
            }
        }

        Ok(report)
    }
}
