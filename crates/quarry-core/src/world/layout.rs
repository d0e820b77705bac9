//! Fixed demo layout: rolling ground, a tree, a crafting table, an ember and a bird

use ahash::AHashMap;
use glam::{IVec2, Vec2};
use quarry_materials::BlockKind;

use super::rng_trait::WorldRng;
use super::world::World;
use crate::entity::{Mob, MobKind};

/// Relative weights of the ground blocks
const GROUND_WEIGHTS: [(u32, BlockKind); 2] = [(100, BlockKind::Dirt), (30, BlockKind::Stone)];

const TRUNK: [(i32, i32); 4] = [(3, 8), (3, 7), (3, 6), (3, 5)];

const BIRD_SPAWN: Vec2 = Vec2::new(400.0, 100.0);

/// Ground fills everything below row 8 on the left and a slope on the right
fn is_ground(x: i32, y: i32) -> bool {
    if x < 22 {
        y > 8
    } else {
        x + y >= 30
    }
}

fn pick_ground(rng: &mut dyn WorldRng) -> BlockKind {
    let total: u32 = GROUND_WEIGHTS.iter().map(|(weight, _)| weight).sum();
    let mut roll = rng.gen_f32() * total as f32;
    for (weight, kind) in GROUND_WEIGHTS {
        if roll < weight as f32 {
            return kind;
        }
        roll -= weight as f32;
    }
    GROUND_WEIGHTS[0].1
}

/// Every cell of the demo layout; later features overwrite the ground
pub fn demo_cells(width: i32, height: i32, rng: &mut dyn WorldRng) -> AHashMap<IVec2, BlockKind> {
    let mut cells = AHashMap::new();

    for x in 0..width {
        for y in 0..height {
            if is_ground(x, y) {
                cells.insert(IVec2::new(x, y), pick_ground(rng));
            }
        }
    }

    for (x, y) in TRUNK {
        cells.insert(IVec2::new(x, y), BlockKind::Wood);
    }
    for x in 2..=4 {
        for y in 2..=4 {
            cells.insert(IVec2::new(x, y), BlockKind::Leaves);
        }
    }

    cells.insert(IVec2::new(14, 8), BlockKind::Ember(0));
    cells.insert(IVec2::new(8, 8), BlockKind::CraftingTable);
    cells.insert(IVec2::new(18, 14), BlockKind::Diamond);

    cells
}

/// Fill an empty world with the demo layout. Cells outside the grid are skipped
pub fn load_demo(world: &mut World, rng: &mut dyn WorldRng) {
    let geometry = *world.geometry();
    let cells = demo_cells(geometry.width, geometry.height, rng);

    let mut placed = 0;
    for (cell, kind) in cells {
        match world.add_block_to_grid(kind, cell) {
            Ok(()) => placed += 1,
            Err(err) => log::debug!("Skipping {} at {}: {}", kind, cell, err),
        }
    }

    world.add_mob(Mob::new(MobKind::Bird), BIRD_SPAWN);

    log::info!("Loaded demo layout: {} blocks, {} mobs", placed, world.mob_count());
}
