//! World: the block grid plus every physics-backed entity

use ahash::AHashMap;
use glam::{IVec2, Vec2};
use quarry_materials::{BlockKind, BreakTables};
use rapier2d::prelude::{
    ActiveEvents, ColliderBuilder, ColliderHandle, Group, InteractionGroups, RigidBodyHandle,
};
use std::collections::BTreeMap;
use thiserror::Error;

use super::block::Block;
use super::collision::{groups, BodyCategory, BodyTag, Contact, ContactResponse};
use super::grid::GridGeometry;
use super::physics::PhysicsWorld;
use super::rng_trait::WorldRng;
use crate::entity::{EntityId, Item, Mob, Player};

/// Half side of a dropped item's solid collider
const ITEM_HALF_SIZE: f32 = 4.0;
/// Radius of a dropped item's pickup sensor
const ITEM_SENSOR_RADIUS: f32 = 8.0;
const PLAYER_RADIUS: f32 = 10.0;
const MOB_RADIUS: f32 = 8.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    #[error("cell {0} is already occupied")]
    CellOccupied(IVec2),

    #[error("cell {0} is outside the world")]
    OutOfBounds(IVec2),

    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),

    #[error("no player has been added to the world")]
    NoPlayer,
}

impl WorldError {
    pub fn is_fatal(&self) -> bool {
        match self {
            WorldError::CellOccupied(_) | WorldError::OutOfBounds(_) => false,
            WorldError::UnknownEntity(_) | WorldError::NoPlayer => true,
        }
    }
}

/// Whatever sits under a point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    Block(IVec2),
    Mob(EntityId),
    Item(EntityId),
}

/// An item lying in the world
#[derive(Debug)]
pub struct DroppedItem {
    pub id: EntityId,
    pub item: Item,
    body: RigidBodyHandle,
    solid: ColliderHandle,
}

impl DroppedItem {
    /// Right-click on a dropped item yields nothing
    pub fn use_item(&self) -> Option<crate::simulation::Effect> {
        None
    }
}

struct PlacedBlock {
    block: Block,
    collider: ColliderHandle,
}

struct MobBody {
    mob: Mob,
    body: RigidBodyHandle,
}

struct PlayerBody {
    id: EntityId,
    body: RigidBodyHandle,
}

/// Per-step inputs to the world
pub struct StepContext<'a> {
    pub rng: &'a mut dyn WorldRng,
}

pub struct World {
    geometry: GridGeometry,
    tables: BreakTables,
    physics: PhysicsWorld,
    blocks: AHashMap<IVec2, PlacedBlock>,
    items: BTreeMap<EntityId, DroppedItem>,
    mobs: BTreeMap<EntityId, MobBody>,
    player: Option<PlayerBody>,
}

impl World {
    pub fn new(geometry: GridGeometry, gravity: f32, dt: f32) -> Self {
        log::debug!(
            "World {}x{} cells of {} px, gravity {} px/s²",
            geometry.width,
            geometry.height,
            geometry.cell_expanse,
            gravity
        );

        Self {
            geometry,
            tables: BreakTables::new(),
            physics: PhysicsWorld::new(gravity, dt),
            blocks: AHashMap::new(),
            items: BTreeMap::new(),
            mobs: BTreeMap::new(),
            player: None,
        }
    }

    // ===== Geometry =====

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn cell_expanse(&self) -> f32 {
        self.geometry.cell_expanse
    }

    pub fn xy_to_grid(&self, position: Vec2) -> IVec2 {
        self.geometry.xy_to_grid(position)
    }

    pub fn grid_to_xy_centre(&self, cell: IVec2) -> Vec2 {
        self.geometry.grid_to_xy_centre(cell)
    }

    pub fn pixel_size(&self) -> Vec2 {
        self.geometry.pixel_size()
    }

    // ===== Blocks =====

    pub fn block_at(&self, position: Vec2) -> Option<&Block> {
        self.block_in_cell(self.xy_to_grid(position))
    }

    pub fn block_at_mut(&mut self, position: Vec2) -> Option<&mut Block> {
        let cell = self.xy_to_grid(position);
        self.block_in_cell_mut(cell)
    }

    pub fn block_in_cell(&self, cell: IVec2) -> Option<&Block> {
        self.blocks.get(&cell).map(|placed| &placed.block)
    }

    pub fn block_in_cell_mut(&mut self, cell: IVec2) -> Option<&mut Block> {
        self.blocks.get_mut(&cell).map(|placed| &mut placed.block)
    }

    /// Check a cell can take a new block
    pub fn check_free_cell(&self, cell: IVec2) -> Result<(), WorldError> {
        if !self.geometry.contains(cell) {
            return Err(WorldError::OutOfBounds(cell));
        }
        if self.blocks.contains_key(&cell) {
            return Err(WorldError::CellOccupied(cell));
        }
        Ok(())
    }

    /// Place a block in the cell containing a pixel position
    pub fn add_block(&mut self, kind: BlockKind, position: Vec2) -> Result<IVec2, WorldError> {
        let cell = self.xy_to_grid(position);
        self.add_block_to_grid(kind, cell)?;
        Ok(cell)
    }

    /// Place a block directly into a grid cell
    pub fn add_block_to_grid(&mut self, kind: BlockKind, cell: IVec2) -> Result<(), WorldError> {
        self.check_free_cell(cell)?;

        let half = self.geometry.cell_expanse / 2.0;
        let collider = self.physics.insert_fixed_cuboid(
            self.grid_to_xy_centre(cell),
            Vec2::splat(half),
            BodyTag::block(cell),
            InteractionGroups::new(groups::BLOCK, Group::ALL),
        );

        let block = Block::new(kind, self.tables.get(kind), cell);
        self.blocks.insert(cell, PlacedBlock { block, collider });
        Ok(())
    }

    /// Remove a block, destroying its collider. Returns None if the cell was empty
    pub fn remove_block(&mut self, cell: IVec2) -> Option<Block> {
        let placed = self.blocks.remove(&cell)?;
        self.physics.remove_collider(placed.collider);
        Some(placed.block)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values().map(|placed| &placed.block)
    }

    // ===== Dropped items =====

    /// Spawn a dropped item at a pixel position
    pub fn add_item(&mut self, item: Item, position: Vec2) -> EntityId {
        let id = EntityId::new();
        let tag = BodyTag::entity(BodyCategory::Item, id);
        let body = self.physics.insert_dynamic_body(position, 1.0);

        let solid = self.physics.attach_collider(
            body,
            ColliderBuilder::cuboid(ITEM_HALF_SIZE, ITEM_HALF_SIZE)
                .collision_groups(Self::item_groups(false))
                .friction(0.8)
                .build(),
            tag,
        );
        self.physics.attach_collider(
            body,
            ColliderBuilder::ball(ITEM_SENSOR_RADIUS)
                .sensor(true)
                .density(0.0)
                .collision_groups(InteractionGroups::new(groups::ITEM_SENSOR, groups::PLAYER))
                .active_events(ActiveEvents::COLLISION_EVENTS)
                .build(),
            tag,
        );

        log::debug!("[DROPS] {} spawned as {} at {}", item, id, position);
        self.items.insert(
            id,
            DroppedItem {
                id,
                item,
                body,
                solid,
            },
        );
        id
    }

    /// Remove a dropped item and destroy its body. None if it is already gone
    pub fn remove_item(&mut self, id: EntityId) -> Option<Item> {
        let dropped = self.items.remove(&id)?;
        self.physics.remove_body(dropped.body);
        Some(dropped.item)
    }

    pub fn item(&self, id: EntityId) -> Option<&DroppedItem> {
        self.items.get(&id)
    }

    pub fn items(&self) -> impl Iterator<Item = &DroppedItem> {
        self.items.values()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn item_position(&self, id: EntityId) -> Option<Vec2> {
        self.items
            .get(&id)
            .and_then(|dropped| self.physics.body_position(dropped.body))
    }

    /// Whether a dropped item's solid collider currently collides with the player
    pub fn item_blocks_player(&self, id: EntityId) -> Option<bool> {
        let dropped = self.items.get(&id)?;
        self.physics
            .collision_groups(dropped.solid)
            .map(|g| g.filter.contains(groups::PLAYER))
    }

    fn item_groups(collides_with_player: bool) -> InteractionGroups {
        let mut filter = groups::BLOCK;
        if collides_with_player {
            filter |= groups::PLAYER;
        }
        InteractionGroups::new(groups::ITEM, filter)
    }

    // ===== Player =====

    /// Bind the player to a physics body at a pixel position
    pub fn add_player(&mut self, player: &Player, position: Vec2) {
        if let Some(previous) = self.player.take() {
            self.physics.remove_body(previous.body);
        }

        let body = self.physics.insert_dynamic_body(position, 1.0);
        self.physics.attach_collider(
            body,
            ColliderBuilder::ball(PLAYER_RADIUS)
                .collision_groups(InteractionGroups::new(
                    groups::PLAYER,
                    Group::ALL,
                ))
                .friction(0.5)
                .build(),
            BodyTag::entity(BodyCategory::Player, player.id),
        );
        self.player = Some(PlayerBody {
            id: player.id,
            body,
        });
    }

    pub fn player_position(&self) -> Result<Vec2, WorldError> {
        let player = self.player.as_ref().ok_or(WorldError::NoPlayer)?;
        self.physics
            .body_position(player.body)
            .ok_or(WorldError::UnknownEntity(player.id))
    }

    pub fn player_velocity(&self) -> Result<Vec2, WorldError> {
        let player = self.player.as_ref().ok_or(WorldError::NoPlayer)?;
        self.physics
            .body_velocity(player.body)
            .ok_or(WorldError::UnknownEntity(player.id))
    }

    pub fn set_player_velocity(&mut self, velocity: Vec2) -> Result<(), WorldError> {
        let player = self.player.as_ref().ok_or(WorldError::NoPlayer)?;
        self.physics.set_body_velocity(player.body, velocity);
        Ok(())
    }

    // ===== Mobs =====

    pub fn add_mob(&mut self, mob: Mob, position: Vec2) -> EntityId {
        let id = mob.id;
        let gravity_scale = if mob.has_gravity() { 1.0 } else { 0.0 };
        let body = self.physics.insert_dynamic_body(position, gravity_scale);
        self.physics.attach_collider(
            body,
            ColliderBuilder::ball(MOB_RADIUS)
                .collision_groups(InteractionGroups::new(
                    groups::MOB,
                    groups::BLOCK | groups::PLAYER,
                ))
                .build(),
            BodyTag::entity(BodyCategory::Mob, id),
        );

        log::debug!("{} spawned as {} at {}", mob.kind, id, position);
        self.mobs.insert(id, MobBody { mob, body });
        id
    }

    pub fn mob(&self, id: EntityId) -> Option<&Mob> {
        self.mobs.get(&id).map(|entry| &entry.mob)
    }

    pub fn mob_count(&self) -> usize {
        self.mobs.len()
    }

    // ===== Queries =====

    /// The block, mob or dropped item under a pixel position, in that order
    pub fn thing_at(&self, position: Vec2) -> Option<Occupant> {
        let cell = self.xy_to_grid(position);
        if self.blocks.contains_key(&cell) {
            return Some(Occupant::Block(cell));
        }

        let hit = |body: RigidBodyHandle, radius: f32| {
            self.physics
                .body_position(body)
                .is_some_and(|centre| centre.distance_squared(position) <= radius * radius)
        };

        if let Some((id, _)) = self.mobs.iter().find(|(_, entry)| hit(entry.body, MOB_RADIUS)) {
            return Some(Occupant::Mob(*id));
        }

        self.items
            .iter()
            .find(|(_, dropped)| hit(dropped.body, ITEM_SENSOR_RADIUS))
            .map(|(id, _)| Occupant::Item(*id))
    }

    // ===== Simulation =====

    /// Advance one tick: mobs decide how to move, then physics steps.
    /// Returns the contacts that began during the step
    pub fn step(&mut self, ctx: &mut StepContext<'_>) -> Vec<Contact> {
        for entry in self.mobs.values() {
            if let Some((dx, dy)) = entry.mob.step(&mut *ctx.rng) {
                let velocity = self.physics.body_velocity(entry.body).unwrap_or_default();
                self.physics
                    .set_body_velocity(entry.body, velocity + Vec2::new(dx, dy));
            }
        }

        self.physics.step()
    }

    /// Honour a collision handler's verdict. For item contacts this toggles
    /// whether the item's solid collider blocks the player
    pub fn apply_contact_response(&mut self, contact: &Contact, response: ContactResponse) {
        for tag in [contact.first, contact.second] {
            if tag.category != BodyCategory::Item {
                continue;
            }
            let Some(dropped) = tag.entity_id().and_then(|id| self.items.get(&id)) else {
                continue;
            };
            let accept = response == ContactResponse::Accept;
            self.physics
                .set_collision_groups(dropped.solid, Self::item_groups(accept));
        }
    }
}
