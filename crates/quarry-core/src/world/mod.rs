//! World management - block grid, physics bodies, collisions, drops

mod block;
pub mod collision;
mod drop_system;
pub mod grid;
pub mod layout;
mod physics;
pub mod rng_trait;
#[allow(clippy::module_inception)]
mod world;

pub use block::Block;
pub use collision::{
    BodyCategory, BodyTag, CollisionBus, CollisionHandler, Contact, ContactResponse,
};
pub use drop_system::{DropSystem, ScatterReport};
pub use grid::{positions_in_range, GridGeometry};
pub use physics::PhysicsWorld;
pub use rng_trait::{FixedLuck, WorldRng};
pub use world::{DroppedItem, Occupant, StepContext, World, WorldError};
