//! Collision bus: routes physics contacts to handlers keyed by body category

use ahash::{AHashMap, AHashSet};
use glam::IVec2;
use rapier2d::prelude::Group;
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::interaction::InteractionContext;

/// What kind of thing a physics body stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BodyCategory {
    Block = 1,
    Player = 2,
    Item = 3,
    Mob = 4,
}

impl BodyCategory {
    fn from_raw(raw: u64) -> Option<Self> {
        match raw {
            1 => Some(BodyCategory::Block),
            2 => Some(BodyCategory::Player),
            3 => Some(BodyCategory::Item),
            4 => Some(BodyCategory::Mob),
            _ => None,
        }
    }
}

/// Collision group memberships
pub mod groups {
    use super::Group;

    pub const BLOCK: Group = Group::GROUP_1;
    pub const PLAYER: Group = Group::GROUP_2;
    /// Solid collider of a dropped item
    pub const ITEM: Group = Group::GROUP_3;
    /// Pickup sensor of a dropped item
    pub const ITEM_SENSOR: Group = Group::GROUP_4;
    pub const MOB: Group = Group::GROUP_5;
}

/// Identity stored in a collider's user data: category in the high 64 bits,
/// entity id (or packed cell for blocks) in the low 64
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyTag {
    pub category: BodyCategory,
    raw: u64,
}

impl BodyTag {
    pub fn entity(category: BodyCategory, id: EntityId) -> Self {
        Self {
            category,
            raw: id.raw(),
        }
    }

    pub fn block(cell: IVec2) -> Self {
        let raw = ((cell.x as u32 as u64) << 32) | (cell.y as u32 as u64);
        Self {
            category: BodyCategory::Block,
            raw,
        }
    }

    /// Entity id, for non-block bodies
    pub fn entity_id(&self) -> Option<EntityId> {
        (self.category != BodyCategory::Block).then(|| EntityId::from_raw(self.raw))
    }

    /// Grid cell, for blocks
    pub fn cell(&self) -> Option<IVec2> {
        (self.category == BodyCategory::Block)
            .then(|| IVec2::new((self.raw >> 32) as u32 as i32, self.raw as u32 as i32))
    }

    pub fn to_user_data(self) -> u128 {
        ((self.category as u128) << 64) | self.raw as u128
    }

    pub fn from_user_data(data: u128) -> Option<Self> {
        let category = BodyCategory::from_raw((data >> 64) as u64)?;
        Some(Self {
            category,
            raw: data as u64,
        })
    }
}

/// A contact that began during the last physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Contact {
    pub first: BodyTag,
    pub second: BodyTag,
}

impl Contact {
    pub fn new(first: BodyTag, second: BodyTag) -> Self {
        Self { first, second }
    }

    pub fn swapped(self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }

    /// Same contact regardless of which body was reported first
    fn normalized(self) -> Self {
        if self.first <= self.second {
            self
        } else {
            self.swapped()
        }
    }
}

/// A handler's verdict on a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactResponse {
    /// Let the bodies collide physically
    Accept,
    /// Let the bodies pass through each other
    Ignore,
}

/// Handler for one category pair. Receives the contact ordered as registered
pub type CollisionHandler = fn(&mut InteractionContext<'_>, &Contact) -> ContactResponse;

/// Synchronous dispatcher from contacts to handlers
#[derive(Default)]
pub struct CollisionBus {
    handlers: AHashMap<(BodyCategory, BodyCategory), CollisionHandler>,
}

impl CollisionBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a category pair, replacing any earlier one
    pub fn register(&mut self, first: BodyCategory, second: BodyCategory, handler: CollisionHandler) {
        if self.handlers.insert((first, second), handler).is_some() {
            log::warn!("Replaced collision handler for {:?}/{:?}", first, second);
        }
    }

    /// Handler for a contact, plus the contact ordered the way the handler expects
    pub fn handler_for(&self, contact: &Contact) -> Option<(CollisionHandler, Contact)> {
        let key = (contact.first.category, contact.second.category);
        if let Some(handler) = self.handlers.get(&key) {
            return Some((*handler, *contact));
        }
        let swapped = contact.swapped();
        self.handlers
            .get(&(swapped.first.category, swapped.second.category))
            .map(|handler| (*handler, swapped))
    }

    /// Run every handler for a batch of contacts. Duplicate contacts within the
    /// batch are collapsed; the world applies each response to its colliders
    pub fn dispatch(&self, ctx: &mut InteractionContext<'_>, contacts: &[Contact]) -> usize {
        let mut seen = AHashSet::new();
        let mut handled = 0;

        for contact in contacts {
            if !seen.insert(contact.normalized()) {
                continue;
            }
            let Some((handler, ordered)) = self.handler_for(contact) else {
                continue;
            };

            let response = handler(ctx, &ordered);
            ctx.world.apply_contact_response(&ordered, response);
            handled += 1;
        }

        handled
    }
}
