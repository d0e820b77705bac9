//! Collision bridge: the player walking over dropped items

use crate::error::InteractionError;
use crate::world::{BodyCategory, CollisionBus, Contact, ContactResponse};

use super::InteractionContext;

/// Register every interaction-level collision handler
pub fn register_handlers(bus: &mut CollisionBus) {
    bus.register(BodyCategory::Player, BodyCategory::Item, pick_up_item);
}

/// Player touched a dropped item: move it into the hotbar, or the inventory if
/// the hotbar is full. With both full the item stays where it is.
/// Pickups never push the player around, so the response is always Ignore
pub fn pick_up_item(ctx: &mut InteractionContext<'_>, contact: &Contact) -> ContactResponse {
    let Some(id) = contact.second.entity_id() else {
        return ContactResponse::Ignore;
    };
    let Some(dropped) = ctx.world.item(id) else {
        log::debug!("[PICKUP] {} is already gone", id);
        return ContactResponse::Ignore;
    };
    let item = dropped.item.clone();
    let kind = item.kind();

    match ctx.hotbar.add_item(item) {
        Ok(()) => log::info!("[PICKUP] Added 1 {} to the hotbar", kind),
        Err(item) => match ctx.inventory.add_item(item) {
            Ok(()) => log::info!("[PICKUP] Added 1 {} to the inventory", kind),
            Err(_) => {
                log::warn!("[PICKUP] Found 1 {}: {}", kind, InteractionError::InventoryFull(kind));
                return ContactResponse::Ignore;
            }
        },
    }

    ctx.world.remove_item(id);
    ctx.pickups.push(kind);
    ContactResponse::Ignore
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Hotbar, Inventory, Item, Player, Stack};
    use crate::simulation::NoHooks;
    use crate::world::{BodyTag, FixedLuck, GridGeometry, World};
    use glam::Vec2;
    use quarry_materials::ItemKind;

    struct Fixture {
        world: World,
        player: Player,
        hotbar: Hotbar,
        inventory: Inventory,
        hands: Item,
    }

    impl Fixture {
        fn new() -> Self {
            let mut world = World::new(GridGeometry::default(), 300.0, 0.015);
            let player = Player::default();
            world.add_player(&player, Vec2::new(100.0, 100.0));
            Self {
                world,
                player,
                hotbar: Hotbar::new(2),
                inventory: Inventory::new(1, 1),
                hands: Item::hands(),
            }
        }

        fn contact(&mut self, kind: ItemKind) -> Contact {
            let id = self.world.add_item(Item::new(kind), Vec2::new(100.0, 100.0));
            Contact::new(
                BodyTag::entity(BodyCategory::Player, self.player.id),
                BodyTag::entity(BodyCategory::Item, id),
            )
        }

        fn run(&mut self, contact: &Contact) -> (ContactResponse, Vec<ItemKind>) {
            let mut ui = NoHooks;
            let mut rng = FixedLuck(0.5);
            let mut ctx = InteractionContext {
                world: &mut self.world,
                player: &mut self.player,
                hotbar: &mut self.hotbar,
                inventory: &mut self.inventory,
                hands: &mut self.hands,
                ui: &mut ui,
                rng: &mut rng,
                pickups: Vec::new(),
            };
            let response = pick_up_item(&mut ctx, contact);
            (response, ctx.pickups)
        }
    }

    #[test]
    fn test_pickup_goes_to_hotbar_first() {
        let mut fx = Fixture::new();
        let contact = fx.contact(ItemKind::Apple);

        let (response, pickups) = fx.run(&contact);
        assert_eq!(response, ContactResponse::Ignore);
        assert_eq!(pickups, vec![ItemKind::Apple]);
        assert_eq!(fx.hotbar.grid().count(ItemKind::Apple), 1);
        assert_eq!(fx.inventory.count(ItemKind::Apple), 0);
        assert_eq!(fx.world.item_count(), 0);
    }

    #[test]
    fn test_pickup_overflows_to_inventory() {
        let mut fx = Fixture::new();
        fx.hotbar.set(0, Stack::new(ItemKind::Dirt, 64));
        fx.hotbar.set(1, Stack::new(ItemKind::Stone, 64));
        let contact = fx.contact(ItemKind::Wood);

        fx.run(&contact);
        assert_eq!(fx.hotbar.grid().count(ItemKind::Wood), 0);
        assert_eq!(fx.inventory.count(ItemKind::Wood), 1);
        assert_eq!(fx.world.item_count(), 0);
    }

    #[test]
    fn test_pickup_with_no_room_leaves_item() {
        let mut fx = Fixture::new();
        fx.hotbar.set(0, Stack::new(ItemKind::Dirt, 64));
        fx.hotbar.set(1, Stack::new(ItemKind::Stone, 64));
        fx.inventory.set((0, 0), Stack::new(ItemKind::Stick, 64));
        let contact = fx.contact(ItemKind::Wood);

        let (response, pickups) = fx.run(&contact);
        assert_eq!(response, ContactResponse::Ignore);
        assert!(pickups.is_empty());
        assert_eq!(fx.world.item_count(), 1);
    }

    #[test]
    fn test_repeated_contact_is_a_no_op() {
        let mut fx = Fixture::new();
        let contact = fx.contact(ItemKind::Stick);

        fx.run(&contact);
        let (_, pickups) = fx.run(&contact);
        assert!(pickups.is_empty());
        assert_eq!(fx.hotbar.grid().count(ItemKind::Stick), 1);
    }

    #[test]
    fn test_bus_routes_either_order_and_collapses_duplicates() {
        let mut fx = Fixture::new();
        let mut bus = CollisionBus::new();
        register_handlers(&mut bus);
        let contact = fx.contact(ItemKind::Apple);

        let mut ui = NoHooks;
        let mut rng = FixedLuck(0.5);
        let mut ctx = InteractionContext {
            world: &mut fx.world,
            player: &mut fx.player,
            hotbar: &mut fx.hotbar,
            inventory: &mut fx.inventory,
            hands: &mut fx.hands,
            ui: &mut ui,
            rng: &mut rng,
            pickups: Vec::new(),
        };

        let handled = bus.dispatch(&mut ctx, &[contact.swapped(), contact, contact]);
        assert_eq!(handled, 1);
        assert_eq!(ctx.pickups, vec![ItemKind::Apple]);
        assert_eq!(fx.hotbar.grid().count(ItemKind::Apple), 1);
    }
}
