//! Interaction controller: input events to mining, using, placing and effects

pub mod pickup;

use glam::{IVec2, Vec2};
use quarry_materials::{BlockKind, ItemKind};
use serde::{Deserialize, Serialize};

use crate::entity::{Hotbar, InputEvent, Inventory, Item, Player};
use crate::error::{InteractionError, InteractionResult};
use crate::simulation::{effects, Drop, Effect, EffectHooks, MiningOutcome, MiningResolver};
use crate::world::{positions_in_range, DropSystem, Occupant, ScatterReport, World, WorldError, WorldRng};

pub use pickup::{pick_up_item, register_handlers};

/// What placing an item does
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Block(BlockKind),
    Effect(Effect),
}

/// Reduce an item's placement drops to the single thing placing it does.
/// `None` means the item is not placeable. More than one drop, or an item
/// drop, is fatal
pub fn placement(drops: &[Drop]) -> InteractionResult<Option<Placement>> {
    match drops {
        [] => Ok(None),
        [Drop::Block(block)] => Ok(Some(Placement::Block(*block))),
        [Drop::Effect(effect)] => Ok(Some(Placement::Effect(effect.clone()))),
        [drop @ Drop::Item(_)] => Err(InteractionError::UnknownDropCategory(drop.category().to_string())),
        _ => Err(InteractionError::MultiDropPlacement(drops.len())),
    }
}

/// Everything an interaction may touch, borrowed for the duration of one call
pub struct InteractionContext<'a> {
    pub world: &'a mut World,
    pub player: &'a mut Player,
    pub hotbar: &'a mut Hotbar,
    pub inventory: &'a mut Inventory,
    /// Bare hands, used whenever the held item cannot attack
    pub hands: &'a mut Item,
    pub ui: &'a mut dyn EffectHooks,
    pub rng: &'a mut dyn WorldRng,
    /// Items picked up by collision handlers during this context's lifetime
    pub pickups: Vec<ItemKind>,
}

impl InteractionContext<'_> {
    /// The held item, or hands when nothing is selected
    pub fn active_item(&self) -> &Item {
        self.hotbar
            .selected_stack()
            .map(|stack| stack.item())
            .unwrap_or(&*self.hands)
    }
}

/// Tuning for the controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerSettings {
    /// Food (or health, once food is gone) spent per mined block
    pub mining_cost: f32,
    /// Velocity added per unit of movement input, px/s
    pub move_speed: f32,
    /// Upward velocity added by a jump, px/s
    pub jump_speed: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            mining_cost: 0.5,
            move_speed: 80.0,
            jump_speed: 160.0,
        }
    }
}

/// Result of a left click
#[derive(Debug)]
pub enum MineResult {
    /// The cursor is further away than the active item reaches
    OutOfRange,
    /// Nothing to mine under the cursor
    NoBlock,
    /// A swing landed on a block
    Struck {
        kind: BlockKind,
        cell: IVec2,
        outcome: MiningOutcome,
        /// Present once the block broke
        scatter: Option<ScatterReport>,
    },
}

/// Result of using the thing under the cursor
#[derive(Debug, Clone, PartialEq)]
pub enum UseResult {
    Nothing,
    NoEffect(Occupant),
    Applied(Occupant, Effect),
}

/// Result of placing the held item
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceResult {
    NothingSelected,
    /// The held item has nothing to place; it is not consumed
    NotPlaceable(ItemKind),
    PlacedBlock { kind: BlockKind, cell: IVec2 },
    AppliedEffect(Effect),
}

/// Per-tick orchestrator composing mining, drops, effects and placement.
/// Holds no physics state; everything goes through the world
#[derive(Debug, Clone)]
pub struct InteractionController {
    settings: ControllerSettings,
    resolver: MiningResolver,
    target: Vec2,
    target_in_range: bool,
}

impl InteractionController {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            settings,
            resolver: MiningResolver::new(),
            target: Vec2::ZERO,
            target_in_range: false,
        }
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Cursor position in pixels
    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    pub fn target_in_range(&self) -> bool {
        self.target_in_range
    }

    /// Recompute whether the cursor is within reach of the active item
    pub fn check_target(&mut self, ctx: &InteractionContext<'_>) -> InteractionResult<bool> {
        let player = ctx.world.player_position()?;
        let reach = ctx.active_item().attack_range() * ctx.world.cell_expanse();
        self.target_in_range = positions_in_range(player, self.target, reach);
        Ok(self.target_in_range)
    }

    /// Handle one queued input event
    pub fn handle(&mut self, ctx: &mut InteractionContext<'_>, event: &InputEvent) -> InteractionResult<()> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.set_target(Vec2::new(*x, *y));
                self.check_target(ctx)?;
            }
            InputEvent::PrimaryClick => {
                let result = self.resolve_mine(ctx)?;
                log::debug!("[MINING] {:?}", result);
            }
            InputEvent::SecondaryClick => match ctx.world.thing_at(self.target) {
                Some(_) => {
                    let result = self.resolve_use(ctx)?;
                    log::debug!("[EFFECT] {:?}", result);
                }
                None => {
                    let result = self.resolve_place(ctx)?;
                    log::debug!("[PLACE] {:?}", result);
                }
            },
            InputEvent::Move { dx, dy } => {
                let velocity = ctx.world.player_velocity()?;
                let nudge = Vec2::new(*dx, *dy) * self.settings.move_speed;
                ctx.world.set_player_velocity(velocity + nudge)?;
            }
            InputEvent::Jump => {
                let velocity = ctx.world.player_velocity()?;
                ctx.world
                    .set_player_velocity(velocity - Vec2::new(0.0, self.settings.jump_speed))?;
            }
            InputEvent::SelectHotbar(key) => {
                let slot = InputEvent::hotbar_slot(*key);
                ctx.hotbar.toggle_selection(slot);
                log::debug!("Hotbar selection: {:?}", ctx.hotbar.selected());
            }
            InputEvent::TriggerEffect(symbol) => {
                self.dispatch_effect(ctx, symbol)?;
            }
        }
        Ok(())
    }

    /// Mine the block under the cursor with a fresh luck roll
    pub fn resolve_mine(&mut self, ctx: &mut InteractionContext<'_>) -> InteractionResult<MineResult> {
        let luck = ctx.rng.gen_luck();
        self.resolve_mine_with_luck(ctx, luck)
    }

    /// Mine the block under the cursor. When it breaks: pay the mining cost,
    /// remove the block and scatter its drops around the cell
    pub fn resolve_mine_with_luck(
        &mut self,
        ctx: &mut InteractionContext<'_>,
        luck: f32,
    ) -> InteractionResult<MineResult> {
        if !self.check_target(ctx)? {
            return Ok(MineResult::OutOfRange);
        }

        let item = match ctx.hotbar.selected_stack_mut() {
            Some(stack) if stack.item().can_attack() => stack.item_mut(),
            _ => &mut *ctx.hands,
        };
        let Some(block) = ctx.world.block_at_mut(self.target) else {
            return Ok(MineResult::NoBlock);
        };

        let outcome = self.resolver.resolve(block, item, luck)?;
        let kind = block.kind();
        let cell = block.cell();

        if !outcome.mined {
            return Ok(MineResult::Struck {
                kind,
                cell,
                outcome,
                scatter: None,
            });
        }

        ctx.player.pay_mining_cost(self.settings.mining_cost);

        let Some(block) = ctx.world.remove_block(cell) else {
            return Err(InteractionError::AlreadyMined { kind, cell });
        };
        let drops = block.drops(luck, outcome.tool_suitable);
        log::info!("[MINING] Mined {} at {} ({} drops)", kind, cell, drops.len());

        let origin = ctx.world.grid_to_xy_centre(cell);
        let scatter = DropSystem::scatter(ctx.world, origin, &drops, &mut *ctx.rng)?;

        Ok(MineResult::Struck {
            kind,
            cell,
            outcome,
            scatter: Some(scatter),
        })
    }

    /// Use the block, mob or dropped item under the cursor
    pub fn resolve_use(&mut self, ctx: &mut InteractionContext<'_>) -> InteractionResult<UseResult> {
        let Some(occupant) = ctx.world.thing_at(self.target) else {
            return Ok(UseResult::Nothing);
        };

        let effect = match occupant {
            Occupant::Block(cell) => ctx.world.block_in_cell(cell).and_then(|b| b.use_block()),
            Occupant::Mob(id) => ctx.world.mob(id).and_then(|m| m.use_mob()),
            Occupant::Item(id) => ctx.world.item(id).and_then(|d| d.use_item()),
        };

        match effect {
            Some(effect) => {
                log::debug!("[EFFECT] Used {:?} and got {}", occupant, effect);
                effects::apply(&effect, ctx.player, ctx.ui);
                Ok(UseResult::Applied(occupant, effect))
            }
            None => Ok(UseResult::NoEffect(occupant)),
        }
    }

    /// Place the held item at the cursor. Blocks go into the cursor's cell,
    /// effects (food) are applied to the player. Nothing is consumed unless
    /// the placement goes through
    pub fn resolve_place(&mut self, ctx: &mut InteractionContext<'_>) -> InteractionResult<PlaceResult> {
        let Some(stack) = ctx.hotbar.selected_stack() else {
            return Ok(PlaceResult::NothingSelected);
        };

        let kind = stack.item().kind();
        let Some(placed) = placement(&stack.item().place())? else {
            log::debug!("[PLACE] {} is not placeable", kind);
            return Ok(PlaceResult::NotPlaceable(kind));
        };

        match placed {
            Placement::Block(block) => {
                let cell = ctx.world.xy_to_grid(self.target);
                ctx.world.check_free_cell(cell).map_err(|err| match err {
                    WorldError::CellOccupied(cell) => InteractionError::CellOccupied(cell),
                    WorldError::OutOfBounds(cell) => InteractionError::OutOfBounds(cell),
                    other => other.into(),
                })?;

                ctx.hotbar.take_one_selected();
                ctx.world.add_block_to_grid(block, cell)?;
                log::debug!("[PLACE] Placed {} at {}", block, cell);
                Ok(PlaceResult::PlacedBlock { kind: block, cell })
            }
            Placement::Effect(effect) => {
                ctx.hotbar.take_one_selected();
                effects::apply(&effect, ctx.player, ctx.ui);
                Ok(PlaceResult::AppliedEffect(effect))
            }
        }
    }

    /// Parse and apply a symbolic effect, e.g. from a key binding
    pub fn dispatch_effect(
        &mut self,
        ctx: &mut InteractionContext<'_>,
        symbol: &str,
    ) -> InteractionResult<Effect> {
        effects::dispatch(symbol, ctx.player, ctx.ui)
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(ControllerSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Stack;
    use crate::simulation::NoHooks;
    use crate::world::{FixedLuck, GridGeometry};
    use quarry_materials::{CraftKind, ToolMaterial, ToolType};

    struct Fixture {
        world: World,
        player: Player,
        hotbar: Hotbar,
        inventory: Inventory,
        hands: Item,
        controller: InteractionController,
    }

    impl Fixture {
        fn new() -> Self {
            let mut world = World::new(GridGeometry::default(), 300.0, 0.015);
            let player = Player::default();
            world.add_player(&player, Vec2::new(100.0, 100.0));
            let mut hotbar = Hotbar::new(10);
            hotbar.select(0);
            Self {
                world,
                player,
                hotbar,
                inventory: Inventory::new(3, 10),
                hands: Item::hands(),
                controller: InteractionController::default(),
            }
        }

        fn with<R>(
            &mut self,
            f: impl FnOnce(&mut InteractionController, &mut InteractionContext<'_>) -> R,
        ) -> R {
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
            f(&mut self.controller, &mut ctx)
        }
    }

    #[test]
    fn test_target_range_follows_active_item() {
        let mut fx = Fixture::new();
        // 80 px away: beyond 2 cells (64 px), within 3 cells (96 px)
        fx.controller.set_target(Vec2::new(180.0, 100.0));

        assert!(!fx.with(|c, ctx| c.check_target(ctx)).unwrap());

        fx.hotbar.set(0, Stack::new(Item::tool(ToolType::Pickaxe, ToolMaterial::Wood), 1));
        assert!(fx.with(|c, ctx| c.check_target(ctx)).unwrap());
    }

    #[test]
    fn test_mine_out_of_range_does_nothing() {
        let mut fx = Fixture::new();
        fx.world.add_block_to_grid(BlockKind::Dirt, IVec2::new(10, 3)).unwrap();
        fx.controller.set_target(Vec2::new(336.0, 112.0));

        let result = fx.with(|c, ctx| c.resolve_mine_with_luck(ctx, 0.5)).unwrap();
        assert!(matches!(result, MineResult::OutOfRange));
        assert_eq!(fx.world.block_in_cell(IVec2::new(10, 3)).unwrap().hitpoints(), 4.0);
    }

    #[test]
    fn test_mine_with_non_attacking_item_uses_hands() {
        let mut fx = Fixture::new();
        fx.hotbar.set(0, Stack::new(ItemKind::Dirt, 5));
        fx.world.add_block_to_grid(BlockKind::Leaves, IVec2::new(3, 3)).unwrap();
        fx.controller.set_target(Vec2::new(112.0, 112.0));

        // Hands at luck 0.9 deal 1.2 against one hitpoint; high luck yields a stick
        let result = fx.with(|c, ctx| c.resolve_mine_with_luck(ctx, 0.9)).unwrap();
        let MineResult::Struck { outcome, scatter, .. } = result else {
            panic!("expected a strike");
        };
        assert!(outcome.mined);
        assert_eq!(scatter.unwrap().items.len(), 1);
        assert_eq!(fx.world.items().next().unwrap().item.kind(), ItemKind::Stick);
        assert_eq!(fx.world.item_count(), 1);
        assert_eq!(fx.hotbar.get(0).unwrap().quantity(), 5);
        assert_eq!(fx.player.food.current, 19.5);
    }

    #[test]
    fn test_mining_cost_charged_once_per_block() {
        let mut fx = Fixture::new();
        fx.world.add_block_to_grid(BlockKind::Dirt, IVec2::new(3, 3)).unwrap();
        fx.controller.set_target(Vec2::new(112.0, 112.0));

        // Hands on dirt at luck 0.5 deal 1 per swing; 4 swings break it
        for _ in 0..3 {
            let result = fx.with(|c, ctx| c.resolve_mine_with_luck(ctx, 0.5)).unwrap();
            assert!(matches!(result, MineResult::Struck { scatter: None, .. }));
        }
        assert_eq!(fx.player.food.current, 20.0);

        fx.with(|c, ctx| c.resolve_mine_with_luck(ctx, 0.5)).unwrap();
        assert_eq!(fx.player.food.current, 19.5);
        assert!(fx.world.block_in_cell(IVec2::new(3, 3)).is_none());
    }

    #[test]
    fn test_ember_reignites_in_place() {
        let mut fx = Fixture::new();
        fx.world.add_block_to_grid(BlockKind::Ember(0), IVec2::new(3, 3)).unwrap();
        fx.controller.set_target(Vec2::new(112.0, 112.0));

        fx.with(|c, ctx| c.resolve_mine_with_luck(ctx, 0.9)).unwrap();
        assert_eq!(
            fx.world.block_in_cell(IVec2::new(3, 3)).unwrap().kind(),
            BlockKind::Ember(1)
        );
    }

    #[test]
    fn test_place_block_consumes_one() {
        let mut fx = Fixture::new();
        fx.hotbar.set(0, Stack::new(ItemKind::Dirt, 1));
        fx.controller.set_target(Vec2::new(150.0, 70.0));

        let result = fx.with(|c, ctx| c.resolve_place(ctx)).unwrap();
        assert_eq!(
            result,
            PlaceResult::PlacedBlock {
                kind: BlockKind::Dirt,
                cell: IVec2::new(4, 2)
            }
        );
        assert!(fx.hotbar.get(0).is_none());
    }

    #[test]
    fn test_place_into_occupied_cell_changes_nothing() {
        let mut fx = Fixture::new();
        fx.hotbar.set(0, Stack::new(ItemKind::Stone, 3));
        fx.world.add_block_to_grid(BlockKind::Wood, IVec2::new(4, 2)).unwrap();
        fx.controller.set_target(Vec2::new(150.0, 70.0));

        let err = fx.with(|c, ctx| c.resolve_place(ctx)).unwrap_err();
        assert_eq!(err, InteractionError::CellOccupied(IVec2::new(4, 2)));
        assert!(!err.is_fatal());
        assert_eq!(fx.hotbar.get(0).unwrap().quantity(), 3);
        assert_eq!(fx.world.block_in_cell(IVec2::new(4, 2)).unwrap().kind(), BlockKind::Wood);
    }

    #[test]
    fn test_place_food_eats_it() {
        let mut fx = Fixture::new();
        fx.player.food.set(10.0);
        fx.hotbar.set(0, Stack::new(ItemKind::Apple, 4));

        let result = fx.with(|c, ctx| c.resolve_place(ctx)).unwrap();
        assert!(matches!(result, PlaceResult::AppliedEffect(_)));
        assert_eq!(fx.player.food.current, 12.0);
        assert_eq!(fx.hotbar.get(0).unwrap().quantity(), 3);
    }

    #[test]
    fn test_place_non_placeable_keeps_item() {
        let mut fx = Fixture::new();
        fx.hotbar.set(0, Stack::new(ItemKind::Stick, 2));

        let result = fx.with(|c, ctx| c.resolve_place(ctx)).unwrap();
        assert_eq!(result, PlaceResult::NotPlaceable(ItemKind::Stick));
        assert_eq!(fx.hotbar.get(0).unwrap().quantity(), 2);

        fx.hotbar.deselect();
        let result = fx.with(|c, ctx| c.resolve_place(ctx)).unwrap();
        assert_eq!(result, PlaceResult::NothingSelected);
    }

    #[test]
    fn test_use_crafting_table_opens_table() {
        struct Recorder(Vec<CraftKind>);
        impl EffectHooks for Recorder {
            fn open_crafting(&mut self, kind: CraftKind) {
                self.0.push(kind);
            }
        }

        let mut fx = Fixture::new();
        fx.world.add_block_to_grid(BlockKind::CraftingTable, IVec2::new(8, 8)).unwrap();
        fx.controller.set_target(Vec2::new(270.0, 270.0));

        let mut ui = Recorder(Vec::new());
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
        let result = fx.controller.resolve_use(&mut ctx).unwrap();
        assert_eq!(
            result,
            UseResult::Applied(
                Occupant::Block(IVec2::new(8, 8)),
                Effect::Crafting(CraftKind::CraftingTable)
            )
        );
        assert_eq!(ui.0, vec![CraftKind::CraftingTable]);
    }

    #[test]
    fn test_select_hotbar_toggles() {
        let mut fx = Fixture::new();
        fx.with(|c, ctx| c.handle(ctx, &InputEvent::SelectHotbar(3))).unwrap();
        assert_eq!(fx.hotbar.selected(), Some(2));
        fx.with(|c, ctx| c.handle(ctx, &InputEvent::SelectHotbar(3))).unwrap();
        assert_eq!(fx.hotbar.selected(), None);
        fx.with(|c, ctx| c.handle(ctx, &InputEvent::SelectHotbar(0))).unwrap();
        assert_eq!(fx.hotbar.selected(), Some(9));
    }

    #[test]
    fn test_move_and_jump_adjust_velocity() {
        let mut fx = Fixture::new();
        fx.with(|c, ctx| c.handle(ctx, &InputEvent::Move { dx: 1.0, dy: 0.0 })).unwrap();
        fx.with(|c, ctx| c.handle(ctx, &InputEvent::Jump)).unwrap();
        assert_eq!(fx.world.player_velocity().unwrap(), Vec2::new(80.0, -160.0));
    }

    #[test]
    fn test_trigger_unknown_effect_is_fatal() {
        let mut fx = Fixture::new();
        let err = fx
            .with(|c, ctx| c.handle(ctx, &InputEvent::TriggerEffect("mana 3".into())))
            .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_placement_takes_exactly_one_block_or_effect() {
        use crate::entity::StatKind;

        assert_eq!(placement(&[]).unwrap(), None);
        assert_eq!(
            placement(&[Drop::Block(BlockKind::Dirt)]).unwrap(),
            Some(Placement::Block(BlockKind::Dirt))
        );
        let apple = Effect::StatDelta(StatKind::Food, 2.0);
        assert_eq!(
            placement(&[Drop::Effect(apple.clone())]).unwrap(),
            Some(Placement::Effect(apple))
        );
    }

    #[test]
    fn test_placement_rejects_many_drops_and_item_drops() {
        let err = placement(&[Drop::Block(BlockKind::Dirt), Drop::Block(BlockKind::Stone)]).unwrap_err();
        assert_eq!(err, InteractionError::MultiDropPlacement(2));
        assert!(err.is_fatal());

        let err = placement(&[Drop::Item(ItemKind::Stick)]).unwrap_err();
        assert_eq!(err, InteractionError::UnknownDropCategory("item".into()));
        assert!(err.is_fatal());
    }
}
