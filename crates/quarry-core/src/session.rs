//! A running game: world, player state and the fixed-tick loop

use glam::Vec2;
use quarry_materials::{CraftKind, ItemKind, Pattern};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use serde::{Deserialize, Serialize};

use crate::entity::crafting::CraftingSurface;
use crate::entity::{Hotbar, InputEvent, InputQueue, Inventory, Item, Player, Stack};
use crate::error::{InteractionError, InteractionResult};
use crate::interaction::{register_handlers, ControllerSettings, InteractionContext, InteractionController};
use crate::simulation::{Drop, EffectHooks};
use crate::world::{layout, CollisionBus, DropSystem, GridGeometry, StepContext, World};

/// World shape and physics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Grid width in cells
    pub width: i32,
    /// Grid height in cells
    pub height: i32,
    /// Side length of one cell in pixels
    pub cell_expanse: f32,
    /// Downward acceleration in pixels/sec^2
    pub gravity: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 16,
            cell_expanse: 32.0,
            gravity: 300.0,
        }
    }
}

/// Player stats and movement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub max_health: f32,
    pub max_food: f32,
    /// Velocity added per unit of movement input, pixels/sec
    pub move_speed: f32,
    /// Jump velocity in pixels/sec
    pub jump_speed: f32,
    /// Food (then health) spent per mined block
    pub mining_cost: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        let controller = ControllerSettings::default();
        Self {
            spawn_x: 250.0,
            spawn_y: 150.0,
            max_health: 20.0,
            max_food: 20.0,
            move_speed: controller.move_speed,
            jump_speed: controller.jump_speed,
            mining_cost: controller.mining_cost,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub hotbar_slots: usize,
    pub inventory_rows: usize,
    pub inventory_columns: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            hotbar_slots: 10,
            inventory_rows: 3,
            inventory_columns: 10,
        }
    }
}

/// Everything needed to start a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub inventory: InventoryConfig,
    /// Tick period in milliseconds; also the physics timestep
    pub tick_ms: u64,
    /// Seed for the session RNG (layout, luck, drops, mobs)
    pub seed: u64,
    /// Fill the world with the demo layout on start
    pub demo_layout: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            player: PlayerConfig::default(),
            inventory: InventoryConfig::default(),
            tick_ms: 15,
            seed: 0,
            demo_layout: true,
        }
    }
}

impl SessionConfig {
    pub fn dt(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            mining_cost: self.player.mining_cost,
            move_speed: self.player.move_speed,
            jump_speed: self.player.jump_speed,
        }
    }
}

/// UI state the core keeps track of: which crafting surface is open
#[derive(Debug, Default)]
pub struct UiState {
    crafting: Option<CraftingSurface>,
}

impl UiState {
    pub fn crafting(&self) -> Option<&CraftingSurface> {
        self.crafting.as_ref()
    }

    pub fn close_crafting(&mut self) {
        self.crafting = None;
    }
}

impl EffectHooks for UiState {
    fn open_crafting(&mut self, kind: CraftKind) {
        log::info!("[CRAFT] Opened {} crafting", kind);
        self.crafting = Some(CraftingSurface::open(kind));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    /// Health reached zero; the session is over
    PlayerDied,
}

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// Something visible changed
    pub redraw: bool,
    /// Items picked up this tick
    pub pickups: Vec<ItemKind>,
    pub status: SessionStatus,
}

/// Result of a crafting attempt
#[derive(Debug, Clone, PartialEq)]
pub enum CraftResult {
    NoSurface,
    /// The grid does not fit the open surface
    WrongShape,
    NoRecipe,
    /// Recipe found, ingredients missing: (kind, needed, available)
    MissingIngredients(Vec<(ItemKind, u32, u32)>),
    Crafted { kind: ItemKind, quantity: u32 },
}

pub struct Session {
    config: SessionConfig,
    world: World,
    player: Player,
    hotbar: Hotbar,
    inventory: Inventory,
    hands: Item,
    ui: UiState,
    rng: Xoshiro256StarStar,
    bus: CollisionBus,
    controller: InteractionController,
    inputs: InputQueue,
    tick: u64,
    status: SessionStatus,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let mut rng = Xoshiro256StarStar::seed_from_u64(config.seed);

        let geometry = GridGeometry::new(
            config.world.width,
            config.world.height,
            config.world.cell_expanse,
        );
        let mut world = World::new(geometry, config.world.gravity, config.dt());
        if config.demo_layout {
            layout::load_demo(&mut world, &mut rng);
        }

        let player = Player::new(config.player.max_health, config.player.max_food);
        world.add_player(&player, Vec2::new(config.player.spawn_x, config.player.spawn_y));

        let mut hotbar = Hotbar::new(config.inventory.hotbar_slots);
        hotbar.set(0, Stack::new(ItemKind::Dirt, 20));
        hotbar.set(1, Stack::new(ItemKind::Apple, 4));
        hotbar.select(0);

        let mut inventory =
            Inventory::new(config.inventory.inventory_rows, config.inventory.inventory_columns);
        inventory.set((1, 5), Stack::new(ItemKind::Dirt, 10));
        inventory.set((0, 2), Stack::new(ItemKind::Wood, 10));

        let mut bus = CollisionBus::new();
        register_handlers(&mut bus);

        let controller = InteractionController::new(config.controller_settings());

        log::info!(
            "[SESSION] Started (seed {}, {} blocks, {} mobs)",
            config.seed,
            world.block_count(),
            world.mob_count()
        );

        Self {
            config,
            world,
            player,
            hotbar,
            inventory,
            hands: Item::hands(),
            ui: UiState::default(),
            rng,
            bus,
            controller,
            inputs: InputQueue::new(),
            tick: 0,
            status: SessionStatus::Running,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn hotbar(&self) -> &Hotbar {
        &self.hotbar
    }

    pub fn hotbar_mut(&mut self) -> &mut Hotbar {
        &mut self.hotbar
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Queue an input event for the next tick
    pub fn push_input(&mut self, event: InputEvent) {
        self.inputs.push(event);
    }

    /// Run a closure against the controller with a fully borrowed context.
    /// Pickups made by the closure are discarded
    pub fn interact<R>(
        &mut self,
        f: impl FnOnce(&mut InteractionController, &mut InteractionContext<'_>) -> R,
    ) -> R {
        let mut ctx = InteractionContext {
            world: &mut self.world,
            player: &mut self.player,
            hotbar: &mut self.hotbar,
            inventory: &mut self.inventory,
            hands: &mut self.hands,
            ui: &mut self.ui,
            rng: &mut self.rng,
            pickups: Vec::new(),
        };
        f(&mut self.controller, &mut ctx)
    }

    /// Advance one tick: physics, collision handlers, queued input, target
    /// check, death check. Recoverable interaction errors are logged; fatal
    /// ones end the tick early and are returned
    pub fn tick(&mut self) -> InteractionResult<TickReport> {
        if self.status == SessionStatus::PlayerDied {
            return Ok(self.report(false, Vec::new()));
        }

        self.tick += 1;

        let contacts = self.world.step(&mut StepContext { rng: &mut self.rng });
        let events = self.inputs.drain();

        let mut ctx = InteractionContext {
            world: &mut self.world,
            player: &mut self.player,
            hotbar: &mut self.hotbar,
            inventory: &mut self.inventory,
            hands: &mut self.hands,
            ui: &mut self.ui,
            rng: &mut self.rng,
            pickups: Vec::new(),
        };

        let handled = self.bus.dispatch(&mut ctx, &contacts);

        for event in &events {
            if let Err(err) = self.controller.handle(&mut ctx, event) {
                if err.is_fatal() {
                    log::error!("[SESSION] Tick {}: {}", self.tick, err);
                    return Err(err);
                }
                log::warn!("[SESSION] Tick {}: {}", self.tick, err);
            }
        }

        self.controller.check_target(&ctx)?;
        let pickups = ctx.pickups;

        if self.player.is_dead() {
            log::info!("[SESSION] Player died after {} ticks", self.tick);
            self.status = SessionStatus::PlayerDied;
        }

        let redraw = handled > 0 || !events.is_empty() || self.tick == 1;
        Ok(self.report(redraw, pickups))
    }

    fn report(&self, redraw: bool, pickups: Vec<ItemKind>) -> TickReport {
        TickReport {
            tick: self.tick,
            redraw,
            pickups,
            status: self.status,
        }
    }

    fn available(&self, kind: ItemKind) -> u32 {
        self.hotbar.grid().count(kind) + self.inventory.count(kind)
    }

    /// Craft from a grid on the open crafting surface. Ingredients come out
    /// of the hotbar first, then the inventory; the output goes into the
    /// hotbar, then the inventory, and whatever does not fit is dropped at
    /// the player's feet
    pub fn craft(&mut self, grid: &Pattern) -> InteractionResult<CraftResult> {
        let Some(surface) = self.ui.crafting() else {
            return Ok(CraftResult::NoSurface);
        };
        if !surface.accepts(grid) {
            return Ok(CraftResult::WrongShape);
        }
        let Some(recipe) = surface.crafter().recipe_for(grid) else {
            return Ok(CraftResult::NoRecipe);
        };
        let (output, quantity) = (recipe.output, recipe.quantity);
        let ingredients = recipe.ingredients();

        let missing: Vec<(ItemKind, u32, u32)> = ingredients
            .iter()
            .map(|&(kind, needed)| (kind, needed, self.available(kind)))
            .filter(|&(_, needed, available)| available < needed)
            .collect();
        if !missing.is_empty() {
            log::debug!("[CRAFT] Missing ingredients for {}: {:?}", output, missing);
            return Ok(CraftResult::MissingIngredients(missing));
        }

        for (kind, needed) in ingredients {
            let removed = self.hotbar.grid_mut().remove(kind, needed);
            self.inventory.remove(kind, needed - removed);
        }

        let leftover = match self.hotbar.add_stack(Stack::new(output, quantity)) {
            Ok(()) => None,
            Err(stack) => self.inventory.add_stack(stack).err(),
        };

        if let Some(stack) = leftover {
            log::warn!(
                "[CRAFT] {}; dropping {} on the ground",
                InteractionError::InventoryFull(output),
                stack.quantity()
            );
            let origin = self.world.player_position()?;
            let drops: Vec<Drop> = (0..stack.quantity()).map(|_| Drop::Item(output)).collect();
            DropSystem::scatter(&mut self.world, origin, &drops, &mut self.rng)?;
        }

        log::info!("[CRAFT] Crafted {} {}", quantity, output);
        Ok(CraftResult::Crafted {
            kind: output,
            quantity,
        })
    }
}
