//! Runner configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `quarry.ron` in the working directory, or the file given with `--config`
//! 3. Environment variables prefixed with `QUARRY_`
//!
//! Example environment variable: `QUARRY_RUNNER__SEED=7`

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use quarry_core::session::{InventoryConfig, PlayerConfig, WorldConfig};
use quarry_core::SessionConfig;
use serde::{Deserialize, Serialize};

/// Main runner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameConfig {
    #[serde(default)]
    pub world: WorldConfig,

    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub inventory: InventoryConfig,

    #[serde(default)]
    pub runner: RunnerConfig,
}

/// Tick loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Tick period in milliseconds
    pub tick_ms: u64,
    /// Seed of the first session; restarts count up from it
    pub seed: u64,
    /// Total ticks to run across all sessions
    pub ticks: u64,
    /// Fresh sessions started after the player dies
    pub max_restarts: u32,
    /// Load the demo layout into each new world
    pub demo_layout: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_ms: 15,
            seed: 0,
            ticks: 600,
            max_restarts: 3,
            demo_layout: true,
        }
    }
}

impl GameConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `path` if given (must exist), otherwise `quarry.ron` (if exists)
    /// 3. Environment variables prefixed with `QUARRY_` (highest priority)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Ron).required(true),
            None => File::with_name("quarry").format(FileFormat::Ron).required(false),
        };

        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("world.width", 32_i64)?
            .set_default("world.height", 16_i64)?
            .set_default("world.cell_expanse", 32.0)?
            .set_default("world.gravity", 300.0)?
            .set_default("player.spawn_x", 250.0)?
            .set_default("player.spawn_y", 150.0)?
            .set_default("player.max_health", 20.0)?
            .set_default("player.max_food", 20.0)?
            .set_default("player.move_speed", 80.0)?
            .set_default("player.jump_speed", 160.0)?
            .set_default("player.mining_cost", 0.5)?
            .set_default("inventory.hotbar_slots", 10_i64)?
            .set_default("inventory.inventory_rows", 3_i64)?
            .set_default("inventory.inventory_columns", 10_i64)?
            .set_default("runner.tick_ms", 15_i64)?
            .set_default("runner.seed", 0_i64)?
            .set_default("runner.ticks", 600_i64)?
            .set_default("runner.max_restarts", 3_i64)?
            .set_default("runner.demo_layout", true)?
            // Layer 2: Config file
            .add_source(file)
            // Layer 3: Environment variables (QUARRY_RUNNER__SEED, etc.)
            .add_source(
                Environment::with_prefix("QUARRY")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Session settings for the given seed
    pub fn session_config(&self, seed: u64) -> SessionConfig {
        SessionConfig {
            world: self.world.clone(),
            player: self.player.clone(),
            inventory: self.inventory.clone(),
            tick_ms: self.runner.tick_ms,
            seed,
            demo_layout: self.runner.demo_layout,
        }
    }
}
