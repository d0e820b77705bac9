//! Content definitions for Quarry
//!
//! This crate provides the static data the engine is built on:
//! - Block kinds and their break tables (BlockKind, BreakTable, BreakTables)
//! - Item kinds, tool types and tool materials (ItemKind, ToolType, ToolMaterial)
//! - Fixed-shape crafting recipes (CraftKind, Recipe)

mod blocks;
mod items;
mod recipes;

pub use blocks::{BlockKind, BreakEntry, BreakTable, BreakTables, EMBER_GENERATIONS, EntryMatch};
pub use items::{ItemKind, ToolMaterial, ToolType};
pub use recipes::{CraftKind, Pattern, Recipe, recipes_for};
