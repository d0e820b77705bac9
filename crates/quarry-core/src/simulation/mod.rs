//! Simulation systems - mining, drops, effects

pub mod drops;
pub mod effects;
pub mod mining;

pub use drops::{Drop, Drops};
pub use effects::{Effect, EffectHooks, NoHooks};
pub use mining::{MiningOutcome, MiningResolver};
