//! Scripted input playback

use std::path::Path;

use anyhow::{Context, Result};
use quarry_core::entity::InputEvent;
use quarry_materials::{ItemKind, Pattern};
use serde::{Deserialize, Serialize};

/// Something to do at a given tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Queue an input event before the tick runs
    Input(InputEvent),
    /// Craft from a grid on the open crafting surface
    Craft(Pattern),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Session tick the action belongs to (1 = first tick)
    pub tick: u64,
    pub action: Action,
}

/// Timed actions, replayed from the start of every session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to parse script {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut script: Script = ron::from_str(text)?;
        script.steps.sort_by_key(|step| step.tick);
        Ok(script)
    }

    /// Actions for one tick, in script order
    pub fn actions_at(&self, tick: u64) -> impl Iterator<Item = &Action> {
        self.steps
            .iter()
            .filter(move |step| step.tick == tick)
            .map(|step| &step.action)
    }

    pub fn last_tick(&self) -> u64 {
        self.steps.iter().map(|step| step.tick).max().unwrap_or(0)
    }

    /// Built-in walkthrough of the demo layout
    pub fn demo() -> Self {
        use Action::{Craft, Input};
        use InputEvent::*;

        let wood = Some(ItemKind::Wood);
        let mut steps = vec![
            // Wait for the player to land, then dig into the ground below
            (60, Input(CursorMoved { x: 240.0, y: 304.0 })),
            // Eat an apple, then put a dirt block in the air
            (90, Input(SelectHotbar(2))),
            (92, Input(CursorMoved { x: 200.0, y: 240.0 })),
            (93, Input(SecondaryClick)),
            (100, Input(SelectHotbar(1))),
            (102, Input(SecondaryClick)),
            (110, Input(TriggerEffect("crafting basic".into()))),
            (111, Craft(vec![vec![wood, wood], vec![wood, wood]])),
            (120, Input(CursorMoved { x: 272.0, y: 272.0 })),
            (121, Input(SecondaryClick)),
            (125, Input(Move { dx: 1.0, dy: 0.0 })),
            (130, Input(Jump)),
        ];
        steps.extend((64..80).step_by(2).map(|tick| (tick, Input(PrimaryClick))));

        let mut script = Script {
            steps: steps
                .into_iter()
                .map(|(tick, action)| Step { tick, action })
                .collect(),
        };
        script.steps.sort_by_key(|step| step.tick);
        script
    }
}
