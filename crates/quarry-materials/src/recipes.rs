//! Fixed-shape crafting recipe tables

use crate::items::{ItemKind, ToolMaterial, ToolType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which crafting surface is in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CraftKind {
    /// The 2x2 grid available anywhere
    Basic,
    /// The 3x3 grid of a crafting table
    CraftingTable,
}

impl CraftKind {
    /// Side length of the crafting grid
    pub fn grid_size(&self) -> usize {
        match self {
            CraftKind::Basic => 2,
            CraftKind::CraftingTable => 3,
        }
    }
}

impl fmt::Display for CraftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CraftKind::Basic => write!(f, "basic"),
            CraftKind::CraftingTable => write!(f, "crafting_table"),
        }
    }
}

impl FromStr for CraftKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(CraftKind::Basic),
            "crafting_table" => Ok(CraftKind::CraftingTable),
            other => Err(format!("unknown craft kind '{}'", other)),
        }
    }
}

/// Row-major grid of optional ingredients
pub type Pattern = Vec<Vec<Option<ItemKind>>>;

/// A recipe: an exact ingredient layout and what it produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub pattern: Pattern,
    pub output: ItemKind,
    pub quantity: u32,
}

impl Recipe {
    pub fn new(pattern: Pattern, output: ItemKind, quantity: u32) -> Self {
        Self {
            pattern,
            output,
            quantity,
        }
    }

    pub fn size(&self) -> usize {
        self.pattern.len()
    }

    /// Ingredient counts, one entry per distinct item kind
    pub fn ingredients(&self) -> Vec<(ItemKind, u32)> {
        let mut counts: Vec<(ItemKind, u32)> = Vec::new();
        for kind in self.pattern.iter().flatten().flatten() {
            match counts.iter_mut().find(|(k, _)| k == kind) {
                Some((_, count)) => *count += 1,
                None => counts.push((*kind, 1)),
            }
        }
        counts
    }
}

/// Recipes available on a crafting surface
pub fn recipes_for(kind: CraftKind) -> Vec<Recipe> {
    match kind {
        CraftKind::Basic => basic_recipes(),
        CraftKind::CraftingTable => table_recipes(),
    }
}

fn basic_recipes() -> Vec<Recipe> {
    const W: Option<ItemKind> = Some(ItemKind::Wood);

    vec![
        Recipe::new(vec![vec![W, W], vec![W, W]], ItemKind::CraftingTable, 1),
        Recipe::new(vec![vec![W, None], vec![W, None]], ItemKind::Stick, 4),
        Recipe::new(vec![vec![None, W], vec![None, W]], ItemKind::Stick, 4),
    ]
}

fn table_recipes() -> Vec<Recipe> {
    const W: Option<ItemKind> = Some(ItemKind::Wood);
    const S: Option<ItemKind> = Some(ItemKind::Stick);

    let mut recipes = vec![Recipe::new(
        vec![
            vec![None, None, None],
            vec![None, W, None],
            vec![None, W, None],
        ],
        ItemKind::Stick,
        16,
    )];

    for (head, material) in [
        (ItemKind::Wood, ToolMaterial::Wood),
        (ItemKind::Stone, ToolMaterial::Stone),
    ] {
        let m = Some(head);
        let tool = |tool_type| ItemKind::Tool(tool_type, material);

        recipes.push(Recipe::new(
            vec![vec![m, m, m], vec![None, S, None], vec![None, S, None]],
            tool(ToolType::Pickaxe),
            1,
        ));
        recipes.push(Recipe::new(
            vec![vec![m, m, None], vec![m, S, None], vec![None, S, None]],
            tool(ToolType::Axe),
            1,
        ));
        recipes.push(Recipe::new(
            vec![vec![None, m, None], vec![None, S, None], vec![None, S, None]],
            tool(ToolType::Shovel),
            1,
        ));
        recipes.push(Recipe::new(
            vec![vec![None, m, None], vec![None, m, None], vec![None, S, None]],
            tool(ToolType::Sword),
            1,
        ));
    }

    recipes
}
