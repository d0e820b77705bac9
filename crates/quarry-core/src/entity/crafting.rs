//! Fixed-shape grid crafting

use quarry_materials::{recipes_for, CraftKind, ItemKind, Pattern, Recipe};

use super::inventory::Stack;

/// Matches crafting grids exactly against a fixed recipe list
#[derive(Debug, Clone)]
pub struct GridCrafter {
    kind: CraftKind,
    recipes: Vec<Recipe>,
}

impl GridCrafter {
    pub fn new(kind: CraftKind) -> Self {
        let recipes = recipes_for(kind);
        log::debug!("[CRAFT] {} crafter with {} recipes", kind, recipes.len());
        Self { kind, recipes }
    }

    pub fn kind(&self) -> CraftKind {
        self.kind
    }

    pub fn grid_size(&self) -> usize {
        self.kind.grid_size()
    }

    /// Find the recipe whose pattern matches the grid cell for cell
    pub fn recipe_for(&self, grid: &Pattern) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.pattern == *grid)
    }

    /// The stack a grid would produce, if any recipe matches
    pub fn craft(&self, grid: &Pattern) -> Option<Stack> {
        self.recipe_for(grid)
            .map(|recipe| Stack::new(recipe.output, recipe.quantity))
    }

    /// An empty grid of the right size for this crafter
    pub fn empty_grid(&self) -> Pattern {
        let size = self.grid_size();
        vec![vec![None; size]; size]
    }
}

/// A crafting surface the player currently has open
#[derive(Debug, Clone)]
pub struct CraftingSurface {
    crafter: GridCrafter,
}

impl CraftingSurface {
    pub fn open(kind: CraftKind) -> Self {
        Self {
            crafter: GridCrafter::new(kind),
        }
    }

    pub fn kind(&self) -> CraftKind {
        self.crafter.kind()
    }

    pub fn crafter(&self) -> &GridCrafter {
        &self.crafter
    }

    /// Whether a grid has the shape this surface accepts
    pub fn accepts(&self, grid: &Pattern) -> bool {
        let size = self.crafter.grid_size();
        grid.len() == size && grid.iter().all(|row| row.len() == size)
    }
}

/// Shorthand for building patterns in tests and scripts
pub fn pattern(rows: &[&[Option<ItemKind>]]) -> Pattern {
    rows.iter().map(|row| row.to_vec()).collect()
}
