use serde::{Deserialize, Serialize};

use super::item::Item;
use quarry_materials::ItemKind;

/// An item paired with how many of it there are
/// Invariant: quantity > 0 while the stack exists; a grid drops stacks that reach zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    item: Item,
    quantity: u32,
}

impl Stack {
    /// Create a new stack
    pub fn new(item: impl Into<Item>, quantity: u32) -> Self {
        debug_assert!(quantity > 0, "stacks must hold at least one item");
        Stack {
            item: item.into(),
            quantity: quantity.max(1),
        }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn item_mut(&mut self) -> &mut Item {
        &mut self.item
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn max_stack_size(&self) -> u32 {
        self.item.kind().max_stack_size()
    }

    /// Check if this stack is full
    pub fn is_full(&self) -> bool {
        self.quantity >= self.max_stack_size()
    }

    /// Add items to this stack, returns amount that didn't fit
    pub fn add(&mut self, amount: u32) -> u32 {
        let space = self.max_stack_size().saturating_sub(self.quantity);
        let to_add = amount.min(space);
        self.quantity += to_add;
        amount - to_add
    }

    /// Remove items from this stack, returns amount actually removed.
    /// The caller owns removing the stack once it is empty
    pub fn subtract(&mut self, amount: u32) -> u32 {
        let to_remove = amount.min(self.quantity);
        self.quantity -= to_remove;
        to_remove
    }

    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}

/// A rows x columns grid of optional stacks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemGrid {
    rows: usize,
    columns: usize,
    slots: Vec<Option<Stack>>,
}

impl ItemGrid {
    pub fn new(rows: usize, columns: usize) -> Self {
        ItemGrid {
            rows,
            columns,
            slots: vec![None; rows * columns],
        }
    }

    /// (rows, columns)
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    fn index(&self, (row, column): (usize, usize)) -> Option<usize> {
        (row < self.rows && column < self.columns).then_some(row * self.columns + column)
    }

    pub fn get(&self, position: (usize, usize)) -> Option<&Stack> {
        self.index(position).and_then(|i| self.slots[i].as_ref())
    }

    pub fn get_mut(&mut self, position: (usize, usize)) -> Option<&mut Stack> {
        self.index(position).and_then(|i| self.slots[i].as_mut())
    }

    /// Put a stack into a slot, returning whatever was there before.
    /// Out of range positions hand the stack straight back
    pub fn set(&mut self, position: (usize, usize), stack: Stack) -> Option<Stack> {
        match self.index(position) {
            Some(i) => self.slots[i].replace(stack),
            None => Some(stack),
        }
    }

    /// Empty a slot
    pub fn take(&mut self, position: (usize, usize)) -> Option<Stack> {
        self.index(position).and_then(|i| self.slots[i].take())
    }

    /// Try to add a single item: first onto a matching stack with room, then
    /// into the first empty slot. Hands the item back when there is no room
    pub fn add_item(&mut self, item: Item) -> Result<(), Item> {
        self.add_stack(Stack::new(item, 1))
            .map_err(|leftover| leftover.item)
    }

    /// Try to add a whole stack, merging into matching stacks first.
    /// On failure the part that did not fit is handed back
    pub fn add_stack(&mut self, mut stack: Stack) -> Result<(), Stack> {
        for existing in self.slots.iter_mut().flatten() {
            if existing.item.stacks_with(&stack.item) && !existing.is_full() {
                stack.quantity = existing.add(stack.quantity);
                if stack.quantity == 0 {
                    return Ok(());
                }
            }
        }

        while stack.quantity > 0 {
            let Some(index) = self.slots.iter().position(|slot| slot.is_none()) else {
                return Err(stack);
            };
            let to_place = stack.quantity.min(stack.max_stack_size());
            stack.quantity -= to_place;
            self.slots[index] = Some(Stack {
                item: stack.item.clone(),
                quantity: to_place,
            });
        }

        Ok(())
    }

    /// Count how many of a specific item kind are in the grid
    pub fn count(&self, kind: ItemKind) -> u32 {
        self.stacks()
            .filter(|stack| stack.item.kind() == kind)
            .map(|stack| stack.quantity)
            .sum()
    }

    /// Remove up to `amount` items of a kind, returns amount actually removed
    pub fn remove(&mut self, kind: ItemKind, mut amount: u32) -> u32 {
        let mut removed = 0;

        for slot in &mut self.slots {
            if amount == 0 {
                break;
            }
            if let Some(stack) = slot {
                if stack.item.kind() == kind {
                    let taken = stack.subtract(amount);
                    removed += taken;
                    amount -= taken;

                    if stack.is_empty() {
                        *slot = None;
                    }
                }
            }
        }

        removed
    }

    /// Iterate over occupied slots with their positions
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Stack)> {
        let columns = self.columns;
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(i, slot)| slot.as_ref().map(|s| ((i / columns, i % columns), s)))
    }

    pub fn stacks(&self) -> impl Iterator<Item = &Stack> {
        self.slots.iter().flatten()
    }

    pub fn empty_slot_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }
}

/// The player's main inventory
pub type Inventory = ItemGrid;

/// A single-row grid with at most one selected slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotbar {
    grid: ItemGrid,
    selected: Option<usize>,
}

impl Hotbar {
    pub fn new(columns: usize) -> Self {
        Hotbar {
            grid: ItemGrid::new(1, columns),
            selected: None,
        }
    }

    pub fn grid(&self) -> &ItemGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut ItemGrid {
        &mut self.grid
    }

    pub fn slot_count(&self) -> usize {
        self.grid.columns
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select a slot; out of range slots are ignored
    pub fn select(&mut self, slot: usize) {
        if slot < self.grid.columns {
            self.selected = Some(slot);
        }
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Select a slot, or deselect it if it is already selected
    pub fn toggle_selection(&mut self, slot: usize) {
        if self.selected == Some(slot) {
            self.deselect();
        } else {
            self.select(slot);
        }
    }

    pub fn set(&mut self, slot: usize, stack: Stack) -> Option<Stack> {
        self.grid.set((0, slot), stack)
    }

    pub fn get(&self, slot: usize) -> Option<&Stack> {
        self.grid.get((0, slot))
    }

    pub fn selected_stack(&self) -> Option<&Stack> {
        self.selected.and_then(|slot| self.grid.get((0, slot)))
    }

    pub fn selected_stack_mut(&mut self) -> Option<&mut Stack> {
        self.selected.and_then(|slot| self.grid.get_mut((0, slot)))
    }

    /// Remove one item from the selected stack, clearing the slot when the
    /// stack runs out. Returns the item taken
    pub fn take_one_selected(&mut self) -> Option<Item> {
        let slot = self.selected?;
        let stack = self.grid.get_mut((0, slot))?;
        stack.subtract(1);
        let item = stack.item.clone();
        if stack.is_empty() {
            self.grid.take((0, slot));
        }
        Some(item)
    }

    pub fn add_item(&mut self, item: Item) -> Result<(), Item> {
        self.grid.add_item(item)
    }

    pub fn add_stack(&mut self, stack: Stack) -> Result<(), Stack> {
        self.grid.add_stack(stack)
    }
}
