//! Item primitives: identifiers and stacks.
//!
//! Provides ItemStack management with stack merging, splitting, and
//! max-size clamping. Item identity is opaque; recipe equivalence
//! (ore classes) lives in the recipe catalog, not here.

use serde::{Deserialize, Serialize};

/// Item identifier referencing the host's item registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ItemId(pub u16);

/// Maximum stack size for most items.
pub const DEFAULT_STACK_SIZE: u8 = 64;

/// Represents a stack of identical items in an inventory slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item type identifier.
    pub item: ItemId,
    /// Number of items in this stack (1-64 typically).
    pub count: u8,
}

impl ItemStack {
    /// Create a new item stack.
    pub fn new(item: ItemId, count: u8) -> Self {
        Self { item, count }
    }

    /// Check if this stack can merge with another stack.
    pub fn can_merge(&self, other: &ItemStack) -> bool {
        self.item == other.item
    }

    /// Get the maximum stack size for this item (future: query from registry).
    pub fn max_stack_size(&self) -> u8 {
        DEFAULT_STACK_SIZE
    }

    /// Check if this stack is at max capacity.
    pub fn is_full(&self) -> bool {
        self.count >= self.max_stack_size()
    }

    /// Get remaining space in this stack.
    pub fn remaining_space(&self) -> u8 {
        self.max_stack_size().saturating_sub(self.count)
    }

    /// Try to add items to this stack, returning the amount that didn't fit.
    pub fn add(&mut self, amount: u8) -> u8 {
        let space = self.remaining_space();
        let added = amount.min(space);
        self.count += added;
        amount - added
    }

    /// Try to remove items from this stack, returning the amount actually removed.
    pub fn remove(&mut self, amount: u8) -> u8 {
        let removed = amount.min(self.count);
        self.count -= removed;
        removed
    }

    /// Split this stack, taking the specified amount into a new stack.
    pub fn split(&mut self, amount: u8) -> Option<ItemStack> {
        if amount == 0 || amount > self.count {
            return None;
        }

        self.count -= amount;
        Some(ItemStack {
            item: self.item,
            count: amount,
        })
    }
}
