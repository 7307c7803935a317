//! Fixed six-slot furnace inventory.
//!
//! Slot layout: input=0, fuel=1, output=2, upgrades=3..5. Empty slots
//! are `None`; stack counts never exceed `max_stack_size()`.

use serde::{Deserialize, Serialize};
use smeltsim_core::ItemStack;

/// Input slot index.
pub const SLOT_INPUT: usize = 0;
/// Fuel slot index.
pub const SLOT_FUEL: usize = 1;
/// Output slot index.
pub const SLOT_OUTPUT: usize = 2;
/// Upgrade slot indices.
pub const SLOT_UPGRADES: [usize; 3] = [3, 4, 5];
/// Total number of slots.
pub const SLOT_COUNT: usize = 6;

/// The mutable item storage a furnace reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotArray {
    slots: [Option<ItemStack>; SLOT_COUNT],
}

impl Default for SlotArray {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotArray {
    /// Create a new empty slot array.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Get an item stack from a slot.
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot)?.as_ref()
    }

    /// Get a mutable reference to an item stack in a slot.
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut ItemStack> {
        self.slots.get_mut(slot)?.as_mut()
    }

    /// Set an item stack in a slot.
    pub fn set(&mut self, slot: usize, stack: Option<ItemStack>) -> bool {
        if slot >= SLOT_COUNT {
            return false;
        }
        self.slots[slot] = stack;
        true
    }

    /// Take an item stack from a slot, leaving it empty.
    pub fn take(&mut self, slot: usize) -> Option<ItemStack> {
        self.slots.get_mut(slot)?.take()
    }

    /// The input slot contents.
    pub fn input(&self) -> Option<&ItemStack> {
        self.get(SLOT_INPUT)
    }

    /// Mutable input slot contents.
    pub fn input_mut(&mut self) -> Option<&mut ItemStack> {
        self.get_mut(SLOT_INPUT)
    }

    /// The fuel slot contents.
    pub fn fuel(&self) -> Option<&ItemStack> {
        self.get(SLOT_FUEL)
    }

    /// Mutable fuel slot contents.
    pub fn fuel_mut(&mut self) -> Option<&mut ItemStack> {
        self.get_mut(SLOT_FUEL)
    }

    /// The output slot contents.
    pub fn output(&self) -> Option<&ItemStack> {
        self.get(SLOT_OUTPUT)
    }

    /// Mutable output slot contents.
    pub fn output_mut(&mut self) -> Option<&mut ItemStack> {
        self.get_mut(SLOT_OUTPUT)
    }

    /// Try to insert a stack into one slot, merging with existing contents.
    /// Returns the remainder that didn't fit (if any).
    pub fn insert(&mut self, slot: usize, mut stack: ItemStack) -> Option<ItemStack> {
        if slot >= SLOT_COUNT || stack.count == 0 {
            return Some(stack).filter(|s| s.count > 0);
        }

        let fits_whole = stack.count <= stack.max_stack_size();
        match &mut self.slots[slot] {
            None if fits_whole => {
                self.slots[slot] = Some(stack);
                None
            }
            None => {
                let placed = stack.max_stack_size();
                let remainder = stack.count - placed;
                stack.count = placed;
                self.slots[slot] = Some(stack.clone());
                stack.count = remainder;
                Some(stack)
            }
            Some(existing) if existing.can_merge(&stack) => {
                let leftover = existing.add(stack.count);
                if leftover == 0 {
                    None
                } else {
                    stack.count = leftover;
                    Some(stack)
                }
            }
            Some(_) => Some(stack),
        }
    }

    /// Extract up to `amount` items from a slot.
    pub fn extract(&mut self, slot: usize, amount: u8) -> Option<ItemStack> {
        if amount == 0 {
            return None;
        }
        let stack = self.get_mut(slot)?;
        let taken = amount.min(stack.count);
        let extracted = stack.split(taken);
        if self.get(slot).is_some_and(|s| s.count == 0) {
            self.set(slot, None);
        }
        extracted
    }

    /// Raw view of all slots, in order.
    pub fn as_array(&self) -> &[Option<ItemStack>; SLOT_COUNT] {
        &self.slots
    }

    /// Replace all slots at once (used when restoring a persisted record).
    pub fn from_array(slots: [Option<ItemStack>; SLOT_COUNT]) -> Self {
        Self { slots }
    }

    /// Check if every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smeltsim_core::ItemId;

    #[test]
    fn insert_into_empty_slot() {
        let mut slots = SlotArray::new();
        assert!(slots.insert(SLOT_INPUT, ItemStack::new(ItemId(1), 10)).is_none());
        assert_eq!(slots.input().unwrap().count, 10);
    }

    #[test]
    fn insert_merges_and_returns_remainder() {
        let mut slots = SlotArray::new();
        slots.set(SLOT_INPUT, Some(ItemStack::new(ItemId(1), 60)));

        let remainder = slots.insert(SLOT_INPUT, ItemStack::new(ItemId(1), 10)).unwrap();
        assert_eq!(remainder.count, 6);
        assert_eq!(slots.input().unwrap().count, 64);
    }

    #[test]
    fn insert_rejects_incompatible_item() {
        let mut slots = SlotArray::new();
        slots.set(SLOT_FUEL, Some(ItemStack::new(ItemId(1), 1)));

        let rejected = slots.insert(SLOT_FUEL, ItemStack::new(ItemId(2), 5)).unwrap();
        assert_eq!(rejected, ItemStack::new(ItemId(2), 5));
    }

    #[test]
    fn extract_clears_emptied_slot() {
        let mut slots = SlotArray::new();
        slots.set(SLOT_OUTPUT, Some(ItemStack::new(ItemId(3), 2)));

        let taken = slots.extract(SLOT_OUTPUT, 5).unwrap();
        assert_eq!(taken.count, 2);
        assert!(slots.output().is_none());
    }

    #[test]
    fn out_of_range_slot_is_rejected() {
        let mut slots = SlotArray::new();
        assert!(!slots.set(SLOT_COUNT, Some(ItemStack::new(ItemId(1), 1))));
        assert!(slots.get(SLOT_COUNT).is_none());
        assert!(slots.insert(SLOT_COUNT, ItemStack::new(ItemId(1), 1)).is_some());
    }
}
