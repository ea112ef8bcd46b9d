//! Slotted container abstraction supplied by the host.

use compactor_core::{ItemStack, ItemType};

/// An ordered, fixed-size sequence of slots, each holding zero or one stack.
///
/// Callers hold exclusive (`&mut`) access for the duration of a compaction
/// pass; implementations need no internal synchronisation.
pub trait Container {
    /// Number of slots.
    fn slot_count(&self) -> usize;

    /// Read a slot. Out-of-range indices read as empty.
    fn slot(&self, index: usize) -> Option<&ItemStack>;

    /// Mutable access to a slot's stack.
    fn slot_mut(&mut self, index: usize) -> Option<&mut ItemStack>;

    /// Replace a slot's contents. Returns false for out-of-range indices.
    fn set_slot(&mut self, index: usize, stack: Option<ItemStack>) -> bool;

    /// Empty a slot, returning what it held.
    fn clear_slot(&mut self, index: usize) -> Option<ItemStack>;

    /// Largest count a single stack may hold.
    fn max_stack_size(&self) -> u32;

    /// Index of the first empty slot.
    fn first_empty(&self) -> Option<usize> {
        (0..self.slot_count()).find(|&i| self.slot(i).is_none())
    }

    /// Indices of plain (metadata-free) stacks of `item`, in slot order.
    fn plain_slots_of(&self, item: ItemType) -> Vec<usize> {
        (0..self.slot_count())
            .filter(|&i| self.slot(i).is_some_and(|s| s.is_plain_of(item)))
            .collect()
    }

    /// Total units of `item` held in plain stacks.
    fn eligible_count(&self, item: ItemType) -> u64 {
        (0..self.slot_count())
            .filter_map(|i| self.slot(i))
            .filter(|s| s.is_plain_of(item))
            .map(|s| u64::from(s.count))
            .sum()
    }

    /// Whether plain stacks of `item` add up to at least `amount` units.
    fn contains_at_least(&self, item: ItemType, amount: u32) -> bool {
        self.eligible_count(item) >= u64::from(amount)
    }
}
