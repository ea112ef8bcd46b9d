//! In-memory slotted inventory.
//!
//! The reference [`Container`] implementation used by the command host and
//! the test fixtures.

use compactor_core::{ItemStack, ItemType};
use serde::{Deserialize, Serialize};

use crate::Container;

/// Maximum stack size for most items.
pub const DEFAULT_STACK_SIZE: u32 = 64;

/// Number of slots in player inventory.
pub const PLAYER_INVENTORY_SIZE: usize = 36;

/// Player or container inventory with a fixed number of slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<Option<ItemStack>>,
    max_stack_size: u32,
}

impl Inventory {
    /// Create an empty inventory. A zero stack size is raised to one.
    pub fn new(size: usize, max_stack_size: u32) -> Self {
        Self {
            slots: vec![None; size],
            max_stack_size: max_stack_size.max(1),
        }
    }

    /// Standard 36-slot player inventory.
    pub fn player() -> Self {
        Self::new(PLAYER_INVENTORY_SIZE, DEFAULT_STACK_SIZE)
    }

    /// Build an inventory from explicit slot contents.
    pub fn from_slots(slots: Vec<Option<ItemStack>>, max_stack_size: u32) -> Self {
        Self {
            slots,
            max_stack_size: max_stack_size.max(1),
        }
    }

    /// Get an item stack from a slot.
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Set an item stack in a slot.
    pub fn set(&mut self, slot: usize, stack: Option<ItemStack>) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) => {
                *entry = stack;
                true
            }
            None => false,
        }
    }

    /// Take an item stack from a slot, leaving it empty.
    pub fn take(&mut self, slot: usize) -> Option<ItemStack> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Iterate over every slot in order.
    pub fn slots(&self) -> impl Iterator<Item = Option<&ItemStack>> {
        self.slots.iter().map(Option::as_ref)
    }

    /// Count every unit of `item`, including stacks with metadata.
    pub fn count_item(&self, item: ItemType) -> u64 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.item == item)
            .map(|stack| u64::from(stack.count))
            .sum()
    }

    /// Get the number of empty slots.
    pub fn empty_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    /// Check if the inventory is completely empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Check if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::player()
    }
}

impl Container for Inventory {
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, index: usize) -> Option<&ItemStack> {
        self.get(index)
    }

    fn slot_mut(&mut self, index: usize) -> Option<&mut ItemStack> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    fn set_slot(&mut self, index: usize, stack: Option<ItemStack>) -> bool {
        self.set(index, stack)
    }

    fn clear_slot(&mut self, index: usize) -> Option<ItemStack> {
        self.take(index)
    }

    fn max_stack_size(&self) -> u32 {
        self.max_stack_size
    }
}
