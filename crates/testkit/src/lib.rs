#![warn(missing_docs)]
//! Shared fixtures for compaction tests: catalog lookups and inventory builders.

use compactor_core::{ItemCatalog, ItemMeta, ItemStack, ItemType};
use compactor_inventory::Inventory;

/// Resolve a vanilla item name, panicking on typos in test code.
pub fn item(name: &str) -> ItemType {
    ItemCatalog::vanilla()
        .resolve(name)
        .unwrap_or_else(|| panic!("unknown test item {name}"))
}

/// Metadata that makes a stack ineligible for compaction.
pub fn named_meta(name: &str) -> ItemMeta {
    ItemMeta {
        display_name: Some(name.to_string()),
        ..Default::default()
    }
}

/// Fluent builder for test inventories.
#[derive(Debug, Clone)]
pub struct InventoryBuilder {
    inventory: Inventory,
}

impl InventoryBuilder {
    /// Start from an empty inventory with `size` slots.
    pub fn new(size: usize, max_stack_size: u32) -> Self {
        Self {
            inventory: Inventory::new(size, max_stack_size),
        }
    }

    /// Start from an empty 36-slot player inventory.
    pub fn player() -> Self {
        Self {
            inventory: Inventory::player(),
        }
    }

    /// Put a plain stack in `slot`.
    pub fn plain(mut self, slot: usize, name: &str, count: u32) -> Self {
        self.put(slot, ItemStack::new(item(name), count));
        self
    }

    /// Put a stack carrying a display name in `slot`.
    pub fn named(mut self, slot: usize, name: &str, count: u32, label: &str) -> Self {
        self.put(slot, ItemStack::with_meta(item(name), count, named_meta(label)));
        self
    }

    /// Fill every remaining empty slot with full plain stacks of `name`.
    pub fn fill_rest(mut self, name: &str) -> Self {
        let max = compactor_inventory::Container::max_stack_size(&self.inventory);
        for slot in 0..self.inventory.len() {
            if self.inventory.get(slot).is_none() {
                self.put(slot, ItemStack::new(item(name), max));
            }
        }
        self
    }

    /// Finish building.
    pub fn build(self) -> Inventory {
        self.inventory
    }

    fn put(&mut self, slot: usize, stack: ItemStack) {
        assert!(
            self.inventory.set(slot, Some(stack)),
            "slot {slot} out of range for test inventory"
        );
    }
}

/// Plain units of `name` in `inventory`.
pub fn plain_units(inventory: &Inventory, name: &str) -> u64 {
    compactor_inventory::Container::eligible_count(inventory, item(name))
}

/// Units of `name` held in stacks carrying metadata.
pub fn meta_units(inventory: &Inventory, name: &str) -> u64 {
    let item = item(name);
    inventory
        .slots()
        .flatten()
        .filter(|s| s.item == item && s.has_extra_data())
        .map(|s| u64::from(s.count))
        .sum()
}
