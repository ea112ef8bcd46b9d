//! Single-unit placement into a container.

use compactor_core::{ItemStack, ItemType};
use tracing::trace;

use crate::Container;

/// Where [`place_one`] put the unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// Topped up an existing plain stack.
    Stacked,
    /// Started a new one-unit stack in the first empty slot.
    NewSlot,
    /// No room; the container is untouched and the caller owns the unit.
    Dropped,
}

impl PlacementOutcome {
    /// Whether the unit ended up in the container.
    pub fn is_placed(self) -> bool {
        !matches!(self, PlacementOutcome::Dropped)
    }
}

/// Place one unit of `item`, preferring to top up an existing plain stack.
///
/// Stacks carrying metadata are never topped up. A [`PlacementOutcome::Dropped`]
/// result leaves the container unchanged.
pub fn place_one<C: Container + ?Sized>(container: &mut C, item: ItemType) -> PlacementOutcome {
    let max = container.max_stack_size();
    for index in 0..container.slot_count() {
        if let Some(stack) = container.slot_mut(index) {
            if stack.is_plain_of(item) && stack.count < max {
                stack.count += 1;
                trace!(slot = index, count = stack.count, "topped up stack");
                return PlacementOutcome::Stacked;
            }
        }
    }

    match container.first_empty() {
        Some(index) => {
            container.set_slot(index, Some(ItemStack::new(item, 1)));
            trace!(slot = index, "started new stack");
            PlacementOutcome::NewSlot
        }
        None => PlacementOutcome::Dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Inventory;
    use compactor_core::ItemMeta;

    const COBBLE: ItemType = ItemType(1);
    const BLOCK: ItemType = ItemType(2);
    const STONE: ItemType = ItemType(3);

    #[test]
    fn tops_up_first_non_full_stack() {
        let mut inv = Inventory::new(4, 64);
        inv.set(0, Some(ItemStack::new(COBBLE, 64)));
        inv.set(2, Some(ItemStack::new(COBBLE, 10)));
        inv.set(3, Some(ItemStack::new(COBBLE, 5)));

        assert_eq!(place_one(&mut inv, COBBLE), PlacementOutcome::Stacked);
        assert_eq!(inv.get(2).unwrap().count, 11);
        assert_eq!(inv.get(3).unwrap().count, 5);
        assert!(inv.get(1).is_none());
    }

    #[test]
    fn uses_first_empty_slot_when_stacks_are_full() {
        let mut inv = Inventory::new(4, 64);
        inv.set(0, Some(ItemStack::new(COBBLE, 64)));
        inv.set(1, Some(ItemStack::new(STONE, 3)));

        assert_eq!(place_one(&mut inv, COBBLE), PlacementOutcome::NewSlot);
        assert_eq!(inv.get(2), Some(&ItemStack::new(COBBLE, 1)));
    }

    #[test]
    fn never_tops_up_stacks_with_metadata() {
        let mut inv = Inventory::new(2, 64);
        let meta = ItemMeta {
            lore: vec!["heirloom".into()],
            ..Default::default()
        };
        inv.set(0, Some(ItemStack::with_meta(BLOCK, 1, meta.clone())));

        assert_eq!(place_one(&mut inv, BLOCK), PlacementOutcome::NewSlot);
        assert_eq!(inv.get(0), Some(&ItemStack::with_meta(BLOCK, 1, meta)));
        assert_eq!(inv.get(1), Some(&ItemStack::new(BLOCK, 1)));
    }

    #[test]
    fn dropped_leaves_container_untouched() {
        let mut inv = Inventory::new(2, 64);
        inv.set(0, Some(ItemStack::new(COBBLE, 64)));
        inv.set(1, Some(ItemStack::new(STONE, 64)));
        let before = inv.clone();

        let outcome = place_one(&mut inv, BLOCK);
        assert_eq!(outcome, PlacementOutcome::Dropped);
        assert!(!outcome.is_placed());
        assert_eq!(inv, before);
    }

    #[test]
    fn placed_outcomes_add_exactly_one_unit() {
        let mut inv = Inventory::new(3, 4);
        for _ in 0..12 {
            let before = inv.eligible_count(COBBLE);
            let outcome = place_one(&mut inv, COBBLE);
            assert!(outcome.is_placed());
            assert_eq!(inv.eligible_count(COBBLE), before + 1);
        }
        assert!(inv.is_full());
        assert_eq!(place_one(&mut inv, COBBLE), PlacementOutcome::Dropped);
        assert_eq!(inv.eligible_count(COBBLE), 12);
    }
}
