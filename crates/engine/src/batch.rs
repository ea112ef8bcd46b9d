//! Per-type aggregation of container contents.

use std::collections::HashMap;

use compactor_core::{ItemStack, ItemType};
use compactor_inventory::Container;

/// An item type and a unit count, flagged by compaction eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemBatch {
    /// Item type.
    pub item: ItemType,
    /// Number of units.
    pub count: u64,
    /// False for air and for stacks carrying extra data.
    pub eligible: bool,
}

impl ItemBatch {
    /// Batch describing a single slot's stack.
    pub fn from_stack(stack: &ItemStack) -> Self {
        Self {
            item: stack.item,
            count: u64::from(stack.count),
            eligible: stack.is_plain(),
        }
    }
}

/// One batch per occupied slot, in slot order.
pub fn scan<C: Container + ?Sized>(container: &C) -> Vec<ItemBatch> {
    (0..container.slot_count())
        .filter_map(|slot| container.slot(slot))
        .map(ItemBatch::from_stack)
        .collect()
}

/// Merge eligible batches per item type, keeping first-seen order.
///
/// Ineligible batches are discarded.
pub fn aggregate(batches: &[ItemBatch]) -> Vec<ItemBatch> {
    let mut merged: Vec<ItemBatch> = Vec::new();
    let mut index: HashMap<ItemType, usize> = HashMap::new();

    for batch in batches.iter().filter(|b| b.eligible) {
        match index.get(&batch.item) {
            Some(&at) => merged[at].count += batch.count,
            None => {
                index.insert(batch.item, merged.len());
                merged.push(*batch);
            }
        }
    }
    merged
}
