//! Property-based tests for compaction passes
//!
//! Validates pass invariants over random inventories:
//! - Every consumed unit is accounted for by the conversion ratio
//! - Weighted unit totals are conserved across container + sink
//! - Stacks with extra data are never touched
//! - Sink invocations match the reported drop count

use compactor_core::{ItemCatalog, ItemStack, ItemType};
use compactor_engine::{CompactionEngine, DropOrigin};
use compactor_inventory::{Container, Inventory};
use compactor_rules::{RuleRecord, RuleTable};
use compactor_testkit::{item, named_meta};
use proptest::prelude::*;

const NAMES: &[&str] = &[
    "cobblestone",
    "cobblestone_block",
    "iron_nugget",
    "iron_ingot",
    "iron_block",
    "coal",
    "stone",
];

fn rules() -> RuleTable {
    RuleTable::from_records(
        &[
            RuleRecord::new("cobblestone", 9, "cobblestone_block"),
            RuleRecord::new("iron_nugget", 9, "iron_ingot"),
            RuleRecord::new("iron_ingot", 9, "iron_block"),
            RuleRecord::new("coal", 4, "coal_block"),
        ],
        &ItemCatalog::vanilla(),
    )
    .unwrap()
}

/// Value of one unit measured in the smallest unit of its conversion chain.
fn weight(it: ItemType) -> u64 {
    if it == item("cobblestone_block") || it == item("iron_ingot") {
        9
    } else if it == item("iron_block") {
        81
    } else if it == item("coal_block") {
        4
    } else {
        1
    }
}

fn plain_weight(inv: &Inventory) -> u64 {
    inv.slots()
        .flatten()
        .filter(|s| s.is_plain())
        .map(|s| weight(s.item) * u64::from(s.count))
        .sum()
}

fn meta_stacks(inv: &Inventory) -> Vec<(usize, ItemStack)> {
    inv.slots()
        .enumerate()
        .filter_map(|(i, s)| s.filter(|s| s.has_extra_data()).map(|s| (i, s.clone())))
        .collect()
}

fn inventory_strategy() -> impl Strategy<Value = Inventory> {
    (1u32..=16, 1usize..=12).prop_flat_map(|(max, size)| {
        let slot = prop_oneof![
            1 => Just(None::<ItemStack>),
            4 => (0..NAMES.len(), 1..=max, prop::bool::weighted(0.15)).prop_map(
                |(name, count, meta)| {
                    let it = item(NAMES[name]);
                    Some(if meta {
                        ItemStack::with_meta(it, count, named_meta("Keepsake"))
                    } else {
                        ItemStack::new(it, count)
                    })
                }
            ),
        ];
        prop::collection::vec(slot, size).prop_map(move |slots| Inventory::from_slots(slots, max))
    })
}

proptest! {
    /// Property: consumed units split exactly into converted and restored
    #[test]
    fn split_accounts_for_every_consumed_unit(inv in inventory_strategy()) {
        let table = rules();
        let mut inv = inv;
        let before_cobble = inv.eligible_count(item("cobblestone"));

        let mut sink = |_: ItemType, _: &DropOrigin<'_>| {};
        let result = CompactionEngine::new(&table).run_pass(&mut inv, "prop", &mut sink);

        for report in result.reports() {
            let per_unit = u64::from(table.find_by_source(report.source).unwrap().source_count);
            prop_assert_eq!(report.converted * per_unit + report.restored, report.consumed);
            prop_assert!(report.dropped <= report.converted + report.restored);
        }
        if let Some(report) = result.get(item("cobblestone")) {
            prop_assert_eq!(report.consumed, before_cobble);
        }
        prop_assert!(result.warnings().is_empty());
    }

    /// Property: weighted units in container plus sink never change
    #[test]
    fn weighted_units_are_conserved(inv in inventory_strategy()) {
        let table = rules();
        let mut inv = inv;
        let before = plain_weight(&inv);

        let mut dropped = Vec::new();
        let mut sink = |it: ItemType, _: &DropOrigin<'_>| dropped.push(it);
        let result = CompactionEngine::new(&table).run_pass(&mut inv, "prop", &mut sink);

        let sunk: u64 = dropped.iter().map(|&it| weight(it)).sum();
        prop_assert_eq!(plain_weight(&inv) + sunk, before);
        prop_assert_eq!(result.total_dropped(), dropped.len() as u64);
    }

    /// Property: stacks with extra data keep their slot and contents
    #[test]
    fn extra_data_stacks_are_inert(inv in inventory_strategy()) {
        let table = rules();
        let mut inv = inv;
        let before = meta_stacks(&inv);

        let mut sink = |_: ItemType, _: &DropOrigin<'_>| {};
        CompactionEngine::new(&table).run_pass(&mut inv, "prop", &mut sink);

        prop_assert_eq!(meta_stacks(&inv), before);
    }

    /// Property: stacks never exceed the container's limit after a pass
    #[test]
    fn stacks_respect_max_size(inv in inventory_strategy()) {
        let table = rules();
        let mut inv = inv;
        let max = inv.max_stack_size();

        let mut sink = |_: ItemType, _: &DropOrigin<'_>| {};
        CompactionEngine::new(&table).run_pass(&mut inv, "prop", &mut sink);

        for stack in inv.slots().flatten() {
            prop_assert!(stack.count >= 1 && stack.count <= max);
        }
    }
}
