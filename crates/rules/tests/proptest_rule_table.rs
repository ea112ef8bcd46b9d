//! Property-based tests for rule table bookkeeping
//!
//! Validates rule table invariants:
//! - No two rules ever share a source item
//! - Lookups agree with iteration after arbitrary add/remove sequences
//! - A failed reload never disturbs the loaded rules

use compactor_core::{ItemCatalog, ItemType};
use compactor_rules::{CompactionRule, RuleRecord, RuleTable};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Add(u16, u32, u16),
    Remove(u16, u32, u16),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // Ids 1..8 keep collisions frequent; 0 is air.
    prop_oneof![
        (1u16..8, 1u32..5, 1u16..8).prop_map(|(s, c, t)| Op::Add(s, c, t)),
        (1u16..8, 1u32..5, 1u16..8).prop_map(|(s, c, t)| Op::Remove(s, c, t)),
    ]
}

proptest! {
    /// Property: source items stay unique under any add/remove sequence
    #[test]
    fn sources_stay_unique(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut table = RuleTable::new();

        for op in ops {
            match op {
                Op::Add(s, c, t) => {
                    if let Ok(rule) = CompactionRule::new(ItemType(s), c, ItemType(t)) {
                        let had = table.find_by_source(rule.source).is_some();
                        prop_assert_eq!(table.add(rule), !had);
                    }
                }
                Op::Remove(s, c, t) => {
                    if let Ok(rule) = CompactionRule::new(ItemType(s), c, ItemType(t)) {
                        let present = table.find_by_source(rule.source) == Some(&rule);
                        prop_assert_eq!(table.remove(&rule), present);
                    }
                }
            }

            let mut seen = HashSet::new();
            for rule in table.iter() {
                prop_assert!(seen.insert(rule.source), "duplicate source {:?}", rule.source);
                prop_assert_eq!(table.find_by_source(rule.source), Some(rule));
            }
            prop_assert_eq!(seen.len(), table.len());
        }
    }

    /// Property: a reload containing a bad record keeps the previous rules
    #[test]
    fn failed_reload_keeps_previous_table(bad_count in -1000i64..=0) {
        let catalog = ItemCatalog::vanilla();
        let mut table = RuleTable::new();
        table
            .load(&[RuleRecord::new("iron_ingot", 9, "iron_block")], &catalog)
            .unwrap();
        let before = table.clone();

        let result = table.load(
            &[
                RuleRecord::new("gold_ingot", 9, "gold_block"),
                RuleRecord::new("coal", bad_count, "coal_block"),
            ],
            &catalog,
        );

        prop_assert!(result.is_err());
        prop_assert_eq!(table, before);
    }
}
