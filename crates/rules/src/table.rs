//! Ordered conversion rules, unique by source item.

use std::collections::HashMap;

use compactor_core::{ItemCatalog, ItemType};
use tracing::debug;

use crate::rule::parse_count;
use crate::{CompactionRule, InvalidRuleError, InvalidRuleReason, RuleRecord, ValidationError};

/// Rule table consulted by compaction passes.
///
/// At most one rule exists per source item. Rules keep their insertion order,
/// which is also the order written back to the configuration store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<CompactionRule>,
    by_source: HashMap<ItemType, usize>,
}

impl RuleTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from persisted records, failing on the first bad record.
    pub fn from_records(
        records: &[RuleRecord],
        catalog: &ItemCatalog,
    ) -> Result<Self, InvalidRuleError> {
        let mut table = Self::new();
        for (index, record) in records.iter().enumerate() {
            let rule = CompactionRule::resolve(
                catalog,
                &record.source_material,
                record.source_count,
                &record.target_material,
            )
            .map_err(|err| InvalidRuleError {
                index,
                reason: InvalidRuleReason::Invalid(err),
            })?;

            if !table.add(rule) {
                return Err(InvalidRuleError {
                    index,
                    reason: InvalidRuleReason::DuplicateSource(catalog.display_name(rule.source)),
                });
            }
        }
        Ok(table)
    }

    /// Replace the whole table with `records`.
    ///
    /// All-or-nothing: on error the current rules are left exactly as they were.
    pub fn load(
        &mut self,
        records: &[RuleRecord],
        catalog: &ItemCatalog,
    ) -> Result<usize, InvalidRuleError> {
        let fresh = Self::from_records(records, catalog)?;
        *self = fresh;
        debug!(rules = self.len(), "rule table loaded");
        Ok(self.len())
    }

    /// Rule whose source is `item`.
    pub fn find_by_source(&self, item: ItemType) -> Option<&CompactionRule> {
        self.by_source.get(&item).map(|&index| &self.rules[index])
    }

    /// Append `rule` unless its source already has a rule.
    pub fn add(&mut self, rule: CompactionRule) -> bool {
        if self.by_source.contains_key(&rule.source) {
            return false;
        }
        self.by_source.insert(rule.source, self.rules.len());
        self.rules.push(rule);
        true
    }

    /// Remove a rule matching `rule` on all three fields.
    pub fn remove(&mut self, rule: &CompactionRule) -> bool {
        let Some(position) = self.rules.iter().position(|r| r == rule) else {
            return false;
        };
        self.rules.remove(position);
        self.reindex();
        true
    }

    /// Validate user-supplied rule text.
    ///
    /// Item names resolve through `catalog`; the count must be a positive
    /// whole number that fits in a `u32`.
    pub fn validate(
        catalog: &ItemCatalog,
        source_text: &str,
        count_text: &str,
        target_text: &str,
    ) -> Result<CompactionRule, ValidationError> {
        let count = parse_count(count_text)?;
        CompactionRule::resolve(catalog, source_text, count, target_text)
    }

    /// Snapshot of the table in persisted form.
    pub fn to_records(&self, catalog: &ItemCatalog) -> Vec<RuleRecord> {
        self.rules.iter().map(|rule| rule.to_record(catalog)).collect()
    }

    /// Iterate rules in table order.
    pub fn iter(&self) -> impl Iterator<Item = &CompactionRule> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn reindex(&mut self) {
        self.by_source = self
            .rules
            .iter()
            .enumerate()
            .map(|(index, rule)| (rule.source, index))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(catalog: &ItemCatalog, name: &str) -> ItemType {
        catalog.resolve(name).unwrap()
    }

    fn rule(catalog: &ItemCatalog, source: &str, count: u32, target: &str) -> CompactionRule {
        CompactionRule::new(item(catalog, source), count, item(catalog, target)).unwrap()
    }

    #[test]
    fn add_rejects_duplicate_source() {
        let catalog = ItemCatalog::vanilla();
        let mut table = RuleTable::new();
        assert!(table.add(rule(&catalog, "iron_ingot", 9, "iron_block")));
        assert!(!table.add(rule(&catalog, "iron_ingot", 4, "iron_block")));
        assert!(!table.add(rule(&catalog, "iron_ingot", 9, "iron_block")));
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.find_by_source(item(&catalog, "iron_ingot")).unwrap().source_count,
            9
        );
    }

    #[test]
    fn remove_requires_exact_match() {
        let catalog = ItemCatalog::vanilla();
        let mut table = RuleTable::new();
        table.add(rule(&catalog, "iron_ingot", 9, "iron_block"));
        table.add(rule(&catalog, "gold_ingot", 9, "gold_block"));

        assert!(!table.remove(&rule(&catalog, "iron_ingot", 4, "iron_block")));
        assert!(!table.remove(&rule(&catalog, "iron_ingot", 9, "gold_block")));
        assert_eq!(table.len(), 2);

        assert!(table.remove(&rule(&catalog, "iron_ingot", 9, "iron_block")));
        assert_eq!(table.len(), 1);
        assert!(table.find_by_source(item(&catalog, "iron_ingot")).is_none());
        assert!(table.find_by_source(item(&catalog, "gold_ingot")).is_some());
    }

    #[test]
    fn lookup_survives_removal_in_the_middle() {
        let catalog = ItemCatalog::vanilla();
        let mut table = RuleTable::new();
        table.add(rule(&catalog, "coal", 9, "coal_block"));
        table.add(rule(&catalog, "diamond", 9, "diamond_block"));
        table.add(rule(&catalog, "emerald", 9, "emerald_block"));

        assert!(table.remove(&rule(&catalog, "coal", 9, "coal_block")));
        let emerald = table.find_by_source(item(&catalog, "emerald")).unwrap();
        assert_eq!(emerald.target, item(&catalog, "emerald_block"));
        let order: Vec<_> = table.iter().map(|r| r.source).collect();
        assert_eq!(order, vec![item(&catalog, "diamond"), item(&catalog, "emerald")]);
    }

    #[test]
    fn validate_rejects_bad_count_text() {
        let catalog = ItemCatalog::vanilla();
        assert_eq!(
            RuleTable::validate(&catalog, "cobblestone", "not-a-number", "stone"),
            Err(ValidationError::NotANumber("not-a-number".into()))
        );
        assert_eq!(
            RuleTable::validate(&catalog, "cobblestone", "-2", "stone"),
            Err(ValidationError::NonPositive(-2))
        );
        assert_eq!(
            RuleTable::validate(&catalog, "cobblestone", "0", "stone"),
            Err(ValidationError::NonPositive(0))
        );
    }

    #[test]
    fn validate_rejects_unknown_items() {
        let catalog = ItemCatalog::vanilla();
        assert_eq!(
            RuleTable::validate(&catalog, "unobtainium", "9", "stone"),
            Err(ValidationError::UnknownItem("unobtainium".into()))
        );
        assert_eq!(
            RuleTable::validate(&catalog, "stone", "9", "unobtainium"),
            Err(ValidationError::UnknownItem("unobtainium".into()))
        );
    }

    #[test]
    fn validate_accepts_well_formed_text() {
        let catalog = ItemCatalog::vanilla();
        let parsed = RuleTable::validate(&catalog, "Cobblestone", " 64 ", "minecraft:stone").unwrap();
        assert_eq!(parsed, rule(&catalog, "cobblestone", 64, "stone"));
    }

    #[test]
    fn load_is_all_or_nothing() {
        let catalog = ItemCatalog::vanilla();
        let mut table = RuleTable::new();
        table
            .load(&[RuleRecord::new("iron_ingot", 9, "iron_block")], &catalog)
            .unwrap();

        let err = table
            .load(
                &[
                    RuleRecord::new("gold_ingot", 9, "gold_block"),
                    RuleRecord::new("gold_nugget", -1, "gold_ingot"),
                ],
                &catalog,
            )
            .unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(
            err.reason,
            InvalidRuleReason::Invalid(ValidationError::NonPositive(-1))
        );

        assert_eq!(table.len(), 1);
        assert!(table.find_by_source(item(&catalog, "iron_ingot")).is_some());
        assert!(table.find_by_source(item(&catalog, "gold_ingot")).is_none());
    }

    #[test]
    fn load_rejects_unknown_items_and_duplicates() {
        let catalog = ItemCatalog::vanilla();
        let mut table = RuleTable::new();

        let unknown = table
            .load(&[RuleRecord::new("mystery", 9, "stone")], &catalog)
            .unwrap_err();
        assert_eq!(
            unknown.reason,
            InvalidRuleReason::Invalid(ValidationError::UnknownItem("mystery".into()))
        );

        let dup = table
            .load(
                &[
                    RuleRecord::new("coal", 9, "coal_block"),
                    RuleRecord::new("COAL", 4, "coal_block"),
                ],
                &catalog,
            )
            .unwrap_err();
        assert_eq!(dup.index, 1);
        assert_eq!(dup.reason, InvalidRuleReason::DuplicateSource("coal".into()));
        assert!(table.is_empty());
    }

    #[test]
    fn records_round_trip_in_order() {
        let catalog = ItemCatalog::vanilla();
        let records = vec![
            RuleRecord::new("redstone", 9, "redstone_block"),
            RuleRecord::new("snowball", 4, "snow_block"),
        ];
        let table = RuleTable::from_records(&records, &catalog).unwrap();
        assert_eq!(table.to_records(&catalog), records);
    }
}
