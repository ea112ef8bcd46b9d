//! Scan, consume and reinsert: one compaction pass over a container.

use std::collections::HashMap;
use std::fmt;

use compactor_core::ItemType;
use compactor_inventory::{place_one, Container, PlacementOutcome};
use compactor_rules::{CompactionRule, RuleTable};
use serde::Serialize;
use tracing::{debug, info, instrument, trace, warn};

use crate::batch::{aggregate, scan};
use crate::{DropOrigin, Sink};

/// Outcome of one rule applied during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeReport {
    /// Source item the rule consumed.
    pub source: ItemType,
    /// Item the rule produced.
    pub target: ItemType,
    /// Units of `source` cleared from the container.
    pub consumed: u64,
    /// Units of `target` produced.
    pub converted: u64,
    /// Leftover units of `source` put back.
    pub restored: u64,
    /// Units (target or restored source) that went to the sink.
    pub dropped: u64,
}

impl TypeReport {
    /// Whether at least one unit was converted.
    pub fn compacted(&self) -> bool {
        self.converted > 0
    }
}

/// Consumed units disagreed with what the scan and the pass itself accounted for.
///
/// Only possible when something outside the pass mutated the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntegrityWarning {
    /// Item whose totals disagree.
    pub item: ItemType,
    /// Units the pass expected to clear.
    pub expected: u64,
    /// Units actually cleared, used for the split.
    pub consumed: u64,
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "item #{} expected {} units but consumed {}",
            self.item.0, self.expected, self.consumed
        )
    }
}

/// Summary of a compaction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassResult {
    reports: Vec<TypeReport>,
    warnings: Vec<IntegrityWarning>,
}

impl PassResult {
    /// Per-rule reports, in the order rules were applied.
    pub fn reports(&self) -> &[TypeReport] {
        &self.reports
    }

    /// Report for the rule whose source is `item`.
    pub fn get(&self, item: ItemType) -> Option<&TypeReport> {
        self.reports.iter().find(|r| r.source == item)
    }

    /// Integrity warnings raised during the pass.
    pub fn warnings(&self) -> &[IntegrityWarning] {
        &self.warnings
    }

    /// Units sent to the sink across all rules.
    pub fn total_dropped(&self) -> u64 {
        self.reports.iter().map(|r| r.dropped).sum()
    }

    /// Units produced across all rules.
    pub fn total_converted(&self) -> u64 {
        self.reports.iter().map(|r| r.converted).sum()
    }

    /// True when no rule touched the container.
    pub fn is_noop(&self) -> bool {
        self.reports.is_empty()
    }
}

/// Runs compaction passes against a borrowed rule table.
///
/// Holding `&RuleTable` for the engine's lifetime keeps rule mutation out of
/// an in-flight pass.
#[derive(Debug, Clone, Copy)]
pub struct CompactionEngine<'a> {
    rules: &'a RuleTable,
}

impl<'a> CompactionEngine<'a> {
    /// Engine over `rules`.
    pub fn new(rules: &'a RuleTable) -> Self {
        Self { rules }
    }

    /// Compact `container` in place, routing units that do not fit to `sink`.
    ///
    /// The caller must hold exclusive access to the container for the whole call.
    #[instrument(skip(self, container, sink), fields(rules = self.rules.len()))]
    pub fn run_pass<C, S>(&self, container: &mut C, owner: &str, sink: &mut S) -> PassResult
    where
        C: Container + ?Sized,
        S: Sink + ?Sized,
    {
        let batches = aggregate(&scan(container));
        let mut placed: HashMap<ItemType, u64> = HashMap::new();
        let mut result = PassResult::default();

        for batch in batches {
            let Some(rule) = self.rules.find_by_source(batch.item) else {
                continue;
            };
            if !container.contains_at_least(rule.source, rule.source_count) {
                trace!(item = rule.source.0, total = batch.count, "below threshold");
                continue;
            }

            let consumed = consume(container, rule.source);
            let expected = batch.count + placed.get(&rule.source).copied().unwrap_or(0);
            if consumed != expected {
                let warning = IntegrityWarning {
                    item: rule.source,
                    expected,
                    consumed,
                };
                warn!("Inventory of {owner} changed during compaction: {warning}");
                result.warnings.push(warning);
            }

            let report = self.reinsert(container, owner, rule, consumed, &mut placed, sink);
            debug!(
                source = rule.source.0,
                target = rule.target.0,
                consumed = report.consumed,
                converted = report.converted,
                restored = report.restored,
                dropped = report.dropped,
                "applied compaction rule"
            );
            result.reports.push(report);
        }

        let dropped = result.total_dropped();
        if dropped > 0 {
            info!("{dropped} units from {owner}'s compaction went to the sink");
        }
        result
    }

    fn reinsert<C, S>(
        &self,
        container: &mut C,
        owner: &str,
        rule: &CompactionRule,
        consumed: u64,
        placed: &mut HashMap<ItemType, u64>,
        sink: &mut S,
    ) -> TypeReport
    where
        C: Container + ?Sized,
        S: Sink + ?Sized,
    {
        let per_unit = u64::from(rule.source_count.max(1));
        let converted = consumed / per_unit;
        let restored = consumed % per_unit;
        let origin = DropOrigin { owner, rule };

        let mut dropped = 0;
        for (item, units) in [(rule.target, converted), (rule.source, restored)] {
            for _ in 0..units {
                match place_one(container, item) {
                    PlacementOutcome::Dropped => {
                        dropped += 1;
                        sink.deliver(item, &origin);
                    }
                    PlacementOutcome::Stacked | PlacementOutcome::NewSlot => {
                        *placed.entry(item).or_default() += 1;
                    }
                }
            }
        }

        TypeReport {
            source: rule.source,
            target: rule.target,
            consumed,
            converted,
            restored,
            dropped,
        }
    }
}

/// Clear every plain stack of `item`, returning the units removed.
fn consume<C: Container + ?Sized>(container: &mut C, item: ItemType) -> u64 {
    container
        .plain_slots_of(item)
        .into_iter()
        .filter_map(|slot| container.clear_slot(slot))
        .map(|stack| u64::from(stack.count))
        .sum()
}
