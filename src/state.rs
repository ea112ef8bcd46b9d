use anyhow::Result;
use compactor_core::ItemCatalog;
use compactor_engine::{CompactionEngine, PassResult, Sink};
use compactor_inventory::Inventory;
use compactor_rules::{CompactionRule, RuleTable};
use tracing::{info, warn};

use crate::config::ConfigStore;

/// Live rule table plus the catalog and store it is persisted through.
#[derive(Debug)]
pub struct Compactor {
    catalog: ItemCatalog,
    rules: RuleTable,
    store: ConfigStore,
}

impl Compactor {
    /// Load rules from `store`. Invalid persisted rules leave the table empty.
    pub fn start(catalog: ItemCatalog, store: ConfigStore) -> Self {
        let config = store.load_lenient();
        let mut rules = RuleTable::new();
        if let Err(err) = rules.load(&config.materials, &catalog) {
            warn!("{err}. Starting with no compaction rules");
        }
        info!(rules = rules.len(), path = %store.path().display(), "compactor ready");
        Self {
            catalog,
            rules,
            store,
        }
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    #[allow(dead_code)]
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Re-read the store. On failure the current table is kept.
    pub fn reload(&mut self) -> Result<usize> {
        let config = self.store.load()?;
        let loaded = self.rules.load(&config.materials, &self.catalog)?;
        Ok(loaded)
    }

    /// Persist `rule` and reload. `Ok(false)` when its source already has a rule.
    pub fn add_rule(&mut self, rule: CompactionRule) -> Result<bool> {
        self.edit(|table| table.add(rule))
    }

    /// Persist the removal of `rule` and reload. `Ok(false)` when no rule matches exactly.
    pub fn remove_rule(&mut self, rule: &CompactionRule) -> Result<bool> {
        self.edit(|table| table.remove(rule))
    }

    /// Edits apply to the persisted rules, not the live table.
    fn edit(&mut self, apply: impl FnOnce(&mut RuleTable) -> bool) -> Result<bool> {
        let mut config = self.store.load_or_init()?;
        let mut table = RuleTable::from_records(&config.materials, &self.catalog)?;
        if !apply(&mut table) {
            return Ok(false);
        }
        config.materials = table.to_records(&self.catalog);
        self.store.save(&config)?;
        self.reload()?;
        Ok(true)
    }

    /// Run one compaction pass over `inventory`.
    pub fn compact<S: Sink + ?Sized>(
        &self,
        inventory: &mut Inventory,
        owner: &str,
        sink: &mut S,
    ) -> PassResult {
        CompactionEngine::new(&self.rules).run_pass(inventory, owner, sink)
    }
}
