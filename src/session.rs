use anyhow::{bail, Context, Result};
use compactor_core::{ItemCatalog, ItemMeta, ItemStack, ItemType};
use compactor_inventory::{Inventory, DEFAULT_STACK_SIZE, PLAYER_INVENTORY_SIZE};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
};
use tracing::debug;

use crate::commands::CommandContext;

/// On-disk player session. Items are stored by catalog name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionFile {
    name: String,
    #[serde(default)]
    permissions: Vec<String>,
    #[serde(default = "default_stack_size")]
    max_stack_size: u32,
    #[serde(default)]
    inventory: Vec<Option<SlotRecord>>,
    #[serde(default)]
    ground: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SlotRecord {
    item: String,
    count: u32,
    #[serde(default, skip_serializing_if = "ItemMeta::is_empty")]
    meta: ItemMeta,
}

fn default_stack_size() -> u32 {
    DEFAULT_STACK_SIZE
}

/// A player sender: inventory, permissions and the items dropped at their feet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub permissions: BTreeSet<String>,
    pub inventory: Inventory,
    pub ground: BTreeMap<ItemType, u64>,
}

impl Player {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, permissions: &[&str], inventory: Inventory) -> Self {
        Self {
            name: name.into(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            inventory,
            ground: BTreeMap::new(),
        }
    }

    pub fn load(path: &Path, catalog: &ItemCatalog) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session {}", path.display()))?;
        let file: SessionFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session {}", path.display()))?;
        Self::from_file(file, catalog)
            .with_context(|| format!("Invalid session {}", path.display()))
    }

    pub fn save(&self, path: &Path, catalog: &ItemCatalog) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.to_file(catalog))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, json).with_context(|| format!("Failed to write session {}", path.display()))?;
        debug!(player = %self.name, path = %path.display(), "session saved");
        Ok(())
    }

    fn from_file(file: SessionFile, catalog: &ItemCatalog) -> Result<Self> {
        let resolve = |name: &str| match catalog.resolve(name) {
            Some(item) if !item.is_air() => Ok(item),
            _ => bail!("unknown item `{name}`"),
        };

        let mut slots = Vec::with_capacity(file.inventory.len().max(PLAYER_INVENTORY_SIZE));
        for (index, record) in file.inventory.into_iter().enumerate() {
            let stack = match record {
                Some(record) if record.count > 0 => Some(ItemStack::with_meta(
                    resolve(&record.item).with_context(|| format!("slot {index}"))?,
                    record.count,
                    record.meta,
                )),
                Some(_) => bail!("slot {index} has an empty stack"),
                None => None,
            };
            slots.push(stack);
        }
        if slots.len() < PLAYER_INVENTORY_SIZE {
            slots.resize(PLAYER_INVENTORY_SIZE, None);
        }

        let mut ground = BTreeMap::new();
        for (name, count) in &file.ground {
            *ground.entry(resolve(name)?).or_default() += count;
        }

        Ok(Self {
            name: file.name,
            permissions: file.permissions.into_iter().collect(),
            inventory: Inventory::from_slots(slots, file.max_stack_size),
            ground,
        })
    }

    fn to_file(&self, catalog: &ItemCatalog) -> SessionFile {
        let inventory = self
            .inventory
            .slots()
            .map(|slot| {
                slot.map(|stack| SlotRecord {
                    item: catalog.display_name(stack.item),
                    count: stack.count,
                    meta: stack.meta.clone(),
                })
            })
            .collect();
        SessionFile {
            name: self.name.clone(),
            permissions: self.permissions.iter().cloned().collect(),
            max_stack_size: compactor_inventory::Container::max_stack_size(&self.inventory),
            inventory,
            ground: self
                .ground
                .iter()
                .map(|(&item, &count)| (catalog.display_name(item), count))
                .collect(),
        }
    }
}

impl CommandContext for Player {
    fn sender_name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, node: &str) -> bool {
        self.permissions.contains(node) || self.permissions.contains("*")
    }

    fn inventory(&mut self) -> Option<&mut Inventory> {
        Some(&mut self.inventory)
    }

    fn drop_item(&mut self, item: ItemType) {
        *self.ground.entry(item).or_default() += 1;
    }
}
