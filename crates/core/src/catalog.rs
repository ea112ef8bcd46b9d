use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::{ItemKey, ItemKeyError, ItemType};

/// Items known to [`ItemCatalog::vanilla`]. Index 0 must stay `air`.
const VANILLA_ITEMS: &[&str] = &[
    "air",
    "cobblestone",
    "cobblestone_block",
    "stone",
    "coal",
    "coal_block",
    "iron_nugget",
    "iron_ingot",
    "iron_block",
    "gold_nugget",
    "gold_ingot",
    "gold_block",
    "copper_ingot",
    "copper_block",
    "diamond",
    "diamond_block",
    "emerald",
    "emerald_block",
    "lapis_lazuli",
    "lapis_block",
    "redstone",
    "redstone_block",
    "netherite_ingot",
    "netherite_block",
    "wheat",
    "hay_block",
    "slime_ball",
    "slime_block",
    "bone_meal",
    "bone_block",
    "dried_kelp",
    "dried_kelp_block",
    "snowball",
    "snow_block",
    "clay_ball",
    "clay",
    "melon_slice",
    "melon",
    "quartz",
    "quartz_block",
    "glowstone_dust",
    "glowstone",
    "raw_iron",
    "raw_iron_block",
    "raw_gold",
    "raw_gold_block",
    "raw_copper",
    "raw_copper_block",
    "amethyst_shard",
    "amethyst_block",
    "honeycomb",
    "honeycomb_block",
];

/// Errors emitted while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Wrap IO errors when reading catalog files.
    #[error("failed to read item catalog: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse item catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// A listed key is malformed.
    #[error(transparent)]
    Key(#[from] ItemKeyError),
    /// The same key appears twice.
    #[error("duplicate item key {0}")]
    Duplicate(ItemKey),
    /// Index 0 is reserved for air.
    #[error("first catalog entry must be minecraft:air, found {0}")]
    MissingAir(String),
    /// More keys than an [`ItemType`] can index.
    #[error("item catalog holds {0} entries (max 65536)")]
    TooLarge(usize),
}

/// Bidirectional mapping between item keys and [`ItemType`] ids.
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    keys: Vec<ItemKey>,
    by_key: HashMap<ItemKey, ItemType>,
}

impl ItemCatalog {
    /// Build a catalog from keys. The first key must be air.
    pub fn new(keys: Vec<ItemKey>) -> Result<Self, CatalogError> {
        if keys.len() > usize::from(u16::MAX) + 1 {
            return Err(CatalogError::TooLarge(keys.len()));
        }
        match keys.first() {
            Some(first) if first.namespace() == "minecraft" && first.path() == "air" => {}
            Some(first) => return Err(CatalogError::MissingAir(first.to_string())),
            None => return Err(CatalogError::MissingAir("<empty>".to_string())),
        }

        let mut by_key = HashMap::with_capacity(keys.len());
        for (id, key) in keys.iter().enumerate() {
            if by_key.insert(key.clone(), ItemType(id as u16)).is_some() {
                return Err(CatalogError::Duplicate(key.clone()));
            }
        }
        Ok(Self { keys, by_key })
    }

    /// Built-in catalog of common compactable items.
    pub fn vanilla() -> Self {
        let keys = VANILLA_ITEMS
            .iter()
            .map(|name| ItemKey::parse(name).expect("vanilla item keys are valid"))
            .collect();
        Self::new(keys).expect("vanilla catalog is well-formed")
    }

    /// Parse a JSON array of item keys.
    pub fn from_json_str(input: &str) -> Result<Self, CatalogError> {
        let raw: Vec<String> = serde_json::from_str(input)?;
        let keys = raw
            .iter()
            .map(|name| ItemKey::parse(name))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(keys)
    }

    /// Load a JSON catalog file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Resolve user-facing text (`cobblestone`, `minecraft:COBBLESTONE`) to an item.
    pub fn resolve(&self, text: &str) -> Option<ItemType> {
        let key = ItemKey::parse(text).ok()?;
        self.by_key.get(&key).copied()
    }

    /// Key for an item, if the id is in range.
    pub fn key(&self, item: ItemType) -> Option<&ItemKey> {
        self.keys.get(usize::from(item.0))
    }

    /// Short display name, falling back to `#<id>` for unknown ids.
    pub fn display_name(&self, item: ItemType) -> String {
        self.key(item)
            .map(ItemKey::short_name)
            .unwrap_or_else(|| format!("#{}", item.0))
    }

    /// Item names containing `fragment` (case-insensitive), in catalog order.
    pub fn suggestions(&self, fragment: &str) -> Vec<String> {
        let needle = fragment.trim().to_ascii_lowercase();
        self.keys
            .iter()
            .skip(1)
            .map(ItemKey::short_name)
            .filter(|name| name.contains(&needle))
            .collect()
    }

    /// Number of known items, air included.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false: a valid catalog holds at least air.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::vanilla()
    }
}
