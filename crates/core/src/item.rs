//! Item types and inventory stacks.

use serde::{Deserialize, Serialize};

/// Item type identifier, an index into the [`ItemCatalog`](crate::ItemCatalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemType(pub u16);

impl ItemType {
    /// Placeholder for "nothing here". Never compacted, never placed.
    pub const AIR: Self = Self(0);

    /// Whether this is the air placeholder.
    pub fn is_air(self) -> bool {
        self == Self::AIR
    }
}

/// Enchantment-like modifier attached to a stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enchantment {
    /// Enchantment identifier (free-form, host defined).
    pub id: String,
    /// Enchantment level.
    pub level: u8,
}

/// Non-stackable metadata a stack may carry.
///
/// Any populated field makes the stack unique, so it is ignored by compaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemMeta {
    /// Custom display name.
    pub display_name: Option<String>,
    /// Applied enchantments.
    pub enchantments: Vec<Enchantment>,
    /// Lore text lines.
    pub lore: Vec<String>,
    /// Unbreakable flag.
    pub unbreakable: bool,
}

impl ItemMeta {
    /// True when no field is populated.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.enchantments.is_empty()
            && self.lore.is_empty()
            && !self.unbreakable
    }
}

/// A stack of items occupying one container slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Type of item.
    pub item: ItemType,
    /// Quantity in stack.
    pub count: u32,
    /// Extra metadata (display name, enchantments, lore, unbreakable).
    #[serde(default, skip_serializing_if = "ItemMeta::is_empty")]
    pub meta: ItemMeta,
}

impl ItemStack {
    /// Create a plain stack without metadata.
    pub fn new(item: ItemType, count: u32) -> Self {
        Self {
            item,
            count,
            meta: ItemMeta::default(),
        }
    }

    /// Create a stack carrying metadata.
    pub fn with_meta(item: ItemType, count: u32, meta: ItemMeta) -> Self {
        Self { item, count, meta }
    }

    /// Whether the stack carries any non-stackable metadata.
    pub fn has_extra_data(&self) -> bool {
        !self.meta.is_empty()
    }

    /// Eligible for compaction: not air and free of extra data.
    pub fn is_plain(&self) -> bool {
        !self.item.is_air() && !self.has_extra_data()
    }

    /// Plain stack of exactly `item`.
    pub fn is_plain_of(&self, item: ItemType) -> bool {
        self.item == item && self.is_plain()
    }
}
