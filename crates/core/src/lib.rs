#![warn(missing_docs)]
//! Core item primitives shared across the workspace.

mod catalog;
pub mod item;
mod key;

pub use catalog::{CatalogError, ItemCatalog};
pub use item::{Enchantment, ItemMeta, ItemStack, ItemType};
pub use key::{ItemKey, ItemKeyError, DEFAULT_NAMESPACE};
