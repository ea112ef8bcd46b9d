//! Namespaced item keys.
//!
//! Item keys are the text form of an item type (e.g., `minecraft:cobblestone`).
//! Parsing is case-insensitive so user input like `COBBLESTONE` or
//! `Minecraft:Iron_Ingot` resolves to the same key the catalog stores.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Namespace applied when a key omits one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Error returned when parsing an invalid [`ItemKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid item key `{input}`: {reason}")]
pub struct ItemKeyError {
    input: String,
    reason: &'static str,
}

impl ItemKeyError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// A lowercase key of the form `namespace:path`.
///
/// Ordering is lexical by `(namespace, path)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    namespace: String,
    path: String,
}

impl ItemKey {
    /// Parse a key, accepting `namespace:path` or a bare `path`.
    pub fn parse(input: &str) -> Result<Self, ItemKeyError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ItemKeyError::new(input, "key cannot be empty"));
        }

        let lowered = trimmed.to_ascii_lowercase();
        let (namespace, path) = match lowered.split_once(':') {
            Some((ns, p)) => (ns.to_string(), p.to_string()),
            None => (DEFAULT_NAMESPACE.to_string(), lowered),
        };

        if namespace.is_empty() {
            return Err(ItemKeyError::new(input, "namespace cannot be empty"));
        }
        if !namespace
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.'))
        {
            return Err(ItemKeyError::new(
                input,
                "namespace has invalid characters (allowed: a-z0-9_.-)",
            ));
        }
        if path.is_empty() {
            return Err(ItemKeyError::new(input, "path cannot be empty"));
        }
        if !path
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.' | '/'))
        {
            return Err(ItemKeyError::new(
                input,
                "path has invalid characters (allowed: a-z0-9_./-)",
            ));
        }

        Ok(Self { namespace, path })
    }

    /// Key namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key path (the short item name).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Short display form: the bare path for the default namespace.
    pub fn short_name(&self) -> String {
        if self.namespace == DEFAULT_NAMESPACE {
            self.path.clone()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for ItemKey {
    type Err = ItemKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ItemKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ItemKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ItemKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}
