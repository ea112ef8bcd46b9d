use compactor_core::{ItemCatalog, ItemType};
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Converts `source_count` units of `source` into one unit of `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompactionRule {
    /// Item consumed by the conversion.
    pub source: ItemType,
    /// Units of `source` per produced unit; always at least one.
    pub source_count: u32,
    /// Item produced by the conversion.
    pub target: ItemType,
}

impl CompactionRule {
    /// Build a rule from already-resolved parts, enforcing rule invariants.
    pub fn new(source: ItemType, source_count: u32, target: ItemType) -> Result<Self, ValidationError> {
        if source.is_air() || target.is_air() {
            return Err(ValidationError::Air);
        }
        if source_count == 0 {
            return Err(ValidationError::NonPositive(0));
        }
        if source == target {
            return Err(ValidationError::SameSourceAndTarget);
        }
        Ok(Self {
            source,
            source_count,
            target,
        })
    }

    /// Resolve item text and a signed count against `catalog`.
    pub fn resolve(
        catalog: &ItemCatalog,
        source: &str,
        source_count: i64,
        target: &str,
    ) -> Result<Self, ValidationError> {
        let source_item = resolve_item(catalog, source)?;
        let target_item = resolve_item(catalog, target)?;
        if source_count <= 0 {
            return Err(ValidationError::NonPositive(source_count));
        }
        let count = u32::try_from(source_count)
            .map_err(|_| ValidationError::TooLarge(source_count.to_string()))?;
        Self::new(source_item, count, target_item)
    }

    /// Serialized form using catalog names.
    pub fn to_record(&self, catalog: &ItemCatalog) -> RuleRecord {
        RuleRecord {
            source_material: catalog.display_name(self.source),
            source_count: i64::from(self.source_count),
            target_material: catalog.display_name(self.target),
        }
    }
}

/// Persisted shape of a rule, as stored by the configuration store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRecord {
    /// Source item name.
    pub source_material: String,
    /// Source units per produced unit. Signed so that bad values reach validation.
    pub source_count: i64,
    /// Target item name.
    pub target_material: String,
}

impl RuleRecord {
    /// Convenience constructor.
    pub fn new(source: &str, source_count: i64, target: &str) -> Self {
        Self {
            source_material: source.to_string(),
            source_count,
            target_material: target.to_string(),
        }
    }
}

fn resolve_item(catalog: &ItemCatalog, text: &str) -> Result<ItemType, ValidationError> {
    catalog
        .resolve(text)
        .ok_or_else(|| ValidationError::UnknownItem(text.trim().to_string()))
}

pub(crate) fn parse_count(text: &str) -> Result<i64, ValidationError> {
    use std::num::IntErrorKind;

    let trimmed = text.trim();
    trimmed.parse::<i64>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ValidationError::TooLarge(trimmed.to_string())
        }
        _ => ValidationError::NotANumber(trimmed.to_string()),
    })
}
