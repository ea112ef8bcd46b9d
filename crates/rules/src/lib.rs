#![warn(missing_docs)]
//! Conversion rules and the rule table that drives compaction.

mod rule;
mod table;

pub use rule::{CompactionRule, RuleRecord};
pub use table::RuleTable;

use thiserror::Error;

/// Malformed rule text or parts. Never mutates a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Item text does not resolve through the catalog.
    #[error("unknown item `{0}`")]
    UnknownItem(String),
    /// Count text is not a whole number.
    #[error("count `{0}` is not a whole number")]
    NotANumber(String),
    /// Count is zero or negative.
    #[error("count must be positive, got {0}")]
    NonPositive(i64),
    /// Count does not fit the supported range.
    #[error("count `{0}` is too large")]
    TooLarge(String),
    /// Air cannot be a source or target.
    #[error("air cannot be compacted or produced")]
    Air,
    /// Source and target are the same item.
    #[error("an item cannot be compacted into itself")]
    SameSourceAndTarget,
}

/// Why a persisted record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRuleReason {
    /// The record failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// An earlier record already claims this source item.
    #[error("duplicate rule for source `{0}`")]
    DuplicateSource(String),
}

/// A persisted rule record that cannot be loaded. Rejects the whole reload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid rule record #{index}: {reason}")]
pub struct InvalidRuleError {
    /// Position of the offending record.
    pub index: usize,
    /// What was wrong with it.
    pub reason: InvalidRuleReason,
}
