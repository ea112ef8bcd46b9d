use compactor_core::ItemType;
use compactor_rules::CompactionRule;

/// Context handed to the sink alongside each dropped unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOrigin<'a> {
    /// Owner of the container being compacted (player name, session id).
    pub owner: &'a str,
    /// Rule whose output could not be placed.
    pub rule: &'a CompactionRule,
}

/// Destination for units that did not fit back into the container.
///
/// Invoked exactly once per dropped unit.
pub trait Sink {
    /// Take ownership of one unit of `item`.
    fn deliver(&mut self, item: ItemType, origin: &DropOrigin<'_>);
}

impl<F> Sink for F
where
    F: FnMut(ItemType, &DropOrigin<'_>),
{
    fn deliver(&mut self, item: ItemType, origin: &DropOrigin<'_>) {
        self(item, origin)
    }
}
