#![warn(missing_docs)]
//! Compaction engine: aggregates eligible stacks, applies conversion rules and
//! reinserts the results with overflow routed to an external sink.

mod batch;
mod pass;
mod sink;

pub use batch::{aggregate, scan, ItemBatch};
pub use pass::{CompactionEngine, IntegrityWarning, PassResult, TypeReport};
pub use sink::{DropOrigin, Sink};
