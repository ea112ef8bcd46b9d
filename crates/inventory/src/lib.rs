#![warn(missing_docs)]
//! Slotted containers and stack-aware single-unit placement.

mod container;
mod filler;
mod inventory;

pub use container::Container;
pub use filler::{place_one, PlacementOutcome};
pub use inventory::{Inventory, DEFAULT_STACK_SIZE, PLAYER_INVENTORY_SIZE};
