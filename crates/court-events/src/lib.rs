//! Shared event types and serialization for the court intrigue simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod event;
pub mod memory;
pub mod succession;
pub mod timestamp;

// Re-export timestamp types
pub use timestamp::{years_between, CourtDate, CourtTimestamp, ParseDateError, TICKS_PER_YEAR};

// Re-export event types
pub use event::*;

pub use memory::{MemoryType, NarrativeMemory};
pub use succession::{SuccessionEvent, SuccessionType};
