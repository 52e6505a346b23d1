//! Event System
//!
//! Court event log and narrative memory sink.

pub mod logger;
pub mod narrative;

pub use logger::EventLog;
pub use narrative::{MemoryJournal, NarrativeSink, OfflineSink, SinkError};
