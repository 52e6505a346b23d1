//! Narrative Sink
//!
//! Major plot and succession outcomes are handed to a narrative/memory
//! collaborator. Recording is fire-and-forget: a failure is logged and the
//! court mutation that produced the memory stands.

use court_events::NarrativeMemory;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("narrative sink unavailable: {0}")]
    Unavailable(String),
    #[error("narrative sink rejected memory: {0}")]
    Rejected(String),
}

/// Receiver for remembered moments
pub trait NarrativeSink: Send + Sync {
    fn record(&mut self, memory: NarrativeMemory) -> Result<(), SinkError>;
}

/// In-memory sink that keeps everything it is given.
///
/// Clones share one journal, so a caller can keep a handle after boxing a
/// clone into the court.
#[derive(Debug, Clone, Default)]
pub struct MemoryJournal {
    memories: Arc<Mutex<Vec<NarrativeMemory>>>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn memories(&self) -> Vec<NarrativeMemory> {
        self.memories
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.memories.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NarrativeSink for MemoryJournal {
    fn record(&mut self, memory: NarrativeMemory) -> Result<(), SinkError> {
        self.memories
            .lock()
            .map_err(|_| SinkError::Unavailable("journal lock poisoned".to_string()))?
            .push(memory);
        Ok(())
    }
}

/// Sink that refuses everything, for exercising the failure path
#[derive(Debug, Default)]
pub struct OfflineSink;

impl NarrativeSink for OfflineSink {
    fn record(&mut self, _memory: NarrativeMemory) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("offline".to_string()))
    }
}
