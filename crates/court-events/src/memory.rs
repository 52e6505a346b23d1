//! Narrative Memory Records
//!
//! What the court hands to the narrative/memory collaborator after major
//! plot and succession outcomes.

use serde::{Deserialize, Serialize};

/// Category of a remembered moment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryType {
    Intrigue,
    Betrayal,
    Triumph,
    Tragedy,
    Succession,
}

/// A moment worth remembering, weighted by how much it shook the realm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeMemory {
    /// 0.0 (trivial) to 1.0 (realm-shattering)
    pub emotional_weight: f32,
    pub description: String,
    pub memory_type: MemoryType,
}

impl NarrativeMemory {
    pub fn new(emotional_weight: f32, description: impl Into<String>, memory_type: MemoryType) -> Self {
        Self {
            emotional_weight: emotional_weight.clamp(0.0, 1.0),
            description: description.into(),
            memory_type,
        }
    }
}
