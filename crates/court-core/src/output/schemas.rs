//! Output Schemas
//!
//! Serialization structs for court snapshots.

use serde::{Deserialize, Serialize};

use court_events::{CourtTimestamp, SuccessionEvent};

use crate::components::{
    Addiction, EmotionalState, Plot, PoliticalFaction, Rebellion, ReignSummary, Role, SecretGoal,
    Territory, Traits,
};

/// Full court state at one tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourtSnapshot {
    pub snapshot_id: String,
    pub timestamp: CourtTimestamp,
    pub triggered_by: String,
    pub territories: Vec<TerritorySnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub factions: Vec<PoliticalFaction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rebellions: Vec<Rebellion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub successions: Vec<SuccessionEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallen_rulers: Vec<FallenRulerSnapshot>,
}

/// One territory and its living court
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerritorySnapshot {
    pub territory: Territory,
    pub ruler_id: Option<String>,
    pub court: Vec<CharacterSnapshot>,
}

/// A living character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub id: String,
    pub name: String,
    pub title: String,
    pub role: Role,
    pub age: u32,
    pub dynasty: String,
    pub dynasty_generation: u32,
    pub traits: Traits,
    pub emotions: EmotionalState,
    pub secret_goal: SecretGoal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plots: Vec<Plot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addiction: Option<Addiction>,
    pub deed_count: usize,
}

/// A dead ruler's closing record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallenRulerSnapshot {
    pub id: String,
    pub territory_id: String,
    pub death_tick: Option<u64>,
    pub reign: ReignSummary,
}
