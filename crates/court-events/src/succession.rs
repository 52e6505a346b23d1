//! Succession Records
//!
//! Immutable records of ruler transitions. One is created per transition and
//! never mutated afterward.

use serde::{Deserialize, Serialize};

use crate::CourtTimestamp;

/// How power changed hands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessionType {
    /// The heir inherited
    Peaceful,
    /// A single claimant seized the throne
    Coup,
    /// Several claimants fought for it
    CivilWar,
    /// Nobody stood to inherit, so a new ruler was raised
    Election,
}

impl SuccessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuccessionType::Peaceful => "peaceful",
            SuccessionType::Coup => "coup",
            SuccessionType::CivilWar => "civil_war",
            SuccessionType::Election => "election",
        }
    }
}

impl std::fmt::Display for SuccessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ruler transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessionEvent {
    pub territory_id: String,
    /// The ruler who died or was deposed. Absent when a usurper took an empty throne.
    pub previous_ruler_id: Option<String>,
    pub new_ruler_id: String,
    pub succession_type: SuccessionType,
    /// Only set for civil wars
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub casualties: Option<u32>,
    pub narrative: String,
    pub timestamp: CourtTimestamp,
}

impl SuccessionEvent {
    pub fn new(
        territory_id: impl Into<String>,
        previous_ruler_id: Option<String>,
        new_ruler_id: impl Into<String>,
        succession_type: SuccessionType,
        casualties: Option<u32>,
        narrative: impl Into<String>,
        tick: u64,
    ) -> Self {
        Self {
            territory_id: territory_id.into(),
            previous_ruler_id,
            new_ruler_id: new_ruler_id.into(),
            succession_type,
            casualties,
            narrative: narrative.into(),
            timestamp: CourtTimestamp::at(tick),
        }
    }

    pub fn was_violent(&self) -> bool {
        matches!(
            self.succession_type,
            SuccessionType::Coup | SuccessionType::CivilWar
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_succession_type_serialization() {
        assert_eq!(
            serde_json::to_string(&SuccessionType::CivilWar).unwrap(),
            r#""civil_war""#
        );
        assert_eq!(SuccessionType::Peaceful.to_string(), "peaceful");
    }

    #[test]
    fn test_casualties_omitted_when_absent() {
        let event = SuccessionEvent::new(
            "kingsreach",
            Some("chr_00000001".into()),
            "chr_00000002",
            SuccessionType::Peaceful,
            None,
            "The crown passed quietly",
            120,
        );
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("casualties"));
        assert!(!event.was_violent());
    }
}
