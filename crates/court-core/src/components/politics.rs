//! Politics Components
//!
//! Factions and rebellions spawned when a rebellion plot comes to a head.

use serde::{Deserialize, Serialize};

/// A political faction rallying around a court figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoliticalFaction {
    pub id: String,
    pub territory_id: String,
    pub name: String,
    pub leader_id: String,
    pub power: f64,
    /// 0 to 100
    pub rebellion_risk: f64,
    pub member_count: u64,
    pub founded_tick: u64,
}

/// An armed uprising
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rebellion {
    pub id: String,
    pub territory_id: String,
    pub faction_id: String,
    pub leader_id: String,
    pub strength: f64,
    pub started_tick: u64,
    pub active: bool,
}

/// Store of factions and rebellions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoliticsRegistry {
    factions: Vec<PoliticalFaction>,
    rebellions: Vec<Rebellion>,
    next_faction: u64,
    next_rebellion: u64,
}

impl PoliticsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new faction and returns its id.
    pub fn found_faction(
        &mut self,
        territory_id: impl Into<String>,
        name: impl Into<String>,
        leader_id: impl Into<String>,
        power: f64,
        rebellion_risk: f64,
        member_count: u64,
        tick: u64,
    ) -> String {
        self.next_faction += 1;
        let id = format!("fac_{:06}", self.next_faction);
        self.factions.push(PoliticalFaction {
            id: id.clone(),
            territory_id: territory_id.into(),
            name: name.into(),
            leader_id: leader_id.into(),
            power,
            rebellion_risk: rebellion_risk.clamp(0.0, 100.0),
            member_count,
            founded_tick: tick,
        });
        id
    }

    /// Records an active rebellion and returns its id.
    pub fn start_rebellion(
        &mut self,
        territory_id: impl Into<String>,
        faction_id: impl Into<String>,
        leader_id: impl Into<String>,
        strength: f64,
        tick: u64,
    ) -> String {
        self.next_rebellion += 1;
        let id = format!("reb_{:06}", self.next_rebellion);
        self.rebellions.push(Rebellion {
            id: id.clone(),
            territory_id: territory_id.into(),
            faction_id: faction_id.into(),
            leader_id: leader_id.into(),
            strength,
            started_tick: tick,
            active: true,
        });
        id
    }

    pub fn faction(&self, id: &str) -> Option<&PoliticalFaction> {
        self.factions.iter().find(|f| f.id == id)
    }

    pub fn factions_in<'a>(&'a self, territory_id: &'a str) -> impl Iterator<Item = &'a PoliticalFaction> {
        self.factions.iter().filter(move |f| f.territory_id == territory_id)
    }

    pub fn active_rebellions<'a>(&'a self, territory_id: &'a str) -> impl Iterator<Item = &'a Rebellion> {
        self.rebellions
            .iter()
            .filter(move |r| r.active && r.territory_id == territory_id)
    }

    pub fn factions(&self) -> &[PoliticalFaction] {
        &self.factions
    }

    pub fn rebellions(&self) -> &[Rebellion] {
        &self.rebellions
    }
}
