//! Character Components
//!
//! Court characters: roles, traits, emotions, secret goals, deeds.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use court_events::years_between;

use super::plot::{Plot, PlotType};
use crate::error::{CourtError, CourtResult};

/// Oldest deeds are dropped past this many
pub const MAX_DEEDS: usize = 20;

/// Unique identifier for a character
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub String);

impl CharacterId {
    pub fn from_sequence(sequence: u64) -> Self {
        CharacterId(format!("chr_{:08}", sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CharacterId {
    fn from(s: &str) -> Self {
        CharacterId(s.to_string())
    }
}

/// Position at court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Ruler,
    Heir,
    General,
    Advisor,
    Rival,
    RebelLeader,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Ruler => "ruler",
            Role::Heir => "heir",
            Role::General => "general",
            Role::Advisor => "advisor",
            Role::Rival => "rival",
            Role::RebelLeader => "rebel_leader",
        }
    }

    pub fn all() -> &'static [Role] {
        &[
            Role::Ruler,
            Role::Heir,
            Role::General,
            Role::Advisor,
            Role::Rival,
            Role::RebelLeader,
        ]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adds `delta` to a 0-100 stat, clamping at both ends.
pub fn nudge(value: &mut u8, delta: i32) {
    *value = (i32::from(*value) + delta).clamp(0, 100) as u8;
}

/// Extra virtues rulers carry for legitimacy logic outside the court core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulerVirtues {
    pub justice: u8,
    pub generosity: u8,
    pub vigilance: u8,
    pub strength: u8,
}

/// Psychological profile. All values are 0 to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traits {
    pub ambition: u8,
    pub greed: u8,
    pub loyalty: u8,
    pub honor: u8,
    pub cruelty: u8,
    pub compassion: u8,
    pub cunning: u8,
    pub wisdom: u8,
    pub paranoia: u8,
    pub courage: u8,
    pub pride: u8,
    pub wrath: u8,
    pub charisma: u8,
    pub diplomacy: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtues: Option<RulerVirtues>,
}

impl Default for Traits {
    fn default() -> Self {
        Self {
            ambition: 50,
            greed: 50,
            loyalty: 50,
            honor: 50,
            cruelty: 50,
            compassion: 50,
            cunning: 50,
            wisdom: 50,
            paranoia: 50,
            courage: 50,
            pride: 50,
            wrath: 50,
            charisma: 50,
            diplomacy: 50,
            virtues: None,
        }
    }
}

impl Traits {
    /// Every base trait value, in declaration order
    pub fn values(&self) -> [u8; 14] {
        [
            self.ambition,
            self.greed,
            self.loyalty,
            self.honor,
            self.cruelty,
            self.compassion,
            self.cunning,
            self.wisdom,
            self.paranoia,
            self.courage,
            self.pride,
            self.wrath,
            self.charisma,
            self.diplomacy,
        ]
    }
}

/// Current mood. All values are 0 to 100, always clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalState {
    pub hope: u8,
    pub fear: u8,
    pub shame: u8,
    pub despair: u8,
    pub contentment: u8,
    pub rage: u8,
}

impl Default for EmotionalState {
    fn default() -> Self {
        Self {
            hope: 50,
            fear: 10,
            shame: 5,
            despair: 5,
            contentment: 50,
            rage: 10,
        }
    }
}

impl EmotionalState {
    pub fn values(&self) -> [u8; 6] {
        [
            self.hope,
            self.fear,
            self.shame,
            self.despair,
            self.contentment,
            self.rage,
        ]
    }
}

/// Hidden long-term motivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SecretGoal {
    SeizeThrone,
    AccumulateWealth,
    Revenge,
    ProtectFamily,
    ForeignAllegiance,
    ReligiousDominance,
    Independence,
    Glory,
    #[default]
    None,
}

/// Kind of notable act
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeedType {
    Heroic,
    Villainous,
    Political,
    Personal,
}

/// One entry in a character's deed log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deed {
    pub tick: u64,
    pub description: String,
    pub deed_type: DeedType,
}

/// Terminal record attached to a ruler at death
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReignSummary {
    pub years_reigned: u32,
    pub obituary: String,
    /// Reserved for war statistics kept outside the court core
    pub wars_fought: u32,
    pub plots_survived: u32,
}

/// How severe an externally tracked addiction is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddictionSeverity {
    Mild,
    Moderate,
    Severe,
    Crippling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddictionKind {
    Drink,
    Gambling,
    Opium,
    Gluttony,
}

/// Vice supplied by the economic simulation; raises the urge to scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addiction {
    pub kind: AddictionKind,
    pub severity: AddictionSeverity,
}

impl Addiction {
    /// Contribution to the per-tick plot chance
    pub fn plot_bonus(&self) -> f64 {
        let base = match self.severity {
            AddictionSeverity::Mild => 0.02,
            AddictionSeverity::Moderate => 0.05,
            AddictionSeverity::Severe => 0.10,
            AddictionSeverity::Crippling => 0.20,
        };
        if self.kind == AddictionKind::Gambling {
            base + 0.03
        } else {
            base
        }
    }
}

/// A person at court
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub title: String,
    pub territory_id: String,
    pub role: Role,
    pub dynasty_name: String,
    pub dynasty_generation: u32,
    /// May be negative for characters born before the simulation began
    pub birth_tick: i64,
    pub coronation_tick: Option<u64>,
    pub death_tick: Option<u64>,
    pub death_cause: Option<String>,
    pub alive: bool,
    pub traits: Traits,
    pub emotions: EmotionalState,
    pub secret_goal: SecretGoal,
    #[serde(default)]
    pub plots: Vec<Plot>,
    #[serde(default)]
    pub deeds: VecDeque<Deed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addiction: Option<Addiction>,
    /// Plotters put to death while this character held the throne
    #[serde(default)]
    pub plots_foiled: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reign_summary: Option<ReignSummary>,
}

impl Character {
    /// Age in whole years at the given tick
    pub fn age_at(&self, tick: u64) -> u32 {
        years_between(self.birth_tick, tick as i64).max(0) as u32
    }

    pub fn is_ruler(&self) -> bool {
        self.role == Role::Ruler
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.title, self.name)
    }

    // --- Plots ---

    pub fn plot(&self, plot_type: PlotType) -> Option<&Plot> {
        self.plots.iter().find(|p| p.plot_type == plot_type)
    }

    pub fn plot_mut(&mut self, plot_type: PlotType) -> Option<&mut Plot> {
        self.plots.iter_mut().find(|p| p.plot_type == plot_type)
    }

    pub fn has_plot(&self, plot_type: PlotType) -> bool {
        self.plot(plot_type).is_some()
    }

    pub fn has_any_plot(&self) -> bool {
        !self.plots.is_empty()
    }

    /// Adds a plot. A character holds at most one plot of each type.
    pub fn add_plot(&mut self, plot: Plot) -> CourtResult<()> {
        if self.has_plot(plot.plot_type) {
            return Err(CourtError::DuplicatePlot {
                character_id: self.id.0.clone(),
                plot_type: plot.plot_type,
            });
        }
        self.plots.push(plot);
        Ok(())
    }

    pub fn remove_plot(&mut self, plot_type: PlotType) -> Option<Plot> {
        let index = self.plots.iter().position(|p| p.plot_type == plot_type)?;
        Some(self.plots.swap_remove(index))
    }

    // --- Deeds ---

    pub fn add_deed(&mut self, tick: u64, description: impl Into<String>, deed_type: DeedType) {
        self.deeds.push_back(Deed {
            tick,
            description: description.into(),
            deed_type,
        });
        while self.deeds.len() > MAX_DEEDS {
            self.deeds.pop_front();
        }
    }

    // --- Lifecycle ---

    /// Marks the character dead. Idempotent: the first death sticks.
    pub fn kill(&mut self, tick: u64, cause: impl Into<String>) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.death_tick = Some(tick);
        self.death_cause = Some(cause.into());
        self.plots.clear();
    }

    fn ensure_alive(&self) -> CourtResult<()> {
        if self.alive {
            Ok(())
        } else {
            Err(CourtError::CharacterDead(self.id.0.clone()))
        }
    }

    /// heir/general/advisor/rival/rebel_leader -> ruler
    pub fn promote_to_ruler(&mut self, title: impl Into<String>, tick: u64) -> CourtResult<()> {
        self.ensure_alive()?;
        if self.role == Role::Ruler {
            return Err(CourtError::InvalidRoleTransition {
                from: self.role,
                to: Role::Ruler,
            });
        }
        self.role = Role::Ruler;
        self.title = title.into();
        self.coronation_tick = Some(tick);
        self.secret_goal = SecretGoal::None;
        self.plots.clear();
        Ok(())
    }

    /// ruler -> rival, stripped of the crown
    pub fn demote_to_rival(&mut self, title: impl Into<String>) -> CourtResult<()> {
        self.ensure_alive()?;
        if self.role != Role::Ruler {
            return Err(CourtError::InvalidRoleTransition {
                from: self.role,
                to: Role::Rival,
            });
        }
        self.role = Role::Rival;
        self.title = title.into();
        Ok(())
    }

    /// Any non-ruler -> rebel_leader
    pub fn convert_to_rebel_leader(&mut self) -> CourtResult<()> {
        self.ensure_alive()?;
        if self.role == Role::Ruler {
            return Err(CourtError::InvalidRoleTransition {
                from: self.role,
                to: Role::RebelLeader,
            });
        }
        self.role = Role::RebelLeader;
        self.title = "Rebel Leader".to_string();
        Ok(())
    }

    /// Checks every trait and emotion is within 0-100.
    pub fn stats_in_bounds(&self) -> bool {
        self.traits.values().iter().all(|v| *v <= 100)
            && self.emotions.values().iter().all(|v| *v <= 100)
    }
}
