//! Plot Components
//!
//! A plot is a scheme owned by one character. Each type has static tuning:
//! how fast it advances, how likely it is to be noticed, and its narrative.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::character::CharacterId;

/// The kinds of scheme a character can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotType {
    Coup,
    Assassination,
    Embezzlement,
    Sabotage,
    Defection,
    Rebellion,
}

/// Static tuning for a plot type
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Progress points gained per tick before modifiers
    pub base_progress: i32,
    /// Per-tick chance the ruler uncovers it before modifiers
    pub base_discovery: f64,
    pub success_text: &'static str,
    pub failure_text: &'static str,
}

const COUP: PlotConfig = PlotConfig {
    base_progress: 5,
    base_discovery: 0.05,
    success_text: "seized the throne in a lightning coup",
    failure_text: "led a coup that collapsed at the palace gates",
};

const ASSASSINATION: PlotConfig = PlotConfig {
    base_progress: 8,
    base_discovery: 0.08,
    success_text: "struck from the shadows and left a corpse behind",
    failure_text: "botched an assassination in the dark",
};

const EMBEZZLEMENT: PlotConfig = PlotConfig {
    base_progress: 10,
    base_discovery: 0.03,
    success_text: "quietly drained the treasury",
    failure_text: "was caught with a hand in the treasury",
};

const SABOTAGE: PlotConfig = PlotConfig {
    base_progress: 12,
    base_discovery: 0.06,
    success_text: "crippled the realm from within",
    failure_text: "was caught setting fires",
};

const DEFECTION: PlotConfig = PlotConfig {
    base_progress: 7,
    base_discovery: 0.04,
    success_text: "secretly pledged themselves to a foreign crown",
    failure_text: "was intercepted carrying letters abroad",
};

const REBELLION: PlotConfig = PlotConfig {
    base_progress: 4,
    base_discovery: 0.07,
    success_text: "raised the banner of open rebellion",
    failure_text: "saw the rebellion strangled in its cradle",
};

impl PlotType {
    pub fn config(&self) -> &'static PlotConfig {
        match self {
            PlotType::Coup => &COUP,
            PlotType::Assassination => &ASSASSINATION,
            PlotType::Embezzlement => &EMBEZZLEMENT,
            PlotType::Sabotage => &SABOTAGE,
            PlotType::Defection => &DEFECTION,
            PlotType::Rebellion => &REBELLION,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlotType::Coup => "coup",
            PlotType::Assassination => "assassination",
            PlotType::Embezzlement => "embezzlement",
            PlotType::Sabotage => "sabotage",
            PlotType::Defection => "defection",
            PlotType::Rebellion => "rebellion",
        }
    }

    pub fn all() -> &'static [PlotType] {
        &[
            PlotType::Coup,
            PlotType::Assassination,
            PlotType::Embezzlement,
            PlotType::Sabotage,
            PlotType::Defection,
            PlotType::Rebellion,
        ]
    }
}

impl fmt::Display for PlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One active scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plot {
    pub plot_type: PlotType,
    /// Explicit victim; assassinations without one target the ruler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<CharacterId>,
    pub start_tick: u64,
    /// 0 to 100, never decreases
    pub progress: u8,
    /// Once set, never cleared
    pub discovered: bool,
    #[serde(default)]
    pub conspirators: BTreeSet<CharacterId>,
}

impl Plot {
    pub fn new(plot_type: PlotType, target_id: Option<CharacterId>, start_tick: u64) -> Self {
        Self {
            plot_type,
            target_id,
            start_tick,
            progress: 0,
            discovered: false,
            conspirators: BTreeSet::new(),
        }
    }

    pub fn conspirator_count(&self) -> usize {
        self.conspirators.len()
    }

    /// Progress points this tick for a plotter of the given cunning
    pub fn progress_rate(&self, plotter_cunning: u8) -> i32 {
        let cunning_bonus = (i32::from(plotter_cunning) - 50).div_euclid(10);
        self.plot_type.config().base_progress
            + cunning_bonus
            + 2 * self.conspirator_count() as i32
    }

    /// Advances progress, capped at 100. Negative rates are ignored.
    pub fn advance(&mut self, rate: i32) {
        let next = i32::from(self.progress) + rate.max(0);
        self.progress = next.min(100) as u8;
    }

    /// Per-tick chance a ruler of the given paranoia notices this plot
    pub fn discovery_chance(&self, ruler_paranoia: u8, plotter_cunning: u8) -> f64 {
        self.plot_type.config().base_discovery + f64::from(ruler_paranoia) / 1000.0
            - f64::from(plotter_cunning) / 500.0
            + 0.01 * self.conspirator_count() as f64
    }

    pub fn mark_discovered(&mut self) {
        self.discovered = true;
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }

    /// True when `next` is a legal successor state of this plot:
    /// progress did not fall and discovery was not undone.
    pub fn may_become(&self, next: &Plot) -> bool {
        self.plot_type == next.plot_type
            && next.progress >= self.progress
            && (next.discovered || !self.discovered)
    }
}
