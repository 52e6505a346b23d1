//! Territory Components
//!
//! The aggregate numbers the court reads and that sabotage and embezzlement
//! mutate. The survival economy owns these fields; the court only borrows them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current layout of [`ProsperitySignals`]
pub const SIGNALS_SCHEMA_VERSION: u8 = 1;

/// Prosperity tier at which the comfortable start scheming
pub const TIER_PROSPEROUS: u8 = 3;
/// Prosperity tier of a golden age
pub const TIER_GOLDEN_AGE: u8 = 4;

/// Externally computed signals that bias plotting and trait drift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProsperitySignals {
    pub schema_version: u8,
    /// 0 (destitute) upward; 4+ is a golden age
    pub prosperity_tier: u8,
    /// 0 to 100
    pub decadence_level: f64,
}

impl Default for ProsperitySignals {
    fn default() -> Self {
        Self {
            schema_version: SIGNALS_SCHEMA_VERSION,
            prosperity_tier: 0,
            decadence_level: 0.0,
        }
    }
}

/// Which stock a saboteur goes after
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SabotageTarget {
    Military,
    Food,
    Technology,
}

impl SabotageTarget {
    pub fn all() -> &'static [SabotageTarget] {
        &[
            SabotageTarget::Military,
            SabotageTarget::Food,
            SabotageTarget::Technology,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SabotageTarget::Military => "military",
            SabotageTarget::Food => "food",
            SabotageTarget::Technology => "technology",
        }
    }
}

/// A territory's aggregate state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Territory {
    pub id: String,
    pub name: String,
    pub wealth: i64,
    pub food: i64,
    pub military: i64,
    pub technology: i64,
    pub happiness: i64,
    pub population: u64,
    /// Absent signals read as tier 0, no decadence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signals: Option<ProsperitySignals>,
}

impl Territory {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            wealth: 100,
            food: 100,
            military: 100,
            technology: 50,
            happiness: 50,
            population: 1000,
            signals: None,
        }
    }

    pub fn with_stats(mut self, wealth: i64, food: i64, military: i64, technology: i64) -> Self {
        self.wealth = wealth;
        self.food = food;
        self.military = military;
        self.technology = technology;
        self
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = population;
        self
    }

    pub fn with_signals(mut self, prosperity_tier: u8, decadence_level: f64) -> Self {
        self.signals = Some(ProsperitySignals {
            schema_version: SIGNALS_SCHEMA_VERSION,
            prosperity_tier,
            decadence_level,
        });
        self
    }

    /// Signals with defaults applied
    pub fn signals(&self) -> ProsperitySignals {
        self.signals.clone().unwrap_or_default()
    }

    pub fn prosperity_tier(&self) -> u8 {
        self.signals().prosperity_tier
    }

    pub fn decadence_level(&self) -> f64 {
        self.signals().decadence_level
    }

    /// Removes wealth, never below zero. Returns the amount actually taken.
    pub fn drain_wealth(&mut self, amount: i64) -> i64 {
        let taken = amount.min(self.wealth).max(0);
        self.wealth -= taken;
        taken
    }

    /// Damages one stock, never below zero. Returns the amount actually lost.
    pub fn sabotage(&mut self, target: SabotageTarget, amount: i64) -> i64 {
        let stock = match target {
            SabotageTarget::Military => &mut self.military,
            SabotageTarget::Food => &mut self.food,
            SabotageTarget::Technology => &mut self.technology,
        };
        let lost = amount.min(*stock).max(0);
        *stock -= lost;
        lost
    }
}

/// Registry of all territories, keyed by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerritoryRegistry {
    territories: BTreeMap<String, Territory>,
}

impl TerritoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, territory: Territory) {
        self.territories.insert(territory.id.clone(), territory);
    }

    pub fn get(&self, id: &str) -> Option<&Territory> {
        self.territories.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Territory> {
        self.territories.get_mut(id)
    }

    pub fn territory_ids(&self) -> Vec<String> {
        self.territories.keys().cloned().collect()
    }

    pub fn all(&self) -> impl Iterator<Item = &Territory> {
        self.territories.values()
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_signals_default() {
        let territory = Territory::new("kingsreach", "Kingsreach");
        assert_eq!(territory.prosperity_tier(), 0);
        assert_eq!(territory.decadence_level(), 0.0);
        assert_eq!(territory.signals().schema_version, SIGNALS_SCHEMA_VERSION);
    }

    #[test]
    fn test_partial_signals_deserialize() {
        let json = r#"{"id":"a","name":"A","wealth":1,"food":2,"military":3,
            "technology":4,"happiness":5,"population":6,"signals":{"prosperity_tier":4}}"#;
        let territory: Territory = serde_json::from_str(json).unwrap();
        assert_eq!(territory.prosperity_tier(), 4);
        assert_eq!(territory.decadence_level(), 0.0);
    }

    #[test]
    fn test_drain_wealth_floors_at_zero() {
        let mut territory = Territory::new("a", "A").with_stats(8, 0, 0, 0);
        assert_eq!(territory.drain_wealth(12), 8);
        assert_eq!(territory.wealth, 0);
    }

    #[test]
    fn test_sabotage_hits_one_stock() {
        let mut territory = Territory::new("a", "A").with_stats(100, 100, 100, 100);
        assert_eq!(territory.sabotage(SabotageTarget::Food, 10), 10);
        assert_eq!(territory.food, 90);
        assert_eq!(territory.military, 100);
        assert_eq!(territory.technology, 100);
    }

    #[test]
    fn test_registry_orders_by_id() {
        let mut registry = TerritoryRegistry::new();
        registry.register(Territory::new("westmarch", "Westmarch"));
        registry.register(Territory::new("eastfold", "Eastfold"));
        assert_eq!(registry.territory_ids(), vec!["eastfold", "westmarch"]);
    }
}
