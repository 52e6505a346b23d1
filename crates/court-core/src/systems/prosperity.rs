//! Prosperity Feedback
//!
//! Good times breed ambition and complacency. Reads the territory's
//! prosperity tier and nudges traits, occasionally seeding a new plot.

use court_events::CourtEventKind;

use crate::components::{nudge, CharacterId, PlotType, Role, TIER_GOLDEN_AGE, TIER_PROSPEROUS};
use crate::court::Court;
use crate::rng::Dice;

impl Court {
    /// Applies one tick of prosperity drift to the territory's non-rulers.
    /// Returns a narrative line per notable change.
    pub fn apply_prosperity_feedback(&mut self, dice: &mut impl Dice, territory_id: &str, tick: u64) -> Vec<String> {
        let Some(tier) = self.territories.get(territory_id).map(|t| t.prosperity_tier()) else {
            tracing::warn!("Prosperity feedback skipped for unknown territory {}", territory_id);
            return Vec::new();
        };
        if tier < TIER_PROSPEROUS {
            return Vec::new();
        }

        let courtiers: Vec<CharacterId> = self
            .characters
            .living_in(territory_id)
            .filter(|c| !c.is_ruler())
            .map(|c| c.id.clone())
            .collect();

        let mut narratives = Vec::new();
        for id in courtiers {
            let mut new_plot = None;
            let Some(c) = self.characters.get_mut(&id) else {
                continue;
            };

            if c.traits.ambition > 60 {
                nudge(&mut c.emotions.hope, 5);
                if c.traits.cunning > 50 && c.traits.loyalty < 50 && !c.has_any_plot() && dice.chance(0.10) {
                    new_plot = Some(if c.traits.greed <= 60 {
                        PlotType::Coup
                    } else {
                        PlotType::Embezzlement
                    });
                }
            }

            if tier >= TIER_GOLDEN_AGE {
                if c.role == Role::General && dice.chance(0.05) {
                    nudge(&mut c.traits.courage, -2);
                    narratives.push(format!("{} has grown soft in the long peace", c.display_name()));
                } else if c.role == Role::Advisor && c.traits.greed > 50 && dice.chance(0.05) {
                    nudge(&mut c.traits.greed, 3);
                    nudge(&mut c.traits.loyalty, -2);
                    narratives.push(format!("{} grows fat on the realm's plenty", c.display_name()));
                }
            }

            if let Some(plot_type) = new_plot {
                let name = c.display_name();
                if let Err(e) = self.start_plot(&id, plot_type, None, tick) {
                    tracing::warn!("Skipped prosperity plot for {}: {}", id, e);
                    continue;
                }
                let text = format!("Emboldened by prosperity, {} has begun plotting {}", name, plot_type);
                self.emit(CourtEventKind::PlotStarted, territory_id, tick, &[&id], text.clone());
                narratives.push(text);
            }
        }
        narratives
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{SecretGoal, Territory, Traits};
    use crate::rng::ScriptedDice;
    use crate::setup::CharacterOptions;

    fn court_at_tier(tier: u8) -> Court {
        let mut court = Court::new();
        court
            .territories
            .register(Territory::new("kingsreach", "Kingsreach").with_signals(tier, 0.0));
        court
    }

    fn add(court: &mut Court, role: Role, traits: Traits) -> CharacterId {
        let mut dice = ScriptedDice::always(0.5);
        let id = court.create_character(&mut dice, "kingsreach", role, 0, CharacterOptions::default());
        let c = court.characters.get_mut(&id).unwrap();
        c.traits = traits;
        c.secret_goal = SecretGoal::None;
        id
    }

    #[test]
    fn test_no_effect_below_prosperous() {
        let mut court = court_at_tier(2);
        let id = add(&mut court, Role::Rival, Traits { ambition: 90, ..Traits::default() });
        let hope = court.characters.get(&id).unwrap().emotions.hope;

        let narratives = court.apply_prosperity_feedback(&mut ScriptedDice::always(0.0), "kingsreach", 1);
        assert!(narratives.is_empty());
        assert_eq!(court.characters.get(&id).unwrap().emotions.hope, hope);
    }

    #[test]
    fn test_ambitious_schemer_starts_coup() {
        let mut court = court_at_tier(3);
        let schemer = Traits {
            ambition: 80,
            cunning: 70,
            loyalty: 30,
            greed: 40,
            ..Traits::default()
        };
        let id = add(&mut court, Role::Rival, schemer);
        let hope = court.characters.get(&id).unwrap().emotions.hope;

        court.apply_prosperity_feedback(&mut ScriptedDice::always(0.0), "kingsreach", 1);
        let c = court.characters.get(&id).unwrap();
        assert_eq!(c.emotions.hope, hope + 5);
        assert!(c.has_plot(PlotType::Coup));
    }

    #[test]
    fn test_greedy_schemer_embezzles() {
        let mut court = court_at_tier(3);
        let schemer = Traits {
            ambition: 80,
            cunning: 70,
            loyalty: 30,
            greed: 75,
            ..Traits::default()
        };
        let id = add(&mut court, Role::Rival, schemer);
        court.apply_prosperity_feedback(&mut ScriptedDice::always(0.0), "kingsreach", 1);
        assert!(court.characters.get(&id).unwrap().has_plot(PlotType::Embezzlement));
    }

    #[test]
    fn test_golden_age_drift() {
        let mut court = court_at_tier(4);
        let general = add(&mut court, Role::General, Traits::default());
        let advisor = add(&mut court, Role::Advisor, Traits { greed: 60, ..Traits::default() });

        let narratives = court.apply_prosperity_feedback(&mut ScriptedDice::always(0.0), "kingsreach", 1);
        assert_eq!(narratives.len(), 2);
        assert_eq!(court.characters.get(&general).unwrap().traits.courage, 48);
        let advisor = court.characters.get(&advisor).unwrap();
        assert_eq!(advisor.traits.greed, 63);
        assert_eq!(advisor.traits.loyalty, 48);
    }

    #[test]
    fn test_unknown_territory_is_skipped() {
        let mut court = Court::new();
        assert!(court
            .apply_prosperity_feedback(&mut ScriptedDice::always(0.0), "nowhere", 1)
            .is_empty());
    }
}
