//! Aging & Mortality
//!
//! Natural death is an actuarial roll against age. Runs before plots each
//! tick so a ruler who dies in bed is succeeded before any scheme resolves.

use court_events::{CourtEvent, CourtEventKind, MemoryType};

use crate::court::Court;
use crate::rng::{pick, Dice};
use crate::setup::names::NATURAL_CAUSES;

/// Per-tick chance of dying of natural causes at the given age.
///
/// Zero below 50, rising half a percent per year to 70, a further one
/// percent per year from 70 to 85, and a flat 15% on top from 85.
pub fn death_probability(age: u32) -> f64 {
    if age < 50 {
        return 0.0;
    }
    let mut probability = 0.005 * f64::from(age.min(70) - 50);
    if age >= 70 {
        probability += 0.01 * f64::from(age.min(85) - 70);
    }
    if age >= 85 {
        probability += 0.15;
    }
    probability
}

impl Court {
    /// Rolls mortality for every living character. A ruler's death resolves
    /// succession immediately.
    pub fn process_character_aging(&mut self, dice: &mut impl Dice, tick: u64) -> Vec<CourtEvent> {
        let mut events = Vec::new();

        for id in self.characters.living_ids() {
            let Some(character) = self.characters.get(&id).filter(|c| c.alive) else {
                continue;
            };
            let age = character.age_at(tick);
            let probability = death_probability(age);
            if probability <= 0.0 || !dice.chance(probability) {
                continue;
            }

            let cause = *pick(dice, NATURAL_CAUSES);
            let territory_id = character.territory_id.clone();
            let is_ruler = character.is_ruler();
            let text = format!("{} died of {}, aged {}", character.display_name(), cause, age);

            if let Some(character) = self.characters.get_mut(&id) {
                character.kill(tick, cause);
            }
            tracing::info!("[{}] {}", territory_id, text);
            self.remember(if is_ruler { 0.7 } else { 0.4 }, text.clone(), MemoryType::Tragedy);
            events.push(self.emit(CourtEventKind::Death, &territory_id, tick, &[&id], text));

            if is_ruler {
                match self.resolve_succession(dice, &id, tick, cause) {
                    Ok((_, succession_events)) => events.extend(succession_events),
                    Err(e) => tracing::warn!("Succession for {} skipped: {}", id, e),
                }
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_death_probability_curve() {
        assert_eq!(death_probability(30), 0.0);
        assert_eq!(death_probability(49), 0.0);
        assert_eq!(death_probability(50), 0.0);
        assert!((death_probability(60) - 0.05).abs() < 1e-9);
        assert!((death_probability(70) - 0.10).abs() < 1e-9);
        assert!((death_probability(80) - 0.20).abs() < 1e-9);
        assert!((death_probability(85) - 0.40).abs() < 1e-9);
        assert!((death_probability(95) - 0.40).abs() < 1e-9);
    }
}
