//! Court Seeding
//!
//! Populates a territory's court at world bootstrap.

use crate::components::{CharacterId, Role, Territory};
use crate::court::Court;
use crate::rng::Dice;

use super::characters::CharacterOptions;

/// Territories above this population also seat a rival noble
pub const RIVAL_POPULATION_THRESHOLD: u64 = 5000;

/// Summary of a seeded court
#[derive(Debug, Clone)]
pub struct SeedSummary {
    pub territory_id: String,
    pub ruler_id: CharacterId,
    pub heir_id: CharacterId,
    pub members: Vec<CharacterId>,
}

impl Court {
    /// Registers the territory and seats ruler, heir, general and advisor.
    /// The heir shares the ruler's dynasty.
    pub fn seed_court(&mut self, dice: &mut impl Dice, territory: Territory, tick: u64) -> SeedSummary {
        let territory_id = territory.id.clone();
        let population = territory.population;
        self.territories.register(territory);

        let ruler_id = self.create_character(dice, &territory_id, Role::Ruler, tick, CharacterOptions::default());
        let dynasty = self
            .characters
            .get(&ruler_id)
            .map(|r| r.dynasty_name.clone())
            .unwrap_or_default();

        let heir_id = self.create_character(
            dice,
            &territory_id,
            Role::Heir,
            tick,
            CharacterOptions::default().of_dynasty(dynasty, 1),
        );

        let mut members = vec![ruler_id.clone(), heir_id.clone()];
        members.push(self.create_character(dice, &territory_id, Role::General, tick, CharacterOptions::default()));
        members.push(self.create_character(dice, &territory_id, Role::Advisor, tick, CharacterOptions::default()));
        if population > RIVAL_POPULATION_THRESHOLD {
            members.push(self.create_character(dice, &territory_id, Role::Rival, tick, CharacterOptions::default()));
        }

        tracing::info!("Seeded court of {} with {} members", territory_id, members.len());

        SeedSummary {
            territory_id,
            ruler_id,
            heir_id,
            members,
        }
    }
}
