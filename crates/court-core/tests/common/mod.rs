//! Shared helpers for building hand-tuned courts.

#![allow(dead_code)]

use court_core::{CharacterId, CharacterOptions, Court, Role, ScriptedDice, SecretGoal, Territory, Traits};

pub const REALM: &str = "kingsreach";

/// A court with one registered territory and nobody in it
pub fn empty_court() -> Court {
    let mut court = Court::new();
    court
        .territories
        .register(Territory::new(REALM, "Kingsreach").with_population(3000));
    court
}

/// Adds a character with exactly the given traits and no secret goal.
pub fn add(court: &mut Court, role: Role, traits: Traits) -> CharacterId {
    let mut dice = ScriptedDice::always(0.5);
    let id = court.create_character(&mut dice, REALM, role, 0, CharacterOptions::default());
    let character = court.characters.get_mut(&id).unwrap();
    let virtues = character.traits.virtues.clone();
    character.traits = Traits { virtues, ..traits };
    character.secret_goal = SecretGoal::None;
    id
}

/// Traits that make nobody a claimant: ambition 40, everything else 50
pub fn meek() -> Traits {
    Traits {
        ambition: 40,
        ..Traits::default()
    }
}

pub fn living_rulers(court: &Court, territory_id: &str) -> Vec<CharacterId> {
    court
        .characters
        .living_in(territory_id)
        .filter(|c| c.role == Role::Ruler)
        .map(|c| c.id.clone())
        .collect()
}
