//! Character Generation
//!
//! Rolls a new character's traits, secret goal, age and starting mood.
//! Only used at creation time; everything after that is drift.

use std::collections::VecDeque;

use crate::components::{
    nudge, Character, CharacterId, EmotionalState, Role, RulerVirtues, SecretGoal, Traits,
};
use crate::court::Court;
use crate::rng::{band, pick, Dice};

use super::names::{titles_for, DYNASTY_NAMES, GIVEN_NAMES};

/// Explicit identity for a new character. Anything left unset is rolled.
#[derive(Debug, Clone, Default)]
pub struct CharacterOptions {
    pub name: Option<String>,
    pub dynasty_name: Option<String>,
    pub dynasty_generation: Option<u32>,
}

impl CharacterOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn of_dynasty(mut self, dynasty_name: impl Into<String>, generation: u32) -> Self {
        self.dynasty_name = Some(dynasty_name.into());
        self.dynasty_generation = Some(generation);
        self
    }
}

/// Inclusive age band, in years, for a role
pub fn age_band(role: Role) -> (i64, i64) {
    match role {
        Role::Ruler => (30, 60),
        Role::Heir => (15, 30),
        Role::General => (35, 55),
        Role::Advisor => (40, 65),
        Role::Rival => (25, 50),
        Role::RebelLeader => (25, 45),
    }
}

fn roll_trait(dice: &mut impl Dice, low: i64, high: i64) -> u8 {
    band(dice, low, high) as u8
}

/// Rolls the 14 base traits, then applies the role's boosts.
pub fn generate_traits(dice: &mut impl Dice, role: Role) -> Traits {
    let mut traits = Traits {
        ambition: roll_trait(dice, 20, 80),
        greed: roll_trait(dice, 20, 80),
        loyalty: roll_trait(dice, 20, 80),
        honor: roll_trait(dice, 20, 80),
        cruelty: roll_trait(dice, 10, 60),
        compassion: roll_trait(dice, 20, 80),
        cunning: roll_trait(dice, 20, 80),
        wisdom: roll_trait(dice, 20, 80),
        paranoia: roll_trait(dice, 10, 50),
        courage: roll_trait(dice, 20, 80),
        pride: roll_trait(dice, 20, 80),
        wrath: roll_trait(dice, 10, 50),
        charisma: roll_trait(dice, 20, 80),
        diplomacy: roll_trait(dice, 20, 80),
        virtues: None,
    };

    match role {
        Role::Ruler => {
            nudge(&mut traits.ambition, 20);
            nudge(&mut traits.charisma, 15);
        }
        Role::Heir => {
            nudge(&mut traits.loyalty, 15);
            nudge(&mut traits.ambition, 10);
        }
        Role::General => {
            nudge(&mut traits.courage, 25);
            nudge(&mut traits.wrath, 15);
        }
        Role::Advisor => {
            nudge(&mut traits.wisdom, 20);
            nudge(&mut traits.cunning, 15);
            nudge(&mut traits.diplomacy, 10);
        }
        Role::Rival => {
            nudge(&mut traits.ambition, 20);
            nudge(&mut traits.cunning, 15);
            nudge(&mut traits.loyalty, -15);
        }
        Role::RebelLeader => {
            nudge(&mut traits.courage, 20);
            nudge(&mut traits.loyalty, -30);
            nudge(&mut traits.ambition, 25);
        }
    }

    if role == Role::Ruler {
        traits.virtues = Some(RulerVirtues {
            justice: roll_trait(dice, 20, 80),
            generosity: roll_trait(dice, 20, 80),
            vigilance: roll_trait(dice, 20, 80),
            strength: roll_trait(dice, 20, 80),
        });
    }

    traits
}

const FALLBACK_GOALS: &[SecretGoal] = &[
    SecretGoal::AccumulateWealth,
    SecretGoal::ProtectFamily,
    SecretGoal::Glory,
    SecretGoal::Independence,
    SecretGoal::None,
];

/// Ordered rule cascade; the first matching rule wins.
pub fn assign_secret_goal(dice: &mut impl Dice, role: Role, traits: &Traits) -> SecretGoal {
    if role == Role::Ruler {
        return SecretGoal::None;
    }
    if traits.ambition > 70 && traits.loyalty < 40 {
        return if dice.chance(0.6) {
            SecretGoal::SeizeThrone
        } else {
            SecretGoal::Independence
        };
    }
    if traits.greed > 70 {
        return SecretGoal::AccumulateWealth;
    }
    if traits.wrath > 60 && dice.chance(0.3) {
        return SecretGoal::Revenge;
    }
    if traits.compassion > 70 {
        return SecretGoal::ProtectFamily;
    }
    if traits.pride > 70 && traits.courage > 60 {
        return SecretGoal::Glory;
    }
    if dice.chance(0.5) {
        return SecretGoal::None;
    }
    *pick(dice, FALLBACK_GOALS)
}

/// A calm starting mood
pub fn generate_emotions(dice: &mut impl Dice) -> EmotionalState {
    EmotionalState {
        hope: roll_trait(dice, 40, 70),
        fear: roll_trait(dice, 0, 20),
        shame: roll_trait(dice, 0, 15),
        despair: roll_trait(dice, 0, 15),
        contentment: roll_trait(dice, 40, 70),
        rage: roll_trait(dice, 0, 20),
    }
}

/// Builds a complete, living character. Does not store it.
pub fn generate_character(
    dice: &mut impl Dice,
    id: CharacterId,
    territory_id: &str,
    role: Role,
    tick: u64,
    options: CharacterOptions,
) -> Character {
    let name = match options.name {
        Some(name) => name,
        None => pick(dice, GIVEN_NAMES).to_string(),
    };
    let dynasty_name = match options.dynasty_name {
        Some(dynasty) => dynasty,
        None => pick(dice, DYNASTY_NAMES).to_string(),
    };
    let title = pick(dice, titles_for(role)).to_string();

    let traits = generate_traits(dice, role);
    let secret_goal = assign_secret_goal(dice, role, &traits);

    let (min_age, max_age) = age_band(role);
    let age = band(dice, min_age, max_age);
    let birth_tick = tick as i64 - age * court_events::TICKS_PER_YEAR as i64;

    let emotions = generate_emotions(dice);

    Character {
        id,
        name,
        title,
        territory_id: territory_id.to_string(),
        role,
        dynasty_name,
        dynasty_generation: options.dynasty_generation.unwrap_or(1),
        birth_tick,
        coronation_tick: (role == Role::Ruler).then_some(tick),
        death_tick: None,
        death_cause: None,
        alive: true,
        traits,
        emotions,
        secret_goal,
        plots: Vec::new(),
        deeds: VecDeque::new(),
        addiction: None,
        plots_foiled: 0,
        reign_summary: None,
    }
}

impl Court {
    /// Generates and stores a new living character, returning its id.
    pub fn create_character(
        &mut self,
        dice: &mut impl Dice,
        territory_id: &str,
        role: Role,
        tick: u64,
        options: CharacterOptions,
    ) -> CharacterId {
        let id = self.characters.next_id();
        let character = generate_character(dice, id.clone(), territory_id, role, tick, options);
        tracing::debug!(
            "Created {} {} ({}) in {}",
            character.display_name(),
            character.id,
            role,
            territory_id
        );
        self.characters.insert(character);
        id
    }
}
