//! Succession Resolver
//!
//! Decides who takes the throne after a ruler dies and narrates the handover.
//!
//! Decision tree, in order:
//! - a loyal heir (loyalty > 50) inherits peacefully
//! - otherwise every other living character with ambition > 60 is a candidate:
//!   none with an heir present falls back to the heir, none at all raises a
//!   new "Chief" by election, one seizes the throne as "Usurper", and two or
//!   more fight a civil war won by the highest courage + cunning.

use court_events::{years_between, CourtEvent, CourtEventKind, MemoryType, SuccessionEvent, SuccessionType};

use crate::components::{nudge, CharacterId, DeedType, ReignSummary, Role};
use crate::court::Court;
use crate::error::{CourtError, CourtResult};
use crate::rng::Dice;
use crate::setup::CharacterOptions;

/// Age of a ruler raised by election
pub const ELECTED_RULER_AGE: i64 = 35;

/// Ambition above which a courtier will claim an empty throne
pub const CLAIMANT_AMBITION: u8 = 60;

/// Result of resolving one ruler death
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessionOutcome {
    pub succession_type: SuccessionType,
    pub new_ruler_id: CharacterId,
    pub civil_war_casualties: Option<u32>,
}

/// Picks the civil war victor: highest courage + cunning, first one found on ties.
pub fn civil_war_winner(candidates: &[(CharacterId, u32)]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (index, (_, score)) in candidates.iter().enumerate() {
        match best {
            Some((_, top)) if *score <= top => {}
            _ => best = Some((index, *score)),
        }
    }
    best.map(|(index, _)| index)
}

impl Court {
    /// Resolves succession after a ruler's death.
    ///
    /// Marks the ruler dead (idempotent), attaches the reign summary, crowns a
    /// successor and records a [`SuccessionEvent`]. Must be called exactly once
    /// per ruler death; a second call returns
    /// [`CourtError::SuccessionAlreadyResolved`].
    pub fn handle_ruler_death(
        &mut self,
        dice: &mut impl Dice,
        character_id: &CharacterId,
        tick: u64,
        death_cause: &str,
    ) -> CourtResult<SuccessionOutcome> {
        self.resolve_succession(dice, character_id, tick, death_cause)
            .map(|(outcome, _)| outcome)
    }

    /// Same as [`Court::handle_ruler_death`] but also returns the log entries written.
    pub(crate) fn resolve_succession(
        &mut self,
        dice: &mut impl Dice,
        character_id: &CharacterId,
        tick: u64,
        death_cause: &str,
    ) -> CourtResult<(SuccessionOutcome, Vec<CourtEvent>)> {
        let deceased = self
            .characters
            .get(character_id)
            .ok_or_else(|| CourtError::CharacterNotFound(character_id.0.clone()))?;
        if deceased.role != Role::Ruler {
            return Err(CourtError::NotARuler(character_id.0.clone()));
        }
        if deceased.reign_summary.is_some() {
            return Err(CourtError::SuccessionAlreadyResolved(character_id.0.clone()));
        }

        let territory_id = deceased.territory_id.clone();
        let old_title = deceased.title.clone();
        let old_name = deceased.display_name();
        let old_generation = deceased.dynasty_generation;

        self.close_reign(character_id, tick, Some(death_cause));

        let heir = self
            .characters
            .heir_of(&territory_id)
            .map(|h| (h.id.clone(), h.traits.loyalty));

        let mut fallen: Vec<CharacterId> = Vec::new();
        let (succession_type, new_ruler_id, casualties) = match heir {
            Some((heir_id, loyalty)) if loyalty > 50 => {
                self.crown_heir(&heir_id, &old_title, old_generation, tick)?;
                (SuccessionType::Peaceful, heir_id, None)
            }
            _ => {
                let candidates: Vec<(CharacterId, u32)> = self
                    .characters
                    .living_in(&territory_id)
                    .filter(|c| c.id != *character_id && c.traits.ambition > CLAIMANT_AMBITION)
                    .map(|c| (c.id.clone(), u32::from(c.traits.courage) + u32::from(c.traits.cunning)))
                    .collect();

                match (candidates.len(), heir) {
                    (0, Some((heir_id, _))) => {
                        self.crown_heir(&heir_id, &old_title, old_generation, tick)?;
                        (SuccessionType::Peaceful, heir_id, None)
                    }
                    (0, None) => {
                        let elected = self.elect_ruler(dice, &territory_id, tick);
                        (SuccessionType::Election, elected, None)
                    }
                    (1, _) => {
                        let usurper = candidates[0].0.clone();
                        self.characters
                            .living_mut(&usurper)?
                            .promote_to_ruler("Usurper", tick)?;
                        (SuccessionType::Coup, usurper, None)
                    }
                    _ => {
                        let casualties = dice.range(500, 1500) as u32;
                        let winner_index = civil_war_winner(&candidates).unwrap_or(0);
                        let winner = candidates[winner_index].0.clone();
                        for (index, (loser, _)) in candidates.iter().enumerate() {
                            if index == winner_index {
                                continue;
                            }
                            if dice.chance(0.5) {
                                if let Some(c) = self.characters.get_mut(loser) {
                                    c.kill(tick, "killed in succession war");
                                    fallen.push(loser.clone());
                                }
                            }
                        }
                        self.characters
                            .living_mut(&winner)?
                            .promote_to_ruler("Lord Protector", tick)?;
                        (SuccessionType::CivilWar, winner, Some(casualties))
                    }
                }
            }
        };

        let new_name = self
            .characters
            .get(&new_ruler_id)
            .map(|c| c.display_name())
            .unwrap_or_else(|| new_ruler_id.to_string());
        let narrative = match succession_type {
            SuccessionType::Peaceful => format!(
                "{} has died ({}). {} ascends peacefully to the throne.",
                old_name, death_cause, new_name
            ),
            SuccessionType::Coup => format!(
                "With {} dead ({}), {} seized the empty throne before anyone could object.",
                old_name, death_cause, new_name
            ),
            SuccessionType::CivilWar => format!(
                "The death of {} ({}) plunged the realm into civil war. After {} dead, {} emerged victorious.",
                old_name,
                death_cause,
                casualties.unwrap_or(0),
                new_name
            ),
            SuccessionType::Election => format!(
                "{} died ({}) leaving no heir and no claimant. The nobles raised {} to lead them.",
                old_name, death_cause, new_name
            ),
        };

        tracing::info!("[{}] {} succession: {}", territory_id, succession_type, narrative);

        if let Some(new_ruler) = self.characters.get_mut(&new_ruler_id) {
            new_ruler.add_deed(tick, format!("Took the throne after {}", old_name), DeedType::Political);
        }

        let weight = match succession_type {
            SuccessionType::Peaceful => 0.5,
            SuccessionType::Election => 0.6,
            SuccessionType::Coup => 0.8,
            SuccessionType::CivilWar => 1.0,
        };
        self.remember(weight, narrative.clone(), MemoryType::Succession);

        self.record_succession(SuccessionEvent::new(
            &territory_id,
            Some(character_id.0.clone()),
            new_ruler_id.0.clone(),
            succession_type,
            casualties,
            narrative.clone(),
            tick,
        ));
        let mut events = Vec::with_capacity(fallen.len() + 1);
        for loser in &fallen {
            let name = self
                .characters
                .get(loser)
                .map(|c| c.display_name())
                .unwrap_or_else(|| loser.to_string());
            events.push(self.emit(
                CourtEventKind::Death,
                &territory_id,
                tick,
                &[loser, &new_ruler_id],
                format!("{} was killed in the war for the throne", name),
            ));
        }
        events.push(self.emit(
            CourtEventKind::Succession,
            &territory_id,
            tick,
            &[&new_ruler_id, character_id],
            narrative,
        ));

        Ok((
            SuccessionOutcome {
                succession_type,
                new_ruler_id,
                civil_war_casualties: casualties,
            },
            events,
        ))
    }

    /// Ends a reign: kills the ruler when a cause is given and attaches the
    /// reign summary. Does nothing if a summary already exists.
    pub(crate) fn close_reign(&mut self, ruler_id: &CharacterId, tick: u64, death_cause: Option<&str>) {
        let Some(ruler) = self.characters.get_mut(ruler_id) else {
            return;
        };
        if ruler.reign_summary.is_some() {
            return;
        }
        if let Some(cause) = death_cause {
            ruler.kill(tick, cause);
        }

        let years_reigned = ruler
            .coronation_tick
            .map(|crowned| years_between(crowned as i64, tick as i64).max(0) as u32)
            .unwrap_or(0);
        let cause = ruler.death_cause.clone().unwrap_or_else(|| "was deposed".to_string());
        let obituary = format!(
            "{} of House {}, who reigned {} years and {} ({})",
            ruler.display_name(),
            ruler.dynasty_name,
            years_reigned,
            if ruler.plots_foiled > 0 {
                format!("outlived {} plots", ruler.plots_foiled)
            } else {
                "never foiled a plot".to_string()
            },
            cause
        );

        ruler.reign_summary = Some(ReignSummary {
            years_reigned,
            obituary,
            wars_fought: 0,
            plots_survived: ruler.plots_foiled,
        });
    }

    fn crown_heir(&mut self, heir_id: &CharacterId, title: &str, old_generation: u32, tick: u64) -> CourtResult<()> {
        let heir = self.characters.living_mut(heir_id)?;
        heir.promote_to_ruler(title, tick)?;
        heir.dynasty_generation = old_generation + 1;
        nudge(&mut heir.emotions.despair, 10);
        Ok(())
    }

    fn elect_ruler(&mut self, dice: &mut impl Dice, territory_id: &str, tick: u64) -> CharacterId {
        let id = self.create_character(dice, territory_id, Role::Ruler, tick, CharacterOptions::default());
        if let Some(ruler) = self.characters.get_mut(&id) {
            ruler.birth_tick = tick as i64 - ELECTED_RULER_AGE * court_events::TICKS_PER_YEAR as i64;
            ruler.title = "Chief".to_string();
            ruler.coronation_tick = Some(tick);
        }
        id
    }
}
