//! Natural death inside a full tick
//!
//! Aging runs before the plot phase, so a ruler who dies in bed is already
//! succeeded when that tick's schemes resolve.

mod common;

use common::{add, empty_court, living_rulers, meek, REALM};
use court_core::setup::names::NATURAL_CAUSES;
use court_core::{CharacterId, Court, PlotType, Role, ScriptedDice, Traits};
use court_events::{CourtEventKind, SuccessionType};

const TICK: u64 = 1200;

fn set_age(court: &mut Court, id: &CharacterId, years: i64) {
    court.characters.get_mut(id).unwrap().birth_tick = TICK as i64 - years * 12;
}

#[test]
fn test_ruler_death_resolves_before_plots() {
    let mut court = empty_court();
    let ruler = add(&mut court, Role::Ruler, meek());
    let heir = add(&mut court, Role::Heir, Traits { loyalty: 80, ..meek() });
    let plotter = add(&mut court, Role::General, Traits { cunning: 90, ..meek() });
    set_age(&mut court, &ruler, 90);
    set_age(&mut court, &heir, 25);
    set_age(&mut court, &plotter, 40);

    court.start_plot(&plotter, PlotType::Coup, None, 0).unwrap();
    court
        .characters
        .get_mut(&plotter)
        .unwrap()
        .plot_mut(PlotType::Coup)
        .unwrap()
        .progress = 100;

    let out = court.advance_tick(&mut ScriptedDice::always(0.0), TICK);

    assert_eq!(out.events[0].kind, CourtEventKind::Death);
    assert!(out.events[0].involves(ruler.as_str()));
    let old = court.characters.get(&ruler).unwrap();
    assert!(!old.alive);
    assert_eq!(old.death_cause.as_deref(), Some(NATURAL_CAUSES[0]));
    assert!(old.reign_summary.is_some());

    let successions = court.successions();
    assert_eq!(successions.len(), 2);
    assert_eq!(successions[0].succession_type, SuccessionType::Peaceful);
    assert_eq!(successions[0].new_ruler_id, heir.as_str());
    assert_eq!(successions[1].succession_type, SuccessionType::Coup);
    assert_eq!(successions[1].previous_ruler_id.as_deref(), Some(heir.as_str()));

    let kinds: Vec<CourtEventKind> = out.events.iter().map(|e| e.kind).collect();
    let crowned = kinds.iter().position(|k| *k == CourtEventKind::Succession).unwrap();
    let usurped = kinds.iter().position(|k| *k == CourtEventKind::PlotSucceeded).unwrap();
    assert!(crowned < usurped);

    assert_eq!(living_rulers(&court, REALM), vec![plotter]);
}

#[test]
fn test_natural_cause_reads_in_succession_narrative() {
    let mut court = empty_court();
    let ruler = add(&mut court, Role::Ruler, meek());
    let heir = add(&mut court, Role::Heir, Traits { loyalty: 80, ..meek() });
    set_age(&mut court, &ruler, 88);
    set_age(&mut court, &heir, 25);

    // death roll, then the last cause in the pool
    let mut dice = ScriptedDice::sequence([0.0, 0.99], 0.99);
    let out = court.advance_tick(&mut dice, TICK);

    let cause = *NATURAL_CAUSES.last().unwrap();
    assert!(out.events[0].description.contains(&format!("died of {}", cause)));
    let narrative = &court.successions()[0].narrative;
    assert!(narrative.contains(&format!("({})", cause)), "{}", narrative);
    assert!(!narrative.contains("(died"));
}

#[test]
fn test_young_court_is_untouched() {
    let mut court = empty_court();
    let ruler = add(&mut court, Role::Ruler, meek());
    let general = add(&mut court, Role::General, meek());
    set_age(&mut court, &ruler, 49);
    set_age(&mut court, &general, 30);

    let mut dice = ScriptedDice::sequence([0.0], 0.0);
    let events = court.process_character_aging(&mut dice, TICK);

    assert!(events.is_empty());
    // nobody under fifty consumes a roll
    assert_eq!(dice.remaining(), 1);
    assert!(court.characters.get(&ruler).unwrap().alive);
}

#[test]
fn test_old_courtier_dies_without_succession() {
    let mut court = empty_court();
    let ruler = add(&mut court, Role::Ruler, meek());
    let advisor = add(&mut court, Role::Advisor, meek());
    set_age(&mut court, &ruler, 40);
    set_age(&mut court, &advisor, 86);

    let events = court.process_character_aging(&mut ScriptedDice::always(0.0), TICK);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, CourtEventKind::Death);
    assert!(events[0].involves(advisor.as_str()));
    assert!(!court.characters.get(&advisor).unwrap().alive);
    assert!(court.successions().is_empty());
    assert_eq!(living_rulers(&court, REALM), vec![ruler]);
}
