//! Plot lifecycle scenarios
//!
//! Completed coups and assassinations, cruel rulers, and the rebellion
//! outcome, each forced through scripted dice.

mod common;

use common::{add, empty_court, living_rulers, meek, REALM};
use court_core::{CharacterId, Court, PlotType, Role, ScriptedDice, Traits};
use court_events::{CourtEventKind, SuccessionType};

fn seed_plot(court: &mut Court, plotter: &CharacterId, plot_type: PlotType, progress: u8, discovered: bool) {
    court.start_plot(plotter, plot_type, None, 0).unwrap();
    let plot = court
        .characters
        .get_mut(plotter)
        .unwrap()
        .plot_mut(plot_type)
        .unwrap();
    plot.progress = progress;
    plot.discovered = discovered;
}

#[test]
fn test_forced_coup_succeeds() {
    let mut court = empty_court();
    let ruler = add(&mut court, Role::Ruler, Traits { paranoia: 10, ..meek() });
    let plotter = add(&mut court, Role::General, Traits { cunning: 90, ..meek() });
    seed_plot(&mut court, &plotter, PlotType::Coup, 100, false);

    let events = court.process_plots(&mut ScriptedDice::always(0.0), REALM, 10);

    let old = court.characters.get(&ruler).unwrap();
    assert!(!old.alive || old.role == Role::Rival);
    let usurper = court.characters.get(&plotter).unwrap();
    assert_eq!(usurper.role, Role::Ruler);
    assert_eq!(usurper.coronation_tick, Some(10));
    assert!(usurper.plots.is_empty());
    // honor 50 is not above 50
    assert_eq!(usurper.title, "Usurper");

    let record = court.successions().last().unwrap();
    assert_eq!(record.succession_type, SuccessionType::Coup);
    assert_eq!(record.previous_ruler_id.as_deref(), Some(ruler.as_str()));
    assert!(events.iter().any(|e| e.kind == CourtEventKind::PlotSucceeded));
    let death = events.iter().find(|e| e.kind == CourtEventKind::Death).unwrap();
    assert!(death.involves(ruler.as_str()));
    assert_eq!(living_rulers(&court, REALM), vec![plotter]);
}

#[test]
fn test_coup_can_exile_instead_of_kill() {
    let mut court = empty_court();
    let ruler = add(&mut court, Role::Ruler, Traits { paranoia: 10, ..meek() });
    let plotter = add(
        &mut court,
        Role::Rival,
        Traits { cunning: 90, honor: 70, ..meek() },
    );
    seed_plot(&mut court, &plotter, PlotType::Coup, 100, false);

    // discovery roll, coup roll, then the deposed ruler's fate
    let mut dice = ScriptedDice::sequence([0.5, 0.0, 0.9], 0.5);
    court.process_plots(&mut dice, REALM, 10);

    let exile = court.characters.get(&ruler).unwrap();
    assert_eq!(court.event_log().event_count(), 2);
    assert!(exile.alive);
    assert_eq!(exile.role, Role::Rival);
    assert_eq!(exile.title, "Exile");
    assert!(exile.reign_summary.is_none());
    assert_eq!(court.characters.get(&plotter).unwrap().title, "Lord Protector");
    assert_eq!(living_rulers(&court, REALM), vec![plotter]);
}

#[test]
fn test_slain_ruler_gets_reign_summary() {
    let mut court = empty_court();
    let ruler = add(&mut court, Role::Ruler, Traits { paranoia: 10, ..meek() });
    let plotter = add(&mut court, Role::General, Traits { cunning: 90, ..meek() });
    seed_plot(&mut court, &plotter, PlotType::Coup, 100, false);

    court.process_plots(&mut ScriptedDice::always(0.0), REALM, 36);

    let slain = court.characters.get(&ruler).unwrap();
    assert!(!slain.alive);
    let reign = slain.reign_summary.as_ref().unwrap();
    assert_eq!(reign.years_reigned, 3);
    assert_eq!(reign.wars_fought, 0);
}

#[test]
fn test_failed_coup_executes_plotter() {
    let mut court = empty_court();
    let ruler = add(&mut court, Role::Ruler, Traits { paranoia: 10, ..meek() });
    let plotter = add(&mut court, Role::General, Traits { cunning: 90, ..meek() });
    seed_plot(&mut court, &plotter, PlotType::Coup, 100, false);

    let mut dice = ScriptedDice::sequence([0.5, 0.999], 0.5);
    let events = court.process_plots(&mut dice, REALM, 10);

    let plotter = court.characters.get(&plotter).unwrap();
    assert!(!plotter.alive);
    assert_eq!(plotter.death_cause.as_deref(), Some("executed for coup"));
    assert!(plotter.plots.is_empty());
    assert_eq!(court.characters.get(&ruler).unwrap().plots_foiled, 1);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, CourtEventKind::Execution);
    assert!(court.successions().is_empty());
}

#[test]
fn test_cruel_ruler_executes_discovered_plotter() {
    let mut court = empty_court();
    let ruler = add(&mut court, Role::Ruler, Traits { cruelty: 80, ..meek() });
    let plotter = add(&mut court, Role::Advisor, meek());
    seed_plot(&mut court, &plotter, PlotType::Sabotage, 40, true);

    let events = court.process_plots(&mut ScriptedDice::always(0.9), REALM, 5);

    let executed = court.characters.get(&plotter).unwrap();
    assert!(!executed.alive);
    assert_eq!(executed.death_cause.as_deref(), Some("executed for sabotage"));
    assert!(executed.plots.is_empty());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, CourtEventKind::Execution);
    assert!(events[0].involves(ruler.as_str()));
    assert_eq!(court.characters.get(&ruler).unwrap().plots_foiled, 1);
}

#[test]
fn test_discovery_beats_same_tick_completion() {
    let mut court = empty_court();
    court.territories.get_mut(REALM).unwrap().wealth = 100;
    add(&mut court, Role::Ruler, Traits { cruelty: 80, ..meek() });
    let plotter = add(&mut court, Role::Advisor, meek());
    seed_plot(&mut court, &plotter, PlotType::Embezzlement, 98, true);

    court.process_plots(&mut ScriptedDice::always(0.0), REALM, 5);

    assert!(!court.characters.get(&plotter).unwrap().alive);
    assert_eq!(court.territories.get(REALM).unwrap().wealth, 100);
}

#[test]
fn test_progress_and_discovery_are_monotonic() {
    let mut court = empty_court();
    add(&mut court, Role::Ruler, Traits { paranoia: 50, cruelty: 20, ..meek() });
    let plotter = add(&mut court, Role::Advisor, Traits { cunning: 30, ..meek() });
    seed_plot(&mut court, &plotter, PlotType::Rebellion, 0, false);

    // discovered on the first tick, then left to run under a merciful ruler
    let mut dice = ScriptedDice::always(0.0);
    let mut previous = court.characters.get(&plotter).unwrap().plot(PlotType::Rebellion).cloned().unwrap();
    for tick in 1..10 {
        court.process_plots(&mut dice, REALM, tick);
        let Some(current) = court.characters.get(&plotter).unwrap().plot(PlotType::Rebellion).cloned() else {
            break;
        };
        assert!(previous.may_become(&current), "tick {}: {:?} -> {:?}", tick, previous, current);
        assert!(current.discovered);
        previous = current;
    }
}

#[test]
fn test_assassinated_ruler_triggers_succession() {
    let mut court = empty_court();
    let ruler = add(&mut court, Role::Ruler, meek());
    let heir = add(&mut court, Role::Heir, Traits { loyalty: 80, ..meek() });
    let assassin = add(&mut court, Role::General, Traits { cunning: 90, ..meek() });
    seed_plot(&mut court, &assassin, PlotType::Assassination, 100, false);

    let events = court.process_plots(&mut ScriptedDice::always(0.0), REALM, 48);

    let victim = court.characters.get(&ruler).unwrap();
    assert!(!victim.alive);
    assert_eq!(victim.death_cause.as_deref(), Some("assassinated"));
    assert!(victim.reign_summary.is_some());

    assert_eq!(court.successions().len(), 1);
    assert_eq!(court.successions()[0].succession_type, SuccessionType::Peaceful);
    assert_eq!(living_rulers(&court, REALM), vec![heir]);

    let deed = court.characters.get(&assassin).unwrap().deeds.back().cloned().unwrap();
    assert!(deed.description.starts_with("Assassinated"));
    assert!(events.iter().any(|e| e.kind == CourtEventKind::Succession));
}

#[test]
fn test_failed_assassin_may_escape() {
    let mut court = empty_court();
    let ruler = add(&mut court, Role::Ruler, Traits { paranoia: 50, ..meek() });
    let assassin = add(&mut court, Role::General, Traits { cunning: 90, ..meek() });
    seed_plot(&mut court, &assassin, PlotType::Assassination, 100, false);
    let fear = court.characters.get(&assassin).unwrap().emotions.fear;

    // discovery misses, the strike misses, the escape roll succeeds
    let mut dice = ScriptedDice::sequence([0.9, 0.95, 0.9], 0.5);
    court.process_plots(&mut dice, REALM, 12);

    let assassin = court.characters.get(&assassin).unwrap();
    assert!(assassin.alive);
    assert_eq!(assassin.emotions.fear, fear + 15);
    assert!(assassin.plots.is_empty());
    assert!(court.characters.get(&ruler).unwrap().alive);
}

#[test]
fn test_assassination_of_named_target() {
    let mut court = empty_court();
    let ruler = add(&mut court, Role::Ruler, meek());
    let advisor = add(&mut court, Role::Advisor, meek());
    let assassin = add(&mut court, Role::General, Traits { cunning: 90, ..meek() });
    court
        .start_plot(&assassin, PlotType::Assassination, Some(advisor.clone()), 0)
        .unwrap();
    court
        .characters
        .get_mut(&assassin)
        .unwrap()
        .plot_mut(PlotType::Assassination)
        .unwrap()
        .progress = 100;

    court.process_plots(&mut ScriptedDice::always(0.0), REALM, 3);

    assert!(!court.characters.get(&advisor).unwrap().alive);
    assert!(court.characters.get(&ruler).unwrap().alive);
    assert!(court.successions().is_empty());
}

#[test]
fn test_rebellion_raises_faction() {
    let mut court = empty_court();
    let plotter = add(
        &mut court,
        Role::Rival,
        Traits { charisma: 60, courage: 60, ..meek() },
    );
    seed_plot(&mut court, &plotter, PlotType::Rebellion, 100, false);

    let events = court.process_plots(&mut ScriptedDice::always(0.0), REALM, 7);

    let leader = court.characters.get(&plotter).unwrap();
    assert_eq!(leader.role, Role::RebelLeader);
    assert_eq!(leader.title, "Rebel Leader");

    let faction = &court.politics.factions()[0];
    assert_eq!(faction.leader_id, plotter.as_str());
    assert!((faction.power - 50.0).abs() < 1e-9);
    assert_eq!(faction.rebellion_risk, 100.0);
    assert_eq!(faction.member_count, 300);

    let rebellion = court.politics.active_rebellions(REALM).next().unwrap();
    assert!((rebellion.strength - 80.0).abs() < 1e-9);
    assert_eq!(rebellion.faction_id, faction.id);
    assert_eq!(events[0].kind, CourtEventKind::Rebellion);
}

#[test]
fn test_sabotage_floors_at_zero() {
    let mut court = empty_court();
    {
        let territory = court.territories.get_mut(REALM).unwrap();
        territory.military = 3;
        territory.food = 3;
        territory.technology = 3;
    }
    let plotter = add(&mut court, Role::General, meek());
    seed_plot(&mut court, &plotter, PlotType::Sabotage, 100, false);

    court.process_plots(&mut ScriptedDice::always(0.99), REALM, 2);

    let territory = court.territories.get(REALM).unwrap();
    assert_eq!(territory.military + territory.food + territory.technology, 6);
    assert!(territory.military >= 0 && territory.food >= 0 && territory.technology >= 0);
}

#[test]
fn test_dead_conspirators_stop_helping() {
    let mut court = empty_court();
    let plotter = add(&mut court, Role::Advisor, meek());
    let accomplice = add(&mut court, Role::General, meek());
    court.start_plot(&plotter, PlotType::Sabotage, None, 0).unwrap();
    court.join_plot(&accomplice, &plotter, PlotType::Sabotage).unwrap();
    court.characters.get_mut(&accomplice).unwrap().kill(1, "a fall from a horse");

    court.process_plots(&mut ScriptedDice::always(0.5), REALM, 1);

    let plot = court.characters.get(&plotter).unwrap().plot(PlotType::Sabotage).cloned().unwrap();
    // base rate only, no bonus from the dead accomplice
    assert_eq!(plot.progress, 12);
    assert_eq!(plot.conspirator_count(), 0);
}

#[test]
fn test_living_conspirators_still_help() {
    let mut court = empty_court();
    let plotter = add(&mut court, Role::Advisor, meek());
    let accomplice = add(&mut court, Role::General, meek());
    court.start_plot(&plotter, PlotType::Sabotage, None, 0).unwrap();
    court.join_plot(&accomplice, &plotter, PlotType::Sabotage).unwrap();

    court.process_plots(&mut ScriptedDice::always(0.5), REALM, 1);

    let plot = court.characters.get(&plotter).unwrap().plot(PlotType::Sabotage).cloned().unwrap();
    assert_eq!(plot.progress, 14);
    assert_eq!(plot.conspirator_count(), 1);
}
