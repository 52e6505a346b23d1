//! Plot Lifecycle
//!
//! Opportunity checks start schemes, each tick advances and may expose them,
//! and completed schemes are carried out. Everything here is driven through
//! [`Dice`] so tests can force each branch.

use court_events::{CourtEvent, CourtEventKind, MemoryType, Severity, SuccessionEvent, SuccessionType};

use crate::components::{
    nudge, Character, CharacterId, DeedType, Plot, PlotType, SabotageTarget, SecretGoal,
};
use crate::court::Court;
use crate::rng::{band, pick, Dice};

/// Per-tick chance a character starts scheming.
pub fn plot_chance(character: &Character, prosperity_tier: u8, decadence_level: f64) -> f64 {
    let traits = &character.traits;
    let mut chance = (f64::from(traits.ambition) - 50.0) / 200.0
        - (f64::from(traits.loyalty) - 50.0) / 200.0
        + f64::from(prosperity_tier) * 0.02
        + decadence_level / 500.0;
    if traits.greed > 70 {
        chance += 0.05;
    }
    if let Some(addiction) = &character.addiction {
        chance += addiction.plot_bonus();
    }
    if character.secret_goal == SecretGoal::SeizeThrone {
        chance += 0.1;
    }
    chance
}

/// Which scheme an opportunist reaches for, by priority.
pub fn classify_plot(character: &Character) -> PlotType {
    let traits = &character.traits;
    if character.secret_goal == SecretGoal::SeizeThrone || (traits.ambition > 70 && traits.courage > 50) {
        PlotType::Coup
    } else if traits.greed > 70 {
        PlotType::Embezzlement
    } else if traits.wrath > 60 && character.emotions.rage > 50 {
        PlotType::Assassination
    } else if traits.loyalty < 30 {
        PlotType::Defection
    } else {
        PlotType::Sabotage
    }
}

/// The ruler as seen by a plot this tick
#[derive(Debug, Clone)]
struct RulerView {
    id: CharacterId,
    name: String,
    paranoia: u8,
    cruelty: u8,
}

impl Court {
    /// Gives every idle non-ruler a chance to start scheming.
    /// Returns a narrative line per new plot.
    pub fn check_plot_opportunities(
        &mut self,
        dice: &mut impl Dice,
        territory_id: &str,
        tick: u64,
        prosperity_tier: u8,
        decadence_level: f64,
    ) -> Vec<String> {
        let idle: Vec<CharacterId> = self
            .characters
            .living_in(territory_id)
            .filter(|c| !c.is_ruler() && !c.has_any_plot())
            .map(|c| c.id.clone())
            .collect();

        let mut narratives = Vec::new();
        for id in idle {
            let Some(character) = self.characters.get(&id) else {
                continue;
            };
            let chance = plot_chance(character, prosperity_tier, decadence_level);
            if !dice.chance(chance) {
                continue;
            }
            let plot_type = classify_plot(character);
            let name = character.display_name();

            if let Err(e) = self.start_plot(&id, plot_type, None, tick) {
                tracing::warn!("Skipped plot start for {}: {}", id, e);
                continue;
            }
            let text = format!("{} has begun plotting {}", name, plot_type);
            self.emit(CourtEventKind::PlotStarted, territory_id, tick, &[&id], text.clone());
            narratives.push(text);
        }
        narratives
    }

    /// Advances, exposes and resolves every plot in the territory.
    pub fn process_plots(&mut self, dice: &mut impl Dice, territory_id: &str, tick: u64) -> Vec<CourtEvent> {
        let running: Vec<(CharacterId, PlotType)> = self
            .characters
            .living_in(territory_id)
            .flat_map(|c| c.plots.iter().map(move |p| (c.id.clone(), p.plot_type)))
            .collect();

        let mut events = Vec::new();
        for (plotter_id, plot_type) in running {
            events.extend(self.process_plot(dice, territory_id, &plotter_id, plot_type, tick));
        }
        events
    }

    fn process_plot(
        &mut self,
        dice: &mut impl Dice,
        territory_id: &str,
        plotter_id: &CharacterId,
        plot_type: PlotType,
        tick: u64,
    ) -> Vec<CourtEvent> {
        let mut events = Vec::new();

        // An earlier plot this tick may have killed the plotter or crowned them.
        let ruler = self
            .characters
            .ruler_of(territory_id)
            .filter(|r| r.id != *plotter_id)
            .map(|r| RulerView {
                id: r.id.clone(),
                name: r.display_name(),
                paranoia: r.traits.paranoia,
                cruelty: r.traits.cruelty,
            });
        // Dead conspirators no longer speed the plot or raise its exposure.
        let fallen: Vec<CharacterId> = self
            .characters
            .get(plotter_id)
            .and_then(|c| c.plot(plot_type))
            .map(|p| {
                p.conspirators
                    .iter()
                    .filter(|id| self.characters.living(id).is_err())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        let Some(plotter) = self.characters.get_mut(plotter_id).filter(|c| c.alive) else {
            return events;
        };
        let cunning = plotter.traits.cunning;
        let plotter_name = plotter.display_name();
        let Some(plot) = plotter.plot_mut(plot_type) else {
            return events;
        };
        for id in &fallen {
            plot.conspirators.remove(id);
        }

        let rate = plot.progress_rate(cunning);
        plot.advance(rate);
        tracing::debug!("{}'s {} plot at {}% (+{})", plotter_name, plot_type, plot.progress, rate);

        let mut newly_discovered = false;
        if let Some(ruler) = &ruler {
            if !plot.discovered && dice.chance(plot.discovery_chance(ruler.paranoia, cunning)) {
                plot.mark_discovered();
                newly_discovered = true;
            }
        }
        let complete = plot.is_complete();
        let discovered = plot.discovered;

        if newly_discovered {
            nudge(&mut plotter.emotions.fear, 20);
            if let Some(ruler) = &ruler {
                if let Some(r) = self.characters.get_mut(&ruler.id) {
                    nudge(&mut r.emotions.rage, 10);
                }
                let text = format!("{} uncovered {}'s {} plot", ruler.name, plotter_name, plot_type);
                tracing::info!("[{}] {}", territory_id, text);
                events.push(self.emit(
                    CourtEventKind::PlotDiscovered,
                    territory_id,
                    tick,
                    &[&ruler.id, plotter_id],
                    text,
                ));
            }
        }

        if complete && !discovered {
            let plot = self
                .characters
                .get_mut(plotter_id)
                .and_then(|c| c.remove_plot(plot_type));
            if let Some(plot) = plot {
                events.extend(self.execute_plot(dice, territory_id, plotter_id, plot, tick));
            }
            return events;
        }

        if discovered {
            if let Some(ruler) = ruler.filter(|r| r.cruelty > 50) {
                events.push(self.execute_plotter(territory_id, plotter_id, &ruler, plot_type, tick));
            }
        }
        events
    }

    /// Summary execution of an exposed plotter by a cruel ruler.
    fn execute_plotter(
        &mut self,
        territory_id: &str,
        plotter_id: &CharacterId,
        ruler: &RulerView,
        plot_type: PlotType,
        tick: u64,
    ) -> CourtEvent {
        let mut plotter_name = plotter_id.to_string();
        if let Some(plotter) = self.characters.get_mut(plotter_id) {
            plotter_name = plotter.display_name();
            plotter.remove_plot(plot_type);
            plotter.kill(tick, format!("executed for {}", plot_type));
        }
        if let Some(r) = self.characters.get_mut(&ruler.id) {
            r.plots_foiled += 1;
            r.add_deed(tick, format!("Executed {} for {}", plotter_name, plot_type), DeedType::Political);
        }

        let text = format!(
            "{} had {} put to death for plotting {}",
            ruler.name, plotter_name, plot_type
        );
        tracing::info!("[{}] {}", territory_id, text);
        self.remember(0.7, text.clone(), MemoryType::Intrigue);
        self.emit(CourtEventKind::Execution, territory_id, tick, &[plotter_id, &ruler.id], text)
    }

    /// Carries out a completed, undiscovered plot. The plot has already been
    /// removed from the plotter.
    fn execute_plot(
        &mut self,
        dice: &mut impl Dice,
        territory_id: &str,
        plotter_id: &CharacterId,
        plot: Plot,
        tick: u64,
    ) -> Vec<CourtEvent> {
        match plot.plot_type {
            PlotType::Coup => self.execute_coup(dice, territory_id, plotter_id, &plot, tick),
            PlotType::Assassination => self.execute_assassination(dice, territory_id, plotter_id, &plot, tick),
            PlotType::Embezzlement => self.execute_embezzlement(dice, territory_id, plotter_id, tick),
            PlotType::Sabotage => self.execute_sabotage(dice, territory_id, plotter_id, tick),
            PlotType::Defection => self.execute_defection(territory_id, plotter_id, tick),
            PlotType::Rebellion => self.execute_rebellion(territory_id, plotter_id, tick),
        }
    }

    fn execute_coup(
        &mut self,
        dice: &mut impl Dice,
        territory_id: &str,
        plotter_id: &CharacterId,
        plot: &Plot,
        tick: u64,
    ) -> Vec<CourtEvent> {
        let config = plot.plot_type.config();
        let Some(plotter) = self.characters.get(plotter_id) else {
            return Vec::new();
        };
        let plotter_name = plotter.display_name();
        let (cunning, courage, honor, cruelty) = (
            plotter.traits.cunning,
            plotter.traits.courage,
            plotter.traits.honor,
            plotter.traits.cruelty,
        );
        let new_title = if honor > 50 { "Lord Protector" } else { "Usurper" };
        let ruler = self
            .characters
            .ruler_of(territory_id)
            .filter(|r| r.id != *plotter_id)
            .map(|r| (r.id.clone(), r.display_name(), r.traits.paranoia, r.traits.courage));

        let Some((ruler_id, ruler_name, paranoia, ruler_courage)) = ruler else {
            return self.seize_empty_throne(territory_id, plotter_id, new_title, tick);
        };

        let success_chance = 0.5
            + (f64::from(cunning) - f64::from(paranoia)) / 200.0
            + (f64::from(courage) - f64::from(ruler_courage)) / 200.0
            + 0.1 * plot.conspirator_count() as f64;

        if !dice.chance(success_chance) {
            if let Some(plotter) = self.characters.get_mut(plotter_id) {
                plotter.kill(tick, "executed for coup");
            }
            if let Some(r) = self.characters.get_mut(&ruler_id) {
                r.plots_foiled += 1;
            }
            let text = format!("{} {} and was executed by {}", plotter_name, config.failure_text, ruler_name);
            tracing::info!("[{}] {}", territory_id, text);
            self.remember(0.6, text.clone(), MemoryType::Intrigue);
            return vec![self.emit(CourtEventKind::Execution, territory_id, tick, &[plotter_id, &ruler_id], text)];
        }

        let ruler_dies = dice.chance(if cruelty > 60 { 0.8 } else { 0.4 });

        if let Some(plotter) = self.characters.get_mut(plotter_id) {
            if let Err(e) = plotter.promote_to_ruler(new_title, tick) {
                tracing::warn!("Coup by {} could not crown them: {}", plotter_id, e);
                return Vec::new();
            }
            nudge(&mut plotter.emotions.hope, 20);
            plotter.add_deed(tick, format!("Seized the throne from {}", ruler_name), DeedType::Political);
        }

        let mut events = Vec::new();
        let fate = if ruler_dies {
            let cause = format!("slain in a coup by {}", plotter_name);
            self.close_reign(&ruler_id, tick, Some(cause.as_str()));
            events.push(self.emit(
                CourtEventKind::Death,
                territory_id,
                tick,
                &[&ruler_id, plotter_id],
                format!("{} was {}", ruler_name, cause),
            ));
            "was slain"
        } else {
            if let Some(r) = self.characters.get_mut(&ruler_id) {
                if let Err(e) = r.demote_to_rival("Exile") {
                    tracing::warn!("Deposed ruler {} could not be exiled: {}", ruler_id, e);
                }
            }
            "was driven into exile"
        };

        let new_name = format!("{} {}", new_title, self.characters.get(plotter_id).map(|c| c.name.as_str()).unwrap_or(""));
        let text = format!(
            "{} {}. {} {}, and {} now rules.",
            plotter_name, config.success_text, ruler_name, fate, new_name
        );
        tracing::info!("[{}] {}", territory_id, text);
        self.remember(0.9, text.clone(), MemoryType::Betrayal);
        self.record_succession(SuccessionEvent::new(
            territory_id,
            Some(ruler_id.0.clone()),
            plotter_id.0.clone(),
            SuccessionType::Coup,
            None,
            text.clone(),
            tick,
        ));
        events.push(self.emit(CourtEventKind::PlotSucceeded, territory_id, tick, &[plotter_id, &ruler_id], text.clone()));
        events.push(self.emit(CourtEventKind::Succession, territory_id, tick, &[plotter_id, &ruler_id], text));
        events
    }

    /// A coup against nobody: the plotter simply takes the vacant seat.
    fn seize_empty_throne(
        &mut self,
        territory_id: &str,
        plotter_id: &CharacterId,
        title: &str,
        tick: u64,
    ) -> Vec<CourtEvent> {
        let Some(plotter) = self.characters.get_mut(plotter_id) else {
            return Vec::new();
        };
        if let Err(e) = plotter.promote_to_ruler(title, tick) {
            tracing::warn!("Coup by {} could not crown them: {}", plotter_id, e);
            return Vec::new();
        }
        nudge(&mut plotter.emotions.hope, 20);
        let text = format!("{} walked into the empty throne room and took the crown", plotter.display_name());
        tracing::info!("[{}] {}", territory_id, text);
        self.record_succession(SuccessionEvent::new(
            territory_id,
            None,
            plotter_id.0.clone(),
            SuccessionType::Coup,
            None,
            text.clone(),
            tick,
        ));
        vec![self.emit(CourtEventKind::Succession, territory_id, tick, &[plotter_id], text)]
    }

    fn execute_assassination(
        &mut self,
        dice: &mut impl Dice,
        territory_id: &str,
        plotter_id: &CharacterId,
        plot: &Plot,
        tick: u64,
    ) -> Vec<CourtEvent> {
        let config = plot.plot_type.config();
        let target_id = match &plot.target_id {
            Some(target) => Some(target.clone()),
            None => self.characters.ruler_of(territory_id).map(|r| r.id.clone()),
        };
        let Some(plotter) = self.characters.get(plotter_id) else {
            return Vec::new();
        };
        let plotter_name = plotter.display_name();
        let cunning = plotter.traits.cunning;

        let target = target_id
            .as_ref()
            .filter(|t| *t != plotter_id)
            .and_then(|t| self.characters.get(t))
            .filter(|t| t.alive)
            .map(|t| (t.id.clone(), t.display_name(), t.traits.paranoia, t.is_ruler()));
        let Some((target_id, target_name, paranoia, target_is_ruler)) = target else {
            let text = format!("{}'s assassination plot found no one to kill", plotter_name);
            tracing::info!("[{}] {}", territory_id, text);
            return vec![self.emit_with_severity(
                CourtEventKind::PlotFailed,
                Severity::Info,
                territory_id,
                tick,
                &[plotter_id],
                text,
            )];
        };

        let success_chance = 0.6 + f64::from(cunning) / 200.0 - f64::from(paranoia) / 200.0;
        let mut events = Vec::new();

        if dice.chance(success_chance) {
            if let Some(plotter) = self.characters.get_mut(plotter_id) {
                plotter.add_deed(tick, format!("Assassinated {}", target_name), DeedType::Villainous);
            }
            let text = format!("{} {}: {} is dead", plotter_name, config.success_text, target_name);
            tracing::info!("[{}] {}", territory_id, text);
            self.remember(0.9, text.clone(), MemoryType::Tragedy);

            if target_is_ruler {
                if let Some(target) = self.characters.get_mut(&target_id) {
                    target.kill(tick, "assassinated");
                }
                events.push(self.emit(CourtEventKind::PlotSucceeded, territory_id, tick, &[plotter_id, &target_id], text));
                match self.resolve_succession(dice, &target_id, tick, "assassinated") {
                    Ok((_, succession_events)) => events.extend(succession_events),
                    Err(e) => tracing::warn!("Succession after assassination failed: {}", e),
                }
            } else {
                if let Some(target) = self.characters.get_mut(&target_id) {
                    target.kill(tick, "assassinated");
                }
                events.push(self.emit(CourtEventKind::PlotSucceeded, territory_id, tick, &[plotter_id, &target_id], text));
            }
            return events;
        }

        if target_is_ruler {
            if let Some(r) = self.characters.get_mut(&target_id) {
                r.plots_foiled += 1;
            }
        }

        if dice.chance(0.5) {
            if let Some(plotter) = self.characters.get_mut(plotter_id) {
                plotter.kill(tick, "killed during failed assassination");
            }
            let text = format!("{} {} and was cut down by {}'s guards", plotter_name, config.failure_text, target_name);
            tracing::info!("[{}] {}", territory_id, text);
            self.remember(0.6, text.clone(), MemoryType::Intrigue);
            events.push(self.emit_with_severity(
                CourtEventKind::PlotFailed,
                Severity::Critical,
                territory_id,
                tick,
                &[plotter_id, &target_id],
                text,
            ));
        } else {
            if let Some(plotter) = self.characters.get_mut(plotter_id) {
                nudge(&mut plotter.emotions.fear, 15);
            }
            let text = format!("{} {} but slipped away unseen", plotter_name, config.failure_text);
            tracing::info!("[{}] {}", territory_id, text);
            events.push(self.emit(CourtEventKind::PlotFailed, territory_id, tick, &[plotter_id, &target_id], text));
        }
        events
    }

    fn execute_embezzlement(
        &mut self,
        dice: &mut impl Dice,
        territory_id: &str,
        plotter_id: &CharacterId,
        tick: u64,
    ) -> Vec<CourtEvent> {
        let amount = band(dice, 5, 15);
        let taken = self
            .territories
            .get_mut(territory_id)
            .map(|t| t.drain_wealth(amount))
            .unwrap_or(0);
        let Some(plotter) = self.characters.get_mut(plotter_id) else {
            return Vec::new();
        };
        nudge(&mut plotter.traits.greed, 5);
        plotter.add_deed(tick, format!("Embezzled {} from the treasury", taken), DeedType::Villainous);

        let text = format!(
            "{} {}, skimming {} wealth",
            plotter.display_name(),
            PlotType::Embezzlement.config().success_text,
            taken
        );
        tracing::info!("[{}] {}", territory_id, text);
        self.remember(0.3, text.clone(), MemoryType::Intrigue);
        vec![self.emit_with_severity(
            CourtEventKind::PlotSucceeded,
            Severity::Warning,
            territory_id,
            tick,
            &[plotter_id],
            text,
        )]
    }

    fn execute_sabotage(
        &mut self,
        dice: &mut impl Dice,
        territory_id: &str,
        plotter_id: &CharacterId,
        tick: u64,
    ) -> Vec<CourtEvent> {
        let target = *pick(dice, SabotageTarget::all());
        let amount = band(dice, 5, 15);
        let lost = self
            .territories
            .get_mut(territory_id)
            .map(|t| t.sabotage(target, amount))
            .unwrap_or(0);
        let Some(plotter) = self.characters.get_mut(plotter_id) else {
            return Vec::new();
        };
        plotter.add_deed(tick, format!("Sabotaged the realm's {}", target.as_str()), DeedType::Villainous);

        let text = format!(
            "{} {}: {} fell by {}",
            plotter.display_name(),
            PlotType::Sabotage.config().success_text,
            target.as_str(),
            lost
        );
        tracing::info!("[{}] {}", territory_id, text);
        self.remember(0.4, text.clone(), MemoryType::Intrigue);
        vec![self.emit_with_severity(
            CourtEventKind::PlotSucceeded,
            Severity::Warning,
            territory_id,
            tick,
            &[plotter_id],
            text,
        )]
    }

    fn execute_defection(&mut self, territory_id: &str, plotter_id: &CharacterId, tick: u64) -> Vec<CourtEvent> {
        let Some(plotter) = self.characters.get_mut(plotter_id) else {
            return Vec::new();
        };
        plotter.secret_goal = SecretGoal::ForeignAllegiance;
        let text = format!(
            "{} {}",
            plotter.display_name(),
            PlotType::Defection.config().success_text
        );
        tracing::info!("[{}] {}", territory_id, text);
        self.remember(0.5, text.clone(), MemoryType::Betrayal);
        vec![self.emit_with_severity(
            CourtEventKind::PlotSucceeded,
            Severity::Warning,
            territory_id,
            tick,
            &[plotter_id],
            text,
        )]
    }

    fn execute_rebellion(&mut self, territory_id: &str, plotter_id: &CharacterId, tick: u64) -> Vec<CourtEvent> {
        let population = self.territories.get(territory_id).map(|t| t.population).unwrap_or(0);
        let Some(plotter) = self.characters.get_mut(plotter_id) else {
            return Vec::new();
        };
        if let Err(e) = plotter.convert_to_rebel_leader() {
            tracing::warn!("Rebellion by {} fizzled: {}", plotter_id, e);
            return Vec::new();
        }
        let charisma = f64::from(plotter.traits.charisma);
        let courage = f64::from(plotter.traits.courage);
        let name = plotter.name.clone();
        let dynasty = plotter.dynasty_name.clone();
        plotter.add_deed(tick, "Raised the banner of rebellion", DeedType::Political);

        let faction_id = self.politics.found_faction(
            territory_id,
            format!("{}'s Banner", dynasty),
            plotter_id.as_str(),
            30.0 + charisma / 3.0,
            100.0,
            population / 10,
            tick,
        );
        self.politics.start_rebellion(
            territory_id,
            &faction_id,
            plotter_id.as_str(),
            40.0 + courage / 3.0 + charisma / 3.0,
            tick,
        );

        let text = format!(
            "Rebel Leader {} {}",
            name,
            PlotType::Rebellion.config().success_text
        );
        tracing::info!("[{}] {}", territory_id, text);
        self.remember(0.8, text.clone(), MemoryType::Betrayal);
        vec![self.emit(CourtEventKind::Rebellion, territory_id, tick, &[plotter_id], text)]
    }
}
