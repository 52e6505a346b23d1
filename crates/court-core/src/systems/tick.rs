//! Tick Driver
//!
//! Phase order within a tick is fixed: aging, then plots (opportunities,
//! progress, resolution), then prosperity feedback. Territories are visited
//! in id order so a seeded run always replays the same way.

use bevy_ecs::prelude::*;

use court_events::CourtEvent;

use crate::court::Court;
use crate::rng::{Dice, SimRng};

/// Current simulation tick
#[derive(Resource, Debug, Default)]
pub struct SimulationClock {
    pub current_tick: u64,
}

/// Events and narrative lines produced during the current tick
#[derive(Resource, Debug, Default)]
pub struct TickEvents {
    pub events: Vec<CourtEvent>,
    pub narratives: Vec<String>,
}

impl TickEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.narratives.clear();
    }
}

impl Court {
    /// Plot opportunities, then progress and resolution, for every territory.
    pub fn run_plot_phase(&mut self, dice: &mut impl Dice, tick: u64, out: &mut TickEvents) {
        for territory_id in self.territories.territory_ids() {
            let Some(signals) = self.territories.get(&territory_id).map(|t| t.signals()) else {
                continue;
            };
            out.narratives.extend(self.check_plot_opportunities(
                dice,
                &territory_id,
                tick,
                signals.prosperity_tier,
                signals.decadence_level,
            ));
            out.events.extend(self.process_plots(dice, &territory_id, tick));
        }
    }

    pub fn run_prosperity_phase(&mut self, dice: &mut impl Dice, tick: u64, out: &mut TickEvents) {
        for territory_id in self.territories.territory_ids() {
            out.narratives
                .extend(self.apply_prosperity_feedback(dice, &territory_id, tick));
        }
    }

    /// Runs one full tick outside of an ECS schedule.
    pub fn advance_tick(&mut self, dice: &mut impl Dice, tick: u64) -> TickEvents {
        let mut out = TickEvents::new();
        out.events.extend(self.process_character_aging(dice, tick));
        self.run_plot_phase(dice, tick, &mut out);
        self.run_prosperity_phase(dice, tick, &mut out);
        out
    }
}

// --- Systems ---

pub fn age_characters(
    clock: Res<SimulationClock>,
    mut court: ResMut<Court>,
    mut rng: ResMut<SimRng>,
    mut tick_events: ResMut<TickEvents>,
) {
    let events = court.process_character_aging(&mut *rng, clock.current_tick);
    tick_events.events.extend(events);
}

pub fn run_plots(
    clock: Res<SimulationClock>,
    mut court: ResMut<Court>,
    mut rng: ResMut<SimRng>,
    mut tick_events: ResMut<TickEvents>,
) {
    court.run_plot_phase(&mut *rng, clock.current_tick, &mut *tick_events);
}

pub fn apply_prosperity(
    clock: Res<SimulationClock>,
    mut court: ResMut<Court>,
    mut rng: ResMut<SimRng>,
    mut tick_events: ResMut<TickEvents>,
) {
    court.run_prosperity_phase(&mut *rng, clock.current_tick, &mut *tick_events);
}

/// The three court phases, chained in their required order.
pub fn build_tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((age_characters, run_plots, apply_prosperity).chain());
    schedule
}
