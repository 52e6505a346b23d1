//! Court Systems
//!
//! Aging, plots, succession and prosperity feedback, plus the tick driver
//! that runs them in order.

pub mod aging;
pub mod plots;
pub mod prosperity;
pub mod succession;
pub mod tick;

pub use aging::death_probability;
pub use plots::{classify_plot, plot_chance};
pub use succession::{civil_war_winner, SuccessionOutcome, CLAIMANT_AMBITION, ELECTED_RULER_AGE};
pub use tick::{
    age_characters, apply_prosperity, build_tick_schedule, run_plots, SimulationClock, TickEvents,
};
