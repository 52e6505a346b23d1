//! Court Intrigue Simulation Library
//!
//! Court characters who scheme, uncover each other's schemes, die, and
//! fight over the throne. [`Court`] is the entry point; every operation
//! that rolls dice takes a [`Dice`] so runs can be seeded or scripted.

pub mod components;
pub mod config;
pub mod court;
pub mod error;
pub mod events;
pub mod output;
pub mod rng;
pub mod setup;
pub mod systems;

pub use components::*;
pub use config::{ConfigError, CourtConfig};
pub use court::{CharacterStore, Court};
pub use error::{CourtError, CourtResult};
pub use rng::{Dice, ScriptedDice, SimRng};
pub use setup::{CharacterOptions, SeedSummary};
pub use systems::{SimulationClock, SuccessionOutcome, TickEvents};
