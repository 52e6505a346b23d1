//! Court Components
//!
//! Data for characters, plots, territories, and political factions.

pub mod character;
pub mod plot;
pub mod politics;
pub mod territory;

pub use character::*;
pub use plot::*;
pub use politics::*;
pub use territory::*;
