//! World Setup
//!
//! Character generation, name pools and court seeding.

pub mod characters;
pub mod court;
pub mod names;

pub use characters::*;
pub use court::*;
