//! Output Generation
//!
//! Court snapshots written as JSON.

pub mod schemas;
pub mod snapshot;

pub use schemas::*;
pub use snapshot::*;
