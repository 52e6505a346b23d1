//! Court Errors
//!
//! Soft failures returned by store, plot and succession operations. A bad
//! reference never aborts a tick; batch operations skip it and log a warning.

use thiserror::Error;

use crate::components::{PlotType, Role};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourtError {
    #[error("character {0} does not exist")]
    CharacterNotFound(String),

    #[error("character {0} is dead")]
    CharacterDead(String),

    #[error("character {character_id} is already running a {plot_type} plot")]
    DuplicatePlot {
        character_id: String,
        plot_type: PlotType,
    },

    #[error("character {character_id} has no {plot_type} plot")]
    PlotNotFound {
        character_id: String,
        plot_type: PlotType,
    },

    #[error("character {0} cannot join their own plot")]
    SelfConspiracy(String),

    #[error("character {0} is not a ruler")]
    NotARuler(String),

    #[error("succession after {0} was already resolved")]
    SuccessionAlreadyResolved(String),

    #[error("cannot move character from role {from} to {to}")]
    InvalidRoleTransition { from: Role, to: Role },
}

pub type CourtResult<T> = Result<T, CourtError>;
