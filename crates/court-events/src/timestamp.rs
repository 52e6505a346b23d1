//! Court Calendar Types
//!
//! Handles simulation time with both tick-based and human-readable date formats.
//! One tick is one month of court life.
//!
//! # Example
//!
//! ```
//! use court_events::{CourtDate, CourtTimestamp};
//!
//! let ts = CourtTimestamp::at(27);
//! assert_eq!(ts.tick, 27);
//! assert_eq!(ts.date.to_string(), "year_3.month_04");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of ticks (months) in a simulated year.
pub const TICKS_PER_YEAR: u64 = 12;

/// Human-readable court date.
///
/// Serializes to strings like "year_3.month_04".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourtDate {
    pub year: u64,
    pub month: u8,
}

impl CourtDate {
    /// Creates a new CourtDate.
    pub fn new(year: u64, month: u8) -> Self {
        Self { year, month }
    }

    /// The date of tick zero.
    pub fn start() -> Self {
        Self { year: 1, month: 1 }
    }

    /// Converts a tick counter into a date. Tick 0 is year 1, month 1.
    pub fn from_tick(tick: u64) -> Self {
        Self {
            year: tick / TICKS_PER_YEAR + 1,
            month: (tick % TICKS_PER_YEAR) as u8 + 1,
        }
    }

    /// Converts the date back to the tick that starts it.
    pub fn to_tick(&self) -> u64 {
        (self.year.saturating_sub(1)) * TICKS_PER_YEAR + u64::from(self.month.saturating_sub(1))
    }
}

impl fmt::Display for CourtDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "year_{}.month_{:02}", self.year, self.month)
    }
}

/// Error type for parsing CourtDate from strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseDateError {
    #[error("invalid date format: '{0}', expected 'year_N.month_MM'")]
    InvalidFormat(String),
    #[error("invalid year: '{0}'")]
    InvalidYear(String),
    #[error("invalid month: '{0}'")]
    InvalidMonth(String),
}

impl FromStr for CourtDate {
    type Err = ParseDateError;

    /// Parses a CourtDate from a string like "year_3.month_04".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year_part, month_part) = s
            .split_once('.')
            .ok_or_else(|| ParseDateError::InvalidFormat(s.to_string()))?;

        let year = year_part
            .strip_prefix("year_")
            .ok_or_else(|| ParseDateError::InvalidFormat(s.to_string()))?
            .parse::<u64>()
            .map_err(|_| ParseDateError::InvalidYear(year_part.to_string()))?;

        let month = month_part
            .strip_prefix("month_")
            .ok_or_else(|| ParseDateError::InvalidFormat(s.to_string()))?
            .parse::<u8>()
            .map_err(|_| ParseDateError::InvalidMonth(month_part.to_string()))?;

        if !(1..=TICKS_PER_YEAR as u8).contains(&month) {
            return Err(ParseDateError::InvalidMonth(month_part.to_string()));
        }

        Ok(CourtDate { year, month })
    }
}

// Serialize as a string
impl Serialize for CourtDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CourtDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A point in simulation time.
///
/// Contains both the monotonic tick counter and the derived court date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtTimestamp {
    /// Monotonically increasing simulation tick.
    pub tick: u64,
    /// Human-readable date.
    pub date: CourtDate,
}

impl CourtTimestamp {
    /// Creates the timestamp for a tick.
    pub fn at(tick: u64) -> Self {
        Self {
            tick,
            date: CourtDate::from_tick(tick),
        }
    }

    /// Creates a timestamp for the start of the simulation.
    pub fn start() -> Self {
        Self::at(0)
    }

    /// Returns the current year.
    pub fn year(&self) -> u64 {
        self.date.year
    }
}

/// Whole years elapsed between two ticks, rounded down.
pub fn years_between(from_tick: i64, to_tick: i64) -> i64 {
    (to_tick - from_tick).div_euclid(TICKS_PER_YEAR as i64)
}
