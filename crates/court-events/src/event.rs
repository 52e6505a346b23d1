//! Event Types
//!
//! The append-only court narrative feed. Every death, discovery, execution
//! and succession writes exactly one entry.

use serde::{Deserialize, Serialize};

use crate::CourtTimestamp;

/// Primary event categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtEventKind {
    /// A character died of old age or illness
    Death,
    /// A character began scheming
    PlotStarted,
    /// The ruler uncovered a scheme
    PlotDiscovered,
    /// A plotter was put to death by the crown
    Execution,
    /// A scheme reached completion and took effect
    PlotSucceeded,
    /// A scheme reached completion and fell apart
    PlotFailed,
    /// Power passed to a new ruler
    Succession,
    /// An open rebellion was raised
    Rebellion,
    /// Prosperity nudged a character's temperament
    TraitDrift,
}

impl CourtEventKind {
    /// Returns the severity this kind is logged at by default.
    pub fn default_severity(&self) -> Severity {
        match self {
            CourtEventKind::PlotStarted | CourtEventKind::TraitDrift => Severity::Info,
            CourtEventKind::Death
            | CourtEventKind::PlotDiscovered
            | CourtEventKind::PlotFailed => Severity::Warning,
            CourtEventKind::Execution
            | CourtEventKind::PlotSucceeded
            | CourtEventKind::Succession
            | CourtEventKind::Rebellion => Severity::Critical,
        }
    }
}

/// Severity tag carried by every log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// A single entry in the court event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourtEvent {
    /// Unique identifier (e.g., "evt_00000042")
    pub event_id: String,
    /// When the event occurred
    pub timestamp: CourtTimestamp,
    /// Territory whose court produced the event
    pub territory_id: String,
    pub kind: CourtEventKind,
    pub severity: Severity,
    /// Character ids involved, principal actor first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actors: Vec<String>,
    /// Narrative text
    pub description: String,
}

impl CourtEvent {
    /// Returns true if the character is among the actors.
    pub fn involves(&self, character_id: &str) -> bool {
        self.actors.iter().any(|a| a == character_id)
    }

    /// Serializes the event to a JSON line (for JSONL format).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes an event from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Generates an event ID with the given sequence number.
pub fn generate_event_id(sequence: u64) -> String {
    format!("evt_{:08}", sequence)
}

/// Builder for creating events with a fluent API.
///
/// # Example
///
/// ```
/// use court_events::*;
///
/// let event = EventBuilder::new(CourtEventKind::Death, "kingsreach")
///     .id(generate_event_id(1))
///     .tick(120)
///     .actor("chr_00000001")
///     .description("Queen Ada died in her sleep")
///     .build();
/// assert_eq!(event.severity, Severity::Warning);
/// ```
#[derive(Debug, Clone)]
pub struct EventBuilder {
    event_id: Option<String>,
    tick: u64,
    territory_id: String,
    kind: CourtEventKind,
    severity: Option<Severity>,
    actors: Vec<String>,
    description: String,
}

impl EventBuilder {
    /// Creates a new EventBuilder for a kind of event in a territory.
    pub fn new(kind: CourtEventKind, territory_id: impl Into<String>) -> Self {
        Self {
            event_id: None,
            tick: 0,
            territory_id: territory_id.into(),
            kind,
            severity: None,
            actors: Vec::new(),
            description: String::new(),
        }
    }

    /// Sets the event ID.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.event_id = Some(id.into());
        self
    }

    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    /// Overrides the kind's default severity.
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Adds an involved character.
    pub fn actor(mut self, character_id: impl Into<String>) -> Self {
        self.actors.push(character_id.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Builds the event. A missing id becomes "evt_00000000".
    pub fn build(self) -> CourtEvent {
        CourtEvent {
            event_id: self.event_id.unwrap_or_else(|| generate_event_id(0)),
            timestamp: CourtTimestamp::at(self.tick),
            territory_id: self.territory_id,
            severity: self.severity.unwrap_or_else(|| self.kind.default_severity()),
            kind: self.kind,
            actors: self.actors,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> CourtEvent {
        EventBuilder::new(CourtEventKind::PlotDiscovered, "kingsreach")
            .id("evt_00000007")
            .tick(30)
            .actor("chr_00000001")
            .actor("chr_00000003")
            .description("Queen Ada uncovered General Bram's coup")
            .build()
    }

    #[test]
    fn test_builder_defaults_severity_from_kind() {
        let event = sample_event();
        assert_eq!(event.severity, Severity::Warning);
        assert_eq!(event.timestamp.date.to_string(), "year_3.month_07");
    }

    #[test]
    fn test_builder_severity_override() {
        let event = EventBuilder::new(CourtEventKind::Death, "kingsreach")
            .severity(Severity::Critical)
            .build();
        assert_eq!(event.severity, Severity::Critical);
        assert_eq!(event.event_id, "evt_00000000");
    }

    #[test]
    fn test_involves() {
        let event = sample_event();
        assert!(event.involves("chr_00000003"));
        assert!(!event.involves("chr_00000002"));
    }

    #[test]
    fn test_jsonl_shape() {
        let line = sample_event().to_jsonl().unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains(r#""kind":"plot_discovered""#));
        assert!(line.contains(r#""severity":"warning""#));

        let parsed = CourtEvent::from_jsonl(&line).unwrap();
        assert_eq!(parsed, sample_event());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }
}
