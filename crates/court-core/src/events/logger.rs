//! Event Log
//!
//! Append-only JSONL court event log.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use court_events::{generate_event_id, CourtEvent, CourtEventKind, EventBuilder};

/// Writes court events to a JSONL file and hands out event ids
pub struct EventLog {
    writer: Option<BufWriter<File>>,
    event_count: u64,
    next_event_id: u64,
}

impl EventLog {
    /// Create a new event log writing to the specified path
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            event_count: 0,
            next_event_id: 1,
        })
    }

    /// Create a log that discards events (for testing)
    pub fn null() -> Self {
        Self {
            writer: None,
            event_count: 0,
            next_event_id: 1,
        }
    }

    /// Generate the next event ID
    pub fn next_id(&mut self) -> String {
        let id = generate_event_id(self.next_event_id);
        self.next_event_id += 1;
        id
    }

    /// Starts an event with the next id already assigned
    pub fn builder(&mut self, kind: CourtEventKind, territory_id: &str) -> EventBuilder {
        EventBuilder::new(kind, territory_id).id(self.next_id())
    }

    /// Get the current event count
    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Append an event. Write failures are reported but never undo the event.
    pub fn record(&mut self, event: &CourtEvent) {
        self.event_count += 1;
        if let Err(e) = self.write(event) {
            tracing::warn!("Failed to write event {}: {}", event.event_id, e);
        }
    }

    fn write(&mut self, event: &CourtEvent) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            let json = event.to_jsonl()?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::null()
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("writing", &self.writer.is_some())
            .field("event_count", &self.event_count)
            .finish()
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush event log: {}", e);
        }
    }
}
