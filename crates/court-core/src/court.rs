//! Court State
//!
//! The [`Court`] resource owns every character, territory, faction and
//! succession record, plus the event log and narrative sink that outcomes
//! are reported to.

use bevy_ecs::prelude::*;
use std::collections::BTreeMap;

use court_events::{CourtEvent, CourtEventKind, MemoryType, NarrativeMemory, Severity, SuccessionEvent};

use crate::components::{
    Character, CharacterId, DeedType, Plot, PlotType, PoliticsRegistry, Role, TerritoryRegistry,
};
use crate::error::{CourtError, CourtResult};
use crate::events::{EventLog, MemoryJournal, NarrativeSink};

/// Owns character records. Dead characters stay for historical reference.
#[derive(Debug, Clone, Default)]
pub struct CharacterStore {
    characters: BTreeMap<CharacterId, Character>,
    next_sequence: u64,
}

impl CharacterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next unused character id
    pub fn next_id(&mut self) -> CharacterId {
        self.next_sequence += 1;
        CharacterId::from_sequence(self.next_sequence)
    }

    pub fn insert(&mut self, character: Character) {
        self.characters.insert(character.id.clone(), character);
    }

    pub fn get(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.get(id)
    }

    pub fn get_mut(&mut self, id: &CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(id)
    }

    /// Looks up a character that must exist and be alive.
    pub fn living(&self, id: &CharacterId) -> CourtResult<&Character> {
        let character = self
            .characters
            .get(id)
            .ok_or_else(|| CourtError::CharacterNotFound(id.0.clone()))?;
        if !character.alive {
            return Err(CourtError::CharacterDead(id.0.clone()));
        }
        Ok(character)
    }

    pub fn living_mut(&mut self, id: &CharacterId) -> CourtResult<&mut Character> {
        let character = self
            .characters
            .get_mut(id)
            .ok_or_else(|| CourtError::CharacterNotFound(id.0.clone()))?;
        if !character.alive {
            return Err(CourtError::CharacterDead(id.0.clone()));
        }
        Ok(character)
    }

    pub fn all(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    pub fn living_in<'a>(&'a self, territory_id: &'a str) -> impl Iterator<Item = &'a Character> {
        self.characters
            .values()
            .filter(move |c| c.alive && c.territory_id == territory_id)
    }

    /// Ids of every living character, in id order
    pub fn living_ids(&self) -> Vec<CharacterId> {
        self.characters
            .values()
            .filter(|c| c.alive)
            .map(|c| c.id.clone())
            .collect()
    }

    pub fn living_ids_in(&self, territory_id: &str) -> Vec<CharacterId> {
        self.living_in(territory_id).map(|c| c.id.clone()).collect()
    }

    pub fn ruler_of<'a>(&'a self, territory_id: &'a str) -> Option<&'a Character> {
        self.living_in(territory_id).find(|c| c.role == Role::Ruler)
    }

    pub fn heir_of<'a>(&'a self, territory_id: &'a str) -> Option<&'a Character> {
        self.living_in(territory_id).find(|c| c.role == Role::Heir)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

/// The whole court simulation state
#[derive(Resource)]
pub struct Court {
    pub characters: CharacterStore,
    pub territories: TerritoryRegistry,
    pub politics: PoliticsRegistry,
    successions: Vec<SuccessionEvent>,
    log: EventLog,
    narrative: Box<dyn NarrativeSink>,
}

impl Default for Court {
    fn default() -> Self {
        Self::new()
    }
}

impl Court {
    /// An empty court with a discarding event log and an in-memory journal
    pub fn new() -> Self {
        Self {
            characters: CharacterStore::new(),
            territories: TerritoryRegistry::new(),
            politics: PoliticsRegistry::new(),
            successions: Vec::new(),
            log: EventLog::null(),
            narrative: Box::new(MemoryJournal::new()),
        }
    }

    pub fn with_event_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }

    pub fn with_narrative_sink(mut self, sink: impl NarrativeSink + 'static) -> Self {
        self.narrative = Box::new(sink);
        self
    }

    /// Every ruler transition so far, oldest first
    pub fn successions(&self) -> &[SuccessionEvent] {
        &self.successions
    }

    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    pub fn flush_events(&mut self) -> std::io::Result<()> {
        self.log.flush()
    }

    /// Appends a deed to a living character's bounded log.
    pub fn add_deed(
        &mut self,
        character_id: &CharacterId,
        tick: u64,
        description: impl Into<String>,
        deed_type: DeedType,
    ) -> CourtResult<()> {
        self.characters
            .living_mut(character_id)?
            .add_deed(tick, description, deed_type);
        Ok(())
    }

    /// Starts a scheme. Fails if the character is missing, dead, or already
    /// running a plot of this type.
    pub fn start_plot(
        &mut self,
        character_id: &CharacterId,
        plot_type: PlotType,
        target_id: Option<CharacterId>,
        tick: u64,
    ) -> CourtResult<()> {
        let character = self.characters.living_mut(character_id)?;
        character.add_plot(Plot::new(plot_type, target_id, tick))?;
        tracing::info!("{} began a {} plot", character.display_name(), plot_type);
        Ok(())
    }

    /// Adds a conspirator to another character's running plot. A plotter
    /// cannot conspire with themselves.
    pub fn join_plot(
        &mut self,
        character_id: &CharacterId,
        plotter_id: &CharacterId,
        plot_type: PlotType,
    ) -> CourtResult<()> {
        if character_id == plotter_id {
            return Err(CourtError::SelfConspiracy(character_id.0.clone()));
        }
        self.characters.living(character_id)?;
        let plotter = self.characters.living_mut(plotter_id)?;
        let plot = plotter
            .plot_mut(plot_type)
            .ok_or_else(|| CourtError::PlotNotFound {
                character_id: plotter_id.0.clone(),
                plot_type,
            })?;
        plot.conspirators.insert(character_id.clone());
        tracing::debug!("{} joined {}'s {} plot", character_id, plotter_id, plot_type);
        Ok(())
    }

    /// Builds, records and returns an event log entry.
    pub(crate) fn emit(
        &mut self,
        kind: CourtEventKind,
        territory_id: &str,
        tick: u64,
        actors: &[&CharacterId],
        description: impl Into<String>,
    ) -> CourtEvent {
        let severity = kind.default_severity();
        self.emit_with_severity(kind, severity, territory_id, tick, actors, description)
    }

    pub(crate) fn emit_with_severity(
        &mut self,
        kind: CourtEventKind,
        severity: Severity,
        territory_id: &str,
        tick: u64,
        actors: &[&CharacterId],
        description: impl Into<String>,
    ) -> CourtEvent {
        let mut builder = self
            .log
            .builder(kind, territory_id)
            .tick(tick)
            .severity(severity)
            .description(description);
        for actor in actors {
            builder = builder.actor(actor.as_str());
        }
        let event = builder.build();
        self.log.record(&event);
        event
    }

    /// Hands a memory to the narrative sink. Failures are logged and dropped.
    pub(crate) fn remember(&mut self, emotional_weight: f32, description: impl Into<String>, memory_type: MemoryType) {
        let memory = NarrativeMemory::new(emotional_weight, description, memory_type);
        if let Err(e) = self.narrative.record(memory) {
            tracing::warn!("Narrative sink rejected a memory: {}", e);
        }
    }

    pub(crate) fn record_succession(&mut self, succession: SuccessionEvent) {
        self.successions.push(succession);
    }
}
