//! Snapshot Generation
//!
//! Periodic JSON dumps of the whole court.

use bevy_ecs::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use court_events::CourtTimestamp;

use crate::court::Court;

use super::schemas::*;

/// Resource to track snapshot generation
#[derive(Resource, Debug)]
pub struct SnapshotGenerator {
    next_snapshot_id: u64,
    snapshot_interval: u64,
    last_snapshot_tick: Option<u64>,
    snapshot_count: u64,
}

impl SnapshotGenerator {
    pub fn new(snapshot_interval: u64) -> Self {
        Self {
            next_snapshot_id: 1,
            snapshot_interval,
            last_snapshot_tick: None,
            snapshot_count: 0,
        }
    }

    /// True on every interval boundary not yet captured. An interval of 0 disables periodic snapshots.
    pub fn should_snapshot(&self, current_tick: u64) -> bool {
        self.snapshot_interval > 0
            && current_tick % self.snapshot_interval == 0
            && self.last_snapshot_tick != Some(current_tick)
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("snap_{:06}", self.next_snapshot_id);
        self.next_snapshot_id += 1;
        id
    }

    pub fn mark_snapshot(&mut self, tick: u64) {
        self.last_snapshot_tick = Some(tick);
        self.snapshot_count += 1;
    }

    pub fn snapshot_count(&self) -> u64 {
        self.snapshot_count
    }
}

/// Captures the court at the given tick
pub fn generate_snapshot(court: &Court, snapshot_id: String, tick: u64, triggered_by: &str) -> CourtSnapshot {
    let territories = court
        .territories
        .all()
        .map(|territory| {
            let members = court
                .characters
                .living_in(&territory.id)
                .map(|c| CharacterSnapshot {
                    id: c.id.0.clone(),
                    name: c.name.clone(),
                    title: c.title.clone(),
                    role: c.role,
                    age: c.age_at(tick),
                    dynasty: c.dynasty_name.clone(),
                    dynasty_generation: c.dynasty_generation,
                    traits: c.traits.clone(),
                    emotions: c.emotions.clone(),
                    secret_goal: c.secret_goal,
                    plots: c.plots.clone(),
                    addiction: c.addiction,
                    deed_count: c.deeds.len(),
                })
                .collect();
            TerritorySnapshot {
                territory: territory.clone(),
                ruler_id: court.characters.ruler_of(&territory.id).map(|r| r.id.0.clone()),
                court: members,
            }
        })
        .collect();

    let fallen_rulers = court
        .characters
        .all()
        .filter_map(|c| {
            c.reign_summary.as_ref().map(|reign| FallenRulerSnapshot {
                id: c.id.0.clone(),
                territory_id: c.territory_id.clone(),
                death_tick: c.death_tick,
                reign: reign.clone(),
            })
        })
        .collect();

    CourtSnapshot {
        snapshot_id,
        timestamp: CourtTimestamp::at(tick),
        triggered_by: triggered_by.to_string(),
        territories,
        factions: court.politics.factions().to_vec(),
        rebellions: court.politics.rebellions().to_vec(),
        successions: court.successions().to_vec(),
        fallen_rulers,
    }
}

/// Write snapshot to file
pub fn write_snapshot(snapshot: &CourtSnapshot, path: impl AsRef<Path>) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write snapshot to `<dir>/snapshot_<tick>.json`
pub fn write_snapshot_to_dir(snapshot: &CourtSnapshot, dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
    let path = dir
        .as_ref()
        .join(format!("snapshot_{}.json", snapshot.timestamp.tick));
    write_snapshot(snapshot, &path)?;
    Ok(path)
}

/// Write `<dir>/current_state.json` (overwrites each time)
pub fn write_current_state(snapshot: &CourtSnapshot, dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
    let path = dir.as_ref().join("current_state.json");
    write_snapshot(snapshot, &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Territory;
    use crate::rng::SimRng;

    #[test]
    fn test_should_snapshot() {
        let mut generator = SnapshotGenerator::new(12);
        assert!(generator.should_snapshot(0));
        assert!(!generator.should_snapshot(5));
        generator.mark_snapshot(12);
        assert!(!generator.should_snapshot(12));
        assert!(generator.should_snapshot(24));
        assert_eq!(generator.snapshot_count(), 1);
        assert!(!SnapshotGenerator::new(0).should_snapshot(0));
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut court = Court::new();
        let mut rng = SimRng::seeded(3);
        court.seed_court(&mut rng, Territory::new("kingsreach", "Kingsreach"), 0);

        let mut generator = SnapshotGenerator::new(12);
        let snapshot = generate_snapshot(&court, generator.next_id(), 24, "test");
        assert_eq!(snapshot.territories.len(), 1);
        assert_eq!(snapshot.territories[0].court.len(), 4);
        assert!(snapshot.territories[0].ruler_id.is_some());

        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        assert!(json.contains("snap_000001"));
        assert!(json.contains("year_3.month_01"));

        let parsed: CourtSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.snapshot_id, "snap_000001");
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let court = Court::new();
        let snapshot = generate_snapshot(&court, "snap_000001".to_string(), 36, "test");

        let path = write_snapshot_to_dir(&snapshot, dir.path()).unwrap();
        assert!(path.ends_with("snapshot_36.json"));
        write_current_state(&snapshot, dir.path()).unwrap();
        assert!(dir.path().join("current_state.json").exists());
    }
}
