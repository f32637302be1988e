//! Persistence for the stats record: lifetime catch tables, trophy flags,
//! and the high score. Run state (day, debt, gear) is deliberately not
//! saved; every launch starts a fresh run against a clean clock.
//!
//! Saving is fire-and-forget: a failed write is logged and reported via
//! `SaveCompleteEvent`, and play continues on the in-memory state.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use crate::shared::*;

pub const SAVE_VERSION: u32 = 1;

// ═══════════════════════════════════════════════════════════════════════
// SAVE FILE FORMAT
// ═══════════════════════════════════════════════════════════════════════

/// Everything that survives across launches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsRecord {
    pub version: u32,
    pub lifetime: LifetimeStats,
    pub trophies: TrophyFlags,
    pub high_score: i64,
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app
            // Load before the Loading-state data systems run, so the data
            // layer can grow the loaded tables to the catalog size.
            .add_systems(Startup, load_stats_on_startup)
            .add_systems(Update, handle_save_request);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FILESYSTEM HELPERS
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
fn saves_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    exe_dir.join("saves")
}

#[cfg(not(target_arch = "wasm32"))]
fn stats_path() -> PathBuf {
    saves_directory().join("stats.json")
}

#[cfg(not(target_arch = "wasm32"))]
fn write_stats_file(path: &Path, record: &StatsRecord) -> Result<(), String> {
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Could not create saves directory: {}", e))?;
        }
    }

    let json = serde_json::to_string_pretty(record)
        .map_err(|e| format!("Serialization failed: {}", e))?;

    // Write to a temp file first, then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &json)
        .map_err(|e| format!("Write failed for {}: {}", tmp_path.display(), e))?;
    fs::rename(&tmp_path, path).map_err(|e| format!("Rename failed: {}", e))?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn write_stats_file(_record: &StatsRecord) -> Result<(), String> {
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_stats_file(path: &Path) -> Result<StatsRecord, String> {
    if !path.exists() {
        return Err(format!("No stats file at {}", path.display()));
    }
    let json = fs::read_to_string(path)
        .map_err(|e| format!("Read failed for {}: {}", path.display(), e))?;
    let record: StatsRecord =
        serde_json::from_str(&json).map_err(|e| format!("Deserialization failed: {}", e))?;

    // Version check — future versions can add migration here
    if record.version != SAVE_VERSION {
        warn!(
            "[Save] Stats file has version {} but current version is {}. Loading anyway.",
            record.version, SAVE_VERSION
        );
    }

    Ok(record)
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Loads the stats record at launch. A missing or unreadable file is not
/// an error; the game simply starts with empty tables.
#[cfg(not(target_arch = "wasm32"))]
fn load_stats_on_startup(
    mut lifetime: ResMut<LifetimeStats>,
    mut trophies: ResMut<TrophyFlags>,
    mut high_score: ResMut<HighScore>,
) {
    match read_stats_file(&stats_path()) {
        Ok(record) => {
            *lifetime = record.lifetime;
            *trophies = record.trophies;
            high_score.0 = record.high_score;
            info!(
                "[Save] Stats loaded: {} fish caught lifetime, high score {}.",
                lifetime.num_all_caught, high_score.0
            );
        }
        Err(e) => {
            info!("[Save] No stats loaded ({}). Starting fresh.", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn load_stats_on_startup() {
    info!("[Save] Persistence not available in browser; starting fresh.");
}

/// Writes the stats record whenever anyone asks. Failure is logged and
/// surfaced, never fatal.
fn handle_save_request(
    mut save_events: EventReader<SaveRequestEvent>,
    mut complete_events: EventWriter<SaveCompleteEvent>,
    lifetime: Res<LifetimeStats>,
    trophies: Res<TrophyFlags>,
    high_score: Res<HighScore>,
) {
    if save_events.read().next().is_none() {
        return;
    }
    save_events.clear();

    let record = StatsRecord {
        version: SAVE_VERSION,
        lifetime: lifetime.clone(),
        trophies: *trophies,
        high_score: high_score.0,
    };

    #[cfg(not(target_arch = "wasm32"))]
    let result = write_stats_file(&stats_path(), &record);
    #[cfg(target_arch = "wasm32")]
    let result = write_stats_file(&record);

    match result {
        Ok(()) => {
            info!("[Save] Stats saved.");
            complete_events.send(SaveCompleteEvent {
                success: true,
                error_message: None,
            });
        }
        Err(e) => {
            warn!("[Save] Stats save FAILED: {}", e);
            complete_events.send(SaveCompleteEvent {
                success: false,
                error_message: Some(e),
            });
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn temp_stats_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("tideline_test_{}_{}", std::process::id(), name))
            .join("stats.json")
    }

    #[test]
    fn test_stats_round_trip() {
        let path = temp_stats_path("round_trip");

        let mut record = StatsRecord {
            version: SAVE_VERSION,
            ..Default::default()
        };
        record.lifetime.per_species = SpeciesStatsTable::sized_to(3);
        assert!(record.lifetime.record(SpeciesId(1), 12.5, 20.0));
        record.trophies.unlocked[4] = true;
        record.high_score = 9_000;

        write_stats_file(&path, &record).unwrap();
        let loaded = read_stats_file(&path).unwrap();

        assert_eq!(loaded.version, SAVE_VERSION);
        assert_eq!(loaded.lifetime.num_all_caught, 1);
        assert_eq!(loaded.lifetime.per_species.heaviest[1], 12.5);
        assert_eq!(loaded.lifetime.per_species.lightest[1], 12.5);
        assert!(loaded.trophies.unlocked[4]);
        assert!(!loaded.trophies.unlocked[0]);
        assert_eq!(loaded.high_score, 9_000);

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_missing_file_is_an_err_not_a_panic() {
        let path = temp_stats_path("missing").join("nope.json");
        assert!(read_stats_file(&path).is_err());
    }

    #[test]
    fn test_corrupt_file_is_an_err() {
        let path = temp_stats_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert!(read_stats_file(&path).is_err());
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let path = temp_stats_path("atomic");
        let record = StatsRecord {
            version: SAVE_VERSION,
            ..Default::default()
        };
        write_stats_file(&path, &record).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_min_sentinel_survives_serialization() {
        let path = temp_stats_path("sentinel");
        let mut record = StatsRecord {
            version: SAVE_VERSION,
            ..Default::default()
        };
        record.lifetime.per_species = SpeciesStatsTable::sized_to(1);
        write_stats_file(&path, &record).unwrap();
        let loaded = read_stats_file(&path).unwrap();
        assert_eq!(loaded.lifetime.lightest_all, STAT_MIN_SENTINEL);
        assert_eq!(loaded.lifetime.per_species.lightest[0], STAT_MIN_SENTINEL);
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
