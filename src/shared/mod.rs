//! Shared resources, events, and states for Tideline.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    MainMenu,
    /// Out on the water, clock running, casting allowed.
    Playing,
    Shop,
    /// End-of-day summary before the next morning.
    DaySummary,
    Victory,
    Defeat,
}

/// Update-loop ordering while out on the water: catches resolve first, the
/// ledger and stat tables settle next, and only then may the clock end the
/// day. Without this a reel on the 20:00-crossing tick could be judged
/// against stale debt and its payout dropped with the state change.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaySet {
    Fishing,
    Ledger,
    Clock,
}

// ═══════════════════════════════════════════════════════════════════════
// SPECIES CATALOG
// ═══════════════════════════════════════════════════════════════════════

/// Validated index into the species catalog. Stat tables are sized to the
/// catalog, so a `SpeciesId` that came out of the catalog is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpeciesId(pub usize);

impl SpeciesId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct FishSpecies {
    pub id: SpeciesId,
    pub name: String,
    pub base_weight: f32,
    pub base_length: f32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct SpeciesCatalog {
    pub species: Vec<FishSpecies>,
}

impl SpeciesCatalog {
    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn get(&self, id: SpeciesId) -> Option<&FishSpecies> {
        self.species.get(id.index())
    }

    /// Uniform random pick over the catalog. `None` only if the catalog
    /// was never populated.
    pub fn random_species(&self) -> Option<SpeciesId> {
        use rand::Rng;
        if self.species.is_empty() {
            return None;
        }
        let idx = rand::thread_rng().gen_range(0..self.species.len());
        Some(SpeciesId(idx))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// GAME CLOCK
// ═══════════════════════════════════════════════════════════════════════

/// Game-minutes per real second. At 10.0 a full 08:00-20:00 day takes
/// 72 real seconds.
pub const TIME_SCALE: f32 = 10.0;
pub const DAY_START_MINUTES: f32 = 8.0 * 60.0;
pub const DAY_END_MINUTES: f32 = 20.0 * 60.0;

#[derive(Resource, Debug, Clone)]
pub struct GameClock {
    /// Minutes since midnight, fractional. Runs DAY_START..DAY_END.
    pub game_minutes: f32,
    pub time_scale: f32,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            game_minutes: DAY_START_MINUTES,
            time_scale: TIME_SCALE,
        }
    }
}

impl GameClock {
    pub fn reset_to_morning(&mut self) {
        self.game_minutes = DAY_START_MINUTES;
    }

    /// "HH:MM" label for the HUD.
    pub fn clock_label(&self) -> String {
        let total = self.game_minutes.max(0.0) as u32;
        format!("{:02}:{:02}", total / 60, total % 60)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER ECONOMY
// ═══════════════════════════════════════════════════════════════════════

pub const STARTING_DEBT: i64 = 2_000;
pub const FINAL_DAY: u32 = 7;
pub const INTEREST_RATE: f64 = 1.05;

/// Each prestige cycle multiplies point yield by 5 and debt by 10.
pub const PRESTIGE_POINT_BASE: i64 = 5;
pub const PRESTIGE_DEBT_MULTIPLIER: i64 = 10;

pub fn prestige_point_factor(prestige_level: u32) -> i64 {
    PRESTIGE_POINT_BASE.pow(prestige_level)
}

/// All progression state for one playthrough. Mutated only by economy
/// systems; survives scene changes. A prestige reset touches only debt
/// and day.
#[derive(Resource, Debug, Clone)]
pub struct PlayerEconomy {
    pub money: i64,
    pub total_money_earned: i64,
    pub points: i64,
    pub base_debt: i64,
    /// May go negative on overpayment; never accrues interest once <= 0.
    pub current_debt: i64,
    pub prestige_level: u32,
    pub day: u32,
    pub extra_days_banked: i64,
    pub final_score: i64,
}

impl Default for PlayerEconomy {
    fn default() -> Self {
        Self {
            money: 0,
            total_money_earned: 0,
            points: 0,
            base_debt: STARTING_DEBT,
            current_debt: STARTING_DEBT,
            prestige_level: 0,
            day: 1,
            extra_days_banked: 0,
            final_score: 0,
        }
    }
}

/// Best final score across all playthroughs. Loaded from and written to
/// the stats save alongside the lifetime tables.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct HighScore(pub i64);

// ═══════════════════════════════════════════════════════════════════════
// GEAR UPGRADES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpgradeKind {
    Weight,
    Length,
    Hooks,
}

/// Rod upgrades bought with points at the shop. Levels start at 1; the
/// cost of the next level is `2^level` points.
#[derive(Resource, Debug, Clone)]
pub struct GearUpgrades {
    pub weight_mult: f32,
    pub length_mult: f32,
    pub weight_level: u32,
    pub length_level: u32,
    pub hook_level: u32,
}

impl Default for GearUpgrades {
    fn default() -> Self {
        Self {
            weight_mult: 1.0,
            length_mult: 1.0,
            weight_level: 1,
            length_level: 1,
            hook_level: 1,
        }
    }
}

impl GearUpgrades {
    /// One fish per hook slot on a successful reel.
    pub fn hook_count(&self) -> u32 {
        self.hook_level
    }

    pub fn level_of(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::Weight => self.weight_level,
            UpgradeKind::Length => self.length_level,
            UpgradeKind::Hooks => self.hook_level,
        }
    }

    pub fn upgrade_cost(&self, kind: UpgradeKind) -> i64 {
        2_i64.pow(self.level_of(kind))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CATCH RESULT
// ═══════════════════════════════════════════════════════════════════════

/// One hook slot's randomized roll. Every slot feeds the stat tables;
/// slot 0 doubles as the display fish on the catch panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookSample {
    pub weight: f32,
    pub length: f32,
}

/// Outcome of one resolved reel. Produced by the catch resolver, consumed
/// immediately by the economy ledger and the catch panel; never retained.
#[derive(Debug, Clone)]
pub struct CatchResult {
    pub species_id: SpeciesId,
    pub display_weight: f32,
    pub display_length: f32,
    pub hook_count: u32,
    pub total_value: f32,
    pub money_earned: i64,
    pub points_earned: i64,
}

// ═══════════════════════════════════════════════════════════════════════
// CATCH STATISTICS
// ═══════════════════════════════════════════════════════════════════════

/// Sentinel for "no catch recorded yet" in the min-tracking fields.
pub const STAT_MIN_SENTINEL: f32 = f32::MAX;

/// Per-species extremes, arrays sized exactly to the catalog. All access
/// is bounds-checked; `record` refuses an out-of-range index rather than
/// panicking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesStatsTable {
    pub num_caught: Vec<u32>,
    pub heaviest: Vec<f32>,
    pub lightest: Vec<f32>,
    pub longest: Vec<f32>,
    pub shortest: Vec<f32>,
}

impl SpeciesStatsTable {
    pub fn sized_to(species_count: usize) -> Self {
        Self {
            num_caught: vec![0; species_count],
            heaviest: vec![0.0; species_count],
            lightest: vec![STAT_MIN_SENTINEL; species_count],
            longest: vec![0.0; species_count],
            shortest: vec![STAT_MIN_SENTINEL; species_count],
        }
    }

    pub fn species_count(&self) -> usize {
        self.num_caught.len()
    }

    /// Grows (never shrinks) the arrays to cover `species_count` entries.
    /// Used when a loaded save predates newly added species.
    pub fn ensure_capacity(&mut self, species_count: usize) {
        if self.num_caught.len() < species_count {
            self.num_caught.resize(species_count, 0);
            self.heaviest.resize(species_count, 0.0);
            self.lightest.resize(species_count, STAT_MIN_SENTINEL);
            self.longest.resize(species_count, 0.0);
            self.shortest.resize(species_count, STAT_MIN_SENTINEL);
        }
    }

    /// Folds one fish into the per-species extremes. Returns false if the
    /// index is out of range (nothing is mutated in that case).
    pub fn record(&mut self, species: SpeciesId, weight: f32, length: f32) -> bool {
        let i = species.index();
        if i >= self.num_caught.len() {
            return false;
        }
        self.num_caught[i] = self.num_caught[i].saturating_add(1);
        self.heaviest[i] = self.heaviest[i].max(weight);
        self.lightest[i] = self.lightest[i].min(weight);
        self.longest[i] = self.longest[i].max(length);
        self.shortest[i] = self.shortest[i].min(length);
        true
    }
}

/// Never resets within a playthrough; survives prestige.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct LifetimeStats {
    pub num_all_caught: u32,
    pub heaviest_all: f32,
    pub lightest_all: f32,
    pub longest_all: f32,
    pub shortest_all: f32,
    pub per_species: SpeciesStatsTable,
}

impl Default for LifetimeStats {
    fn default() -> Self {
        Self {
            num_all_caught: 0,
            heaviest_all: 0.0,
            lightest_all: STAT_MIN_SENTINEL,
            longest_all: 0.0,
            shortest_all: STAT_MIN_SENTINEL,
            per_species: SpeciesStatsTable::default(),
        }
    }
}

impl LifetimeStats {
    pub fn record(&mut self, species: SpeciesId, weight: f32, length: f32) -> bool {
        if !self.per_species.record(species, weight, length) {
            return false;
        }
        self.num_all_caught = self.num_all_caught.saturating_add(1);
        self.heaviest_all = self.heaviest_all.max(weight);
        self.lightest_all = self.lightest_all.min(weight);
        self.longest_all = self.longest_all.max(length);
        self.shortest_all = self.shortest_all.min(length);
        true
    }
}

/// Resets every morning.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DailyStats {
    pub fish_caught_today: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// TROPHIES
// ═══════════════════════════════════════════════════════════════════════

pub const NUM_TROPHIES: usize = 12;

/// The 12 trophy-case flags. The core persists and round-trips these; the
/// trophy screen owns unlock checks.
#[derive(Resource, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrophyFlags {
    pub unlocked: [bool; NUM_TROPHIES],
}

impl Default for TrophyFlags {
    fn default() -> Self {
        Self {
            unlocked: [false; NUM_TROPHIES],
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// Player asked to cast. Honored only from an idle rod with casting allowed.
#[derive(Event, Debug, Clone)]
pub struct CastCommandEvent;

/// Player asked to reel. Honored only while a fish is on the line.
#[derive(Event, Debug, Clone)]
pub struct ReelCommandEvent;

/// Player asked to pull the line back in before a bite.
#[derive(Event, Debug, Clone)]
pub struct RetractCommandEvent;

/// Bobber alert state for the presentation layer.
#[derive(Event, Debug, Clone)]
pub struct BiteAlertEvent {
    pub active: bool,
    /// The perfect window has lapsed; the alert restyles but the fish is
    /// still on the line.
    pub late: bool,
}

/// One resolved reel. `result` goes to the ledger and the catch panel;
/// `slots` feed the stat tables (one entry per hooked fish).
#[derive(Event, Debug, Clone)]
pub struct CatchLandedEvent {
    pub result: CatchResult,
    pub slots: Vec<HookSample>,
}

/// Catch panel dismissed; casting may resume.
#[derive(Event, Debug, Clone)]
pub struct CatchPanelClosedEvent;

/// The clock crossed 20:00 on the given day.
#[derive(Event, Debug, Clone)]
pub struct DayEndEvent {
    pub day: u32,
}

/// Day summary dismissed; advance to the next morning.
#[derive(Event, Debug, Clone)]
pub struct StartNextDayEvent;

/// Player chose to roll a victory into a prestige run.
#[derive(Event, Debug, Clone)]
pub struct ContinueGameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Victory,
    Defeat,
}

/// Terminal day-end verdict, emitted alongside the state transition.
#[derive(Event, Debug, Clone)]
pub struct GameOutcomeEvent {
    pub outcome: GameOutcome,
}

/// Shop purchase request from the UI.
#[derive(Event, Debug, Clone)]
pub struct BuyUpgradeEvent {
    pub kind: UpgradeKind,
}

/// Ask the save plugin to persist the stats record.
#[derive(Event, Debug, Clone)]
pub struct SaveRequestEvent;

/// Save finished (success or failure) — fire-and-forget from the core's
/// point of view, surfaced for logging/UI.
#[derive(Event, Debug, Clone)]
pub struct SaveCompleteEvent {
    pub success: bool,
    pub error_message: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_label_formats_minutes() {
        let mut clock = GameClock::default();
        assert_eq!(clock.clock_label(), "08:00");
        clock.game_minutes = 19.0 * 60.0 + 5.0;
        assert_eq!(clock.clock_label(), "19:05");
    }

    #[test]
    fn test_species_table_records_extremes() {
        let mut table = SpeciesStatsTable::sized_to(3);
        assert!(table.record(SpeciesId(1), 10.0, 5.0));
        assert!(table.record(SpeciesId(1), 8.0, 7.0));
        assert_eq!(table.num_caught[1], 2);
        assert_eq!(table.heaviest[1], 10.0);
        assert_eq!(table.lightest[1], 8.0);
        assert_eq!(table.longest[1], 7.0);
        assert_eq!(table.shortest[1], 5.0);
    }

    #[test]
    fn test_species_table_rejects_out_of_range() {
        let mut table = SpeciesStatsTable::sized_to(2);
        assert!(!table.record(SpeciesId(2), 1.0, 1.0));
        assert_eq!(table.num_caught, vec![0, 0]);
    }

    #[test]
    fn test_lifetime_stats_all_or_nothing_on_bad_index() {
        let mut stats = LifetimeStats {
            per_species: SpeciesStatsTable::sized_to(1),
            ..Default::default()
        };
        assert!(!stats.record(SpeciesId(5), 3.0, 2.0));
        assert_eq!(stats.num_all_caught, 0);
        assert_eq!(stats.heaviest_all, 0.0);
    }

    #[test]
    fn test_upgrade_cost_doubles_per_level() {
        let mut gear = GearUpgrades::default();
        assert_eq!(gear.upgrade_cost(UpgradeKind::Weight), 2);
        gear.weight_level = 3;
        assert_eq!(gear.upgrade_cost(UpgradeKind::Weight), 8);
    }

    #[test]
    fn test_prestige_point_factor() {
        assert_eq!(prestige_point_factor(0), 1);
        assert_eq!(prestige_point_factor(1), 5);
        assert_eq!(prestige_point_factor(3), 125);
    }

    #[test]
    fn test_ensure_capacity_grows_without_losing_data() {
        let mut table = SpeciesStatsTable::sized_to(2);
        table.record(SpeciesId(0), 4.0, 3.0);
        table.ensure_capacity(4);
        assert_eq!(table.species_count(), 4);
        assert_eq!(table.num_caught[0], 1);
        assert_eq!(table.lightest[3], STAT_MIN_SENTINEL);
    }
}
