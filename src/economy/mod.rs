//! Economy domain — the game clock, the money/points/debt ledger, catch
//! statistics, day-end evaluation, and the upgrade shop.
//!
//! Everything here mutates `PlayerEconomy` and friends in response to
//! shared events; no other domain writes to those resources.

use bevy::prelude::*;

use crate::shared::*;

// ─── Sub-modules ────────────────────────────────────────────────────────────
mod clock;
mod day_end;
mod ledger;
mod stats;
mod upgrades;

pub use clock::*;
pub use day_end::*;
pub use ledger::*;
pub use stats::*;
pub use upgrades::*;

// ─── Plugin ─────────────────────────────────────────────────────────────────

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app
            // A reel resolved on the last tick of the day must reach the
            // ledger before the verdict: fishing, then ledger/stats, then
            // the clock and its day-end evaluation.
            .configure_sets(
                Update,
                (PlaySet::Fishing, PlaySet::Ledger, PlaySet::Clock).chain(),
            )
            .add_systems(
                Update,
                (ledger::apply_catch_to_ledger, stats::record_catch_stats)
                    .in_set(PlaySet::Ledger)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (clock::tick_game_clock, day_end::evaluate_day_end)
                    .chain()
                    .in_set(PlaySet::Clock)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                upgrades::handle_buy_upgrade.run_if(in_state(GameState::Shop)),
            )
            .add_systems(
                Update,
                day_end::handle_start_next_day.run_if(in_state(GameState::DaySummary)),
            )
            .add_systems(
                Update,
                day_end::handle_continue_game.run_if(in_state(GameState::Victory)),
            );
    }
}
