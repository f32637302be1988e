//! Catch resolution — pure yield math, no ECS access.
//!
//! Called from the bite-window system once a reel lands. Every hook slot
//! rolls its own weight and length; slot 0 is the fish shown on the catch
//! panel, and the money is the floor of the summed weight+length across
//! all slots.

use rand::Rng;

use super::session::PERFECT_WINDOW_SECS;
use crate::shared::*;

/// Yield bonus for reeling inside the perfect window.
pub const PERFECT_TIMING_MULTIPLIER: f32 = 1.2;

/// Per-slot randomization range against the species base stats.
const ROLL_MIN: f32 = 0.8;
const ROLL_MAX: f32 = 1.2;

/// 1.2 for a perfect reel, 1.0 for anything slower that still landed
/// inside the late window.
pub fn timing_multiplier(reaction_elapsed: f32) -> f32 {
    if reaction_elapsed <= PERFECT_WINDOW_SECS {
        PERFECT_TIMING_MULTIPLIER
    } else {
        1.0
    }
}

/// floor(hook_count / 2 + 0.5) in integer arithmetic.
pub fn base_points(hook_count: u32) -> i64 {
    ((hook_count + 1) / 2) as i64
}

/// Points for one catch at the given prestige level.
pub fn points_for_catch(hook_count: u32, prestige_level: u32) -> i64 {
    base_points(hook_count) * prestige_point_factor(prestige_level)
}

/// Rolls the full catch for one resolved reel.
///
/// Returns the result for the ledger/panel plus the per-slot samples that
/// feed the stat tables.
pub fn resolve_catch(
    species: &FishSpecies,
    hook_count: u32,
    reaction_elapsed: f32,
    weight_mult: f32,
    length_mult: f32,
    prestige_level: u32,
) -> (CatchResult, Vec<HookSample>) {
    let mut rng = rand::thread_rng();
    let timing = timing_multiplier(reaction_elapsed);

    let mut slots = Vec::with_capacity(hook_count as usize);
    let mut total_value = 0.0_f32;

    for _ in 0..hook_count {
        let weight = species.base_weight * rng.gen_range(ROLL_MIN..ROLL_MAX) * timing * weight_mult;
        let length = species.base_length * rng.gen_range(ROLL_MIN..ROLL_MAX) * timing * length_mult;
        total_value += weight + length;
        slots.push(HookSample { weight, length });
    }

    let display = slots.first().copied().unwrap_or(HookSample {
        weight: 0.0,
        length: 0.0,
    });

    let result = CatchResult {
        species_id: species.id,
        display_weight: display.weight,
        display_length: display.length,
        hook_count,
        total_value,
        money_earned: total_value.floor() as i64,
        points_earned: points_for_catch(hook_count, prestige_level),
    };

    (result, slots)
}
