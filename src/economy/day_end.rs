//! Day-end evaluation and the day/prestige lifecycle.
//!
//! The verdict at 20:00 is a three-way branch: debt cleared → Victory,
//! final day still in debt → Defeat, otherwise the run continues through
//! the day summary into the next morning.

use bevy::prelude::*;

use crate::shared::*;

/// Base point bonus for the first banked day; each further day pays half
/// the previous one, floored.
const VICTORY_BONUS_BASE: i64 = 250;

// ─── Pure arithmetic ─────────────────────────────────────────────────────────

/// Victory points for finishing early: 250 + 125 + 62 + … over the days
/// remaining, all scaled by the prestige factor. Zero days left, zero
/// bonus.
pub fn victory_bonus(days_remaining: i64, prestige_level: u32) -> i64 {
    let mut bonus = 0;
    let mut step = VICTORY_BONUS_BASE;
    for _ in 0..days_remaining {
        bonus += step;
        step /= 2;
    }
    bonus * prestige_point_factor(prestige_level)
}

/// Overnight interest on an outstanding balance: 5 % floored, and nothing
/// at all once the debt is cleared (or overpaid into the negative).
pub fn interest_charge(current_debt: i64) -> i64 {
    if current_debt <= 0 {
        return 0;
    }
    ((current_debt as f64) * (INTEREST_RATE - 1.0)).floor() as i64
}

// ─── Systems ─────────────────────────────────────────────────────────────────

/// Routes the 20:00 verdict. Exactly one outcome per day end; stray
/// duplicate events in the same frame are discarded.
pub fn evaluate_day_end(
    mut day_end_events: EventReader<DayEndEvent>,
    mut economy: ResMut<PlayerEconomy>,
    mut high_score: ResMut<HighScore>,
    mut outcome_writer: EventWriter<GameOutcomeEvent>,
    mut save_writer: EventWriter<SaveRequestEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let day = match day_end_events.read().next() {
        Some(ev) => ev.day,
        None => return,
    };
    day_end_events.clear();

    if economy.current_debt <= 0 {
        // ── Victory: debt cleared, remaining days become banked bonus ──
        let days_remaining = FINAL_DAY.saturating_sub(day) as i64;
        let bonus = victory_bonus(days_remaining, economy.prestige_level);
        economy.points += bonus;
        economy.extra_days_banked += days_remaining;
        economy.final_score = economy.total_money_earned * (1 + economy.extra_days_banked);

        if economy.final_score > high_score.0 {
            high_score.0 = economy.final_score;
            info!("[Economy] New high score: {}!", high_score.0);
        }

        info!(
            "[Economy] Debt cleared on day {} — victory! {} days banked, +{} bonus points, final score {}.",
            day, days_remaining, bonus, economy.final_score
        );
        outcome_writer.send(GameOutcomeEvent {
            outcome: GameOutcome::Victory,
        });
        save_writer.send(SaveRequestEvent);
        next_state.set(GameState::Victory);
    } else if day >= FINAL_DAY {
        info!(
            "[Economy] Day {} over with {} still owed — the boat is forfeit.",
            day, economy.current_debt
        );
        outcome_writer.send(GameOutcomeEvent {
            outcome: GameOutcome::Defeat,
        });
        save_writer.send(SaveRequestEvent);
        next_state.set(GameState::Defeat);
    } else {
        // ── Ordinary evening: 25 % point interest, then the summary ───
        let point_interest = economy.points / 4;
        economy.points += point_interest;
        info!(
            "[Economy] Day {} banked. +{} point interest ({} total).",
            day, point_interest, economy.points
        );
        save_writer.send(SaveRequestEvent);
        next_state.set(GameState::DaySummary);
    }
}

/// Day summary dismissed: advance the calendar, charge overnight interest
/// on whatever debt is left, and head back out at 08:00.
pub fn handle_start_next_day(
    mut next_day_events: EventReader<StartNextDayEvent>,
    mut economy: ResMut<PlayerEconomy>,
    mut clock: ResMut<GameClock>,
    mut daily: ResMut<DailyStats>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if next_day_events.read().next().is_none() {
        return;
    }
    next_day_events.clear();

    economy.day += 1;
    let charge = interest_charge(economy.current_debt);
    if charge > 0 {
        economy.current_debt += charge;
        info!(
            "[Economy] Overnight interest: +{} (debt now {}).",
            charge, economy.current_debt
        );
    }

    clock.reset_to_morning();
    *daily = DailyStats::default();

    info!("[Economy] Day {} begins.", economy.day);
    next_state.set(GameState::Playing);
}

/// Victory rolled into a prestige run: tenfold debt, day one, everything
/// else — money, points, gear, stats, banked days — carries over.
pub fn handle_continue_game(
    mut continue_events: EventReader<ContinueGameEvent>,
    mut economy: ResMut<PlayerEconomy>,
    mut clock: ResMut<GameClock>,
    mut daily: ResMut<DailyStats>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if continue_events.read().next().is_none() {
        return;
    }
    continue_events.clear();

    economy.prestige_level += 1;
    economy.base_debt *= PRESTIGE_DEBT_MULTIPLIER;
    economy.current_debt = economy.base_debt;
    economy.day = 1;

    clock.reset_to_morning();
    *daily = DailyStats::default();

    info!(
        "[Economy] Prestige {} — new debt {}, point yield x{}.",
        economy.prestige_level,
        economy.current_debt,
        prestige_point_factor(economy.prestige_level)
    );
    next_state.set(GameState::Playing);
}
