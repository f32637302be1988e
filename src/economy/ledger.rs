//! Applies resolved catches to the player's money, points, and debt.

use bevy::prelude::*;

use crate::shared::*;

/// Every landed catch pays down the debt directly: the money is earned and
/// the same amount comes off `current_debt`, which may go negative on
/// overpayment.
pub fn apply_catch_to_ledger(
    mut catch_events: EventReader<CatchLandedEvent>,
    mut economy: ResMut<PlayerEconomy>,
    mut daily: ResMut<DailyStats>,
) {
    for ev in catch_events.read() {
        let r = &ev.result;

        economy.money += r.money_earned;
        economy.total_money_earned += r.money_earned;
        economy.points += r.points_earned;
        economy.current_debt -= r.money_earned;
        daily.fish_caught_today += r.hook_count;

        info!(
            "[Economy] +${} / +{} pts — debt now {}, {} fish today.",
            r.money_earned, r.points_earned, economy.current_debt, daily.fish_caught_today
        );
    }
}
