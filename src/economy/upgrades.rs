//! The upgrade shop. Points in, better rod out.

use bevy::prelude::*;

use crate::shared::*;

/// Multiplier upgrades stack x1.5 per level.
const MULT_STEP: f32 = 1.5;

/// Handles purchase requests from the shop screen. Cost is `2^level`
/// points for the requested track; an unaffordable purchase is a logged
/// no-op and nothing changes.
pub fn handle_buy_upgrade(
    mut buy_events: EventReader<BuyUpgradeEvent>,
    mut economy: ResMut<PlayerEconomy>,
    mut gear: ResMut<GearUpgrades>,
) {
    for ev in buy_events.read() {
        let cost = gear.upgrade_cost(ev.kind);
        if economy.points < cost {
            info!(
                "[Economy] Can't afford {:?} upgrade ({} points needed, {} held).",
                ev.kind, cost, economy.points
            );
            continue;
        }

        economy.points -= cost;
        match ev.kind {
            UpgradeKind::Weight => {
                gear.weight_mult *= MULT_STEP;
                gear.weight_level += 1;
            }
            UpgradeKind::Length => {
                gear.length_mult *= MULT_STEP;
                gear.length_level += 1;
            }
            UpgradeKind::Hooks => {
                gear.hook_level += 1;
            }
        }

        info!(
            "[Economy] Bought {:?} upgrade (level {}) for {} points; {} left.",
            ev.kind,
            gear.level_of(ev.kind),
            cost,
            economy.points
        );
    }
}
