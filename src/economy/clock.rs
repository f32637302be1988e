//! The in-game clock. 08:00 to 20:00, then the day is over.

use bevy::prelude::*;

use crate::shared::*;

/// Advances game time while out on the water and fires `DayEndEvent`
/// exactly once when the clock crosses 20:00. The clock is clamped at the
/// end-of-day mark so a slow frame cannot fire twice before the state
/// transition lands.
pub fn tick_game_clock(
    mut clock: ResMut<GameClock>,
    time: Res<Time>,
    economy: Res<PlayerEconomy>,
    mut day_end_writer: EventWriter<DayEndEvent>,
) {
    if clock.game_minutes >= DAY_END_MINUTES {
        return;
    }

    clock.game_minutes += time.delta_secs() * clock.time_scale;

    if clock.game_minutes >= DAY_END_MINUTES {
        clock.game_minutes = DAY_END_MINUTES;
        info!("[Economy] 20:00 — day {} is over.", economy.day);
        day_end_writer.send(DayEndEvent { day: economy.day });
    }
}
