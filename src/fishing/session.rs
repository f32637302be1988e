//! Cast, bite timer, bite window, and cancellation logic.
//!
//! All waiting is modeled as deadline fields advanced by `Res<Time>`;
//! nothing here suspends. The bite loop mirrors the rod's behavior on the
//! water: cast → wait 2-3 s → fish on → 0.3 s perfect window → 1.2 s late
//! window → fish escapes and the loop re-arms, forever, until the player
//! reels, retracts, or the session is cancelled from outside.

use bevy::prelude::*;
use rand::Rng;

use super::resolve::resolve_catch;
use super::{FishingPhase, FishingSession};
use crate::shared::*;

// ─── Constants ───────────────────────────────────────────────────────────────

const BITE_DELAY_MIN: f32 = 2.0;
const BITE_DELAY_MAX: f32 = 3.0;
/// Reeling within this window of the bite grants the timing bonus.
pub const PERFECT_WINDOW_SECS: f32 = 0.3;
/// Total time a fish stays on the line before escaping.
pub const TOTAL_BITE_WINDOW_SECS: f32 = 1.5;

// ─── Input translation ───────────────────────────────────────────────────────

/// Maps raw input onto fishing commands based on the current phase, the
/// same way the rod reads: one button casts and reels, Escape retracts.
/// The UI and tests can also send the command events directly.
pub fn translate_fishing_input(
    session: Res<FishingSession>,
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut cast_writer: EventWriter<CastCommandEvent>,
    mut reel_writer: EventWriter<ReelCommandEvent>,
    mut retract_writer: EventWriter<RetractCommandEvent>,
) {
    let primary = mouse.just_pressed(MouseButton::Left) || keyboard.just_pressed(KeyCode::Space);

    if primary {
        match session.phase {
            FishingPhase::Idle if session.can_cast => {
                cast_writer.send(CastCommandEvent);
            }
            FishingPhase::BitePerfect | FishingPhase::BiteLate => {
                reel_writer.send(ReelCommandEvent);
            }
            _ => {}
        }
    }

    if keyboard.just_pressed(KeyCode::Escape) && session.phase == FishingPhase::WaitingForBite {
        retract_writer.send(RetractCommandEvent);
    }
}

// ─── Cast ────────────────────────────────────────────────────────────────────

/// Starts a cast: picks the species that will bite and schedules the bite.
/// Any cast request outside Idle-with-permission is a logged no-op.
pub fn handle_cast_command(
    mut cast_events: EventReader<CastCommandEvent>,
    mut session: ResMut<FishingSession>,
    catalog: Res<SpeciesCatalog>,
) {
    for _ev in cast_events.read() {
        if session.phase != FishingPhase::Idle || !session.can_cast {
            continue;
        }

        let Some(species_id) = catalog.random_species() else {
            warn!("[Fishing] Cast requested but the species catalog is empty.");
            continue;
        };

        arm_bite(&mut session, species_id);
        info!(
            "[Fishing] Cast! Waiting for a bite (species #{}).",
            species_id.index()
        );
    }
}

/// Puts the session into WaitingForBite with a fresh 2-3 s bite delay.
/// Shared by cast and by the escape loop restart.
fn arm_bite(session: &mut FishingSession, species_id: SpeciesId) {
    let wait = rand::thread_rng().gen_range(BITE_DELAY_MIN..BITE_DELAY_MAX);
    session.phase = FishingPhase::WaitingForBite;
    session.hooked_species = Some(species_id);
    session.bite_timer = Some(Timer::from_seconds(wait, TimerMode::Once));
    session.reaction_elapsed = 0.0;
}

// ─── Retract ────────────────────────────────────────────────────────────────

/// Pulling the line in before a bite. No catch, no penalty; casting
/// permission is immediately restored. Invalid in any other phase.
pub fn handle_retract_command(
    mut retract_events: EventReader<RetractCommandEvent>,
    mut session: ResMut<FishingSession>,
) {
    for _ev in retract_events.read() {
        if session.phase != FishingPhase::WaitingForBite {
            continue;
        }
        session.cancel();
        session.can_cast = true;
        info!("[Fishing] Line retracted before a bite.");
    }
}

// ─── Bite timer ──────────────────────────────────────────────────────────────

/// Counts down the bite delay; when it fires, the fish is on the line and
/// the reaction counter starts from zero.
pub fn update_bite_timer(
    mut session: ResMut<FishingSession>,
    time: Res<Time>,
    mut alert_writer: EventWriter<BiteAlertEvent>,
) {
    if session.phase != FishingPhase::WaitingForBite {
        return;
    }

    let fired = if let Some(ref mut timer) = session.bite_timer {
        timer.tick(time.delta());
        timer.just_finished()
    } else {
        false
    };

    if fired {
        session.phase = FishingPhase::BitePerfect;
        session.bite_timer = None;
        session.reaction_elapsed = 0.0;
        alert_writer.send(BiteAlertEvent {
            active: true,
            late: false,
        });
        info!("[Fishing] Fish on!");
    }
}

// ─── Bite window ─────────────────────────────────────────────────────────────

/// Advances the reaction counter and resolves the bite window.
///
/// Order within a tick: window expiry is evaluated BEFORE the reel command
/// is read, so a reel arriving on the expiry tick loses and the fish
/// escapes. Escape re-arms the outer waiting loop with a fresh species.
pub fn update_bite_window(
    mut session: ResMut<FishingSession>,
    mut reel_events: EventReader<ReelCommandEvent>,
    time: Res<Time>,
    catalog: Res<SpeciesCatalog>,
    gear: Res<GearUpgrades>,
    economy: Res<PlayerEconomy>,
    mut alert_writer: EventWriter<BiteAlertEvent>,
    mut catch_writer: EventWriter<CatchLandedEvent>,
) {
    if !session.phase.is_biting() {
        reel_events.clear();
        return;
    }

    session.reaction_elapsed += time.delta_secs();

    // Escape takes precedence over a same-tick reel.
    if session.reaction_elapsed >= TOTAL_BITE_WINDOW_SECS {
        reel_events.clear();
        let next_species = catalog.random_species();
        alert_writer.send(BiteAlertEvent {
            active: false,
            late: false,
        });
        match next_species {
            Some(id) => {
                arm_bite(&mut session, id);
                info!("[Fishing] Fish got away! Waiting for another bite.");
            }
            None => {
                // Catalog vanished mid-session; degrade to an idle rod.
                warn!("[Fishing] Fish escaped and no species available to re-arm.");
                session.cancel();
                session.can_cast = true;
            }
        }
        return;
    }

    if session.phase == FishingPhase::BitePerfect
        && session.reaction_elapsed > PERFECT_WINDOW_SECS
    {
        session.phase = FishingPhase::BiteLate;
        alert_writer.send(BiteAlertEvent {
            active: true,
            late: true,
        });
    }

    if reel_events.read().next().is_none() {
        return;
    }
    reel_events.clear();

    // ── Reel: resolve the catch ────────────────────────────────────────
    let reaction = session.reaction_elapsed;
    let species_id = session.hooked_species;
    let species = species_id.and_then(|id| catalog.get(id));

    let Some(species) = species else {
        // MissingData: abort the catch, restore casting, mutate nothing.
        warn!(
            "[Fishing] Hooked species {:?} not found in catalog; catch aborted.",
            species_id
        );
        session.cancel();
        session.can_cast = true;
        alert_writer.send(BiteAlertEvent {
            active: false,
            late: false,
        });
        return;
    };

    let (result, slots) = resolve_catch(
        species,
        gear.hook_count(),
        reaction,
        gear.weight_mult,
        gear.length_mult,
        economy.prestige_level,
    );

    info!(
        "[Fishing] Reeled {} x{} in {:.2}s — ${} and {} points.",
        species.name, result.hook_count, reaction, result.money_earned, result.points_earned
    );

    // Casting stays off until the catch panel is dismissed.
    session.cancel();
    session.can_cast = false;
    alert_writer.send(BiteAlertEvent {
        active: false,
        late: false,
    });
    catch_writer.send(CatchLandedEvent { result, slots });
}

// ─── Panel / cancellation ────────────────────────────────────────────────────

/// Catch panel dismissed — the rod is free again.
pub fn handle_catch_panel_closed(
    mut panel_events: EventReader<CatchPanelClosedEvent>,
    mut session: ResMut<FishingSession>,
) {
    for _ev in panel_events.read() {
        if session.phase == FishingPhase::Idle {
            session.can_cast = true;
        }
    }
}

/// Fresh morning or back from the shop — the rod is always usable when
/// play resumes, even if a catch panel was open when the day ended.
pub fn restore_casting_on_enter(mut session: ResMut<FishingSession>) {
    session.can_cast = true;
}

/// Forced stop on leaving the water (day end, shop, defeat screen).
/// Synchronous and total: in-flight timers are discarded and no catch can
/// resolve afterwards, since the biting systems only run while Playing.
pub fn cancel_session_on_exit(
    mut session: ResMut<FishingSession>,
    mut alert_writer: EventWriter<BiteAlertEvent>,
) {
    if session.phase != FishingPhase::Idle {
        info!("[Fishing] Session cancelled mid-cast; discarding in-flight bite.");
        session.cancel();
        alert_writer.send(BiteAlertEvent {
            active: false,
            late: false,
        });
    }
}
