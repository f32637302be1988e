use bevy::prelude::*;

use crate::shared::*;

// ─── Sub-modules ────────────────────────────────────────────────────────────
mod resolve;
mod session;

pub use resolve::*;
pub use session::*;

// ─── Plugin ─────────────────────────────────────────────────────────────────

pub struct FishingPlugin;

impl Plugin for FishingPlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources
            .init_resource::<FishingSession>()
            // Systems that run while out on the water. Ordering matters:
            // commands are translated from raw input first, then the bite
            // timer fires, then the bite window resolves — so a window
            // expiry is always processed before a reel from the same tick.
            // The whole chain sits in PlaySet::Fishing so a catch on the
            // 20:00-crossing tick settles before the day-end verdict.
            .add_systems(
                Update,
                (
                    session::translate_fishing_input,
                    session::handle_cast_command,
                    session::handle_retract_command,
                    session::update_bite_timer,
                    session::update_bite_window,
                    session::handle_catch_panel_closed,
                )
                    .chain()
                    .in_set(PlaySet::Fishing)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(OnEnter(GameState::Playing), session::restore_casting_on_enter)
            // Forced stop: leaving the water for any reason (day end, shop,
            // defeat) discards in-flight timers with no partial catch.
            .add_systems(OnExit(GameState::Playing), session::cancel_session_on_exit);
    }
}

// ─── Fishing Session Resource ────────────────────────────────────────────────

/// Phase of the fishing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FishingPhase {
    #[default]
    Idle,
    /// Line is in the water, waiting for a bite.
    WaitingForBite,
    /// Fish on — within the perfect window (reaction bonus applies).
    BitePerfect,
    /// Fish on — perfect window lapsed, reel still valid until escape.
    BiteLate,
}

impl FishingPhase {
    pub fn is_biting(self) -> bool {
        matches!(self, FishingPhase::BitePerfect | FishingPhase::BiteLate)
    }
}

/// One casting attempt. At most one session is active per player; the
/// `phase`/`can_cast` pair is the mutual-exclusion guard against a second
/// cast starting while one is unresolved.
#[derive(Resource, Debug)]
pub struct FishingSession {
    pub phase: FishingPhase,
    /// Casting permission. Cleared while the catch panel is open and while
    /// the day is over; restored by `CatchPanelClosedEvent` / next morning.
    pub can_cast: bool,
    /// The species that will bite (or is biting) on this cast.
    pub hooked_species: Option<SpeciesId>,
    /// Counts down to the bite while waiting.
    pub bite_timer: Option<Timer>,
    /// Seconds since the bite started; compared against the window bounds.
    pub reaction_elapsed: f32,
}

impl Default for FishingSession {
    fn default() -> Self {
        Self {
            phase: FishingPhase::Idle,
            can_cast: true,
            hooked_species: None,
            bite_timer: None,
            reaction_elapsed: 0.0,
        }
    }
}

impl FishingSession {
    /// Drops all in-flight timers and returns to Idle. Does not touch
    /// `can_cast`; the caller decides whether casting stays allowed.
    pub fn cancel(&mut self) {
        self.phase = FishingPhase::Idle;
        self.hooked_species = None;
        self.bite_timer = None;
        self.reaction_elapsed = 0.0;
    }
}
